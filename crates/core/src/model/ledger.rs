use std::collections::HashMap;

use crate::model::ids::QuestionId;
use crate::model::question::OptionLabel;

/// Per-session record of which option was chosen for each question.
///
/// Entries are upserted as the user answers or changes answers; nothing is
/// ever removed individually. The whole ledger is cleared only as part of a
/// full session reset (retake). The ledger does not check a label against the
/// question's actual option set — `OptionLabel` already closes that domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerLedger {
    answers: HashMap<QuestionId, OptionLabel>,
}

impl AnswerLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the chosen label for a question.
    pub fn record(&mut self, question_id: QuestionId, label: OptionLabel) {
        self.answers.insert(question_id, label);
    }

    /// The recorded label, or `None` when the question is unanswered.
    #[must_use]
    pub fn get(&self, question_id: QuestionId) -> Option<OptionLabel> {
        self.answers.get(&question_id).copied()
    }

    #[must_use]
    pub fn has(&self, question_id: QuestionId) -> bool {
        self.answers.contains_key(&question_id)
    }

    /// Number of questions with a recorded answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Drop every recorded answer. Only called when a session is reset.
    pub fn clear(&mut self) {
        self.answers.clear();
    }
}
