use chrono::{DateTime, Utc};

use exam_core::model::{OptionLabel, ScoreReport};
use services::{ExamSession, SessionTick};

use super::time_fmt::format_countdown;

/// One selectable option row, ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: OptionLabel,
    pub text: String,
    pub selected: bool,
}

/// View-model over a running exam session.
///
/// Everything here is synchronous; the view owns the 1 Hz tick task and the
/// save call, and routes user intent through these methods.
pub struct ExamVm {
    session: ExamSession,
}

impl ExamVm {
    #[must_use]
    pub fn new(session: ExamSession) -> Self {
        Self { session }
    }

    //
    // ─── INTENT ────────────────────────────────────────────────────────────────
    //

    /// Record an answer. Ignored once the question's time has run out —
    /// an expired question is locked.
    pub fn select(&mut self, label: OptionLabel) {
        if self.time_up() {
            return;
        }
        self.session.select_answer(label);
    }

    /// Move forward, gated on `can_advance`.
    pub fn next(&mut self, now: DateTime<Utc>) {
        if self.session.can_advance() {
            self.session.advance(now);
        }
    }

    pub fn previous(&mut self) {
        self.session.retreat();
    }

    pub fn retake(&mut self, now: DateTime<Utc>) {
        self.session.retake(now);
    }

    /// Drive the session by one second.
    pub fn tick(&mut self, now: DateTime<Utc>) -> SessionTick {
        self.session.tick(now)
    }

    //
    // ─── READOUTS ──────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn time_up(&self) -> bool {
        self.session.timer().is_expired()
    }

    #[must_use]
    pub fn countdown_label(&self) -> String {
        format_countdown(self.session.timer().remaining_secs())
    }

    /// "Question 2 of 5".
    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.session.progress();
        format!("Question {} of {}", progress.index + 1, progress.total)
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        self.session.current_question().prompt()
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let question = self.session.current_question();
        let chosen = self.session.ledger().get(question.id());
        question
            .options()
            .iter()
            .map(|(label, text)| OptionVm {
                label: *label,
                text: text.clone(),
                selected: chosen == Some(*label),
            })
            .collect()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.session.can_advance()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.session.current_index() > 0
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.session.current_index() + 1 == self.session.total_questions()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.session.is_completed()
    }

    /// Score the run; meaningful for display once completed.
    #[must_use]
    pub fn report(&self) -> ScoreReport {
        self.session.score()
    }

    #[must_use]
    pub fn session(&self) -> &ExamSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use exam_core::model::{ExamSelection, ExamType, Question, QuestionId};
    use exam_core::time::fixed_now;
    use services::SessionConfig;

    fn build_vm(count: usize) -> ExamVm {
        let questions = (0..count)
            .map(|n| {
                let options: BTreeMap<OptionLabel, String> = OptionLabel::ALL
                    .iter()
                    .map(|label| (*label, format!("option {label}")))
                    .collect();
                Question::new(
                    QuestionId::generate(),
                    "English",
                    ExamType::Waec,
                    2023,
                    format!("Question {n}?"),
                    options,
                    OptionLabel::A,
                    "",
                )
                .unwrap()
            })
            .collect();
        let session = ExamSession::new(
            ExamSelection::new(ExamType::Waec, "English", 2023),
            questions,
            SessionConfig::default(),
            fixed_now(),
        )
        .unwrap();
        ExamVm::new(session)
    }

    #[test]
    fn selection_is_reflected_in_the_option_rows() {
        let mut vm = build_vm(2);
        assert!(vm.options().iter().all(|option| !option.selected));

        vm.select(OptionLabel::C);
        let selected: Vec<_> = vm
            .options()
            .into_iter()
            .filter(|option| option.selected)
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, OptionLabel::C);
    }

    #[test]
    fn expired_questions_are_locked() {
        let mut vm = build_vm(2);
        for _ in 0..60 {
            vm.tick(fixed_now());
        }
        assert!(vm.time_up());
        assert!(vm.can_advance());

        vm.select(OptionLabel::A);
        assert!(vm.options().iter().all(|option| !option.selected));
    }

    #[test]
    fn next_is_gated_until_answered() {
        let mut vm = build_vm(2);
        vm.next(fixed_now());
        assert_eq!(vm.progress_label(), "Question 1 of 2");

        vm.select(OptionLabel::A);
        vm.next(fixed_now());
        assert_eq!(vm.progress_label(), "Question 2 of 2");
        assert!(vm.is_last_question());
        assert!(vm.can_retreat());
    }

    #[test]
    fn countdown_label_tracks_the_timer() {
        let mut vm = build_vm(1);
        assert_eq!(vm.countdown_label(), "1:00");
        for _ in 0..15 {
            vm.tick(fixed_now());
        }
        assert_eq!(vm.countdown_label(), "0:45");
    }
}
