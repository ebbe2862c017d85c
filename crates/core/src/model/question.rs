use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── EXAM TYPE ─────────────────────────────────────────────────────────────────
//

/// The examination body a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExamType {
    #[serde(rename = "WAEC")]
    Waec,
    #[serde(rename = "JAMB")]
    Jamb,
    #[serde(rename = "NECO")]
    Neco,
}

impl ExamType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamType::Waec => "WAEC",
            ExamType::Jamb => "JAMB",
            ExamType::Neco => "NECO",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown exam type: {raw}")]
pub struct ParseExamTypeError {
    raw: String,
}

impl FromStr for ExamType {
    type Err = ParseExamTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WAEC" => Ok(ExamType::Waec),
            "JAMB" => Ok(ExamType::Jamb),
            "NECO" => Ok(ExamType::Neco),
            _ => Err(ParseExamTypeError { raw: s.to_string() }),
        }
    }
}

//
// ─── OPTION LABEL ──────────────────────────────────────────────────────────────
//

/// Label identifying one of the four answer choices.
///
/// Ordering follows the printed order on an exam sheet (A before B, and so on),
/// which makes `BTreeMap<OptionLabel, String>` iterate in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// All labels in display order.
    pub const ALL: [OptionLabel; 4] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown option label: {raw}")]
pub struct ParseOptionLabelError {
    raw: String,
}

impl FromStr for OptionLabel {
    type Err = ParseOptionLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            _ => Err(ParseOptionLabelError { raw: s.to_string() }),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct option {label} is not among the question's options")]
    MissingCorrectOption { label: OptionLabel },
}

/// A single multiple-choice question.
///
/// Immutable once constructed; the provider layer builds questions when a
/// session is seeded and they are never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    subject: String,
    exam_type: ExamType,
    year: i32,
    prompt: String,
    options: BTreeMap<OptionLabel, String>,
    correct_option: OptionLabel,
    explanation: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// `explanation` may be empty but is always a string, never absent.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt,
    /// `QuestionError::TooFewOptions` for fewer than two options, and
    /// `QuestionError::MissingCorrectOption` when the correct label has no
    /// option text.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: QuestionId,
        subject: impl Into<String>,
        exam_type: ExamType,
        year: i32,
        prompt: impl Into<String>,
        options: BTreeMap<OptionLabel, String>,
        correct_option: OptionLabel,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }
        if !options.contains_key(&correct_option) {
            return Err(QuestionError::MissingCorrectOption {
                label: correct_option,
            });
        }

        Ok(Self {
            id,
            subject: subject.into(),
            exam_type,
            year,
            prompt,
            options,
            correct_option,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn exam_type(&self) -> ExamType {
        self.exam_type
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Options keyed by label, iterating in display order.
    #[must_use]
    pub fn options(&self) -> &BTreeMap<OptionLabel, String> {
        &self.options
    }

    #[must_use]
    pub fn option_text(&self, label: OptionLabel) -> Option<&str> {
        self.options.get(&label).map(String::as_str)
    }

    #[must_use]
    pub fn correct_option(&self) -> OptionLabel {
        self.correct_option
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(texts: &[(&OptionLabel, &str)]) -> BTreeMap<OptionLabel, String> {
        texts
            .iter()
            .map(|(label, text)| (**label, (*text).to_string()))
            .collect()
    }

    fn four_options() -> BTreeMap<OptionLabel, String> {
        options(&[
            (&OptionLabel::A, "submit"),
            (&OptionLabel::B, "submitted"),
            (&OptionLabel::C, "submitting"),
            (&OptionLabel::D, "submission"),
        ])
    }

    #[test]
    fn builds_a_valid_question() {
        let question = Question::new(
            QuestionId::generate(),
            "English",
            ExamType::Waec,
            2023,
            "Choose the option that best completes the sentence.",
            four_options(),
            OptionLabel::A,
            "After \"asked to\" we use the base form of the verb.",
        )
        .unwrap();

        assert_eq!(question.correct_option(), OptionLabel::A);
        assert_eq!(question.option_text(OptionLabel::B), Some("submitted"));
        assert_eq!(question.options().len(), 4);
    }

    #[test]
    fn rejects_blank_prompt() {
        let err = Question::new(
            QuestionId::generate(),
            "English",
            ExamType::Waec,
            2023,
            "   ",
            four_options(),
            OptionLabel::A,
            "",
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_correct_label_without_text() {
        let two = options(&[(&OptionLabel::A, "yes"), (&OptionLabel::B, "no")]);
        let err = Question::new(
            QuestionId::generate(),
            "English",
            ExamType::Neco,
            2023,
            "Pick one.",
            two,
            OptionLabel::D,
            "",
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::MissingCorrectOption { .. }));
    }

    #[test]
    fn option_labels_iterate_in_display_order() {
        let question = Question::new(
            QuestionId::generate(),
            "Mathematics",
            ExamType::Jamb,
            2023,
            "If 2x + 5 = 13, what is the value of x?",
            four_options(),
            OptionLabel::B,
            "Subtract 5 from both sides, then divide by 2.",
        )
        .unwrap();

        let labels: Vec<OptionLabel> = question.options().keys().copied().collect();
        assert_eq!(labels, OptionLabel::ALL.to_vec());
    }

    #[test]
    fn exam_type_parses_case_insensitively() {
        assert_eq!("waec".parse::<ExamType>().unwrap(), ExamType::Waec);
        assert_eq!("JAMB".parse::<ExamType>().unwrap(), ExamType::Jamb);
        assert!("GCSE".parse::<ExamType>().is_err());
    }

    #[test]
    fn option_label_round_trips_through_strings() {
        for label in OptionLabel::ALL {
            assert_eq!(label.as_str().parse::<OptionLabel>().unwrap(), label);
        }
    }
}
