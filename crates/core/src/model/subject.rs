use std::fmt;

use thiserror::Error;

use crate::model::ids::SubjectId;
use crate::model::question::ExamType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubjectError {
    #[error("subject name cannot be empty")]
    EmptyName,

    #[error("a subject must have at least one question")]
    NoQuestions,
}

/// Catalogue entry for a browsable practice subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    id: SubjectId,
    name: String,
    exam_type: ExamType,
    time_limit_minutes: u32,
    is_free: bool,
    total_questions: u32,
    icon: String,
}

impl Subject {
    /// Build a validated catalogue entry.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::EmptyName` for a blank name and
    /// `SubjectError::NoQuestions` when the question count is zero.
    pub fn new(
        id: SubjectId,
        name: impl Into<String>,
        exam_type: ExamType,
        time_limit_minutes: u32,
        is_free: bool,
        total_questions: u32,
        icon: impl Into<String>,
    ) -> Result<Self, SubjectError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SubjectError::EmptyName);
        }
        if total_questions == 0 {
            return Err(SubjectError::NoQuestions);
        }

        Ok(Self {
            id,
            name,
            exam_type,
            time_limit_minutes,
            is_free,
            total_questions,
            icon: icon.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> SubjectId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn exam_type(&self) -> ExamType {
        self.exam_type
    }

    #[must_use]
    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_minutes
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.is_free
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }
}

/// What the user picked on the home screen: which paper to practice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExamSelection {
    pub exam_type: ExamType,
    pub subject: String,
    pub year: i32,
}

impl ExamSelection {
    #[must_use]
    pub fn new(exam_type: ExamType, subject: impl Into<String>, year: i32) -> Self {
        Self {
            exam_type,
            subject: subject.into(),
            year,
        }
    }
}

impl fmt::Display for ExamSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.exam_type, self.subject, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_rejects_empty_name() {
        let err = Subject::new(
            SubjectId::generate(),
            "  ",
            ExamType::Waec,
            45,
            true,
            20,
            "book",
        )
        .unwrap_err();
        assert_eq!(err, SubjectError::EmptyName);
    }

    #[test]
    fn subject_rejects_zero_questions() {
        let err = Subject::new(
            SubjectId::generate(),
            "English",
            ExamType::Waec,
            45,
            true,
            0,
            "book",
        )
        .unwrap_err();
        assert_eq!(err, SubjectError::NoQuestions);
    }

    #[test]
    fn selection_displays_like_a_paper_title() {
        let selection = ExamSelection::new(ExamType::Jamb, "Mathematics", 2023);
        assert_eq!(selection.to_string(), "JAMB Mathematics 2023");
    }
}
