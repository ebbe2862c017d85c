use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::question::ExamType;
use crate::model::score::ScoreReport;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct answers ({correct}) exceed questions answered ({answered})")]
    CountMismatch { correct: u32, answered: u32 },

    #[error("score percent must be <= 100, got {percent}")]
    ScoreOutOfRange { percent: u8 },
}

/// Summary of one completed exam session, as persisted to the data provider.
///
/// Both elapsed readings — whole seconds for display and whole floored
/// minutes for persistence — derive from the single stored timestamp pair.
/// Computing either from a fresh `now()` would let the two drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSummary {
    subject: String,
    exam_type: ExamType,
    questions_answered: u32,
    correct_answers: u32,
    score_percent: u8,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl AttemptSummary {
    /// Build a validated attempt summary.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::InvalidTimeRange` if `completed_at` precedes
    /// `started_at`, `AttemptError::CountMismatch` if more answers are
    /// correct than were given, and `AttemptError::ScoreOutOfRange` for a
    /// percent above 100.
    pub fn new(
        subject: impl Into<String>,
        exam_type: ExamType,
        questions_answered: u32,
        correct_answers: u32,
        score_percent: u8,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        if completed_at < started_at {
            return Err(AttemptError::InvalidTimeRange);
        }
        if correct_answers > questions_answered {
            return Err(AttemptError::CountMismatch {
                correct: correct_answers,
                answered: questions_answered,
            });
        }
        if score_percent > 100 {
            return Err(AttemptError::ScoreOutOfRange {
                percent: score_percent,
            });
        }

        Ok(Self {
            subject: subject.into(),
            exam_type,
            questions_answered,
            correct_answers,
            score_percent,
            started_at,
            completed_at,
        })
    }

    /// Build a summary from a finished session's score report.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::InvalidTimeRange` if `completed_at` precedes
    /// `started_at`.
    pub fn from_report(
        subject: impl Into<String>,
        exam_type: ExamType,
        report: &ScoreReport,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        Self::new(
            subject,
            exam_type,
            report.total_questions(),
            report.correct_count(),
            report.percentage(),
            started_at,
            completed_at,
        )
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
    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn score_percent(&self) -> u8 {
        self.score_percent
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Elapsed time in whole seconds, for display.
    #[must_use]
    pub fn elapsed_seconds(&self) -> i64 {
        (self.completed_at - self.started_at).num_seconds()
    }

    /// Elapsed time in whole minutes (floored), for persistence.
    #[must_use]
    pub fn time_taken_minutes(&self) -> i64 {
        self.elapsed_seconds() / 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn build_summary(elapsed_secs: i64) -> AttemptSummary {
        let started = fixed_now();
        AttemptSummary::new(
            "English",
            ExamType::Waec,
            5,
            4,
            80,
            started,
            started + Duration::seconds(elapsed_secs),
        )
        .unwrap()
    }

    #[test]
    fn rejects_completion_before_start() {
        let started = fixed_now();
        let err = AttemptSummary::new(
            "English",
            ExamType::Waec,
            5,
            4,
            80,
            started,
            started - Duration::seconds(1),
        )
        .unwrap_err();
        assert_eq!(err, AttemptError::InvalidTimeRange);
    }

    #[test]
    fn rejects_more_correct_than_answered() {
        let now = fixed_now();
        let err = AttemptSummary::new("English", ExamType::Waec, 3, 4, 80, now, now).unwrap_err();
        assert!(matches!(err, AttemptError::CountMismatch { .. }));
    }

    #[test]
    fn minutes_are_floored_seconds_over_sixty() {
        let summary = build_summary(219);
        assert_eq!(summary.elapsed_seconds(), 219);
        assert_eq!(summary.time_taken_minutes(), 3);
    }

    #[test]
    fn both_readings_come_from_the_same_pair() {
        for elapsed in [0_i64, 59, 60, 61, 3_599, 3_600] {
            let summary = build_summary(elapsed);
            assert_eq!(
                summary.time_taken_minutes(),
                summary.elapsed_seconds() / 60
            );
        }
    }
}
