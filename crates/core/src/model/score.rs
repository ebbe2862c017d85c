use std::fmt;

use crate::model::ids::QuestionId;
use crate::model::ledger::AnswerLedger;
use crate::model::question::{OptionLabel, Question};

//
// ─── GRADE BAND ────────────────────────────────────────────────────────────────
//

/// Qualitative bucket derived from the percentage score.
///
/// Lower bounds are inclusive: exactly 80 is `Excellent`, exactly 79 is
/// `VeryGood`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeBand {
    Excellent,
    VeryGood,
    Good,
    Fair,
    NeedsImprovement,
}

impl GradeBand {
    #[must_use]
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            80.. => GradeBand::Excellent,
            70..=79 => GradeBand::VeryGood,
            60..=69 => GradeBand::Good,
            50..=59 => GradeBand::Fair,
            _ => GradeBand::NeedsImprovement,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            GradeBand::Excellent => "Excellent",
            GradeBand::VeryGood => "Very Good",
            GradeBand::Good => "Good",
            GradeBand::Fair => "Fair",
            GradeBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── REVIEW RECORDS ────────────────────────────────────────────────────────────
//

/// Post-completion view of one question: what was chosen, what was right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub question_id: QuestionId,
    pub prompt: String,
    pub chosen: Option<OptionLabel>,
    pub correct: OptionLabel,
    pub explanation: String,
    pub is_correct: bool,
}

/// Scored outcome of a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    correct_count: u32,
    total_questions: u32,
    percentage: u8,
    grade: GradeBand,
    reviews: Vec<ReviewRecord>,
}

impl ScoreReport {
    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Rounded percentage in `0..=100` (0.5 rounds up).
    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    #[must_use]
    pub fn grade(&self) -> GradeBand {
        self.grade
    }

    /// One record per question, in original question order.
    #[must_use]
    pub fn reviews(&self) -> &[ReviewRecord] {
        &self.reviews
    }
}

//
// ─── SCORER ────────────────────────────────────────────────────────────────────
//

/// Score a question set against the answers recorded in the ledger.
///
/// Pure and idempotent: the same `(questions, ledger)` pair always yields the
/// same report. Unanswered questions count as incorrect, never as errors.
/// Sessions are never built from an empty question list, but an empty slice
/// still yields a zeroed report rather than dividing by zero.
#[must_use]
pub fn score(questions: &[Question], ledger: &AnswerLedger) -> ScoreReport {
    let mut correct_count = 0_u32;
    let mut reviews = Vec::with_capacity(questions.len());

    for question in questions {
        let chosen = ledger.get(question.id());
        let is_correct = chosen == Some(question.correct_option());
        if is_correct {
            correct_count += 1;
        }
        reviews.push(ReviewRecord {
            question_id: question.id(),
            prompt: question.prompt().to_string(),
            chosen,
            correct: question.correct_option(),
            explanation: question.explanation().to_string(),
            is_correct,
        });
    }

    let total = u32::try_from(questions.len()).unwrap_or(u32::MAX);
    let percentage = if total == 0 {
        0
    } else {
        percentage_of(correct_count, total)
    };

    ScoreReport {
        correct_count,
        total_questions: total,
        percentage,
        grade: GradeBand::from_percentage(percentage),
        reviews,
    }
}

/// Standard rounding (0.5 rounds up), clamped to `0..=100`.
fn percentage_of(correct: u32, total: u32) -> u8 {
    let raw = (f64::from(correct) / f64::from(total)) * 100.0;
    let rounded = raw.round();
    if rounded >= 100.0 {
        100
    } else if rounded <= 0.0 {
        0
    } else {
        // Truncation is exact here: `rounded` is an integer in (0, 100).
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            rounded as u8
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::ExamType;
    use std::collections::BTreeMap;

    fn build_question(correct: OptionLabel) -> Question {
        let options: BTreeMap<OptionLabel, String> = OptionLabel::ALL
            .iter()
            .map(|label| (*label, format!("option {label}")))
            .collect();
        Question::new(
            QuestionId::generate(),
            "English",
            ExamType::Waec,
            2023,
            "Pick the right option.",
            options,
            correct,
            "Because it is.",
        )
        .unwrap()
    }

    fn build_questions(corrects: &[OptionLabel]) -> Vec<Question> {
        corrects.iter().map(|c| build_question(*c)).collect()
    }

    #[test]
    fn grades_follow_inclusive_lower_bounds() {
        assert_eq!(GradeBand::from_percentage(80), GradeBand::Excellent);
        assert_eq!(GradeBand::from_percentage(79), GradeBand::VeryGood);
        assert_eq!(GradeBand::from_percentage(70), GradeBand::VeryGood);
        assert_eq!(GradeBand::from_percentage(60), GradeBand::Good);
        assert_eq!(GradeBand::from_percentage(50), GradeBand::Fair);
        assert_eq!(GradeBand::from_percentage(49), GradeBand::NeedsImprovement);
        assert_eq!(GradeBand::from_percentage(0), GradeBand::NeedsImprovement);
    }

    #[test]
    fn four_of_five_is_excellent() {
        let questions = build_questions(&[OptionLabel::A; 5]);
        let mut ledger = AnswerLedger::new();
        for question in questions.iter().take(4) {
            ledger.record(question.id(), OptionLabel::A);
        }
        ledger.record(questions[4].id(), OptionLabel::B);

        let report = score(&questions, &ledger);
        assert_eq!(report.correct_count(), 4);
        assert_eq!(report.percentage(), 80);
        assert_eq!(report.grade(), GradeBand::Excellent);
    }

    #[test]
    fn three_of_five_is_good() {
        let questions = build_questions(&[OptionLabel::C; 5]);
        let mut ledger = AnswerLedger::new();
        for question in questions.iter().take(3) {
            ledger.record(question.id(), OptionLabel::C);
        }

        let report = score(&questions, &ledger);
        assert_eq!(report.percentage(), 60);
        assert_eq!(report.grade(), GradeBand::Good);
    }

    #[test]
    fn zero_of_five_needs_improvement() {
        let questions = build_questions(&[OptionLabel::A; 5]);
        let ledger = AnswerLedger::new();

        let report = score(&questions, &ledger);
        assert_eq!(report.correct_count(), 0);
        assert_eq!(report.percentage(), 0);
        assert_eq!(report.grade(), GradeBand::NeedsImprovement);
    }

    #[test]
    fn half_percent_rounds_up() {
        // 1 of 8 correct = 12.5% → 13.
        let questions = build_questions(&[OptionLabel::A; 8]);
        let mut ledger = AnswerLedger::new();
        ledger.record(questions[0].id(), OptionLabel::A);

        let report = score(&questions, &ledger);
        assert_eq!(report.percentage(), 13);
    }

    #[test]
    fn reviews_keep_question_order_and_correctness() {
        let q1 = build_question(OptionLabel::A);
        let q2 = build_question(OptionLabel::B);
        let mut ledger = AnswerLedger::new();
        ledger.record(q1.id(), OptionLabel::A);
        ledger.record(q2.id(), OptionLabel::C);

        let questions = vec![q1.clone(), q2.clone()];
        let report = score(&questions, &ledger);

        assert_eq!(report.correct_count(), 1);
        assert_eq!(report.percentage(), 50);
        assert_eq!(report.reviews().len(), 2);
        assert_eq!(report.reviews()[0].question_id, q1.id());
        assert!(report.reviews()[0].is_correct);
        assert_eq!(report.reviews()[1].question_id, q2.id());
        assert!(!report.reviews()[1].is_correct);
        assert_eq!(report.reviews()[1].chosen, Some(OptionLabel::C));
        assert_eq!(report.reviews()[1].correct, OptionLabel::B);
    }

    #[test]
    fn unanswered_questions_are_incorrect_not_errors() {
        let questions = build_questions(&[OptionLabel::D]);
        let ledger = AnswerLedger::new();

        let report = score(&questions, &ledger);
        assert_eq!(report.reviews()[0].chosen, None);
        assert!(!report.reviews()[0].is_correct);
    }

    #[test]
    fn scoring_is_idempotent() {
        let questions = build_questions(&[OptionLabel::A, OptionLabel::B, OptionLabel::C]);
        let mut ledger = AnswerLedger::new();
        ledger.record(questions[0].id(), OptionLabel::A);
        ledger.record(questions[1].id(), OptionLabel::D);

        let first = score(&questions, &ledger);
        let second = score(&questions, &ledger);
        assert_eq!(first, second);
    }
}
