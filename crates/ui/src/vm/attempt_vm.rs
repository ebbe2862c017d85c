use provider::AttemptRecord;

use super::time_fmt::format_datetime;

/// One row in the attempt history list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptCardVm {
    pub title: String,
    pub score_label: String,
    pub detail: String,
    pub completed_label: String,
}

#[must_use]
pub fn map_attempt_cards(attempts: &[AttemptRecord]) -> Vec<AttemptCardVm> {
    attempts
        .iter()
        .map(|attempt| AttemptCardVm {
            title: format!("{} {}", attempt.exam_type, attempt.subject),
            score_label: format!("{}%", attempt.score_percent),
            detail: format!(
                "{}/{} correct · {} min",
                attempt.correct_answers, attempt.questions_answered, attempt.time_taken_minutes
            ),
            completed_label: format_datetime(attempt.completed_at),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::AttemptId;
    use exam_core::time::fixed_now;

    #[test]
    fn cards_summarize_the_stored_row() {
        let attempts = vec![AttemptRecord {
            id: AttemptId::generate(),
            subject: "English".into(),
            exam_type: "WAEC".into(),
            questions_answered: 5,
            correct_answers: 4,
            score_percent: 80,
            time_taken_minutes: 3,
            completed_at: fixed_now(),
        }];

        let cards = map_attempt_cards(&attempts);
        assert_eq!(cards[0].title, "WAEC English");
        assert_eq!(cards[0].score_label, "80%");
        assert_eq!(cards[0].detail, "4/5 correct · 3 min");
        assert_eq!(cards[0].completed_label, "Nov 14, 2023 22:13");
    }
}
