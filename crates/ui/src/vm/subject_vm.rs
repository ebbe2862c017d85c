use exam_core::model::Subject;

use crate::routes::Route;

/// Paper year offered from the catalogue cards.
///
/// The catalogue itself is year-agnostic; the year picker is a follow-up
/// once the backend exposes per-subject year lists.
pub const CURRENT_EXAM_YEAR: i32 = 2023;

/// One subject card on the home screen.
#[derive(Clone, Debug, PartialEq)]
pub struct SubjectCardVm {
    pub name: String,
    pub exam_label: String,
    pub detail: String,
    pub icon: String,
    /// Premium-only subject and the viewer is not premium.
    pub locked: bool,
    pub route: Route,
}

#[must_use]
pub fn map_subject_cards(subjects: &[Subject], is_premium: bool) -> Vec<SubjectCardVm> {
    subjects
        .iter()
        .map(|subject| SubjectCardVm {
            name: subject.name().to_owned(),
            exam_label: subject.exam_type().to_string(),
            detail: format!(
                "{} questions · {} min",
                subject.total_questions(),
                subject.time_limit_minutes()
            ),
            icon: subject.icon().to_owned(),
            locked: !subject.is_free() && !is_premium,
            route: Route::Exam {
                exam_type: subject.exam_type().to_string(),
                subject: subject.name().to_owned(),
                year: CURRENT_EXAM_YEAR,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{ExamType, SubjectId};

    fn subject(name: &str, is_free: bool) -> Subject {
        Subject::new(
            SubjectId::generate(),
            name,
            ExamType::Waec,
            60,
            is_free,
            40,
            "book",
        )
        .unwrap()
    }

    #[test]
    fn premium_subjects_lock_for_free_users_only() {
        let subjects = vec![subject("English", true), subject("Chemistry", false)];

        let free_view = map_subject_cards(&subjects, false);
        assert!(!free_view[0].locked);
        assert!(free_view[1].locked);

        let premium_view = map_subject_cards(&subjects, true);
        assert!(premium_view.iter().all(|card| !card.locked));
    }

    #[test]
    fn card_detail_summarizes_the_paper() {
        let cards = map_subject_cards(&[subject("English", true)], false);
        assert_eq!(cards[0].detail, "40 questions · 60 min");
        assert_eq!(cards[0].exam_label, "WAEC");
    }
}
