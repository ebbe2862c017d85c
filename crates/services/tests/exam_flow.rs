//! End-to-end flow over the in-memory provider: browse, sit a capped free
//! exam, score it, persist the attempt, then upgrade and get the full set.

use std::collections::BTreeMap;

use chrono::Duration;

use exam_core::model::{
    ExamSelection, ExamType, GradeBand, OptionLabel, Question, QuestionId, Subject, SubjectId,
};
use exam_core::time::fixed_clock;
use provider::{AuthProvider, InMemoryProvider, Provider, UserId, UserIdentity};
use services::{AppServices, SessionConfig, UpgradeConfig, UpgradeOutcome};

fn build_question(n: usize) -> Question {
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
        "Option A is the answer.",
    )
    .unwrap()
}

fn seeded_app() -> (AppServices, InMemoryProvider, UserIdentity) {
    let (provider, backend) = Provider::in_memory();
    backend
        .seed_subjects(vec![
            Subject::new(
                SubjectId::generate(),
                "English",
                ExamType::Waec,
                60,
                true,
                8,
                "book",
            )
            .unwrap(),
        ])
        .unwrap();
    backend
        .seed_questions((0..8).map(build_question).collect())
        .unwrap();

    let identity = UserIdentity {
        id: UserId::generate(),
        email: "student@example.com".into(),
        is_premium: false,
    };
    backend.set_identity(Some(identity.clone())).unwrap();

    let services = AppServices::new(
        &provider,
        fixed_clock(),
        SessionConfig::default(),
        UpgradeConfig::default(),
    );
    (services, backend, identity)
}

#[tokio::test]
async fn free_exam_is_sat_scored_and_persisted() {
    let (services, _backend, identity) = seeded_app();

    let subjects = services.exam.list_subjects().await.unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].name(), "English");

    let selection = ExamSelection::new(ExamType::Waec, "English", 2023);
    let mut session = services
        .exam
        .start_exam(selection, &identity)
        .await
        .unwrap();
    assert_eq!(session.total_questions(), 5);

    // Four right, the last one wrong.
    let mut now = session.started_at();
    for n in 0..5 {
        let label = if n < 4 { OptionLabel::A } else { OptionLabel::B };
        session.select_answer(label);
        assert!(session.can_advance());
        now += Duration::seconds(20);
        session.advance(now);
    }
    assert!(session.is_completed());

    let report = session.score();
    assert_eq!(report.correct_count(), 4);
    assert_eq!(report.percentage(), 80);
    assert_eq!(report.grade(), GradeBand::Excellent);
    let wrong = report.reviews().iter().filter(|r| !r.is_correct).count();
    assert_eq!(wrong, 1);

    let stored = services
        .exam
        .save_attempt(identity.id, &session)
        .await
        .unwrap();
    assert_eq!(stored.score_percent, 80);
    assert_eq!(stored.time_taken_minutes, 1);

    let recent = services.attempts.recent().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, stored.id);
}

#[tokio::test]
async fn upgrading_lifts_the_question_cap() {
    let (services, backend, identity) = seeded_app();

    let outcome = services.upgrade.upgrade(&identity).await.unwrap();
    assert!(matches!(outcome, UpgradeOutcome::Upgraded { .. }));

    // The next exam runs against the refreshed identity.
    let premium = backend.current_user().await.unwrap().unwrap();
    assert!(premium.is_premium);

    let selection = ExamSelection::new(ExamType::Waec, "English", 2023);
    let session = services.exam.start_exam(selection, &premium).await.unwrap();
    assert_eq!(session.total_questions(), 8);
}
