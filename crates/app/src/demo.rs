//! Seed data for the in-memory demo backend, used whenever the remote
//! provider is not configured.

use std::collections::BTreeMap;

use exam_core::model::{
    ExamType, OptionLabel, Question, QuestionError, QuestionId, Subject, SubjectError, SubjectId,
};
use provider::{InMemoryProvider, UserId, UserIdentity};

fn question(
    subject: &str,
    exam_type: ExamType,
    prompt: &str,
    options: [&str; 4],
    correct: OptionLabel,
    explanation: &str,
) -> Result<Question, QuestionError> {
    let options: BTreeMap<OptionLabel, String> = OptionLabel::ALL
        .iter()
        .zip(options)
        .map(|(label, text)| (*label, text.to_string()))
        .collect();
    Question::new(
        QuestionId::generate(),
        subject,
        exam_type,
        2023,
        prompt,
        options,
        correct,
        explanation,
    )
}

fn questions() -> Result<Vec<Question>, QuestionError> {
    Ok(vec![
        question(
            "English",
            ExamType::Waec,
            "Choose the word nearest in meaning to 'candid'.",
            ["frank", "hidden", "careful", "polite"],
            OptionLabel::A,
            "'Candid' means open and honest; 'frank' is the closest synonym.",
        )?,
        question(
            "English",
            ExamType::Waec,
            "Pick the correctly punctuated sentence.",
            [
                "Its raining today.",
                "It's raining today.",
                "Its' raining today.",
                "It is raining, today.",
            ],
            OptionLabel::B,
            "'It's' is the contraction of 'it is'.",
        )?,
        question(
            "English",
            ExamType::Waec,
            "The plural of 'criterion' is:",
            ["criterions", "criterias", "criteria", "criterion"],
            OptionLabel::C,
            "",
        )?,
        question(
            "English",
            ExamType::Waec,
            "Choose the option opposite in meaning to 'scarce'.",
            ["rare", "abundant", "sparse", "limited"],
            OptionLabel::B,
            "'Abundant' is the direct antonym of 'scarce'.",
        )?,
        question(
            "English",
            ExamType::Waec,
            "'Neither of the boys ___ here.' The correct verb is:",
            ["are", "were", "is", "have"],
            OptionLabel::C,
            "'Neither' takes a singular verb.",
        )?,
        question(
            "English",
            ExamType::Waec,
            "A word that joins clauses is called a:",
            ["preposition", "conjunction", "pronoun", "participle"],
            OptionLabel::B,
            "",
        )?,
        question(
            "Mathematics",
            ExamType::Jamb,
            "Evaluate 3x + 2 when x = 4.",
            ["12", "14", "10", "16"],
            OptionLabel::B,
            "3 × 4 + 2 = 14.",
        )?,
        question(
            "Mathematics",
            ExamType::Jamb,
            "What is 25% of 80?",
            ["15", "25", "20", "40"],
            OptionLabel::C,
            "A quarter of 80 is 20.",
        )?,
        question(
            "Mathematics",
            ExamType::Jamb,
            "The sum of angles in a triangle is:",
            ["90°", "360°", "270°", "180°"],
            OptionLabel::D,
            "",
        )?,
    ])
}

fn subjects() -> Result<Vec<Subject>, SubjectError> {
    Ok(vec![
        Subject::new(
            SubjectId::generate(),
            "English",
            ExamType::Waec,
            60,
            true,
            6,
            "book",
        )?,
        Subject::new(
            SubjectId::generate(),
            "Mathematics",
            ExamType::Jamb,
            60,
            false,
            3,
            "calculator",
        )?,
    ])
}

/// Seed the demo backend: a small catalogue, its question bank, and a
/// signed-in non-premium student.
pub fn seed(backend: &InMemoryProvider) -> Result<(), Box<dyn std::error::Error>> {
    backend.seed_subjects(subjects()?)?;
    backend.seed_questions(questions()?)?;
    backend.set_identity(Some(UserIdentity {
        id: UserId::generate(),
        email: "demo@example.com".into(),
        is_premium: false,
    }))?;
    Ok(())
}
