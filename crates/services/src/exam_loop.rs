use std::sync::Arc;

use exam_core::Clock;
use exam_core::model::{ExamSelection, Subject};
use provider::{AttemptRecord, QuestionProvider, UserId, UserIdentity};

use crate::attempt_service::AttemptService;
use crate::config::SessionConfig;
use crate::error::ExamServiceError;
use crate::exam_session::ExamSession;

/// The exam loop: load a question set into a session, and persist the
/// attempt once the session completes.
pub struct ExamLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionProvider>,
    attempts: Arc<AttemptService>,
    config: SessionConfig,
}

impl ExamLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionProvider>,
        attempts: Arc<AttemptService>,
        config: SessionConfig,
    ) -> Self {
        Self {
            clock,
            questions,
            attempts,
            config,
        }
    }

    /// The browsable subject catalogue.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Provider` on load failures.
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, ExamServiceError> {
        Ok(self.questions.list_subjects().await?)
    }

    /// Load the question set for a selection and start a session over it.
    ///
    /// Non-premium users get at most the free-tier question limit. An empty
    /// question set is `NoQuestions`, a distinct load-failure path the UI
    /// redirects on.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::NoQuestions` for an empty set and
    /// `ExamServiceError::Provider` on transport failures.
    pub async fn start_exam(
        &self,
        selection: ExamSelection,
        identity: &UserIdentity,
    ) -> Result<ExamSession, ExamServiceError> {
        let mut questions = self.questions.fetch_questions(&selection).await?;
        if questions.is_empty() {
            return Err(ExamServiceError::NoQuestions);
        }

        if !identity.is_premium {
            if let Some(limit) = self.config.free_question_limit {
                questions.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            }
        }

        Ok(ExamSession::new(
            selection,
            questions,
            self.config,
            self.clock.now(),
        )?)
    }

    /// Persist a completed session's summary.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Session` for a session that has not
    /// completed, and `ExamServiceError::Provider` when the store rejects
    /// the write (the UI shows a notice; results stay on screen).
    pub async fn save_attempt(
        &self,
        user: UserId,
        session: &ExamSession,
    ) -> Result<AttemptRecord, ExamServiceError> {
        let summary = session.summary()?;
        Ok(self.attempts.save(user, &summary).await?)
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use exam_core::model::{ExamType, OptionLabel, Question, QuestionId};
    use exam_core::time::fixed_clock;
    use provider::InMemoryProvider;

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
            "",
        )
        .unwrap()
    }

    fn identity(is_premium: bool) -> UserIdentity {
        UserIdentity {
            id: UserId::generate(),
            email: "student@example.com".into(),
            is_premium,
        }
    }

    fn build_service(backend: &InMemoryProvider) -> ExamLoopService {
        let store = Arc::new(backend.clone());
        ExamLoopService::new(
            fixed_clock(),
            Arc::new(backend.clone()),
            Arc::new(AttemptService::new(store)),
            SessionConfig::default(),
        )
    }

    #[tokio::test]
    async fn empty_selection_is_a_load_failure() {
        let backend = InMemoryProvider::new();
        let service = build_service(&backend);

        let err = service
            .start_exam(
                ExamSelection::new(ExamType::Neco, "Physics", 2023),
                &identity(false),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ExamServiceError::NoQuestions));
    }

    #[tokio::test]
    async fn free_tier_is_capped_and_premium_is_not() {
        let backend = InMemoryProvider::new();
        backend
            .seed_questions((0..8).map(build_question).collect())
            .unwrap();
        let service = build_service(&backend);
        let selection = ExamSelection::new(ExamType::Waec, "English", 2023);

        let free = service
            .start_exam(selection.clone(), &identity(false))
            .await
            .unwrap();
        assert_eq!(free.total_questions(), 5);

        let premium = service
            .start_exam(selection, &identity(true))
            .await
            .unwrap();
        assert_eq!(premium.total_questions(), 8);
    }

    #[tokio::test]
    async fn saving_an_unfinished_session_is_rejected() {
        let backend = InMemoryProvider::new();
        backend
            .seed_questions((0..2).map(build_question).collect())
            .unwrap();
        let service = build_service(&backend);
        let user = identity(false);

        let session = service
            .start_exam(
                ExamSelection::new(ExamType::Waec, "English", 2023),
                &user,
            )
            .await
            .unwrap();

        let err = service.save_attempt(user.id, &session).await.unwrap_err();
        assert!(matches!(err, ExamServiceError::Session(_)));
    }
}
