use std::sync::{Arc, Mutex, MutexGuard};

use exam_core::model::{AttemptId, AttemptSummary};
use provider::{AttemptRecord, AttemptStore, NewAttemptRecord, ProviderError, UserId};

/// Keeps the locally displayed attempt list in step with the remote store.
///
/// Saves are optimistic: the new attempt appears in the local list before the
/// store round-trip finishes, is swapped for the stored row on success, and
/// the pre-save list is restored on failure. The caller decides how to
/// surface the failure; the displayed exam results themselves are never
/// rolled back.
pub struct AttemptService {
    store: Arc<dyn AttemptStore>,
    recent: Mutex<Vec<AttemptRecord>>,
}

impl AttemptService {
    #[must_use]
    pub fn new(store: Arc<dyn AttemptStore>) -> Self {
        Self {
            store,
            recent: Mutex::new(Vec::new()),
        }
    }

    /// Persist a completed attempt.
    ///
    /// # Errors
    ///
    /// Returns the store's `ProviderError` after restoring the local list to
    /// its pre-save state.
    pub async fn save(
        &self,
        user: UserId,
        summary: &AttemptSummary,
    ) -> Result<AttemptRecord, ProviderError> {
        let record = NewAttemptRecord::from_summary(summary);
        let provisional = AttemptRecord {
            id: AttemptId::generate(),
            subject: record.subject.clone(),
            exam_type: record.exam_type.clone(),
            questions_answered: record.questions_answered,
            correct_answers: record.correct_answers,
            score_percent: record.score_percent,
            time_taken_minutes: record.time_taken_minutes,
            completed_at: summary.completed_at(),
        };

        let snapshot = {
            let mut recent = self.lock()?;
            let snapshot = recent.clone();
            recent.insert(0, provisional.clone());
            snapshot
        };

        match self.store.insert_attempt(user, record).await {
            Ok(stored) => {
                let mut recent = self.lock()?;
                match recent.iter().position(|a| a.id == provisional.id) {
                    Some(pos) => recent[pos] = stored.clone(),
                    None => recent.insert(0, stored.clone()),
                }
                Ok(stored)
            }
            Err(err) => {
                *self.lock()? = snapshot;
                Err(err)
            }
        }
    }

    /// Reload the local list from the store, newest first.
    ///
    /// # Errors
    ///
    /// Returns the store's `ProviderError`; the local list is left unchanged.
    pub async fn refresh(&self, user: UserId, limit: u32) -> Result<(), ProviderError> {
        let attempts = self.store.list_recent(user, limit).await?;
        *self.lock()? = attempts;
        Ok(())
    }

    /// The locally held attempt list, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Connection` if the list lock is poisoned.
    pub fn recent(&self) -> Result<Vec<AttemptRecord>, ProviderError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<AttemptRecord>>, ProviderError> {
        self.recent
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;

    use exam_core::model::ExamType;
    use exam_core::time::fixed_now;
    use provider::InMemoryProvider;

    struct FailingStore;

    #[async_trait]
    impl AttemptStore for FailingStore {
        async fn insert_attempt(
            &self,
            _user: UserId,
            _record: NewAttemptRecord,
        ) -> Result<AttemptRecord, ProviderError> {
            Err(ProviderError::Connection("offline".into()))
        }

        async fn list_recent(
            &self,
            _user: UserId,
            _limit: u32,
        ) -> Result<Vec<AttemptRecord>, ProviderError> {
            Err(ProviderError::Connection("offline".into()))
        }
    }

    fn build_summary() -> AttemptSummary {
        let started = fixed_now();
        AttemptSummary::new(
            "English",
            ExamType::Waec,
            5,
            4,
            80,
            started,
            started + Duration::seconds(200),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn successful_save_lands_the_stored_row_locally() {
        let backend = InMemoryProvider::new();
        let service = AttemptService::new(Arc::new(backend));
        let user = UserId::generate();

        let stored = service.save(user, &build_summary()).await.unwrap();

        let recent = service.recent().unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0], stored);
        assert_eq!(recent[0].score_percent, 80);
    }

    #[tokio::test]
    async fn failed_save_restores_the_previous_list() {
        let backend = InMemoryProvider::new();
        let service = AttemptService::new(Arc::new(backend));
        let user = UserId::generate();
        service.save(user, &build_summary()).await.unwrap();
        let before = service.recent().unwrap();

        let failing = AttemptService::new(Arc::new(FailingStore));
        // Seed the failing service with the same starting list.
        *failing.lock().unwrap() = before.clone();

        let err = failing.save(user, &build_summary()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Connection(_)));
        assert_eq!(failing.recent().unwrap(), before);
    }

    #[tokio::test]
    async fn refresh_replaces_the_local_list() {
        let backend = InMemoryProvider::new();
        let service = AttemptService::new(Arc::new(backend.clone()));
        let user = UserId::generate();

        service.save(user, &build_summary()).await.unwrap();
        service.save(user, &build_summary()).await.unwrap();

        service.refresh(user, 1).await.unwrap();
        assert_eq!(service.recent().unwrap().len(), 1);
    }
}
