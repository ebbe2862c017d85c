use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

use exam_core::model::{
    AttemptId, AttemptSummary, ExamSelection, ExamType, OptionLabel, Question, QuestionId, Subject,
    SubjectId,
};

/// Errors surfaced by data-provider adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("not found")]
    NotFound,

    #[error("not authorized")]
    Unauthorized,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("provider returned status {status}")]
    Http { status: u16 },

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── IDENTITY ──────────────────────────────────────────────────────────────────
//

/// Unique identifier for a signed-in user, as issued by the auth collaborator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The current-user identity the auth collaborator hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: UserId,
    pub email: String,
    pub is_premium: bool,
}

//
// ─── WIRE RECORDS ──────────────────────────────────────────────────────────────
//

/// Provider-side shape for a question row.
///
/// This mirrors the backend's `questions` table so adapters can
/// serialize/deserialize without leaking wire concerns into the domain layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub subject: String,
    pub exam_type: String,
    pub year: i32,
    pub question_text: String,
    pub options: BTreeMap<String, String>,
    pub correct_option: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id(),
            subject: question.subject().to_owned(),
            exam_type: question.exam_type().to_string(),
            year: question.year(),
            question_text: question.prompt().to_owned(),
            options: question
                .options()
                .iter()
                .map(|(label, text)| (label.to_string(), text.clone()))
                .collect(),
            correct_option: question.correct_option().to_string(),
            explanation: Some(question.explanation().to_owned()),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// Rows with labels outside A–D or with invalid structure are rejected
    /// rather than silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Serialization` when the row cannot be mapped.
    pub fn into_question(self) -> Result<Question, ProviderError> {
        let exam_type = ExamType::from_str(&self.exam_type)
            .map_err(|e| ProviderError::Serialization(e.to_string()))?;
        let correct = OptionLabel::from_str(&self.correct_option)
            .map_err(|e| ProviderError::Serialization(e.to_string()))?;
        let mut options = BTreeMap::new();
        for (raw_label, text) in self.options {
            let label = OptionLabel::from_str(&raw_label)
                .map_err(|e| ProviderError::Serialization(e.to_string()))?;
            options.insert(label, text);
        }

        Question::new(
            self.id,
            self.subject,
            exam_type,
            self.year,
            self.question_text,
            options,
            correct,
            self.explanation.unwrap_or_default(),
        )
        .map_err(|e| ProviderError::Serialization(e.to_string()))
    }
}

/// Provider-side shape for a subject catalogue row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: SubjectId,
    pub subject_name: String,
    pub exam_type: String,
    pub time_limit_minutes: u32,
    pub is_free: bool,
    pub total_questions: u32,
    #[serde(default)]
    pub icon: Option<String>,
}

impl SubjectRecord {
    #[must_use]
    pub fn from_subject(subject: &Subject) -> Self {
        Self {
            id: subject.id(),
            subject_name: subject.name().to_owned(),
            exam_type: subject.exam_type().to_string(),
            time_limit_minutes: subject.time_limit_minutes(),
            is_free: subject.is_free(),
            total_questions: subject.total_questions(),
            icon: Some(subject.icon().to_owned()),
        }
    }

    /// Convert the record back into a domain `Subject`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Serialization` when the row cannot be mapped.
    pub fn into_subject(self) -> Result<Subject, ProviderError> {
        let exam_type = ExamType::from_str(&self.exam_type)
            .map_err(|e| ProviderError::Serialization(e.to_string()))?;
        Subject::new(
            self.id,
            self.subject_name,
            exam_type,
            self.time_limit_minutes,
            self.is_free,
            self.total_questions,
            self.icon.unwrap_or_default(),
        )
        .map_err(|e| ProviderError::Serialization(e.to_string()))
    }
}

/// Insert payload for a completed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttemptRecord {
    pub subject: String,
    pub exam_type: String,
    pub questions_answered: u32,
    pub correct_answers: u32,
    pub score_percent: u8,
    pub time_taken_minutes: i64,
}

impl NewAttemptRecord {
    #[must_use]
    pub fn from_summary(summary: &AttemptSummary) -> Self {
        Self {
            subject: summary.subject().to_owned(),
            exam_type: summary.exam_type().to_string(),
            questions_answered: summary.questions_answered(),
            correct_answers: summary.correct_answers(),
            score_percent: summary.score_percent(),
            time_taken_minutes: summary.time_taken_minutes(),
        }
    }
}

/// Stored attempt row, as returned by the provider after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: AttemptId,
    pub subject: String,
    pub exam_type: String,
    pub questions_answered: u32,
    pub correct_answers: u32,
    pub score_percent: u8,
    pub time_taken_minutes: i64,
    pub completed_at: DateTime<Utc>,
}

//
// ─── CHECKOUT ──────────────────────────────────────────────────────────────────
//

/// What the external checkout widget is invoked with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Amount in the currency's minor unit (kobo for NGN).
    pub amount_minor: u32,
    pub currency: String,
    pub email: String,
}

/// Terminal result of one checkout invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Completed { transaction_id: String },
    Cancelled,
}

//
// ─── COLLABORATOR CONTRACTS ────────────────────────────────────────────────────
//

/// Read access to the question bank and subject catalogue.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// List the browsable subject catalogue.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport or mapping failures.
    async fn list_subjects(&self) -> Result<Vec<Subject>, ProviderError>;

    /// Fetch the ordered question set for an exam selection.
    ///
    /// An empty result is a valid response; callers decide how to surface it.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport or mapping failures.
    async fn fetch_questions(
        &self,
        selection: &ExamSelection,
    ) -> Result<Vec<Question>, ProviderError>;
}

/// Write/read access to persisted attempt summaries.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Persist a completed attempt and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the attempt cannot be stored.
    async fn insert_attempt(
        &self,
        user: UserId,
        record: NewAttemptRecord,
    ) -> Result<AttemptRecord, ProviderError>;

    /// Most recent attempts for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport failures.
    async fn list_recent(&self, user: UserId, limit: u32)
        -> Result<Vec<AttemptRecord>, ProviderError>;
}

/// Profile writes (currently only the premium upgrade).
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Mark the user's profile premium, recording the checkout transaction.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the profile write fails.
    async fn mark_premium(&self, user: UserId, transaction_id: &str) -> Result<(), ProviderError>;
}

/// The auth collaborator: who, if anyone, is signed in.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The current identity, or `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport failures.
    async fn current_user(&self) -> Result<Option<UserIdentity>, ProviderError>;
}

/// The external checkout widget, behind a seam so services never see its SDK.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Run one checkout and report its terminal outcome.
    ///
    /// Closing the widget is `CheckoutOutcome::Cancelled`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the widget itself fails to open.
    async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutOutcome, ProviderError>;
}

//
// ─── IN-MEMORY IMPLEMENTATION ──────────────────────────────────────────────────
//

/// In-memory provider for tests, demos, and offline development.
#[derive(Clone, Default)]
pub struct InMemoryProvider {
    subjects: Arc<Mutex<Vec<Subject>>>,
    questions: Arc<Mutex<Vec<Question>>>,
    attempts: Arc<Mutex<Vec<AttemptRecord>>>,
    identity: Arc<Mutex<Option<UserIdentity>>>,
    premium_transactions: Arc<Mutex<Vec<(UserId, String)>>>,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the seeded subject catalogue.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Connection` if the store lock is poisoned.
    pub fn seed_subjects(&self, subjects: Vec<Subject>) -> Result<(), ProviderError> {
        *lock(&self.subjects)? = subjects;
        Ok(())
    }

    /// Replace the seeded question bank.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Connection` if the store lock is poisoned.
    pub fn seed_questions(&self, questions: Vec<Question>) -> Result<(), ProviderError> {
        *lock(&self.questions)? = questions;
        Ok(())
    }

    /// Sign a user in (or out with `None`).
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Connection` if the store lock is poisoned.
    pub fn set_identity(&self, identity: Option<UserIdentity>) -> Result<(), ProviderError> {
        *lock(&self.identity)? = identity;
        Ok(())
    }

    /// Transactions recorded by `mark_premium`, for assertions.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Connection` if the store lock is poisoned.
    pub fn premium_transactions(&self) -> Result<Vec<(UserId, String)>, ProviderError> {
        Ok(lock(&self.premium_transactions)?.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>, ProviderError> {
    mutex
        .lock()
        .map_err(|e| ProviderError::Connection(e.to_string()))
}

#[async_trait]
impl QuestionProvider for InMemoryProvider {
    async fn list_subjects(&self) -> Result<Vec<Subject>, ProviderError> {
        Ok(lock(&self.subjects)?.clone())
    }

    async fn fetch_questions(
        &self,
        selection: &ExamSelection,
    ) -> Result<Vec<Question>, ProviderError> {
        let questions = lock(&self.questions)?;
        Ok(questions
            .iter()
            .filter(|q| {
                q.exam_type() == selection.exam_type
                    && q.subject() == selection.subject
                    && q.year() == selection.year
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AttemptStore for InMemoryProvider {
    async fn insert_attempt(
        &self,
        _user: UserId,
        record: NewAttemptRecord,
    ) -> Result<AttemptRecord, ProviderError> {
        let stored = AttemptRecord {
            id: AttemptId::generate(),
            subject: record.subject,
            exam_type: record.exam_type,
            questions_answered: record.questions_answered,
            correct_answers: record.correct_answers,
            score_percent: record.score_percent,
            time_taken_minutes: record.time_taken_minutes,
            completed_at: Utc::now(),
        };
        lock(&self.attempts)?.insert(0, stored.clone());
        Ok(stored)
    }

    async fn list_recent(
        &self,
        _user: UserId,
        limit: u32,
    ) -> Result<Vec<AttemptRecord>, ProviderError> {
        let attempts = lock(&self.attempts)?;
        Ok(attempts
            .iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProfileStore for InMemoryProvider {
    async fn mark_premium(&self, user: UserId, transaction_id: &str) -> Result<(), ProviderError> {
        let mut identity = lock(&self.identity)?;
        match identity.as_mut() {
            Some(current) if current.id == user => current.is_premium = true,
            _ => return Err(ProviderError::NotFound),
        }
        lock(&self.premium_transactions)?.push((user, transaction_id.to_owned()));
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for InMemoryProvider {
    async fn current_user(&self) -> Result<Option<UserIdentity>, ProviderError> {
        Ok(lock(&self.identity)?.clone())
    }
}

/// Scripted checkout gateway for tests and demos.
#[derive(Clone)]
pub struct InMemoryCheckout {
    approve: bool,
}

impl InMemoryCheckout {
    /// A gateway whose widget always completes successfully.
    #[must_use]
    pub fn approving() -> Self {
        Self { approve: true }
    }

    /// A gateway whose widget is always closed without paying.
    #[must_use]
    pub fn cancelling() -> Self {
        Self { approve: false }
    }
}

#[async_trait]
impl CheckoutGateway for InMemoryCheckout {
    async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutOutcome, ProviderError> {
        if self.approve {
            Ok(CheckoutOutcome::Completed {
                transaction_id: format!("txn-{}-{}", request.currency, request.amount_minor),
            })
        } else {
            Ok(CheckoutOutcome::Cancelled)
        }
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates the collaborator contracts behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Provider {
    pub questions: Arc<dyn QuestionProvider>,
    pub attempts: Arc<dyn AttemptStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub checkout: Arc<dyn CheckoutGateway>,
}

impl Provider {
    /// Wire every contract to one shared in-memory backend.
    #[must_use]
    pub fn in_memory() -> (Self, InMemoryProvider) {
        let backend = InMemoryProvider::new();
        let provider = Self {
            questions: Arc::new(backend.clone()),
            attempts: Arc::new(backend.clone()),
            profiles: Arc::new(backend.clone()),
            auth: Arc::new(backend.clone()),
            checkout: Arc::new(InMemoryCheckout::approving()),
        };
        (provider, backend)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
