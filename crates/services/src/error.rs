use thiserror::Error;

use exam_core::model::AttemptError;
use provider::ProviderError;

/// Errors from the exam session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("an exam session needs at least one question")]
    Empty,

    #[error("the session has not been completed")]
    Incomplete,

    #[error(transparent)]
    Attempt(#[from] AttemptError),
}

/// Errors surfaced by the exam loop and related services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamServiceError {
    #[error("no questions are available for this selection")]
    NoQuestions,

    #[error("sign in to continue")]
    AuthRequired,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors from the premium upgrade flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UpgradeError {
    #[error("sign in to upgrade")]
    AuthRequired,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors raised while assembling or seeding the service layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
