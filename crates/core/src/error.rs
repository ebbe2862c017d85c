use thiserror::Error;

use crate::model::{AttemptError, QuestionError, SubjectError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Subject(#[from] SubjectError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
}
