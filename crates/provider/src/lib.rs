#![forbid(unsafe_code)]

pub mod remote;
pub mod repository;

pub use remote::{RemoteConfig, RemoteProvider};
pub use repository::{
    AttemptRecord, AttemptStore, AuthProvider, CheckoutGateway, CheckoutOutcome, CheckoutRequest,
    InMemoryCheckout, InMemoryProvider, NewAttemptRecord, Provider, ProviderError, QuestionProvider,
    QuestionRecord, ProfileStore, SubjectRecord, UserId, UserIdentity,
};
