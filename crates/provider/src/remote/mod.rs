mod client;

use std::sync::Arc;

pub use client::{RemoteConfig, RemoteProvider};

use crate::repository::{CheckoutGateway, Provider};

impl Provider {
    /// Wire the data contracts to a remote backend.
    ///
    /// The checkout widget stays a separate collaborator: the backend never
    /// processes payments itself, it only records their outcome.
    #[must_use]
    pub fn remote(config: RemoteConfig, checkout: Arc<dyn CheckoutGateway>) -> Self {
        let remote = Arc::new(RemoteProvider::new(config));
        Self {
            questions: Arc::clone(&remote) as Arc<dyn crate::repository::QuestionProvider>,
            attempts: Arc::clone(&remote) as Arc<dyn crate::repository::AttemptStore>,
            profiles: Arc::clone(&remote) as Arc<dyn crate::repository::ProfileStore>,
            auth: remote as Arc<dyn crate::repository::AuthProvider>,
            checkout,
        }
    }
}
