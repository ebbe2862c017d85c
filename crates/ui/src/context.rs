use std::sync::Arc;

use services::{AppServices, AttemptService, AuthService, ExamLoopService, UpgradeService};

/// The service layer as the views see it, injected at the composition root.
#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
}

impl AppContext {
    #[must_use]
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }

    #[must_use]
    pub fn exam(&self) -> Arc<ExamLoopService> {
        Arc::clone(&self.services.exam)
    }

    #[must_use]
    pub fn attempts(&self) -> Arc<AttemptService> {
        Arc::clone(&self.services.attempts)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.services.auth)
    }

    #[must_use]
    pub fn upgrade(&self) -> Arc<UpgradeService> {
        Arc::clone(&self.services.upgrade)
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from the assembled services.
#[must_use]
pub fn build_app_context(services: AppServices) -> AppContext {
    AppContext::new(services)
}
