use std::sync::Arc;

use exam_core::Clock;
use provider::Provider;

use crate::attempt_service::AttemptService;
use crate::auth_service::AuthService;
use crate::config::SessionConfig;
use crate::exam_loop::ExamLoopService;
use crate::upgrade_service::{UpgradeConfig, UpgradeService};

/// The assembled service layer, shared through the UI context.
#[derive(Clone)]
pub struct AppServices {
    pub exam: Arc<ExamLoopService>,
    pub attempts: Arc<AttemptService>,
    pub auth: Arc<AuthService>,
    pub upgrade: Arc<UpgradeService>,
}

impl AppServices {
    /// Wire every service to one provider aggregate.
    #[must_use]
    pub fn new(
        provider: &Provider,
        clock: Clock,
        session_config: SessionConfig,
        upgrade_config: UpgradeConfig,
    ) -> Self {
        let attempts = Arc::new(AttemptService::new(Arc::clone(&provider.attempts)));
        let exam = Arc::new(ExamLoopService::new(
            clock,
            Arc::clone(&provider.questions),
            Arc::clone(&attempts),
            session_config,
        ));
        let auth = Arc::new(AuthService::new(Arc::clone(&provider.auth)));
        let upgrade = Arc::new(UpgradeService::new(
            Arc::clone(&provider.checkout),
            Arc::clone(&provider.profiles),
            upgrade_config,
        ));

        Self {
            exam,
            attempts,
            auth,
            upgrade,
        }
    }

    /// Assembly with the default clock and configs.
    #[must_use]
    pub fn with_defaults(provider: &Provider) -> Self {
        Self::new(
            provider,
            Clock::default_clock(),
            SessionConfig::default(),
            UpgradeConfig::default(),
        )
    }
}
