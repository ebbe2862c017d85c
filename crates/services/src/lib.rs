#![forbid(unsafe_code)]

pub mod app_services;
pub mod attempt_service;
pub mod auth_service;
pub mod config;
pub mod error;
pub mod exam_loop;
pub mod exam_session;
pub mod ticker;
pub mod upgrade_service;

pub use exam_core::Clock;

pub use app_services::AppServices;
pub use attempt_service::AttemptService;
pub use auth_service::AuthService;
pub use config::SessionConfig;
pub use error::{AppServicesError, ExamServiceError, SessionError, UpgradeError};
pub use exam_loop::ExamLoopService;
pub use exam_session::{ExamSession, SessionProgress, SessionTick};
pub use ticker::{SessionTicker, TickEvent};
pub use upgrade_service::{UpgradeConfig, UpgradeOutcome, UpgradeService};
