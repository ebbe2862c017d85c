mod exam;
mod history;
mod home;
mod state;

#[cfg(test)]
mod view_smoke;

pub use exam::ExamView;
pub use history::HistoryView;
pub use home::HomeView;
pub use state::{ViewError, ViewState, view_state_from_resource};
