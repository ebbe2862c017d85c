/// Tunable parameters for one exam session.
///
/// Deployments differ: some papers run a 60 second budget with a five-question
/// free tier, others 90 seconds with no cap. Both are parameters here rather
/// than constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Countdown budget for each question, in seconds.
    pub question_budget_secs: u32,
    /// Seconds the expired question stays on screen before auto-advancing.
    pub expiry_grace_secs: u32,
    /// Maximum questions served to non-premium users; `None` means unlimited.
    pub free_question_limit: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            question_budget_secs: 60,
            expiry_grace_secs: 2,
            free_question_limit: Some(5),
        }
    }
}
