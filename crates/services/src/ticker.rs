use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

/// One second has passed for the session on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent;

/// Owns the single 1 Hz tick task driving an exam session.
///
/// At most one task is ever live: `start` cancels the previous task before
/// spawning, so a session is never driven by two timers at once. Dropping the
/// ticker aborts the task, so no tick outlives the screen that started it.
#[derive(Debug, Default)]
pub struct SessionTicker {
    task: Option<JoinHandle<()>>,
}

impl SessionTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the tick stream.
    ///
    /// The first event arrives one second after the call, not immediately.
    /// The stream ends when the receiver is dropped or `stop` is called.
    pub fn start(&mut self) -> UnboundedReceiver<TickEvent> {
        self.stop();
        let (tx, rx) = mpsc::unbounded_channel();
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick fires immediately; skip it.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(TickEvent).is_err() {
                    break;
                }
            }
        }));
        rx
    }

    /// Abort the live task, if any.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SessionTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn emits_one_event_per_second() {
        let mut ticker = SessionTicker::new();
        let mut events = ticker.start();

        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(1)).await;
            assert_eq!(events.recv().await, Some(TickEvent));
        }
        assert!(ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_cancels_the_previous_stream() {
        let mut ticker = SessionTicker::new();
        let mut first = ticker.start();
        let mut second = ticker.start();

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(second.recv().await, Some(TickEvent));
        // The first task was aborted, so its stream is closed.
        assert_eq!(first.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_the_stream() {
        let mut ticker = SessionTicker::new();
        let mut events = ticker.start();
        ticker.stop();

        assert!(!ticker.is_running());
        assert_eq!(events.recv().await, None);
    }
}
