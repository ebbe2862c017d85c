/// Lifecycle of the per-question countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Expired,
}

/// Outcome of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The timer is not running (idle, or already expired); nothing changed.
    Idle,
    /// Still counting down; `remaining` seconds are left.
    Running { remaining: u32 },
    /// This tick brought the countdown to zero. Reported exactly once per run.
    Expired,
}

/// Countdown for the question currently on screen.
///
/// A pure state machine: the caller drives it with one `tick()` per second
/// and restarts it with `reset()` whenever the session moves to a different
/// question. Expiry is reported exactly once (the `Running → Expired`
/// transition); after that, ticks are clamped no-ops until the next reset.
/// Suspension (e.g. while an answer is revealed) is simply the caller not
/// ticking — the timer holds no callbacks and does no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTimer {
    budget_secs: u32,
    remaining_secs: u32,
    phase: TimerPhase,
}

impl QuestionTimer {
    /// A timer that has not been started yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            budget_secs: 0,
            remaining_secs: 0,
            phase: TimerPhase::Idle,
        }
    }

    /// Begin counting down from the full budget.
    pub fn start(&mut self, budget_secs: u32) {
        self.budget_secs = budget_secs;
        self.remaining_secs = budget_secs;
        self.phase = TimerPhase::Running;
    }

    /// Cancel any pending expiry and restart at the given budget.
    ///
    /// Called whenever the session advances to a different question index or
    /// the session is retaken.
    pub fn reset(&mut self, budget_secs: u32) {
        self.start(budget_secs);
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> Tick {
        if self.phase != TimerPhase::Running {
            return Tick::Idle;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.phase = TimerPhase::Expired;
            Tick::Expired
        } else {
            Tick::Running {
                remaining: self.remaining_secs,
            }
        }
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn budget_secs(&self) -> u32 {
        self.budget_secs
    }

    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.phase == TimerPhase::Expired
    }
}

impl Default for QuestionTimer {
    fn default() -> Self {
        Self::new()
    }
}
