use chrono::{DateTime, Utc};

use exam_core::model::{
    AnswerLedger, AttemptSummary, ExamSelection, OptionLabel, Question, QuestionTimer, ScoreReport,
    Tick, score,
};

use crate::config::SessionConfig;
use crate::error::SessionError;

/// What one session-level tick produced.
///
/// This wraps the raw timer tick with the session's own reactions: the
/// grace countdown after expiry and the auto-advance or completion it
/// ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTick {
    /// Nothing is counting down (idle timer, or the session is complete).
    Idle,
    /// Still inside the question budget.
    Running { remaining_secs: u32 },
    /// The budget just ran out; the grace countdown has started.
    Expired { grace_secs: u32 },
    /// Still inside the expiry grace window.
    Grace { remaining_secs: u32 },
    /// The grace window closed on a non-final question; the session moved on.
    AutoAdvanced,
    /// The grace window closed on the final question; the session is complete.
    Completed,
}

/// Position readout for progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub index: usize,
    pub total: usize,
    pub answered: usize,
}

/// Controller for one run through a question set.
///
/// Owns the ledger and the per-question timer, and keeps three invariants:
/// the question list is non-empty and fixed at start, the current index is
/// always in bounds, and the completion flag only moves forward within a run
/// (`retake` begins a new run).
#[derive(Debug, Clone)]
pub struct ExamSession {
    selection: ExamSelection,
    questions: Vec<Question>,
    ledger: AnswerLedger,
    timer: QuestionTimer,
    index: usize,
    /// When each question was first shown. Tracked per index; revisits keep
    /// the original stamp.
    first_seen: Vec<Option<DateTime<Utc>>>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    grace_remaining: Option<u32>,
    config: SessionConfig,
}

impl ExamSession {
    /// Start a session over an ordered question set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for an empty question list; callers are
    /// expected to have redirected before constructing a session.
    pub fn new(
        selection: ExamSelection,
        questions: Vec<Question>,
        config: SessionConfig,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let mut first_seen = vec![None; questions.len()];
        first_seen[0] = Some(started_at);
        let mut timer = QuestionTimer::new();
        timer.start(config.question_budget_secs);

        Ok(Self {
            selection,
            questions,
            ledger: AnswerLedger::new(),
            timer,
            index: 0,
            first_seen,
            started_at,
            completed_at: None,
            grace_remaining: None,
            config,
        })
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Move to the next question, or complete the session on the last one.
    ///
    /// Advancing resets the timer to the full budget. No-op once complete.
    pub fn advance(&mut self, now: DateTime<Utc>) {
        if self.is_completed() {
            return;
        }
        if self.index + 1 == self.questions.len() {
            self.complete(now);
        } else {
            self.move_to(self.index + 1, now);
        }
    }

    /// Move back one question. The timer is deliberately not reset: review
    /// grants no extra time. No-op at index 0 and once complete.
    pub fn retreat(&mut self) {
        if self.is_completed() || self.index == 0 {
            return;
        }
        self.index -= 1;
        self.grace_remaining = None;
    }

    fn move_to(&mut self, index: usize, now: DateTime<Utc>) {
        self.index = index;
        self.grace_remaining = None;
        self.timer.reset(self.config.question_budget_secs);
        if self.first_seen[index].is_none() {
            self.first_seen[index] = Some(now);
        }
    }

    fn complete(&mut self, now: DateTime<Utc>) {
        if self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        self.grace_remaining = None;
    }

    //
    // ─── ANSWERS & TIME ────────────────────────────────────────────────────────
    //

    /// Record (or overwrite) the answer for the question on screen.
    /// No-op once the session is complete.
    pub fn select_answer(&mut self, label: OptionLabel) {
        if self.is_completed() {
            return;
        }
        let id = self.current_question().id();
        self.ledger.record(id, label);
    }

    /// Advance the session by one second.
    ///
    /// Forwards to the question timer; on expiry starts the grace countdown,
    /// and when the grace window closes auto-advances (or completes on the
    /// final question). The single external ticker drives everything through
    /// this method.
    pub fn tick(&mut self, now: DateTime<Utc>) -> SessionTick {
        if self.is_completed() {
            return SessionTick::Idle;
        }

        if let Some(grace) = self.grace_remaining {
            let grace = grace.saturating_sub(1);
            if grace == 0 {
                return self.close_grace(now);
            }
            self.grace_remaining = Some(grace);
            return SessionTick::Grace {
                remaining_secs: grace,
            };
        }

        match self.timer.tick() {
            Tick::Idle => SessionTick::Idle,
            Tick::Running { remaining } => SessionTick::Running {
                remaining_secs: remaining,
            },
            Tick::Expired => {
                if self.config.expiry_grace_secs == 0 {
                    self.close_grace(now)
                } else {
                    self.grace_remaining = Some(self.config.expiry_grace_secs);
                    SessionTick::Expired {
                        grace_secs: self.config.expiry_grace_secs,
                    }
                }
            }
        }
    }

    fn close_grace(&mut self, now: DateTime<Utc>) -> SessionTick {
        self.grace_remaining = None;
        if self.index + 1 == self.questions.len() {
            self.complete(now);
            SessionTick::Completed
        } else {
            self.move_to(self.index + 1, now);
            SessionTick::AutoAdvanced
        }
    }

    /// Whether the Next control should be enabled: an answer is recorded for
    /// the current question, or its time has run out.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.ledger.has(self.current_question().id()) || self.timer.is_expired()
    }

    /// Begin a fresh run over the same questions: ledger cleared, index back
    /// to 0, completion flag and timestamps re-stamped, timer restarted.
    pub fn retake(&mut self, now: DateTime<Utc>) {
        self.index = 0;
        self.ledger.clear();
        self.completed_at = None;
        self.started_at = now;
        self.grace_remaining = None;
        self.timer.reset(self.config.question_budget_secs);
        self.first_seen = vec![None; self.questions.len()];
        self.first_seen[0] = Some(now);
    }

    //
    // ─── RESULTS ───────────────────────────────────────────────────────────────
    //

    /// Score the run as it stands. Idempotent; unanswered counts incorrect.
    #[must_use]
    pub fn score(&self) -> ScoreReport {
        score(&self.questions, &self.ledger)
    }

    /// Summary of the completed run, from the stored timestamp pair.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` before completion.
    pub fn summary(&self) -> Result<AttemptSummary, SessionError> {
        let completed_at = self.completed_at.ok_or(SessionError::Incomplete)?;
        let report = self.score();
        Ok(AttemptSummary::from_report(
            self.selection.subject.clone(),
            self.selection.exam_type,
            &report,
            self.started_at,
            completed_at,
        )?)
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn selection(&self) -> &ExamSelection {
        &self.selection
    }

    /// Always valid: the list is non-empty and the index stays in bounds.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.index]
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    #[must_use]
    pub fn timer(&self) -> &QuestionTimer {
        &self.timer
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// When the question at `index` first appeared, if it has been shown.
    #[must_use]
    pub fn question_first_seen(&self, index: usize) -> Option<DateTime<Utc>> {
        self.first_seen.get(index).copied().flatten()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            index: self.index,
            total: self.questions.len(),
            answered: self.ledger.answered_count(),
        }
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }
}
