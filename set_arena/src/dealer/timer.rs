//! Round clock bookkeeping.

use crate::config::{MAX_DURATION_MS, TimerMode};
use std::time::Duration;
use tokio::time::Instant;

/// A countdown at or below this margin ends the round.
pub const EXPIRY_MARGIN: Duration = Duration::from_millis(50);

/// Dealer-owned round clock. Pure bookkeeping: callers pass `now`, the
/// dealer decides what to display.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    mode: TimerMode,
    warning: Duration,
    started: Instant,
    deadline: Instant,
}

impl RoundTimer {
    pub fn new(mode: TimerMode, warning: Duration) -> Self {
        let now = Instant::now();
        let mut timer = Self {
            mode,
            warning,
            started: now,
            deadline: now,
        };
        timer.reset(now);
        timer
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Rounds with a fixed length end on the clock; the others end when no
    /// match is left on the table
    pub fn has_fixed_length(&self) -> bool {
        matches!(self.mode, TimerMode::CountDown(_))
    }

    pub fn reset(&mut self, now: Instant) {
        self.started = now;
        self.deadline = match self.mode {
            TimerMode::CountDown(length) => now
                .checked_add(length)
                .unwrap_or_else(|| now + Duration::from_millis(MAX_DURATION_MS)),
            TimerMode::CountUp | TimerMode::Hidden => now,
        };
    }

    /// Time left on the countdown, never below zero
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    pub fn is_warning(&self, now: Instant) -> bool {
        self.has_fixed_length() && self.remaining(now) < self.warning
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.has_fixed_length() && self.remaining(now) <= EXPIRY_MARGIN
    }
}
