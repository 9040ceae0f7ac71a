//! Game configuration models.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// How the round clock is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Fixed round length counting down to zero
    CountDown(Duration),
    /// No fixed length; shows elapsed time since the last reset
    CountUp,
    /// No fixed length and no clock display
    Hidden,
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerMode::CountDown(d) => write!(f, "countdown {}ms", d.as_millis()),
            TimerMode::CountUp => write!(f, "count up"),
            TimerMode::Hidden => write!(f, "hidden"),
        }
    }
}

/// Longest accepted round or freeze, one day
pub const MAX_DURATION_MS: u64 = 24 * 60 * 60 * 1000;

/// Configuration error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Game configuration. Read-only once the game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of slots on the table (default: 12)
    pub table_size: usize,

    /// Number of distinct cards (default: 81)
    pub deck_size: usize,

    /// Cards per claim (default: 3)
    pub match_size: usize,

    /// Total number of players (default: 2)
    pub players: usize,

    /// How many of the players take input from outside; the rest run a generator
    pub human_players: usize,

    /// Round length in ms. 0 counts up, negative hides the clock.
    pub round_duration_ms: i64,

    /// Countdown below this shows a warning and ticks faster
    pub warning_threshold_ms: u64,

    /// Freeze after a legal claim
    pub point_freeze_ms: u64,

    /// Freeze after an illegal claim
    pub penalty_freeze_ms: u64,

    /// Dealer tick while the countdown is above the warning threshold
    pub tick_interval_ms: u64,

    /// Dealer tick once the warning threshold is crossed
    pub warning_tick_interval_ms: u64,

    /// Refresh period of the freeze display
    pub freeze_poll_interval_ms: u64,

    /// Average delay between generated key presses
    pub ai_think_time_ms: u64,

    /// Random spread (±) around `ai_think_time_ms`
    pub ai_think_variance_ms: u64,

    /// Send the matches on the table to the display after every deal
    pub hints: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            table_size: 12,
            deck_size: 81,
            match_size: 3,
            players: 2,
            human_players: 0,
            round_duration_ms: 60_000,
            warning_threshold_ms: 5_000,
            point_freeze_ms: 1_000,
            penalty_freeze_ms: 3_000,
            tick_interval_ms: 200,
            warning_tick_interval_ms: 10,
            freeze_poll_interval_ms: 500,
            ai_think_time_ms: 50,
            ai_think_variance_ms: 25,
            hints: false,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_size == 0 {
            return Err(invalid("table_size", "Must be greater than 0"));
        }

        if self.deck_size == 0 {
            return Err(invalid("deck_size", "Must be greater than 0"));
        }

        if self.match_size == 0 {
            return Err(invalid("match_size", "Must be greater than 0"));
        }

        if self.match_size > self.table_size {
            return Err(invalid(
                "match_size",
                format!("Must not exceed table size ({})", self.table_size),
            ));
        }

        if self.players == 0 {
            return Err(invalid("players", "Must be at least 1"));
        }

        if self.human_players > self.players {
            return Err(invalid(
                "human_players",
                format!("Cannot exceed players ({})", self.players),
            ));
        }

        if self.tick_interval_ms == 0 || self.warning_tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "Tick intervals must be positive"));
        }

        if self.round_duration_ms > MAX_DURATION_MS as i64 {
            return Err(invalid(
                "round_duration_ms",
                format!("Must not exceed {}ms", MAX_DURATION_MS),
            ));
        }

        for (field, value) in [
            ("point_freeze_ms", self.point_freeze_ms),
            ("penalty_freeze_ms", self.penalty_freeze_ms),
        ] {
            if value > MAX_DURATION_MS {
                return Err(invalid(field, format!("Must not exceed {}ms", MAX_DURATION_MS)));
            }
        }

        if self.freeze_poll_interval_ms == 0 {
            return Err(invalid("freeze_poll_interval_ms", "Must be positive"));
        }

        Ok(())
    }

    pub fn timer_mode(&self) -> TimerMode {
        match self.round_duration_ms {
            ms if ms > 0 => TimerMode::CountDown(Duration::from_millis(ms as u64)),
            0 => TimerMode::CountUp,
            _ => TimerMode::Hidden,
        }
    }

    pub fn warning_threshold(&self) -> Duration {
        Duration::from_millis(self.warning_threshold_ms)
    }

    pub fn point_freeze(&self) -> Duration {
        Duration::from_millis(self.point_freeze_ms)
    }

    pub fn penalty_freeze(&self) -> Duration {
        Duration::from_millis(self.penalty_freeze_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn warning_tick_interval(&self) -> Duration {
        Duration::from_millis(self.warning_tick_interval_ms)
    }

    pub fn freeze_poll_interval(&self) -> Duration {
        Duration::from_millis(self.freeze_poll_interval_ms)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
