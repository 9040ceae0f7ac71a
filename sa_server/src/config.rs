//! Server configuration management.
//!
//! Game knobs come from a JSON file (`--config`) or from environment
//! variables, then command line flags override either source.

use set_arena::GameConfig;
use std::{net::SocketAddr, path::PathBuf};

/// Command line overrides, all optional
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub players: Option<usize>,
    pub humans: Option<usize>,
    pub round_ms: Option<i64>,
    pub hints: bool,
    pub metrics: Option<SocketAddr>,
    pub seed: Option<u64>,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Game engine configuration
    pub game: GameConfig,
    /// Prometheus scrape address, metrics are off when unset
    pub metrics: Option<SocketAddr>,
    /// Fixed deck shuffle seed
    pub seed: Option<u64>,
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be read or parsed, or the
    /// resulting game configuration is invalid
    pub fn from_env(cli: CliOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), cli)
    }

    /// Load configuration using `lookup` in place of the environment
    pub fn from_lookup<F>(lookup: F, cli: CliOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut game = match &cli.config_file {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                GameConfig::from_json_str(&text)?
            }
            None => game_from_lookup(&lookup),
        };

        if let Some(players) = cli.players {
            game.players = players;
        }
        if let Some(humans) = cli.humans {
            game.human_players = humans;
        }
        if let Some(round_ms) = cli.round_ms {
            game.round_duration_ms = round_ms;
        }
        if cli.hints {
            game.hints = true;
        }

        let metrics = match cli.metrics {
            Some(addr) => Some(addr),
            None => match lookup("SA_METRICS_BIND") {
                Some(raw) => Some(raw.parse().map_err(|_| ConfigError::InvalidEnv {
                    var: "SA_METRICS_BIND".to_string(),
                    reason: format!("'{}' is not a socket address", raw),
                })?),
                None => None,
            },
        };
        let seed = cli
            .seed
            .or_else(|| lookup("SA_SEED").and_then(|v| v.parse().ok()));

        let config = ServerConfig {
            game,
            metrics,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        Ok(())
    }
}

fn game_from_lookup<F>(lookup: &F) -> GameConfig
where
    F: Fn(&str) -> Option<String>,
{
    let d = GameConfig::default();

    GameConfig {
        table_size: parse_or(lookup, "SA_TABLE_SIZE", d.table_size),
        deck_size: parse_or(lookup, "SA_DECK_SIZE", d.deck_size),
        match_size: parse_or(lookup, "SA_MATCH_SIZE", d.match_size),
        players: parse_or(lookup, "SA_PLAYERS", d.players),
        human_players: parse_or(lookup, "SA_HUMAN_PLAYERS", d.human_players),
        round_duration_ms: parse_or(lookup, "SA_ROUND_MS", d.round_duration_ms),
        warning_threshold_ms: parse_or(lookup, "SA_WARNING_MS", d.warning_threshold_ms),
        point_freeze_ms: parse_or(lookup, "SA_POINT_FREEZE_MS", d.point_freeze_ms),
        penalty_freeze_ms: parse_or(lookup, "SA_PENALTY_FREEZE_MS", d.penalty_freeze_ms),
        tick_interval_ms: parse_or(lookup, "SA_TICK_MS", d.tick_interval_ms),
        warning_tick_interval_ms: parse_or(lookup, "SA_WARNING_TICK_MS", d.warning_tick_interval_ms),
        freeze_poll_interval_ms: parse_or(lookup, "SA_FREEZE_POLL_MS", d.freeze_poll_interval_ms),
        ai_think_time_ms: parse_or(lookup, "SA_AI_THINK_MS", d.ai_think_time_ms),
        ai_think_variance_ms: parse_or(lookup, "SA_AI_THINK_VARIANCE_MS", d.ai_think_variance_ms),
        hints: parse_or(lookup, "SA_HINTS", d.hints),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration for {var}: {reason}")]
    InvalidEnv { var: String, reason: String },

    #[error(transparent)]
    Game(#[from] set_arena::ConfigError),
}

/// Helper to parse a variable with default fallback
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
