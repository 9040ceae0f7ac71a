//! Prometheus metrics for a running game.
//!
//! Metrics are exported in Prometheus text format at `http://<addr>/metrics`.
//! [`MetricsDisplay`] wraps any display sink and counts what passes through it.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//! let display = MetricsDisplay::new(ConsoleDisplay::new());
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use set_arena::{Card, DisplaySink, PlayerId, Slot};
use std::{collections::HashSet, net::SocketAddr, sync::Mutex, time::Duration};

/// Initialize Prometheus metrics exporter.
///
/// # Arguments
///
/// - `addr`: Address to bind the metrics server to (e.g., `0.0.0.0:9090`)
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// Game Metrics
// ============================================================================

/// Increment cards dealt counter.
pub fn cards_dealt_total() {
    metrics::counter!("cards_dealt_total").increment(1);
}

/// Increment cards removed counter.
pub fn cards_removed_total() {
    metrics::counter!("cards_removed_total").increment(1);
}

/// Increment points counter and publish the player's score.
pub fn points_total(player: PlayerId, score: u32) {
    metrics::counter!("points_total", "player" => player.to_string()).increment(1);
    metrics::gauge!("player_score", "player" => player.to_string()).set(score as f64);
}

/// Increment freezes counter.
pub fn freezes_total(player: PlayerId) {
    metrics::counter!("freezes_total", "player" => player.to_string()).increment(1);
}

/// Set remaining round time in milliseconds.
pub fn round_remaining_ms(remaining: Duration) {
    metrics::gauge!("round_remaining_ms").set(remaining.as_millis() as f64);
}

/// Increment games finished counter.
pub fn games_finished_total() {
    metrics::counter!("games_finished_total").increment(1);
}

/// Display sink decorator that records metrics, then forwards every call
pub struct MetricsDisplay<D> {
    inner: D,
    frozen: Mutex<HashSet<PlayerId>>,
}

impl<D: DisplaySink> MetricsDisplay<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            frozen: Mutex::new(HashSet::new()),
        }
    }

    /// Returns true on the first update of a new freeze
    fn freeze_started(&self, player: PlayerId, remaining: Duration) -> bool {
        let Ok(mut frozen) = self.frozen.lock() else {
            return false;
        };
        if remaining.is_zero() {
            frozen.remove(&player);
            false
        } else {
            frozen.insert(player)
        }
    }
}

impl<D: DisplaySink> DisplaySink for MetricsDisplay<D> {
    fn place_card(&self, card: Card, slot: Slot) {
        cards_dealt_total();
        self.inner.place_card(card, slot);
    }

    fn remove_card(&self, slot: Slot) {
        cards_removed_total();
        self.inner.remove_card(slot);
    }

    fn place_token(&self, player: PlayerId, slot: Slot) {
        self.inner.place_token(player, slot);
    }

    fn remove_token(&self, player: PlayerId, slot: Slot) {
        self.inner.remove_token(player, slot);
    }

    fn set_score(&self, player: PlayerId, score: u32) {
        points_total(player, score);
        self.inner.set_score(player, score);
    }

    fn set_countdown(&self, remaining: Duration, warn: bool) {
        round_remaining_ms(remaining);
        self.inner.set_countdown(remaining, warn);
    }

    fn set_elapsed(&self, elapsed: Duration) {
        self.inner.set_elapsed(elapsed);
    }

    fn set_freeze(&self, player: PlayerId, remaining: Duration) {
        if self.freeze_started(player, remaining) {
            freezes_total(player);
        }
        self.inner.set_freeze(player, remaining);
    }

    fn show_hints(&self, hints: &[Vec<Slot>]) {
        self.inner.show_hints(hints);
    }

    fn announce_winners(&self, winners: &[PlayerId]) {
        games_finished_total();
        self.inner.announce_winners(winners);
    }
}
