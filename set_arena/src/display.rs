//! Display sink boundary.
//!
//! The engine pushes every user-visible change through [`DisplaySink`]. Sinks
//! are fire-and-forget: they are called from the dealer task, agent tasks and
//! from inside table critical sections, so an implementation must never block.

use crate::table::entities::{Card, PlayerId, Slot};
use std::time::Duration;

/// Receiver of user-visible game state changes
pub trait DisplaySink: Send + Sync {
    /// A card was dealt into a slot
    fn place_card(&self, _card: Card, _slot: Slot) {}

    /// A slot was emptied
    fn remove_card(&self, _slot: Slot) {}

    /// A player put a token on a slot
    fn place_token(&self, _player: PlayerId, _slot: Slot) {}

    /// A player's token left a slot
    fn remove_token(&self, _player: PlayerId, _slot: Slot) {}

    /// Score of a player changed
    fn set_score(&self, player: PlayerId, score: u32);

    /// Round countdown, `warn` is set once the warning threshold is crossed
    fn set_countdown(&self, remaining: Duration, warn: bool);

    /// Elapsed time since the last reset, used when rounds count up
    fn set_elapsed(&self, elapsed: Duration);

    /// Remaining freeze time of a player, zero once the freeze is over
    fn set_freeze(&self, player: PlayerId, remaining: Duration);

    /// Matches currently on the table, as slot lists
    fn show_hints(&self, _hints: &[Vec<Slot>]) {}

    /// Final winners of the game
    fn announce_winners(&self, winners: &[PlayerId]);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn set_score(&self, _player: PlayerId, _score: u32) {}
    fn set_countdown(&self, _remaining: Duration, _warn: bool) {}
    fn set_elapsed(&self, _elapsed: Duration) {}
    fn set_freeze(&self, _player: PlayerId, _remaining: Duration) {}
    fn announce_winners(&self, _winners: &[PlayerId]) {}
}
