//! Console display: every table change becomes a log line.

use crate::rules::describe;
use set_arena::{Card, DisplaySink, PlayerId, Slot};
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

/// Logs game events. Clock updates are reported once per whole second.
#[derive(Debug)]
pub struct ConsoleDisplay {
    last_second: AtomicU64,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self {
            last_second: AtomicU64::new(u64::MAX),
        }
    }

    /// Returns whether `time` falls in a different whole second than the
    /// previous clock update
    fn second_changed(&self, time: Duration) -> bool {
        let second = time.as_secs();
        self.last_second.swap(second, Ordering::Relaxed) != second
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for ConsoleDisplay {
    fn place_card(&self, card: Card, slot: Slot) {
        log::info!("[slot {:>2}] {} ({})", slot, describe(card), card);
    }

    fn remove_card(&self, slot: Slot) {
        log::debug!("[slot {:>2}] empty", slot);
    }

    fn place_token(&self, player: PlayerId, slot: Slot) {
        log::info!("player {} marks slot {}", player, slot);
    }

    fn remove_token(&self, player: PlayerId, slot: Slot) {
        log::debug!("player {} unmarks slot {}", player, slot);
    }

    fn set_score(&self, player: PlayerId, score: u32) {
        log::info!("player {} scores, total {}", player, score);
    }

    fn set_countdown(&self, remaining: Duration, warn: bool) {
        if !self.second_changed(remaining) {
            return;
        }
        if warn {
            log::warn!("{}s left in round", remaining.as_secs());
        } else {
            log::info!("{}s left in round", remaining.as_secs());
        }
    }

    fn set_elapsed(&self, elapsed: Duration) {
        if self.second_changed(elapsed) {
            log::info!("{}s into round", elapsed.as_secs());
        }
    }

    fn set_freeze(&self, player: PlayerId, remaining: Duration) {
        if remaining.is_zero() {
            log::info!("player {} may play again", player);
        } else {
            log::debug!("player {} frozen for {}ms", player, remaining.as_millis());
        }
    }

    fn show_hints(&self, hints: &[Vec<Slot>]) {
        for hint in hints {
            log::info!("hint: slots {:?}", hint);
        }
    }

    fn announce_winners(&self, winners: &[PlayerId]) {
        match winners {
            [] => log::info!("No players"),
            [winner] => log::info!("Player {} wins", winner),
            _ => log::info!("Tie between players {:?}", winners),
        }
    }
}
