//! Shared helpers for integration tests.

#![allow(dead_code)]

use set_arena::{Card, DisplaySink, PlayerId, Slot, table::SharedTable};
use std::{
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Shown {
    Score(PlayerId, u32),
    Countdown(Duration, bool),
    Elapsed(Duration),
    Freeze(PlayerId, Duration),
    Hints(Vec<Vec<Slot>>),
    Winners(Vec<PlayerId>),
}

/// Display sink that records everything it is shown
#[derive(Default)]
pub struct RecordingDisplay {
    events: Mutex<Vec<Shown>>,
}

impl RecordingDisplay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, shown: Shown) {
        self.events.lock().unwrap().push(shown);
    }

    pub fn events(&self) -> Vec<Shown> {
        self.events.lock().unwrap().clone()
    }

    pub fn score(&self, player: PlayerId) -> Option<u32> {
        self.events().into_iter().rev().find_map(|e| match e {
            Shown::Score(p, s) if p == player => Some(s),
            _ => None,
        })
    }

    pub fn countdowns(&self) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Shown::Countdown(d, _) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn elapsed(&self) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Shown::Elapsed(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn freezes(&self, player: PlayerId) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Shown::Freeze(p, d) if p == player => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn hints(&self) -> Vec<Vec<Vec<Slot>>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Shown::Hints(h) => Some(h),
                _ => None,
            })
            .collect()
    }

    pub fn winners(&self) -> Option<Vec<PlayerId>> {
        self.events().into_iter().find_map(|e| match e {
            Shown::Winners(w) => Some(w),
            _ => None,
        })
    }
}

impl DisplaySink for RecordingDisplay {
    fn set_score(&self, player: PlayerId, score: u32) {
        self.push(Shown::Score(player, score));
    }

    fn set_countdown(&self, remaining: Duration, warn: bool) {
        self.push(Shown::Countdown(remaining, warn));
    }

    fn set_elapsed(&self, elapsed: Duration) {
        self.push(Shown::Elapsed(elapsed));
    }

    fn set_freeze(&self, player: PlayerId, remaining: Duration) {
        self.push(Shown::Freeze(player, remaining));
    }

    fn show_hints(&self, hints: &[Vec<Slot>]) {
        self.push(Shown::Hints(hints.to_vec()));
    }

    fn announce_winners(&self, winners: &[PlayerId]) {
        self.push(Shown::Winners(winners.to_vec()));
    }
}

/// Cards 0, 1 and 2 form the only match
pub fn first_triple_only(cards: &[Card]) -> bool {
    let mut ids: Vec<u32> = cards.iter().map(|c| c.0).collect();
    ids.sort();
    ids == [0, 1, 2]
}

/// Any three cards whose ids sum to a multiple of three
pub fn sum_mod_three(cards: &[Card]) -> bool {
    cards.iter().map(|c| c.0).sum::<u32>() % 3 == 0
}

/// Polls `check` every few milliseconds, panicking after `limit`
pub async fn wait_until<F, Fut>(limit: Duration, mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let polled = tokio::time::timeout(limit, async {
        while !check().await {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(polled.is_ok(), "condition not reached within {:?}", limit);
}

pub async fn slot_of(table: &SharedTable, card: u32) -> Slot {
    table
        .read()
        .await
        .slot_of(Card(card))
        .expect("card should be on the table")
}

pub async fn table_full(table: &SharedTable, cards: usize) -> bool {
    table.read().await.count_placed_cards() == cards
}
