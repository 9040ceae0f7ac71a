//! Synthetic input for non-human players.

use super::{handle::PlayerHandle, models::AgentState};
use rand::Rng;
use std::time::Duration;
use tokio::{sync::watch, task::JoinHandle, time::sleep};

/// Presses random slots at a human-like pace. Paused while its agent is
/// frozen and stopped for good at shutdown.
pub struct Generator {
    handle: PlayerHandle,
    state: watch::Receiver<AgentState>,
    shutdown: watch::Receiver<bool>,
    table_size: usize,
    think_time_ms: u64,
    think_variance_ms: u64,
}

impl Generator {
    pub fn new(
        handle: PlayerHandle,
        shutdown: watch::Receiver<bool>,
        table_size: usize,
        think_time_ms: u64,
        think_variance_ms: u64,
    ) -> Self {
        Self {
            state: handle.watch_state(),
            handle,
            shutdown,
            table_size,
            think_time_ms,
            think_variance_ms,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        let id = self.handle.id();
        log::info!("Generator for player {} starting", id);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.wait_for(|done| *done) => break,
                thawed = self.state.wait_for(|state| *state != AgentState::Frozen) => {
                    if thawed.is_err() {
                        break;
                    }
                }
            }

            let delay = self.think_delay();
            tokio::select! {
                biased;
                _ = self.shutdown.wait_for(|done| *done) => break,
                _ = sleep(delay) => {}
            }

            let slot = rand::rng().random_range(0..self.table_size);
            self.handle.key_pressed(slot).await;
        }

        log::info!("Generator for player {} terminated", id);
    }

    /// Think time with random variance, never below 1ms
    fn think_delay(&self) -> Duration {
        let mut rng = rand::rng();
        let variance = rng.random_range(0..=self.think_variance_ms) as i64;
        let sign = if rng.random_bool(0.5) { 1 } else { -1 };

        let delay = self.think_time_ms as i64 + variance * sign;
        Duration::from_millis(delay.max(1) as u64)
    }
}
