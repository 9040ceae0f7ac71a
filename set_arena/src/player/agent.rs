//! Player agent task: drains slot toggles, submits claims, applies verdicts.

use super::{
    generator::Generator,
    handle::PlayerHandle,
    models::{AgentState, PlayerStatus},
};
use crate::{
    config::GameConfig,
    dealer::messages::Claim,
    display::DisplaySink,
    table::{PlayerId, SharedTable, Slot, Toggle, Verdict},
};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::{Instant, sleep},
};

/// Channels an agent shares with the dealer
pub struct AgentLinks {
    /// Claim inbox of the dealer
    pub claims: mpsc::UnboundedSender<Claim>,
    /// Raised by the dealer when the game ends
    pub shutdown: watch::Receiver<bool>,
    /// Bumped by the dealer at every round reset
    pub round: watch::Receiver<u64>,
}

/// One participant. Owns its score, its request queue and its freeze state.
pub struct PlayerAgent {
    id: PlayerId,
    human: bool,
    config: GameConfig,
    table: Arc<SharedTable>,
    display: Arc<dyn DisplaySink>,
    requests: mpsc::Receiver<Slot>,
    state: watch::Sender<AgentState>,
    status: Arc<PlayerStatus>,
    handle: PlayerHandle,
    links: AgentLinks,
    score: u32,
}

impl PlayerAgent {
    /// Create a new agent
    ///
    /// # Arguments
    ///
    /// * `id` - Player ID
    /// * `human` - Whether input comes from outside; otherwise a generator drives it
    /// * `config` - Game configuration
    /// * `table` - Shared table
    /// * `display` - Display sink
    /// * `links` - Channels to the dealer
    pub fn new(
        id: PlayerId,
        human: bool,
        config: &GameConfig,
        table: Arc<SharedTable>,
        display: Arc<dyn DisplaySink>,
        links: AgentLinks,
    ) -> Self {
        let (request_tx, requests) = mpsc::channel(config.match_size.max(1));
        let (state, state_rx) = watch::channel(AgentState::Idle);
        let status = Arc::new(PlayerStatus::new(id));
        let handle = PlayerHandle::new(id, request_tx, status.clone(), state_rx, table.clone());

        Self {
            id,
            human,
            config: config.clone(),
            table,
            display,
            requests,
            state,
            status,
            handle,
            links,
            score: 0,
        }
    }

    pub fn handle(&self) -> PlayerHandle {
        self.handle.clone()
    }

    /// Spawn the agent on the runtime. The task resolves to the final score.
    pub fn spawn(self) -> JoinHandle<u32> {
        tokio::spawn(self.run())
    }

    /// Run the agent until the dealer signals shutdown
    pub async fn run(mut self) -> u32 {
        log::info!("Player {} starting (human: {})", self.id, self.human);

        let generator = (!self.human).then(|| {
            Generator::new(
                self.handle(),
                self.links.shutdown.clone(),
                self.config.table_size,
                self.config.ai_think_time_ms,
                self.config.ai_think_variance_ms,
            )
            .spawn()
        });

        loop {
            let slot = tokio::select! {
                biased;
                _ = self.links.shutdown.wait_for(|done| *done) => break,
                slot = self.requests.recv() => match slot {
                    Some(slot) => slot,
                    None => break,
                },
            };

            self.set_state(AgentState::Queued);
            self.handle_request(slot).await;

            if self.is_shutting_down() {
                break;
            }
        }

        self.discard_requests();
        self.set_state(AgentState::Terminated);

        if let Some(generator) = generator {
            let _ = generator.await;
        }

        log::info!("Player {} terminated with score {}", self.id, self.score);
        self.score
    }

    /// Drain one toggle and submit a claim once the threshold is reached
    async fn handle_request(&mut self, slot: Slot) {
        if self.status.is_under_review() {
            log::debug!("Player {}: dropping toggle on {} during review", self.id, slot);
            return;
        }

        let verdict = {
            let mut table = self.table.write().await;
            match table.toggle_token(self.id, slot) {
                Toggle::Placed | Toggle::Removed => {}
                Toggle::Rejected => {
                    log::debug!("Player {}: toggle on slot {} rejected", self.id, slot);
                }
            }

            if !table.is_at_threshold(self.id) {
                let next = if table.tokens_of(self.id).is_empty() {
                    AgentState::Idle
                } else {
                    AgentState::Thinking
                };
                self.set_state(next);
                return;
            }

            self.status.set_under_review(true);
            let (claim, verdict) = Claim::new(self.id);
            if self.links.claims.send(claim).is_err() {
                log::debug!("Player {}: dealer gone, claim not submitted", self.id);
                self.status.set_under_review(false);
                return;
            }
            verdict
        };

        log::debug!("Player {} submitted a claim", self.id);
        self.set_state(AgentState::AwaitingVerdict);
        let verdict = self.await_verdict(verdict).await;

        match verdict {
            Some(Verdict::Legal) => self.point().await,
            Some(Verdict::Illegal) => self.penalty().await,
            None => log::debug!("Player {}: claim dropped by dealer", self.id),
        }

        self.status.set_under_review(false);
        self.settle().await;
    }

    /// Suspends until the dealer answers or the game shuts down. Toggles
    /// queued while suspended are stale either way and get discarded.
    async fn await_verdict(&mut self, mut verdict: oneshot::Receiver<Verdict>) -> Option<Verdict> {
        let delivered = tokio::select! {
            biased;
            _ = self.links.shutdown.wait_for(|done| *done) => None,
            answer = &mut verdict => Some(answer.ok()),
        };
        self.discard_requests();

        match delivered {
            Some(answer) => answer,
            // Woken by shutdown: a verdict that already arrived is still
            // applied, exactly once
            None => verdict.try_recv().ok(),
        }
    }

    /// Award a point, then freeze
    async fn point(&mut self) {
        self.score += 1;
        log::debug!("Player {} scored, now {}", self.id, self.score);
        self.display.set_score(self.id, self.score);
        self.freeze(self.config.point_freeze()).await;
    }

    /// Freeze for the penalty duration
    async fn penalty(&mut self) {
        log::debug!("Player {} penalized", self.id);
        self.freeze(self.config.penalty_freeze()).await;
    }

    /// Polling wait that refreshes the freeze display until the duration
    /// elapses, the round is reset, or the game shuts down
    async fn freeze(&mut self, duration: Duration) {
        if duration.is_zero() {
            return;
        }

        self.set_state(AgentState::Frozen);
        self.links.round.borrow_and_update();
        let until = Instant::now() + duration;
        let poll = self.config.freeze_poll_interval();

        loop {
            let now = Instant::now();
            if now >= until || self.is_shutting_down() {
                break;
            }
            let remaining = until - now;
            self.display.set_freeze(self.id, remaining);

            tokio::select! {
                biased;
                _ = self.links.shutdown.wait_for(|done| *done) => break,
                _ = self.links.round.changed() => break,
                _ = sleep(poll.min(remaining)) => {}
            }
        }

        self.display.set_freeze(self.id, Duration::ZERO);
    }

    /// Picks the resting state from the tokens left on the table
    async fn settle(&mut self) {
        let holding = !self.table.read().await.tokens_of(self.id).is_empty();
        self.set_state(if holding {
            AgentState::Thinking
        } else {
            AgentState::Idle
        });
    }

    fn discard_requests(&mut self) {
        while self.requests.try_recv().is_ok() {}
    }

    fn is_shutting_down(&self) -> bool {
        *self.links.shutdown.borrow()
    }

    fn set_state(&self, state: AgentState) {
        self.state.send_replace(state);
    }
}
