//! Dealer task: deals, runs the round clock and resolves claims.

use super::{messages::Claim, timer::RoundTimer};
use crate::{
    config::{GameConfig, TimerMode},
    display::DisplaySink,
    player::{PlayerAgent, PlayerHandle},
    rules::{MatchRules, find_matches, has_match},
    table::{Deck, PlayerId, SharedTable, Slot, Verdict},
};
use serde::Serialize;
use std::{collections::VecDeque, sync::Arc, time::Duration};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{Instant, sleep},
};

/// Final result of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    /// `(player, score)` for every player that shut down cleanly
    pub scores: Vec<(PlayerId, u32)>,
    /// Every player holding the highest score
    pub winners: Vec<PlayerId>,
}

/// Channels the dealer owns or listens to
pub struct DealerLinks {
    /// Claims submitted by agents, in submission order
    pub inbox: mpsc::UnboundedReceiver<Claim>,
    /// External terminate request
    pub terminate: watch::Receiver<bool>,
    /// Shutdown cascade to the agents
    pub shutdown: watch::Sender<bool>,
    /// Round epoch, bumped at every reset
    pub round: watch::Sender<u64>,
}

struct Seat {
    handle: PlayerHandle,
    agent: Option<PlayerAgent>,
    task: Option<JoinHandle<u32>>,
}

/// The single arbiter of a game
pub struct Dealer {
    config: GameConfig,
    table: Arc<SharedTable>,
    deck: Deck,
    rules: Arc<dyn MatchRules>,
    display: Arc<dyn DisplaySink>,
    links: DealerLinks,
    pending: VecDeque<Claim>,
    seats: Vec<Seat>,
    timer: RoundTimer,
    sleep_time: Duration,
    timed_out: bool,
}

impl Dealer {
    /// Create a new dealer
    ///
    /// # Arguments
    ///
    /// * `config` - Game configuration
    /// * `table` - Shared table
    /// * `deck` - Full deck of undealt cards
    /// * `rules` - Validity predicate
    /// * `display` - Display sink
    /// * `links` - Claim inbox and control channels
    /// * `agents` - Agents, indexed by player ID; spawned when the dealer runs
    pub fn new(
        config: GameConfig,
        table: Arc<SharedTable>,
        deck: Deck,
        rules: Arc<dyn MatchRules>,
        display: Arc<dyn DisplaySink>,
        links: DealerLinks,
        agents: Vec<PlayerAgent>,
    ) -> Self {
        let timer = RoundTimer::new(config.timer_mode(), config.warning_threshold());
        let sleep_time = config.tick_interval();
        let seats = agents
            .into_iter()
            .map(|agent| Seat {
                handle: agent.handle(),
                agent: Some(agent),
                task: None,
            })
            .collect();

        Self {
            config,
            table,
            deck,
            rules,
            display,
            links,
            pending: VecDeque::new(),
            seats,
            timer,
            sleep_time,
            timed_out: false,
        }
    }

    /// Run the game until terminate is requested or the deck holds no match
    pub async fn run(mut self) -> GameSummary {
        log::info!(
            "Dealer starting with {} players, clock {}",
            self.seats.len(),
            self.timer.mode()
        );
        self.spawn_players();

        while !self.should_finish() {
            self.place_cards_on_table().await;
            self.update_timer_display(true);
            self.timer_loop().await;
            self.timed_out = false;
            self.update_timer_display(false);
            self.remove_all_cards_from_table().await;
            self.deck.shuffle();
        }

        let scores = self.shutdown_players().await;
        let winners = announce_winners(&scores);
        self.display.announce_winners(&winners);
        log::info!("Dealer terminated, winners: {:?}", winners);

        GameSummary { scores, winners }
    }

    fn spawn_players(&mut self) {
        for seat in &mut self.seats {
            if let Some(agent) = seat.agent.take() {
                seat.task = Some(agent.spawn());
            }
        }
    }

    fn is_terminated(&self) -> bool {
        *self.links.terminate.borrow()
    }

    fn should_finish(&self) -> bool {
        self.is_terminated()
            || !has_match(self.rules.as_ref(), self.deck.cards(), self.config.match_size)
    }

    async fn table_has_match(&self) -> bool {
        let cards = self.table.read().await.cards();
        has_match(self.rules.as_ref(), &cards, self.config.match_size)
    }

    /// Inner loop of one round
    async fn timer_loop(&mut self) {
        while !self.is_terminated()
            && !self.timed_out
            && (self.timer.has_fixed_length() || self.table_has_match().await)
        {
            self.sleep_until_woken_or_timeout().await;
            self.update_timer_display(false);
            self.resolve_claims().await;
            self.place_cards_on_table().await;
        }
    }

    /// Sleeps one tick, cut short by a claim or a terminate request
    async fn sleep_until_woken_or_timeout(&mut self) {
        let sleep_time = self.sleep_time;
        let woken_by = tokio::select! {
            biased;
            Ok(_) = self.links.terminate.wait_for(|done| *done) => None,
            Some(claim) = self.links.inbox.recv() => Some(claim),
            _ = sleep(sleep_time) => None,
        };

        if let Some(claim) = woken_by {
            self.pending.push_back(claim);
        }
    }

    /// Resolves every queued claim, oldest first
    pub(crate) async fn resolve_claims(&mut self) {
        loop {
            let next = self
                .pending
                .pop_front()
                .or_else(|| self.links.inbox.try_recv().ok());
            let Some(claim) = next else {
                break;
            };
            self.resolve(claim).await;
        }
    }

    async fn resolve(&mut self, claim: Claim) {
        let player = claim.player;
        let Some(status) = self.seats.get(player).map(|s| s.handle.status().clone()) else {
            log::warn!("Claim from unknown player {}", player);
            return;
        };

        status.set_under_review(true);
        let verdict = {
            let mut table = self.table.write().await;
            let slots: Vec<Slot> = table.tokens_of(player).to_vec();
            if slots.len() != self.config.match_size {
                None
            } else {
                let cards = table.cards_of(player);
                if cards.len() == slots.len() && self.rules.is_match(&cards) {
                    for slot in slots {
                        table.remove_card(slot);
                    }
                    Some(Verdict::Legal)
                } else {
                    Some(Verdict::Illegal)
                }
            }
        };

        if verdict == Some(Verdict::Legal) {
            self.update_timer_display(true);
        }

        // A delivered verdict leaves the player under review; the agent clears
        // the flag itself once its freeze is over
        match verdict {
            Some(verdict) => {
                log::debug!("Claim from player {} is {}", player, verdict);
                if claim.reply.send(verdict).is_err() {
                    log::debug!("Player {} left before its verdict", player);
                    status.set_under_review(false);
                }
            }
            None => {
                log::debug!("Dropping stale claim from player {}", player);
                status.set_under_review(false);
            }
        }
    }

    /// Fills empty slots, in random order, from the shuffled deck
    pub(crate) async fn place_cards_on_table(&mut self) {
        self.deck.shuffle();
        let mut slots = self.table.read().await.empty_slots();
        if slots.is_empty() || self.deck.is_empty() {
            return;
        }
        self.deck.shuffle_slots(&mut slots);

        let placed = {
            let mut table = self.table.write().await;
            let mut placed = 0;
            for slot in slots {
                if table.card_at(slot).is_some() {
                    continue;
                }
                let Some(card) = self.deck.draw() else {
                    break;
                };
                match table.place_card(card, slot) {
                    Ok(()) => placed += 1,
                    Err(e) => {
                        log::warn!("Could not deal {} into slot {}: {}", card, slot, e);
                        self.deck.refill([card]);
                    }
                }
            }
            placed
        };

        if placed > 0 {
            log::debug!("Dealt {} cards, {} left in deck", placed, self.deck.len());
            if self.config.hints {
                self.show_hints().await;
            }
        }
    }

    async fn show_hints(&self) {
        let hints: Vec<Vec<Slot>> = {
            let table = self.table.read().await;
            let cards = table.cards();
            find_matches(self.rules.as_ref(), &cards, self.config.match_size, usize::MAX)
                .into_iter()
                .map(|group| group.into_iter().filter_map(|c| table.slot_of(c)).collect())
                .collect()
        };
        self.display.show_hints(&hints);
    }

    /// Refreshes the clock display; `reset` restarts the round clock
    fn update_timer_display(&mut self, reset: bool) {
        let now = Instant::now();
        match self.timer.mode() {
            TimerMode::Hidden => {}
            TimerMode::CountUp => {
                if reset {
                    self.timer.reset(now);
                    self.display.set_elapsed(Duration::ZERO);
                } else {
                    self.display.set_elapsed(self.timer.elapsed(now));
                }
            }
            TimerMode::CountDown(length) => {
                if reset {
                    self.timer.reset(now);
                    self.display.set_countdown(length, false);
                    return;
                }

                let warn = self.timer.is_warning(now);
                self.display.set_countdown(self.timer.remaining(now), warn);
                self.sleep_time = if warn {
                    self.config.warning_tick_interval()
                } else {
                    self.config.tick_interval()
                };

                if self.timer.is_expired(now) {
                    self.timed_out = true;
                    self.sleep_time = self.config.tick_interval();
                    self.timer.reset(now);
                }
            }
        }
    }

    /// Clears every token, returns every card to the deck and ends all freezes
    pub(crate) async fn remove_all_cards_from_table(&mut self) {
        let returned = {
            let mut table = self.table.write().await;
            for seat in &self.seats {
                seat.handle.status().set_under_review(true);
            }
            table.remove_all_tokens();
            let cards = table.remove_all_cards();
            for seat in &self.seats {
                seat.handle.status().set_under_review(false);
            }
            cards
        };

        let count = returned.len();
        self.deck.refill(returned);
        self.links.round.send_modify(|epoch| *epoch += 1);
        log::info!("Round over, {} cards returned, deck holds {}", count, self.deck.len());
    }

    /// Signals every agent to stop and collects the final scores
    async fn shutdown_players(&mut self) -> Vec<(PlayerId, u32)> {
        self.links.shutdown.send_replace(true);

        let mut scores = Vec::with_capacity(self.seats.len());
        for (id, seat) in self.seats.iter_mut().enumerate() {
            let Some(task) = seat.task.take() else {
                continue;
            };
            match task.await {
                Ok(score) => scores.push((id, score)),
                Err(e) => log::error!("Player {} task failed: {}", id, e),
            }
        }

        // Nobody is waiting on these any more
        self.pending.clear();
        while self.links.inbox.try_recv().is_ok() {}

        scores
    }
}

/// Every player whose score equals the highest score. All-zero scores make
/// everybody a winner.
pub fn announce_winners(scores: &[(PlayerId, u32)]) -> Vec<PlayerId> {
    let Some(best) = scores.iter().map(|&(_, score)| score).max() else {
        return Vec::new();
    };
    scores
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|&(id, _)| id)
        .collect()
}
