//! Wiring of a whole game: table, agents, dealer and their channels.

use crate::{
    config::{ConfigError, GameConfig},
    dealer::{Dealer, DealerLinks, GameSummary},
    display::DisplaySink,
    player::{AgentLinks, PlayerAgent, PlayerHandle},
    rules::MatchRules,
    table::{Deck, PlayerId, SharedTable, TableState},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::{
    sync::{mpsc, watch},
    task::{JoinError, JoinHandle},
};

/// Errors surfaced when joining a game
#[derive(Debug, Error)]
pub enum SessionError {
    /// The dealer task panicked or was aborted
    #[error("Dealer task failed: {0}")]
    Dealer(#[from] JoinError),

    /// `join` was called on a game that was built but never started
    #[error("Game was never started")]
    NotStarted,
}

/// Cloneable external terminate switch
#[derive(Clone, Debug)]
pub struct Terminator(Arc<watch::Sender<bool>>);

impl Terminator {
    /// Ask the dealer to end the game. Idempotent.
    pub fn terminate(&self) {
        self.0.send_replace(true);
    }

    pub fn is_terminated(&self) -> bool {
        *self.0.borrow()
    }
}

/// Game builder
pub struct GameSession {
    config: GameConfig,
    rules: Arc<dyn MatchRules>,
    display: Arc<dyn DisplaySink>,
    seed: Option<u64>,
}

impl GameSession {
    /// Validates the configuration and prepares a game
    pub fn new(
        config: GameConfig,
        rules: Arc<dyn MatchRules>,
        display: Arc<dyn DisplaySink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rules,
            display,
            seed: None,
        })
    }

    /// Makes deck shuffles reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds every component without spawning anything. Players
    /// `0..human_players` take outside input, the rest run a generator.
    pub fn build(self) -> (Dealer, GameHandle) {
        let config = self.config;
        let table = Arc::new(SharedTable::new(TableState::new(
            config.table_size,
            config.players,
            config.match_size,
            self.display.clone(),
        )));

        let (claims, inbox) = mpsc::unbounded_channel();
        let (terminate_tx, terminate) = watch::channel(false);
        let (shutdown, shutdown_rx) = watch::channel(false);
        let (round, round_rx) = watch::channel(0u64);

        let agents: Vec<PlayerAgent> = (0..config.players)
            .map(|id| {
                PlayerAgent::new(
                    id,
                    id < config.human_players,
                    &config,
                    table.clone(),
                    self.display.clone(),
                    AgentLinks {
                        claims: claims.clone(),
                        shutdown: shutdown_rx.clone(),
                        round: round_rx.clone(),
                    },
                )
            })
            .collect();
        let players = agents.iter().map(PlayerAgent::handle).collect();

        let deck = match self.seed {
            Some(seed) => Deck::seeded(config.deck_size, seed),
            None => Deck::new(config.deck_size),
        };

        let dealer = Dealer::new(
            config,
            table.clone(),
            deck,
            self.rules,
            self.display,
            DealerLinks {
                inbox,
                terminate,
                shutdown,
                round,
            },
            agents,
        );

        let handle = GameHandle {
            players,
            table,
            terminator: Terminator(Arc::new(terminate_tx)),
            task: None,
        };

        (dealer, handle)
    }

    /// Builds the game and spawns the dealer, which spawns the agents
    pub fn start(self) -> GameHandle {
        let (dealer, mut handle) = self.build();
        handle.task = Some(tokio::spawn(dealer.run()));
        handle
    }
}

/// Outside view of a running game
pub struct GameHandle {
    players: Vec<PlayerHandle>,
    table: Arc<SharedTable>,
    terminator: Terminator,
    task: Option<JoinHandle<GameSummary>>,
}

impl GameHandle {
    pub fn player(&self, id: PlayerId) -> Option<&PlayerHandle> {
        self.players.get(id)
    }

    pub fn players(&self) -> &[PlayerHandle] {
        &self.players
    }

    pub fn table(&self) -> &Arc<SharedTable> {
        &self.table
    }

    pub fn terminator(&self) -> Terminator {
        self.terminator.clone()
    }

    pub fn terminate(&self) {
        self.terminator.terminate();
    }

    /// Waits for the dealer to finish and returns the final result
    pub async fn join(self) -> Result<GameSummary, SessionError> {
        let task = self.task.ok_or(SessionError::NotStarted)?;
        Ok(task.await?)
    }
}
