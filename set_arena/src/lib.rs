//! # Set Arena
//!
//! A real-time matching game engine: several player agents race to claim
//! groups of cards (triples by default) from a shared table while a single
//! dealer validates claims, runs the round clock and refills the table.
//!
//! ## Architecture
//!
//! Every participant is its own Tokio task and all of them run in parallel
//! on the multi-threaded runtime:
//!
//! - **Dealer**: deals cards, resolves claims in FIFO order, ends rounds and
//!   announces winners
//! - **PlayerAgent**: drains slot toggles, submits a claim on reaching the
//!   match size, applies the verdict and freezes
//! - **Generator**: random input for non-human agents
//!
//! The only state shared between tasks is the table, guarded by one
//! reader/writer lock. Claims travel to the dealer over an mpsc queue and
//! each verdict comes back over its own oneshot channel.
//!
//! ## Core Modules
//!
//! - [`table`]: shared table state, deck and identifiers
//! - [`player`]: agents, input handles and generators
//! - [`dealer`]: dealer task, claim messages and round timer
//! - [`session`]: builds and starts a whole game
//! - [`rules`] and [`display`]: collaborator boundaries
//!
//! ## Example
//!
//! ```no_run
//! use set_arena::{GameConfig, GameSession, display::NullDisplay, table::Card};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let rules = |cards: &[Card]| cards.iter().map(|c| c.0).sum::<u32>() % 3 == 0;
//!     let game = GameSession::new(GameConfig::default(), Arc::new(rules), Arc::new(NullDisplay))
//!         .unwrap()
//!         .start();
//!
//!     game.terminate();
//!     let summary = game.join().await.unwrap();
//!     println!("winners: {:?}", summary.winners);
//! }
//! ```

/// Game configuration and validation.
pub mod config;

/// Dealer task, claims and round clock.
pub mod dealer;

/// Display sink boundary.
pub mod display;

/// Player agents and input sources.
pub mod player;

/// Validity predicate boundary and match search.
pub mod rules;

/// Game wiring.
pub mod session;

/// Shared table, deck and identifiers.
pub mod table;

pub use config::{ConfigError, GameConfig, TimerMode};
pub use dealer::{Dealer, GameSummary};
pub use display::{DisplaySink, NullDisplay};
pub use player::{AgentState, PlayerHandle};
pub use rules::MatchRules;
pub use session::{GameHandle, GameSession, SessionError, Terminator};
pub use table::{Card, PlayerId, Slot, Verdict};
