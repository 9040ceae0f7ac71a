//! Shared table: the only state mutated from more than one task.
//!
//! This module implements:
//! - Card and player identifiers
//! - TableState: slot/card bijection plus per-player token indexes
//! - SharedTable: the reader/writer lock every task goes through
//! - Deck: the dealer-owned pool of undealt cards
//!
//! ## Locking
//!
//! All mutating operations are methods on [`TableState`] taking `&mut self`,
//! so they are only reachable through [`SharedTable::write`]. Guards release
//! the lock when dropped, including when the holding task is cancelled.
//!
//! ## Example
//!
//! ```no_run
//! use set_arena::display::NullDisplay;
//! use set_arena::table::{Card, SharedTable, TableState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let table = SharedTable::new(TableState::new(12, 2, 3, Arc::new(NullDisplay)));
//!     table.write().await.place_card(Card(4), 0).unwrap();
//!     assert_eq!(table.read().await.card_at(0), Some(Card(4)));
//! }
//! ```

pub mod deck;
pub mod entities;
pub mod errors;
pub mod state;

pub use deck::Deck;
pub use entities::{Card, PlayerId, Slot, Verdict};
pub use errors::{TableError, TableResult};
pub use state::{SharedTable, TableState, Toggle};
