//! Error types for table mutations.

use super::entities::{Card, Slot};
use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Contract violations on the slot/card mapping
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// Slot index is outside the table
    #[error("Slot {slot} is out of range (table size {size})")]
    SlotOutOfRange { slot: Slot, size: usize },

    /// Slot already holds a card
    #[error("Slot {slot} already holds card {card}")]
    SlotOccupied { slot: Slot, card: Card },

    /// Card is already placed in another slot
    #[error("Card {card} is already placed in slot {slot}")]
    CardAlreadyPlaced { card: Card, slot: Slot },
}
