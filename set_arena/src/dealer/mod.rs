//! The dealer: single arbiter of a game.
//!
//! Rounds run `DealCards -> RunRound -> CollectAndReshuffle` until an external
//! terminate request arrives or the deck no longer contains a match. During a
//! round the dealer sleeps one tick at a time; a submitted claim or a
//! terminate request cuts the sleep short. Claims are resolved strictly in
//! submission order under the table write lock.

pub mod actor;
pub mod messages;
pub mod timer;

pub use actor::{Dealer, DealerLinks, GameSummary, announce_winners};
pub use messages::Claim;
pub use timer::{EXPIRY_MARGIN, RoundTimer};
