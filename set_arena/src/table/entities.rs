use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a table slot in `[0, table_size)`.
pub type Slot = usize;

/// Index of a player in `[0, players)`.
pub type PlayerId = usize;

/// An opaque card identifier. Whether three cards form a match is decided by
/// a [`MatchRules`](crate::rules::MatchRules) implementation, never by the
/// engine itself.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub u32);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for Card {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Outcome of a claim, delivered from the dealer to exactly one agent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Legal,
    Illegal,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Legal => "legal",
            Self::Illegal => "illegal",
        };
        write!(f, "{repr}")
    }
}
