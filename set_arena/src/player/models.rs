//! Player state models.

use crate::table::PlayerId;
use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

/// Lifecycle of a player agent
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AgentState {
    /// Waiting for an input event
    #[default]
    Idle,
    /// Transient: a toggle was dequeued and waits for the table write lock.
    /// Watchers usually see the state that follows it.
    Queued,
    /// Holds some tokens, below the claim threshold
    Thinking,
    /// Claim submitted, suspended until the dealer answers
    AwaitingVerdict,
    /// Cooling down after a verdict; input is ignored
    Frozen,
    /// Agent task has exited
    Terminated,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Idle => "idle",
            Self::Queued => "queued",
            Self::Thinking => "thinking",
            Self::AwaitingVerdict => "awaiting verdict",
            Self::Frozen => "frozen",
            Self::Terminated => "terminated",
        };
        write!(f, "{repr}")
    }
}

/// Flags shared between an agent and the dealer.
///
/// `under_review` is raised by the agent when it submits a claim and by the
/// dealer while it checks one. Input is rejected while it is set.
#[derive(Debug)]
pub struct PlayerStatus {
    id: PlayerId,
    under_review: AtomicBool,
}

impl PlayerStatus {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            under_review: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn is_under_review(&self) -> bool {
        self.under_review.load(Ordering::Acquire)
    }

    pub(crate) fn set_under_review(&self, value: bool) {
        self.under_review.store(value, Ordering::Release);
    }
}
