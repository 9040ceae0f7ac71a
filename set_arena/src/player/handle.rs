//! Input side of a player agent.

use super::models::{AgentState, PlayerStatus};
use crate::table::{PlayerId, SharedTable, Slot};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Cloneable handle used by input sources (keyboard, network, generator) to
/// feed slot selections into one agent.
#[derive(Clone)]
pub struct PlayerHandle {
    id: PlayerId,
    requests: mpsc::Sender<Slot>,
    status: Arc<PlayerStatus>,
    state: watch::Receiver<AgentState>,
    table: Arc<SharedTable>,
}

impl PlayerHandle {
    pub(crate) fn new(
        id: PlayerId,
        requests: mpsc::Sender<Slot>,
        status: Arc<PlayerStatus>,
        state: watch::Receiver<AgentState>,
        table: Arc<SharedTable>,
    ) -> Self {
        Self {
            id,
            requests,
            status,
            state,
            table,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn state(&self) -> AgentState {
        *self.state.borrow()
    }

    /// Receiver that follows the agent's state transitions
    pub fn watch_state(&self) -> watch::Receiver<AgentState> {
        self.state.clone()
    }

    pub fn is_frozen(&self) -> bool {
        self.state() == AgentState::Frozen
    }

    pub fn is_under_review(&self) -> bool {
        self.status.is_under_review()
    }

    pub(crate) fn status(&self) -> &Arc<PlayerStatus> {
        &self.status
    }

    /// Offers a slot toggle to the agent. Returns whether it was queued.
    ///
    /// The request is dropped here, before reaching the queue, when the dealer
    /// is reviewing this player, the player is frozen, the slot is empty, the
    /// queue already holds `match_size` requests, or the player is at the
    /// claim threshold and the slot is not one of its own tokens.
    pub async fn key_pressed(&self, slot: Slot) -> bool {
        if self.is_under_review() || self.is_frozen() {
            return false;
        }

        let table = self.table.read().await;
        if table.card_at(slot).is_none() {
            return false;
        }
        if table.is_at_threshold(self.id) && !table.has_token(self.id, slot) {
            return false;
        }

        // Enqueued under the read guard so the checks above still hold
        self.requests.try_send(slot).is_ok()
    }
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("under_review", &self.is_under_review())
            .finish()
    }
}
