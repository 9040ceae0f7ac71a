//! Dealer inbox message types.

use crate::table::{PlayerId, Verdict};
use tokio::sync::oneshot;

/// A player's assertion that its tokens form a match.
///
/// Dropping `reply` without sending is how the dealer discards a stale claim;
/// the waiting agent sees the channel close and resumes.
#[derive(Debug)]
pub struct Claim {
    pub player: PlayerId,
    pub reply: oneshot::Sender<Verdict>,
}

impl Claim {
    pub fn new(player: PlayerId) -> (Self, oneshot::Receiver<Verdict>) {
        let (reply, verdict) = oneshot::channel();
        (Self { player, reply }, verdict)
    }
}
