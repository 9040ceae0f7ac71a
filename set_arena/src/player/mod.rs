//! Player agents and their input sources.
//!
//! This module implements:
//! - PlayerAgent: one task per participant, owning score, freeze and queue
//! - PlayerHandle: the filtered input side of an agent
//! - Generator: random key presses for non-human players
//!
//! ## Agent lifecycle
//!
//! `Idle -> Queued -> Thinking -> AwaitingVerdict -> Frozen -> Idle`
//!
//! A toggle that brings the agent to `match_size` tokens submits a claim and
//! suspends the agent until the dealer answers. A legal verdict scores a point
//! and freezes for the point duration, an illegal one freezes for the penalty
//! duration. Shutdown wakes the agent from every suspension point.

pub mod agent;
pub mod generator;
pub mod handle;
pub mod models;

pub use agent::{AgentLinks, PlayerAgent};
pub use generator::Generator;
pub use handle::PlayerHandle;
pub use models::{AgentState, PlayerStatus};
