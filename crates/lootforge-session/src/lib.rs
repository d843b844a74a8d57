//! Loot session entity and lifecycle for Lootforge.
//!
//! A *loot session* is the transient reward container attached to a
//! defeated or interactable entity: its undistributed gold, its reward
//! slots, the set of players currently allowed to interact with it, and
//! the advisory round-robin pointer. One session exists per entity or
//! item container; it lives from the kill (or activation) until fully
//! consumed or abandoned.
//!
//! # Key types
//!
//! - [`LootSession`] — the session entity and its invariants
//! - [`RewardItem`] — one reward slot
//! - [`LootRecipient`] — who owns distribution rights (player XOR group)
//! - [`SessionLifecycle`] — the `Uninitialized → … → Released` state machine
//! - [`SessionError`] — what can go wrong mutating a session

mod error;
mod session;
mod state;

pub use error::SessionError;
pub use session::{LootRecipient, LootSession, RewardItem};
pub use state::SessionLifecycle;
