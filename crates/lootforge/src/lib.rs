//! # Lootforge
//!
//! Loot-session permission resolution and reward distribution for a
//! multiplayer game server.
//!
//! When a kill (or an activating ability) is detected, the host creates a
//! loot session for the defeated entity and hands control to the
//! [`LootEngine`]. The engine then governs the short-lived negotiation
//! over that session: it computes a [`PermissionTier`] per requesting
//! player from the group loot policy and the recorded recipient, runs the
//! currency split across eligible nearby group members, iterates reward
//! slots applying visibility and eligibility rules, and releases the
//! session once fully consumed — recovering locally from partial failures
//! (inventory full, mail fallback, round-robin re-assignment).
//!
//! Everything the engine cannot decide by itself — inventory placement,
//! proximity, mailing, persistence, client delivery, the multi-round roll
//! protocols — is reached through two trait seams the host implements:
//! [`LootHost`] and [`RollCoordinator`].
//!
//! # Concurrency model
//!
//! Single-threaded, cooperative, tick-driven. Every engine operation runs
//! to completion within one server update step; the engine never waits on
//! an external response. The roll protocol runs asynchronously *outside*
//! the engine and reports its winner out of band — the session's
//! kind-assigned-once guard is the sole defense against double-triggering
//! it from concurrent openers.
//!
//! [`PermissionTier`]: lootforge_protocol::PermissionTier

mod config;
mod engine;
mod error;
mod host;
mod items;
mod money;
mod permission;
mod release;
mod rolls;

pub use config::LootConfig;
pub use engine::LootEngine;
pub use error::LootError;
pub use host::{LootHost, PlacementOutcome};
pub use rolls::{RollCoordinator, RollStyle};
