//! Group model for Lootforge.
//!
//! A *group* is a set of players sharing kill credit. For loot purposes a
//! group carries exactly the state the distribution rules consult: the
//! ordered member list, subgroup assignments, the configured
//! [`LootMethod`], the designated master looter, the roll quality
//! threshold, and the per-entity looter-of-record.
//!
//! # Key types
//!
//! - [`Group`] — one group's loot-relevant state
//! - [`LootMethod`] — the closed set of group loot policies
//! - [`GroupRegistry`] — creates/disbands groups, routes player lookups
//! - [`GroupError`] — what can go wrong

mod error;
mod group;
mod registry;

pub use error::GroupError;
pub use group::{Group, LootMethod};
pub use registry::GroupRegistry;
