//! Shared types for Lootforge.
//!
//! This crate defines the vocabulary every other Lootforge crate speaks:
//!
//! - **Identities** ([`PlayerId`], [`GroupId`], [`EntityId`],
//!   [`ContainerId`], [`ItemId`], [`SessionOwner`]) — newtype handles for
//!   the things a loot session refers to.
//! - **Classifications** ([`LootKind`], [`PermissionTier`],
//!   [`ItemVisibility`], [`ItemQuality`]) — the closed enums the
//!   permission and distribution rules branch on.
//! - **Views** ([`LootView`], [`CurrencyNotice`], [`LootResponseError`]) —
//!   the snapshots and notices handed to the host for delivery to a
//!   client. How they are encoded on the wire is the host's business;
//!   this crate only fixes their shape.
//!
//! The protocol layer knows nothing about sessions, groups, or the
//! distribution engine — it is the bottom of the dependency stack.

mod types;
mod view;

pub use types::{
    ContainerId, EntityId, GroupId, ItemId, ItemQuality, ItemVisibility,
    LootKind, PermissionTier, PlayerId, SessionOwner,
};
pub use view::{CurrencyNotice, LootResponseError, LootView, LootViewItem};
