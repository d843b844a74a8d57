//! Identity handles and the closed classification enums.
//!
//! Every handle here is a "newtype wrapper" around a plain integer. The
//! wrapper costs nothing at runtime but buys type safety: you cannot pass
//! a `GroupId` where a `PlayerId` is expected, even though both are `u64`
//! underneath. It also makes signatures self-describing —
//! `fn credit(player: PlayerId)` reads better than `fn credit(id: u64)`.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a group of players sharing kill credit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

/// A unique identifier for a world entity (creature, corpse, node).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E-{}", self.0)
    }
}

/// A unique identifier for an item-type loot container (lockbox, satchel).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContainerId(pub u64);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// An item template identifier (not an item instance).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SessionOwner — what a loot session is attached to
// ---------------------------------------------------------------------------

/// The world object a loot session hangs off of.
///
/// A session is owned either by an entity's corpse or by an item-type
/// container. The distinction matters in several rules: only item
/// containers support the mail fallback for failed placements, and only
/// item containers are destroyed when fully consumed. This is the Rust
/// answer to the source's `guid.IsItem()` checks — the two cases are made
/// explicit instead of being decoded out of a packed GUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionOwner {
    /// The session is attached to an entity's corpse.
    Entity(EntityId),
    /// The session is attached to an item-type container.
    Container(ContainerId),
}

impl SessionOwner {
    /// Returns `true` if the session is attached to an item-type container.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// Returns the entity handle, if the owner is a corpse.
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            Self::Entity(id) => Some(*id),
            Self::Container(_) => None,
        }
    }
}

impl fmt::Display for SessionOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(id) => write!(f, "{id}"),
            Self::Container(id) => write!(f, "{id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// LootKind
// ---------------------------------------------------------------------------

/// The kind of loot session, as requested by a trigger.
///
/// Clients are shown the requested kind (an insignia window looks
/// different from a skinning window), but the distribution rules only
/// distinguish the normalized kinds — see [`LootKind::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum LootKind {
    /// No kind assigned yet. A session leaves `None` exactly once.
    #[default]
    None,
    /// A defeated creature's corpse.
    Corpse,
    /// Skinning a corpse that was already looted.
    Skinning,
    /// A fishing catch.
    Fishing,
    /// A fishing hole node.
    FishingHole,
    /// A junk catch from fishing.
    FishingJunk,
    /// A fallen enemy player's insignia.
    Insignia,
}

impl LootKind {
    /// Collapses the client-visible kinds into the internal ones the
    /// distribution rules actually branch on: insignia loots like
    /// skinning (exclusive to one looter), fishing holes and junk loot
    /// like ordinary fishing.
    pub fn normalized(self) -> Self {
        match self {
            Self::Insignia => Self::Skinning,
            Self::FishingHole | Self::FishingJunk => Self::Fishing,
            other => other,
        }
    }

    /// Returns `true` if no kind has been assigned yet.
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for LootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Corpse => "Corpse",
            Self::Skinning => "Skinning",
            Self::Fishing => "Fishing",
            Self::FishingHole => "FishingHole",
            Self::FishingJunk => "FishingJunk",
            Self::Insignia => "Insignia",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// PermissionTier
// ---------------------------------------------------------------------------

/// The access level a requester holds over a loot session.
///
/// Tiers are ordered from least to most permissive; `None` is the only
/// tier that forbids interaction entirely. The derived `Ord` follows the
/// declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum PermissionTier {
    /// No access. The requester may not view or take anything.
    None,
    /// Group member under master loot, but not the master looter:
    /// may view, takes nothing directly.
    Restricted,
    /// Group member under round-robin rotation.
    RoundRobin,
    /// Ordinary group member under a rolling loot method.
    Group,
    /// The designated master looter.
    Master,
    /// The sole recipient of a solo kill or an exclusive session.
    Owner,
    /// Unrestricted access (free-for-all).
    All,
}

impl PermissionTier {
    /// Returns `true` for every tier except [`PermissionTier::None`].
    pub fn allows_interaction(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Restricted => "Restricted",
            Self::RoundRobin => "RoundRobin",
            Self::Group => "Group",
            Self::Master => "Master",
            Self::Owner => "Owner",
            Self::All => "All",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// ItemVisibility
// ---------------------------------------------------------------------------

/// Per-item visibility classification, assigned at reward-generation time.
///
/// Anything other than `Normal` is "special": special items bypass the
/// round-robin turn order and are visible to every eligible looter the
/// classification admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum ItemVisibility {
    /// An ordinary item, gated to the round-robin holder under rolling
    /// loot methods.
    #[default]
    Normal,
    /// Every eligible looter gets their own copy.
    FreeForAll,
    /// Visible only to players on the matching quest.
    Quest,
    /// Visible only to players meeting an external condition.
    Conditional,
}

impl ItemVisibility {
    /// Returns `true` if the item bypasses the round-robin turn order.
    pub fn is_special(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

// ---------------------------------------------------------------------------
// ItemQuality
// ---------------------------------------------------------------------------

/// Item quality grades, ordered from lowest to highest.
///
/// A group's loot threshold is expressed as a quality: items at or above
/// the threshold are resolved through the external roll protocol, never
/// by direct placement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum ItemQuality {
    Poor,
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loot_kind_normalization() {
        assert_eq!(LootKind::Insignia.normalized(), LootKind::Skinning);
        assert_eq!(LootKind::FishingHole.normalized(), LootKind::Fishing);
        assert_eq!(LootKind::FishingJunk.normalized(), LootKind::Fishing);
        assert_eq!(LootKind::Corpse.normalized(), LootKind::Corpse);
        assert_eq!(LootKind::Skinning.normalized(), LootKind::Skinning);
        assert_eq!(LootKind::None.normalized(), LootKind::None);
    }

    #[test]
    fn test_permission_tier_ordering() {
        assert!(PermissionTier::None < PermissionTier::Restricted);
        assert!(PermissionTier::Restricted < PermissionTier::RoundRobin);
        assert!(PermissionTier::Master < PermissionTier::Owner);
        assert!(PermissionTier::Owner < PermissionTier::All);
    }

    #[test]
    fn test_only_none_forbids_interaction() {
        assert!(!PermissionTier::None.allows_interaction());
        for tier in [
            PermissionTier::Restricted,
            PermissionTier::RoundRobin,
            PermissionTier::Group,
            PermissionTier::Master,
            PermissionTier::Owner,
            PermissionTier::All,
        ] {
            assert!(tier.allows_interaction(), "{tier} should allow interaction");
        }
    }

    #[test]
    fn test_visibility_special() {
        assert!(!ItemVisibility::Normal.is_special());
        assert!(ItemVisibility::FreeForAll.is_special());
        assert!(ItemVisibility::Quest.is_special());
        assert!(ItemVisibility::Conditional.is_special());
    }

    #[test]
    fn test_quality_ordering_against_threshold() {
        let threshold = ItemQuality::Uncommon;
        assert!(ItemQuality::Poor < threshold);
        assert!(ItemQuality::Common < threshold);
        assert!(ItemQuality::Uncommon >= threshold);
        assert!(ItemQuality::Epic >= threshold);
    }

    #[test]
    fn test_session_owner_container_check() {
        assert!(SessionOwner::Container(ContainerId(7)).is_container());
        assert!(!SessionOwner::Entity(EntityId(7)).is_container());
        assert_eq!(
            SessionOwner::Entity(EntityId(9)).entity(),
            Some(EntityId(9))
        );
        assert_eq!(SessionOwner::Container(ContainerId(9)).entity(), None);
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(PlayerId(3).to_string(), "P-3");
        assert_eq!(GroupId(4).to_string(), "G-4");
        assert_eq!(EntityId(5).to_string(), "E-5");
        assert_eq!(ContainerId(6).to_string(), "C-6");
        assert_eq!(ItemId(7).to_string(), "I-7");
    }

    #[test]
    fn test_identity_serde_transparent() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlayerId(42));
    }
}
