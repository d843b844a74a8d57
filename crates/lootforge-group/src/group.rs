//! A single group's loot-relevant state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lootforge_protocol::{EntityId, GroupId, ItemQuality, PlayerId};

// ---------------------------------------------------------------------------
// LootMethod
// ---------------------------------------------------------------------------

/// The group loot policies.
///
/// This set is fixed and exhaustive — the permission resolver and the
/// roll dispatcher both match on it, so adding a method is a compile-time
/// event, not a runtime surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum LootMethod {
    /// Everyone may take anything.
    FreeForAll,
    /// Members take turns; the round-robin holder gets the next item.
    RoundRobin,
    /// Items above the threshold are rolled for; the rest rotate
    /// round-robin. The common default.
    #[default]
    GroupLoot,
    /// Like group loot, but need rolls outrank greed rolls.
    NeedBeforeGreed,
    /// A designated master looter assigns above-threshold items.
    MasterLoot,
}

impl LootMethod {
    /// Returns `true` for the three methods that resolve above-threshold
    /// items through the external roll protocol.
    pub fn requires_rolling(self) -> bool {
        matches!(
            self,
            Self::GroupLoot | Self::NeedBeforeGreed | Self::MasterLoot
        )
    }
}

impl std::fmt::Display for LootMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FreeForAll => "FreeForAll",
            Self::RoundRobin => "RoundRobin",
            Self::GroupLoot => "GroupLoot",
            Self::NeedBeforeGreed => "NeedBeforeGreed",
            Self::MasterLoot => "MasterLoot",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// One group's loot-relevant state.
///
/// The member list is ordered (join order); subgroup assignment matters
/// for the kill-credit trigger, which only opens sessions for members in
/// the killer's subgroup.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    /// Members in join order.
    members: Vec<PlayerId>,
    /// Subgroup index per member. Members default to subgroup 0.
    subgroups: HashMap<PlayerId, u8>,
    loot_method: LootMethod,
    /// The designated master looter, meaningful under `MasterLoot`.
    master_looter: Option<PlayerId>,
    /// Items at or above this quality are resolved by rolling.
    loot_threshold: ItemQuality,
    /// Per-entity looter-of-record, shown on the corpse to all members.
    looter_of_record: HashMap<EntityId, PlayerId>,
}

impl Group {
    /// Creates a group with the given members, all in subgroup 0, using
    /// the default loot method and an `Uncommon` roll threshold.
    pub(crate) fn new(id: GroupId, members: Vec<PlayerId>) -> Self {
        let subgroups = members.iter().map(|&m| (m, 0)).collect();
        Self {
            id,
            members,
            subgroups,
            loot_method: LootMethod::default(),
            master_looter: None,
            loot_threshold: ItemQuality::Uncommon,
            looter_of_record: HashMap::new(),
        }
    }

    /// The group's unique ID.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Members in join order.
    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    /// Returns `true` if `player` is a current member.
    pub fn is_member(&self, player: PlayerId) -> bool {
        self.members.contains(&player)
    }

    /// Returns `true` if both players are members of the same subgroup.
    pub fn same_subgroup(&self, a: PlayerId, b: PlayerId) -> bool {
        match (self.subgroups.get(&a), self.subgroups.get(&b)) {
            (Some(sa), Some(sb)) => sa == sb,
            _ => false,
        }
    }

    /// Moves a member to a subgroup.
    pub fn set_subgroup(&mut self, player: PlayerId, subgroup: u8) {
        if self.is_member(player) {
            self.subgroups.insert(player, subgroup);
        }
    }

    pub(crate) fn add_member(&mut self, player: PlayerId) {
        if !self.is_member(player) {
            self.members.push(player);
            self.subgroups.insert(player, 0);
        }
    }

    pub(crate) fn remove_member(&mut self, player: PlayerId) {
        self.members.retain(|&m| m != player);
        self.subgroups.remove(&player);
        if self.master_looter == Some(player) {
            self.master_looter = None;
        }
        self.looter_of_record.retain(|_, looter| *looter != player);
    }

    /// The configured loot method.
    pub fn loot_method(&self) -> LootMethod {
        self.loot_method
    }

    /// Sets the loot method.
    pub fn set_loot_method(&mut self, method: LootMethod) {
        self.loot_method = method;
    }

    /// The designated master looter, if any.
    pub fn master_looter(&self) -> Option<PlayerId> {
        self.master_looter
    }

    /// Designates the master looter. Must be a current member.
    pub fn set_master_looter(&mut self, player: Option<PlayerId>) {
        match player {
            Some(p) if !self.is_member(p) => {}
            other => self.master_looter = other,
        }
    }

    /// The roll quality threshold.
    pub fn loot_threshold(&self) -> ItemQuality {
        self.loot_threshold
    }

    /// Sets the roll quality threshold.
    pub fn set_loot_threshold(&mut self, threshold: ItemQuality) {
        self.loot_threshold = threshold;
    }

    /// The recorded looter for an entity, if any.
    pub fn looter_of_record(&self, entity: EntityId) -> Option<PlayerId> {
        self.looter_of_record.get(&entity).copied()
    }

    /// Records (or clears, with `None`) the looter shown on an entity's
    /// corpse to all members.
    pub fn set_looter_of_record(&mut self, entity: EntityId, looter: Option<PlayerId>) {
        match looter {
            Some(player) => {
                self.looter_of_record.insert(entity, player);
            }
            None => {
                self.looter_of_record.remove(&entity);
                tracing::debug!(group = %self.id, %entity, "looter of record cleared");
            }
        }
    }
}
