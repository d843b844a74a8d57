//! The group registry: creates, tracks, and disbands groups.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use lootforge_protocol::{GroupId, PlayerId};

use crate::{Group, GroupError};

/// Counter for generating unique group IDs.
static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(1);

/// Tracks all active groups and which player belongs to which group.
///
/// This is the entry point for group lookups from the loot engine. Like
/// the rest of Lootforge it is single-tick state: a plain `HashMap`, no
/// internal locking — ownership at a higher layer provides serialization.
#[derive(Default)]
pub struct GroupRegistry {
    /// Active groups, keyed by group ID.
    groups: HashMap<GroupId, Group>,

    /// Maps each player to the group they belong to.
    /// A player can be in at most ONE group at a time (key invariant).
    player_groups: HashMap<PlayerId, GroupId>,
}

impl GroupRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group from the given members and returns its ID.
    ///
    /// # Errors
    /// Returns [`GroupError::AlreadyGrouped`] if any member already
    /// belongs to a group; no group is created in that case.
    pub fn create_group(&mut self, members: &[PlayerId]) -> Result<GroupId, GroupError> {
        for &member in members {
            if let Some(existing) = self.player_groups.get(&member) {
                return Err(GroupError::AlreadyGrouped(member, *existing));
            }
        }
        let group_id = GroupId(NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed));
        self.groups
            .insert(group_id, Group::new(group_id, members.to_vec()));
        for &member in members {
            self.player_groups.insert(member, group_id);
        }
        tracing::info!(%group_id, members = members.len(), "group created");
        Ok(group_id)
    }

    /// Returns the group, if it exists.
    pub fn get(&self, group_id: GroupId) -> Option<&Group> {
        self.groups.get(&group_id)
    }

    /// Returns the group for mutation, if it exists.
    pub fn get_mut(&mut self, group_id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&group_id)
    }

    /// Returns the group a player currently belongs to, if any.
    pub fn group_of(&self, player: PlayerId) -> Option<GroupId> {
        self.player_groups.get(&player).copied()
    }

    /// Adds a player to an existing group.
    ///
    /// # Errors
    /// Returns [`GroupError::NotFound`] for an unknown group and
    /// [`GroupError::AlreadyGrouped`] if the player is in a group.
    pub fn add_member(
        &mut self,
        group_id: GroupId,
        player: PlayerId,
    ) -> Result<(), GroupError> {
        if let Some(existing) = self.player_groups.get(&player) {
            return Err(GroupError::AlreadyGrouped(player, *existing));
        }
        let group = self
            .groups
            .get_mut(&group_id)
            .ok_or(GroupError::NotFound(group_id))?;
        group.add_member(player);
        self.player_groups.insert(player, group_id);
        Ok(())
    }

    /// Removes a player from their group.
    ///
    /// # Errors
    /// Returns [`GroupError::NotAMember`] if the player is not in the
    /// given group.
    pub fn remove_member(
        &mut self,
        group_id: GroupId,
        player: PlayerId,
    ) -> Result<(), GroupError> {
        if self.player_groups.get(&player) != Some(&group_id) {
            return Err(GroupError::NotAMember(player, group_id));
        }
        if let Some(group) = self.groups.get_mut(&group_id) {
            group.remove_member(player);
        }
        self.player_groups.remove(&player);
        Ok(())
    }

    /// Disbands a group, releasing all members.
    ///
    /// # Errors
    /// Returns [`GroupError::NotFound`] for an unknown group.
    pub fn disband(&mut self, group_id: GroupId) -> Result<(), GroupError> {
        self.groups
            .remove(&group_id)
            .ok_or(GroupError::NotFound(group_id))?;
        self.player_groups.retain(|_, gid| *gid != group_id);
        tracing::info!(%group_id, "group disbanded");
        Ok(())
    }

    /// Returns the number of active groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
