//! Error types for the group layer.

use lootforge_protocol::{GroupId, PlayerId};

/// Errors that can occur during group operations.
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    /// The group does not exist.
    #[error("group {0} not found")]
    NotFound(GroupId),

    /// The player already belongs to a group.
    /// A player can be in at most one group at a time.
    #[error("player {0} already belongs to group {1}")]
    AlreadyGrouped(PlayerId, GroupId),

    /// The player is not a member of this group.
    #[error("player {0} is not a member of group {1}")]
    NotAMember(PlayerId, GroupId),
}
