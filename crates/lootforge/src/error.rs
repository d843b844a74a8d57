//! Unified error type for the loot engine.

use lootforge_group::GroupError;
use lootforge_protocol::{EntityId, PlayerId, SessionOwner};
use lootforge_session::SessionError;

/// Top-level error for engine operations.
///
/// Every variant is recoverable — none is fatal to the server. Errors
/// that concern a requesting player (`NotKillable`, `PermissionDenied`)
/// are also surfaced to that player through
/// [`LootHost::send_loot_error`](crate::LootHost::send_loot_error) before
/// the operation returns; no state is mutated in those cases.
/// Sub-crate errors convert automatically through `?` thanks to the
/// `#[from]` impls.
#[derive(Debug, thiserror::Error)]
pub enum LootError {
    /// No loot session is attached to this owner.
    #[error("no loot session attached to {0}")]
    NoSession(SessionOwner),

    /// A session already exists for this owner.
    #[error("a loot session already exists for {0}")]
    SessionExists(SessionOwner),

    /// The entity lacks the lootable flag; surfaced to the requester,
    /// no state change.
    #[error("entity {0} is not lootable")]
    NotKillable(EntityId),

    /// The resolved tier is `None`; surfaced to the requester as a
    /// "did not kill" class error, no state change.
    #[error("player {player} holds no loot permission over {owner}")]
    PermissionDenied {
        player: PlayerId,
        owner: SessionOwner,
    },

    /// The session's recorded recipient cannot be resolved (e.g. the
    /// recipient group no longer exists). Callers must abort.
    #[error("session {0} has no resolvable recipient")]
    NoRecipient(SessionOwner),

    /// A session-level error (lifecycle, slot bounds).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A group-level error (membership, lookup).
    #[error(transparent)]
    Group(#[from] GroupError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootforge_session::SessionLifecycle;

    #[test]
    fn test_from_session_error() {
        let err = SessionError::InvalidTransition {
            from: SessionLifecycle::Released,
            to: SessionLifecycle::Opened,
        };
        let loot_err: LootError = err.into();
        assert!(matches!(loot_err, LootError::Session(_)));
        assert!(loot_err.to_string().contains("Released"));
    }

    #[test]
    fn test_from_group_error() {
        let err = GroupError::NotFound(lootforge_protocol::GroupId(3));
        let loot_err: LootError = err.into();
        assert!(matches!(loot_err, LootError::Group(_)));
    }

    #[test]
    fn test_display_mentions_owner() {
        let err = LootError::NoSession(SessionOwner::Entity(EntityId(12)));
        assert!(err.to_string().contains("E-12"));
    }
}
