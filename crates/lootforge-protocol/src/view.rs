//! Snapshots and notices the engine hands to the host for delivery.
//!
//! These are the engine's only outward-facing messages. The host owns the
//! actual wire encoding; Lootforge just fixes the shape and the semantics
//! of each field.

use serde::{Deserialize, Serialize};

use crate::{ItemId, ItemVisibility, LootKind, PlayerId, SessionOwner};

// ---------------------------------------------------------------------------
// LootView
// ---------------------------------------------------------------------------

/// One slot of a [`LootView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootViewItem {
    /// Slot index within the session, stable for the session's lifetime.
    pub slot: u8,
    /// The item template in this slot.
    pub item: ItemId,
    /// Stack count.
    pub count: u32,
    /// Visibility classification, assigned at reward-generation time.
    pub visibility: ItemVisibility,
}

/// The session contents shown to a player when a session opens for them.
///
/// `kind` is the *client-visible* kind — the kind the trigger requested,
/// before normalization. An insignia window and a skinning window render
/// differently even though both distribute under skinning rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootView {
    /// What the session is attached to.
    pub owner: SessionOwner,
    /// The player this view was built for.
    pub viewer: PlayerId,
    /// Client-visible session kind.
    pub kind: LootKind,
    /// Undistributed gold at the time the view was built.
    pub gold: u64,
    /// Unlooted slots visible to this viewer, in reward-generation order.
    pub items: Vec<LootViewItem>,
}

// ---------------------------------------------------------------------------
// CurrencyNotice
// ---------------------------------------------------------------------------

/// Per-player currency notification payload.
///
/// The `shared` flag selects the client phrasing: `true` means "your share
/// is ..." (a split among more than one eligible member), `false` means
/// "you loot ..." (a solo credit). This mirrors the one-byte variant flag
/// of the source notification packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyNotice {
    /// Amount credited to this player.
    pub amount: u64,
    /// `true` when the credit was a share of a multi-member split.
    pub shared: bool,
}

// ---------------------------------------------------------------------------
// LootResponseError
// ---------------------------------------------------------------------------

/// Client-facing loot denial codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum LootResponseError {
    /// The entity is not presently lootable (its lootable flag is absent).
    NotKillable,
    /// The requester holds no permission over this session ("did not
    /// kill" class error).
    DidntKill,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityId;

    #[test]
    fn test_loot_view_serializes_client_kind() {
        let view = LootView {
            owner: SessionOwner::Entity(EntityId(11)),
            viewer: PlayerId(1),
            kind: LootKind::Insignia,
            gold: 25,
            items: vec![LootViewItem {
                slot: 0,
                item: ItemId(500),
                count: 1,
                visibility: ItemVisibility::Normal,
            }],
        };
        let json = serde_json::to_string(&view).unwrap();
        // The view carries the requested kind, not the normalized one.
        assert!(json.contains("\"Insignia\""));
        let back: LootView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn test_currency_notice_flags() {
        let solo = CurrencyNotice { amount: 100, shared: false };
        let split = CurrencyNotice { amount: 5, shared: true };
        assert!(!solo.shared);
        assert!(split.shared);
    }
}
