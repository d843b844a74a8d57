//! The loot session entity.
//!
//! A [`LootSession`] is conceptually owned by the entity (or item
//! container) it is attached to. The engine reaches it through a stable
//! [`SessionOwner`] handle, never through a raw reference into the entity,
//! so entity teardown cannot leave dangling session access.
//!
//! # Concurrency note
//!
//! Sessions are mutated only from the single-threaded server tick. Every
//! operation here runs to completion without suspension, so iteration
//! order within a tick is the only serialization needed. The
//! `round_robin_holder` field is advisory, last-writer-wins by design —
//! it has explicit "set" and "compare-and-clear" operations instead of
//! any locking.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use lootforge_protocol::{
    GroupId, ItemId, ItemVisibility, LootKind, LootView, LootViewItem, PlayerId,
    SessionOwner,
};

use crate::{SessionError, SessionLifecycle};

// ---------------------------------------------------------------------------
// LootRecipient
// ---------------------------------------------------------------------------

/// Who holds distribution rights over a session: a single player or a
/// group, never both and never neither.
///
/// Set once when the entity dies and immutable afterwards, with one
/// exception: the first skinning open reassigns the recipient to the
/// skinning player (see [`LootSession::reassign_to`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootRecipient {
    /// A solo recipient.
    Player(PlayerId),
    /// A group holds the rights; members resolve their tier through the
    /// group's loot method.
    Group(GroupId),
}

impl LootRecipient {
    /// Returns the solo recipient, if any.
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Self::Player(id) => Some(*id),
            Self::Group(_) => None,
        }
    }

    /// Returns the recipient group, if any.
    pub fn group(&self) -> Option<GroupId> {
        match self {
            Self::Player(_) => None,
            Self::Group(id) => Some(*id),
        }
    }
}

// ---------------------------------------------------------------------------
// RewardItem
// ---------------------------------------------------------------------------

/// One reward slot of a session.
///
/// The visibility classification is assigned at reward-generation time,
/// outside this crate, and is read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardItem {
    /// The item template in this slot.
    pub item: ItemId,
    /// Stack count.
    pub count: u32,
    /// Whether this slot has been consumed. Once set, never cleared.
    pub looted: bool,
    /// Visibility classification.
    pub visibility: ItemVisibility,
}

impl RewardItem {
    /// Creates an unlooted reward slot.
    pub fn new(item: ItemId, count: u32, visibility: ItemVisibility) -> Self {
        Self {
            item,
            count,
            looted: false,
            visibility,
        }
    }
}

// ---------------------------------------------------------------------------
// LootSession
// ---------------------------------------------------------------------------

/// The transient reward container attached to a defeated or interactable
/// entity.
///
/// Invariants enforced here:
///
/// - `kind` leaves [`LootKind::None`] exactly once, gated on the current
///   kind still being `None` ([`LootSession::try_assign_kind`]). This is
///   the sole defense against the roll protocol being triggered twice by
///   concurrent openers within a tick.
/// - Gold is distributed at most once: [`LootSession::take_gold`] drains
///   the field, and a second call yields zero.
/// - A slot, once marked looted, is never revisited:
///   [`LootSession::item_in_slot`] hides looted slots.
/// - A session always carries a valid recipient — construction requires
///   one, so no lifecycle transition can ever run on a recipient-less
///   session.
#[derive(Debug, Clone)]
pub struct LootSession {
    owner: SessionOwner,
    /// Internal (normalized) kind. Drives distribution rules.
    kind: LootKind,
    /// Kind as requested by the opening trigger. Shown to clients.
    client_kind: LootKind,
    gold: u64,
    items: Vec<RewardItem>,
    /// Running count of unlooted slots. Kept in sync by `mark_looted`.
    unlooted: usize,
    /// Players currently permitted to view/interact with this session.
    looters: HashSet<PlayerId>,
    /// The player entitled to the next ordinary item, if any. Advisory.
    round_robin_holder: Option<PlayerId>,
    recipient: LootRecipient,
    lifecycle: SessionLifecycle,
}

impl LootSession {
    /// Creates a session for a freshly killed (or activated) entity.
    ///
    /// Rewards are generated by the host before this call; insertion
    /// order of `items` is the reward-generation order and is preserved.
    pub fn new(
        owner: SessionOwner,
        recipient: LootRecipient,
        gold: u64,
        items: Vec<RewardItem>,
    ) -> Self {
        let unlooted = items.iter().filter(|item| !item.looted).count();
        Self {
            owner,
            kind: LootKind::None,
            client_kind: LootKind::None,
            gold,
            items,
            unlooted,
            looters: HashSet::new(),
            round_robin_holder: None,
            recipient,
            lifecycle: SessionLifecycle::Uninitialized,
        }
    }

    // -- accessors ----------------------------------------------------------

    /// The stable handle this session is attached to.
    pub fn owner(&self) -> SessionOwner {
        self.owner
    }

    /// The internal (normalized) kind.
    pub fn kind(&self) -> LootKind {
        self.kind
    }

    /// The client-visible kind, as requested by the opening trigger.
    pub fn client_kind(&self) -> LootKind {
        self.client_kind
    }

    /// Undistributed gold.
    pub fn gold(&self) -> u64 {
        self.gold
    }

    /// Who owns distribution rights.
    pub fn recipient(&self) -> LootRecipient {
        self.recipient
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> SessionLifecycle {
        self.lifecycle
    }

    /// Number of unlooted slots.
    pub fn unlooted(&self) -> usize {
        self.unlooted
    }

    /// All reward slots, looted or not, in reward-generation order.
    pub fn items(&self) -> &[RewardItem] {
        &self.items
    }

    /// The advisory round-robin holder.
    pub fn round_robin_holder(&self) -> Option<PlayerId> {
        self.round_robin_holder
    }

    /// Returns `true` once gold is drained and every slot is looted.
    pub fn is_fully_looted(&self) -> bool {
        self.gold == 0 && self.unlooted == 0
    }

    /// Returns `true` if the session still holds anything worth opening.
    pub fn has_rewards(&self) -> bool {
        self.gold > 0 || self.unlooted > 0
    }

    // -- kind assignment ----------------------------------------------------

    /// Assigns the session kind, once.
    ///
    /// Returns `true` only for the single call that performs the
    /// `None → kind` transition; every later call is a no-op returning
    /// `false`. The stored kind is the normalized one; the requested kind
    /// is retained for client views.
    pub fn try_assign_kind(&mut self, requested: LootKind) -> bool {
        if !self.kind.is_none() || requested.is_none() {
            return false;
        }
        self.kind = requested.normalized();
        self.client_kind = requested;
        tracing::debug!(
            owner = %self.owner,
            requested = %requested,
            kind = %self.kind,
            "session kind assigned"
        );
        true
    }

    // -- recipient ----------------------------------------------------------

    /// Reassigns the recipient to `player`.
    ///
    /// Only the first skinning open does this: skinning rights belong to
    /// whoever starts skinning, not to the original kill recipient. No
    /// other call site may touch the recipient.
    pub fn reassign_to(&mut self, player: PlayerId) {
        self.recipient = LootRecipient::Player(player);
    }

    /// Replaces the reward slots wholesale (skinning refill).
    ///
    /// The previous corpse rewards are gone by the time skinning starts;
    /// the skinning reward table supplies a fresh set.
    pub fn restock(&mut self, gold: u64, items: Vec<RewardItem>) {
        self.unlooted = items.iter().filter(|item| !item.looted).count();
        self.items = items;
        self.gold = gold;
    }

    // -- gold ---------------------------------------------------------------

    /// Drains the session's gold, returning the full amount.
    ///
    /// The second call returns zero — this is what makes money
    /// distribution idempotent.
    pub fn take_gold(&mut self) -> u64 {
        std::mem::take(&mut self.gold)
    }

    // -- slots --------------------------------------------------------------

    /// Returns the item in `slot` unless the slot is out of range or
    /// already looted.
    pub fn item_in_slot(&self, slot: u8) -> Option<&RewardItem> {
        self.items
            .get(usize::from(slot))
            .filter(|item| !item.looted)
    }

    /// Marks `slot` as looted, decrementing the unlooted counter.
    ///
    /// Returns `Ok(true)` if this call consumed the slot, `Ok(false)` if
    /// it was already looted (the slot is never revisited), and an error
    /// for an out-of-range index.
    pub fn mark_looted(&mut self, slot: u8) -> Result<bool, SessionError> {
        let item = self
            .items
            .get_mut(usize::from(slot))
            .ok_or(SessionError::SlotOutOfRange(slot))?;
        if item.looted {
            return Ok(false);
        }
        item.looted = true;
        self.unlooted -= 1;
        Ok(true)
    }

    // -- looters ------------------------------------------------------------

    /// Registers a player as an active looter of this session.
    pub fn add_looter(&mut self, player: PlayerId) {
        self.looters.insert(player);
    }

    /// Removes a player from the active looters.
    pub fn remove_looter(&mut self, player: PlayerId) {
        self.looters.remove(&player);
    }

    /// Returns `true` if the player is currently registered as a looter.
    pub fn is_looter(&self, player: PlayerId) -> bool {
        self.looters.contains(&player)
    }

    /// Number of currently registered looters.
    pub fn looter_count(&self) -> usize {
        self.looters.len()
    }

    // -- round-robin holder -------------------------------------------------

    /// Sets the round-robin holder. Last writer wins under the
    /// single-threaded tick; no locking.
    pub fn set_round_robin_holder(&mut self, player: Option<PlayerId>) {
        self.round_robin_holder = player;
    }

    /// Clears the holder only if it currently equals `player`
    /// (compare-and-clear). Returns `true` if the holder was cleared.
    pub fn clear_holder_if(&mut self, player: PlayerId) -> bool {
        if self.round_robin_holder == Some(player) {
            self.round_robin_holder = None;
            true
        } else {
            false
        }
    }

    // -- lifecycle ----------------------------------------------------------

    /// Attempts an explicit lifecycle transition.
    pub fn advance(&mut self, target: SessionLifecycle) -> Result<(), SessionError> {
        if !self.lifecycle.can_transition_to(target) {
            return Err(SessionError::InvalidTransition {
                from: self.lifecycle,
                to: target,
            });
        }
        self.lifecycle = target;
        Ok(())
    }

    /// Moves `Uninitialized → Opened` on the first open; later opens are
    /// no-ops.
    pub fn mark_opened(&mut self) {
        if self.lifecycle == SessionLifecycle::Uninitialized {
            self.lifecycle = SessionLifecycle::Opened;
        }
    }

    /// Records the outcome of a distribution step in the lifecycle.
    ///
    /// Safe to call after every step: it only moves forward when the
    /// state machine permits it.
    pub fn note_consumption(&mut self) {
        let target = if self.is_fully_looted() {
            SessionLifecycle::FullyConsumed
        } else {
            SessionLifecycle::PartiallyConsumed
        };
        if self.lifecycle.can_transition_to(target) {
            self.lifecycle = target;
        }
    }

    // -- views --------------------------------------------------------------

    /// Builds the view sent to `viewer` on open.
    ///
    /// `max_slot` is the count of slots visible to this specific viewer,
    /// as answered by the host's reward-visibility query. Looted slots
    /// are omitted; the kind shown is the client-visible one.
    pub fn view_for(&self, viewer: PlayerId, max_slot: u8) -> LootView {
        let visible = usize::from(max_slot).min(self.items.len());
        let items = self.items[..visible]
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.looted)
            .map(|(slot, item)| LootViewItem {
                slot: slot as u8,
                item: item.item,
                count: item.count,
                visibility: item.visibility,
            })
            .collect();
        LootView {
            owner: self.owner,
            viewer,
            kind: self.client_kind,
            gold: self.gold,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootforge_protocol::EntityId;

    fn corpse_session(gold: u64, item_count: usize) -> LootSession {
        let items = (0..item_count)
            .map(|i| RewardItem::new(ItemId(100 + i as u32), 1, ItemVisibility::Normal))
            .collect();
        LootSession::new(
            SessionOwner::Entity(EntityId(1)),
            LootRecipient::Player(PlayerId(1)),
            gold,
            items,
        )
    }

    #[test]
    fn test_kind_assigned_exactly_once() {
        let mut session = corpse_session(0, 1);
        assert!(session.try_assign_kind(LootKind::Corpse));
        assert!(!session.try_assign_kind(LootKind::Corpse));
        assert!(!session.try_assign_kind(LootKind::Skinning));
        assert_eq!(session.kind(), LootKind::Corpse);
    }

    #[test]
    fn test_kind_normalized_on_assignment() {
        let mut session = corpse_session(0, 0);
        assert!(session.try_assign_kind(LootKind::Insignia));
        assert_eq!(session.kind(), LootKind::Skinning);
        assert_eq!(session.client_kind(), LootKind::Insignia);

        let mut hole = corpse_session(0, 0);
        assert!(hole.try_assign_kind(LootKind::FishingHole));
        assert_eq!(hole.kind(), LootKind::Fishing);

        let mut junk = corpse_session(0, 0);
        assert!(junk.try_assign_kind(LootKind::FishingJunk));
        assert_eq!(junk.kind(), LootKind::Fishing);
    }

    #[test]
    fn test_assigning_none_is_rejected() {
        let mut session = corpse_session(0, 0);
        assert!(!session.try_assign_kind(LootKind::None));
        assert!(session.kind().is_none());
    }

    #[test]
    fn test_take_gold_drains_once() {
        let mut session = corpse_session(250, 0);
        assert_eq!(session.take_gold(), 250);
        assert_eq!(session.gold(), 0);
        assert_eq!(session.take_gold(), 0);
    }

    #[test]
    fn test_looted_slot_never_revisited() {
        let mut session = corpse_session(0, 2);
        assert!(session.mark_looted(0).unwrap());
        assert!(!session.mark_looted(0).unwrap());
        assert_eq!(session.unlooted(), 1);
        assert!(session.item_in_slot(0).is_none());
        assert!(session.item_in_slot(1).is_some());
    }

    #[test]
    fn test_mark_looted_out_of_range() {
        let mut session = corpse_session(0, 1);
        assert!(matches!(
            session.mark_looted(5),
            Err(SessionError::SlotOutOfRange(5))
        ));
    }

    #[test]
    fn test_fully_looted_requires_gold_and_items_drained() {
        let mut session = corpse_session(10, 1);
        assert!(!session.is_fully_looted());
        session.take_gold();
        assert!(!session.is_fully_looted());
        session.mark_looted(0).unwrap();
        assert!(session.is_fully_looted());
    }

    #[test]
    fn test_compare_and_clear_holder() {
        let mut session = corpse_session(0, 0);
        session.set_round_robin_holder(Some(PlayerId(7)));
        assert!(!session.clear_holder_if(PlayerId(8)));
        assert_eq!(session.round_robin_holder(), Some(PlayerId(7)));
        assert!(session.clear_holder_if(PlayerId(7)));
        assert_eq!(session.round_robin_holder(), None);
        assert!(!session.clear_holder_if(PlayerId(7)));
    }

    #[test]
    fn test_lifecycle_progression() {
        let mut session = corpse_session(10, 1);
        assert_eq!(session.lifecycle(), SessionLifecycle::Uninitialized);
        session.mark_opened();
        assert_eq!(session.lifecycle(), SessionLifecycle::Opened);
        session.take_gold();
        session.note_consumption();
        assert_eq!(session.lifecycle(), SessionLifecycle::PartiallyConsumed);
        session.mark_looted(0).unwrap();
        session.note_consumption();
        assert_eq!(session.lifecycle(), SessionLifecycle::FullyConsumed);
        session.advance(SessionLifecycle::Released).unwrap();
        assert!(session
            .advance(SessionLifecycle::Opened)
            .is_err());
    }

    #[test]
    fn test_view_hides_looted_slots_and_keeps_client_kind() {
        let mut session = corpse_session(30, 3);
        session.try_assign_kind(LootKind::Insignia);
        session.mark_looted(1).unwrap();
        let view = session.view_for(PlayerId(1), 3);
        assert_eq!(view.kind, LootKind::Insignia);
        assert_eq!(view.gold, 30);
        let slots: Vec<u8> = view.items.iter().map(|i| i.slot).collect();
        assert_eq!(slots, vec![0, 2]);
    }

    #[test]
    fn test_view_respects_visible_slot_bound() {
        let session = corpse_session(0, 4);
        let view = session.view_for(PlayerId(1), 2);
        assert_eq!(view.items.len(), 2);
        // Bound larger than the item list clamps without panicking.
        let view = session.view_for(PlayerId(1), u8::MAX);
        assert_eq!(view.items.len(), 4);
    }

    #[test]
    fn test_skinning_restock_resets_counters() {
        let mut session = corpse_session(5, 1);
        session.mark_looted(0).unwrap();
        session.restock(
            0,
            vec![
                RewardItem::new(ItemId(900), 2, ItemVisibility::Normal),
                RewardItem::new(ItemId(901), 1, ItemVisibility::Normal),
            ],
        );
        assert_eq!(session.unlooted(), 2);
        assert_eq!(session.gold(), 0);
        session.reassign_to(PlayerId(9));
        assert_eq!(session.recipient(), LootRecipient::Player(PlayerId(9)));
    }
}
