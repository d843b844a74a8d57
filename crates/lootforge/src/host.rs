//! The `LootHost` trait — the engine's view of the surrounding server.
//!
//! This is the single seam between the distribution engine and the host
//! game server. The engine decides *who may take what*; the host owns
//! everything physical: entity flags, inventories, mail, currency
//! balances, persistence, and delivery of notifications to clients. The
//! engine calls these methods at the right time; the host just does what
//! they say.

use lootforge_protocol::{
    ContainerId, CurrencyNotice, EntityId, ItemId, ItemQuality, LootResponseError,
    LootView, PlayerId, SessionOwner,
};
use lootforge_session::{LootSession, RewardItem};

// ---------------------------------------------------------------------------
// PlacementOutcome
// ---------------------------------------------------------------------------

/// The result of attempting to place an item in a player's holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The item was stored.
    Stored,
    /// The player's holdings are full. This is the only failure that
    /// triggers round-robin re-assignment.
    InventoryFull,
    /// Any other placement failure (unique constraint, bind rule, ...).
    /// The slot is left unresolved for a future attempt.
    Failed,
}

impl PlacementOutcome {
    /// Returns `true` if the item landed in the player's holdings.
    pub fn is_stored(self) -> bool {
        matches!(self, Self::Stored)
    }
}

// ---------------------------------------------------------------------------
// LootHost
// ---------------------------------------------------------------------------

/// External capabilities the engine consumes from the host server.
///
/// Implementations are expected to be cheap and non-blocking: the engine
/// runs inside a single server tick and never suspends, so a host method
/// that waits would stall the whole update step.
pub trait LootHost {
    // -- entity state -------------------------------------------------------

    /// Is the entity currently alive? The sweep trigger skips living
    /// entities; corpse cleanup only runs on dead ones.
    fn is_alive(&self, entity: EntityId) -> bool;

    /// Does the entity carry the externally owned lootable flag?
    fn is_lootable(&self, entity: EntityId) -> bool;

    /// Clears the lootable flag after all loot is removed.
    fn clear_lootable(&mut self, entity: EntityId);

    /// Forces a refresh of the entity's externally visible lootable
    /// state (looter and lootability indicators on the corpse).
    fn refresh_lootable_view(&mut self, entity: EntityId);

    /// Notifies observers that every reward was removed from the corpse.
    fn notify_all_loot_removed(&mut self, entity: EntityId);

    /// Returns the dead entities within `radius` of the player. Discovery
    /// is entirely the host's concern; the engine treats the result as a
    /// ready list.
    fn dead_entities_near(&self, player: PlayerId, radius: u32) -> Vec<EntityId>;

    // -- players ------------------------------------------------------------

    /// Is `b` within reward-sharing distance of `a`? Must hold for
    /// `a == b` — a player is always within reward distance of themselves.
    fn within_reward_distance(&self, a: PlayerId, b: PlayerId) -> bool;

    /// Marks the player as "currently looting" (corpse sessions only).
    fn set_looting_flag(&mut self, player: PlayerId);

    /// Clears the player's "currently looting" state.
    fn clear_looting_flag(&mut self, player: PlayerId);

    // -- items --------------------------------------------------------------

    /// The quality grade of an item template, compared against the
    /// group's roll threshold.
    fn item_quality(&self, item: ItemId) -> ItemQuality;

    /// The count of session slots visible to this specific player, with
    /// group-method-dependent filtering already applied. Bounds the
    /// distribution loop; never exceeds `u8::MAX` slots.
    fn max_visible_slot(&self, player: PlayerId, session: &LootSession) -> u8;

    /// Attempts to place an item stack into the player's holdings.
    fn place_in_holdings(
        &mut self,
        player: PlayerId,
        item: ItemId,
        count: u32,
    ) -> PlacementOutcome;

    /// Mails an item stack to the player (deferred delivery fallback).
    fn mail_item(&mut self, player: PlayerId, item: ItemId, count: u32);

    // -- currency -----------------------------------------------------------

    /// Credits currency to a player's balance.
    fn credit_currency(&mut self, player: PlayerId, amount: u64);

    /// Updates the player's looted-currency reward-tracking counter.
    /// Default: no bookkeeping.
    fn record_currency_achievement(&mut self, _player: PlayerId, _amount: u64) {}

    /// Delivers the per-player currency notification.
    fn notify_currency(&mut self, player: PlayerId, notice: CurrencyNotice);

    /// Tells every observer of the session that its money is gone.
    fn notify_money_removed(&mut self, owner: SessionOwner);

    /// Instructs persistence to drop the stored money record for an
    /// item-type container.
    fn persist_remove_stored_money(&mut self, container: ContainerId);

    // -- skinning -----------------------------------------------------------

    /// Rolls the skinning reward table for an entity. Called once, on the
    /// first skinning open.
    fn skinning_rewards(&mut self, entity: EntityId) -> (u64, Vec<RewardItem>);

    /// Hook invoked when an entity is first skinned. Default: no-op.
    fn on_entity_skinned(&mut self, _entity: EntityId, _player: PlayerId) {}

    // -- client delivery ----------------------------------------------------

    /// Delivers a session view to an opening player.
    fn send_loot_view(&mut self, player: PlayerId, view: &LootView);

    /// Delivers a loot denial to a requesting player.
    fn send_loot_error(
        &mut self,
        player: PlayerId,
        owner: SessionOwner,
        error: LootResponseError,
    );

    // -- containers ---------------------------------------------------------

    /// Releases (destroys) a fully consumed item-type container.
    fn release_container(&mut self, player: PlayerId, container: ContainerId);
}
