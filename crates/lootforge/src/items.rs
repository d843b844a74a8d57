//! Reward-slot distribution: visibility, eligibility, placement, recovery.

use tracing::debug;

use lootforge_group::GroupRegistry;
use lootforge_protocol::{LootKind, PlayerId};
use lootforge_session::LootSession;

use crate::{LootError, LootHost, PlacementOutcome};

/// Iterates the reward slots visible to `player` and attempts to place
/// each eligible item into their holdings.
///
/// Per slot, under a rolling loot method (group / need-before-greed /
/// master):
/// - missing or looted slots are skipped;
/// - ordinary items are gated to the round-robin holder — only items
///   carrying a special visibility (free-for-all, quest, conditional)
///   bypass the turn order;
/// - items at or above the group's roll threshold are skipped entirely:
///   those belong to the roll protocol, never to direct placement.
///
/// Placement failures degrade rather than abort:
/// - on item-type containers whose kind is not `Corpse`, a failed
///   placement falls back to mailing the item (the slot still counts as
///   looted — deferred delivery, not reward loss);
/// - `InventoryFull` — and only `InventoryFull`, to avoid duplicate
///   failure spam for other error kinds — clears the round-robin holder
///   if this player held it, clears the group's looter-of-record, forces
///   a lootable-view refresh, and drops the player from the looter set on
///   non-item containers;
/// - any other failure leaves the slot unresolved for a future attempt.
pub(crate) fn distribute_items<H: LootHost>(
    session: &mut LootSession,
    groups: &mut GroupRegistry,
    host: &mut H,
    player: PlayerId,
) -> Result<(), LootError> {
    let max_slot = host.max_visible_slot(player, session);
    let player_group = groups.group_of(player);

    for slot in 0..max_slot {
        // Rolling-method gating.
        if let Some(group) = player_group.and_then(|id| groups.get(id)) {
            if group.loot_method().requires_rolling() {
                let Some(item) = session.item_in_slot(slot) else {
                    continue;
                };
                // Not your turn, and nothing special about the item.
                if session.round_robin_holder() != Some(player)
                    && !item.visibility.is_special()
                {
                    continue;
                }
                // Over-threshold items are resolved by the roll protocol.
                if host.item_quality(item.item) >= group.loot_threshold() {
                    continue;
                }
            }
        }

        let Some(item) = session.item_in_slot(slot) else {
            continue;
        };
        let (item_id, count) = (item.item, item.count);

        let outcome = host.place_in_holdings(player, item_id, count);
        match outcome {
            PlacementOutcome::Stored => {
                session.mark_looted(slot)?;
                session.note_consumption();
                debug!(
                    owner = %session.owner(),
                    %player,
                    item = %item_id,
                    slot,
                    "item placed"
                );
            }
            failure => {
                if session.owner().is_container() && session.kind() != LootKind::Corpse {
                    // Deferred delivery: the slot is consumed, the item
                    // travels by mail.
                    session.mark_looted(slot)?;
                    host.mail_item(player, item_id, count);
                    session.note_consumption();
                    debug!(
                        owner = %session.owner(),
                        %player,
                        item = %item_id,
                        "placement failed, item mailed"
                    );
                } else if failure == PlacementOutcome::InventoryFull {
                    if session.clear_holder_if(player) {
                        if let (Some(entity), Some(group_id)) =
                            (session.owner().entity(), player_group)
                        {
                            if let Some(group) = groups.get_mut(group_id) {
                                group.set_looter_of_record(entity, None);
                            }
                        }
                    }
                    if let Some(entity) = session.owner().entity() {
                        host.refresh_lootable_view(entity);
                    }
                    if !session.owner().is_container() {
                        session.remove_looter(player);
                        debug!(
                            owner = %session.owner(),
                            %player,
                            "holdings full, looter removed"
                        );
                    }
                }
                // Other failures: slot left unresolved, no state change.
            }
        }
    }

    Ok(())
}
