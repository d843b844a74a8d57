//! Permission resolution: what tier does a requesting player hold?
//!
//! Rules, in order:
//!
//! 1. A session whose recipient group can no longer be resolved aborts
//!    with [`LootError::NoRecipient`] before anything else runs.
//! 2. A session already in `Skinning` kind is exclusive: `Owner` for the
//!    recorded recipient, `None` for everyone else.
//! 3. The first skinning open refills the session from the host's
//!    skinning reward table, fixes the kind, reassigns the recipient to
//!    the skinning player, fires the skinned hook, and grants `Owner`.
//! 4. Group-owned sessions gate on current membership, then map the
//!    group's loot method to a tier.
//! 5. Solo sessions grant `Owner` to the recipient, `None` to anyone else.
//!
//! Side effect: exactly one invocation per session performs the
//! `None → kind` transition, and — when a group owns the corpse —
//! delegates once to the external roll protocol before any item can be
//! examined. The transition is gated inside the session, so concurrent
//! openers within a tick cannot re-trigger the roll.

use tracing::debug;

use lootforge_group::{GroupRegistry, LootMethod};
use lootforge_protocol::{LootKind, PermissionTier, PlayerId};
use lootforge_session::{LootRecipient, LootSession};

use crate::{LootError, LootHost, RollCoordinator, RollStyle};

pub(crate) fn resolve<H: LootHost, R: RollCoordinator>(
    session: &mut LootSession,
    groups: &GroupRegistry,
    host: &mut H,
    rolls: &mut R,
    player: PlayerId,
    requested: LootKind,
) -> Result<PermissionTier, LootError> {
    // Rule 1: a group recipient that no longer resolves is an abort, not
    // a denial.
    if let LootRecipient::Group(group_id) = session.recipient() {
        if groups.get(group_id).is_none() {
            return Err(LootError::NoRecipient(session.owner()));
        }
    }

    // Rule 2: skinning is exclusive, never shared.
    if session.kind() == LootKind::Skinning {
        let tier = if session.recipient().player() == Some(player) {
            PermissionTier::Owner
        } else {
            PermissionTier::None
        };
        return Ok(tier);
    }

    // Rule 3: first skinning open — refill, fix kind, take ownership.
    if requested.normalized() == LootKind::Skinning && session.kind().is_none() {
        if let Some(entity) = session.owner().entity() {
            let (gold, items) = host.skinning_rewards(entity);
            session.restock(gold, items);
            session.try_assign_kind(requested);
            session.reassign_to(player);
            host.on_entity_skinned(entity, player);
            debug!(%entity, %player, "skinning session opened");
            return Ok(PermissionTier::Owner);
        }
    }

    // Side effect: the single kind transition, delegating to the roll
    // protocol when a group owns the corpse. This runs for whichever
    // opener arrives first, member or not — the rolls must start before
    // any item can be examined.
    if session.try_assign_kind(requested) {
        if let (LootRecipient::Group(group_id), Some(entity)) =
            (session.recipient(), session.owner().entity())
        {
            if let Some(group) = groups.get(group_id) {
                if let Some(style) = RollStyle::for_method(group.loot_method()) {
                    debug!(%entity, %group_id, method = %group.loot_method(), "starting roll protocol");
                    rolls.run_roll(style, session, entity);
                }
            }
        }
    }

    // Rules 4 and 5: tier from group policy or solo identity.
    let tier = match session.recipient() {
        LootRecipient::Group(group_id) => {
            // Checked resolvable under rule 1.
            let group = groups
                .get(group_id)
                .ok_or(LootError::NoRecipient(session.owner()))?;
            if !group.is_member(player) {
                PermissionTier::None
            } else {
                match group.loot_method() {
                    LootMethod::MasterLoot => {
                        if group.master_looter() == Some(player) {
                            PermissionTier::Master
                        } else {
                            PermissionTier::Restricted
                        }
                    }
                    LootMethod::FreeForAll => PermissionTier::All,
                    LootMethod::RoundRobin => PermissionTier::RoundRobin,
                    LootMethod::GroupLoot | LootMethod::NeedBeforeGreed => {
                        PermissionTier::Group
                    }
                }
            }
        }
        LootRecipient::Player(recipient) => {
            if recipient == player {
                PermissionTier::Owner
            } else {
                PermissionTier::None
            }
        }
    };

    Ok(tier)
}
