//! Currency distribution across eligible nearby group members.

use tracing::debug;

use lootforge_group::GroupRegistry;
use lootforge_protocol::{CurrencyNotice, PlayerId, SessionOwner};
use lootforge_session::LootSession;

use crate::LootHost;

/// Distributes the session's gold on behalf of `actor`.
///
/// Grouped actors split the gold evenly (floor division) across every
/// current group member within reward distance of the actor. The
/// remainder `gold % eligible` is **not** redistributed — it is
/// discarded. This is a deliberate, long-standing rounding policy of the
/// source behavior, preserved exactly; resist the urge to pool the
/// remainder somewhere.
///
/// Idempotent: a session whose gold is already zero is left untouched.
pub(crate) fn distribute<H: LootHost>(
    session: &mut LootSession,
    groups: &GroupRegistry,
    host: &mut H,
    actor: PlayerId,
) {
    if session.gold() == 0 {
        return;
    }
    let gold = session.take_gold();

    let group = groups
        .group_of(actor)
        .and_then(|group_id| groups.get(group_id));

    match group {
        Some(group) => {
            let eligible: Vec<PlayerId> = group
                .members()
                .iter()
                .copied()
                .filter(|&member| host.within_reward_distance(actor, member))
                .collect();

            if eligible.is_empty() {
                // The actor is always within reward distance of
                // themselves, so this only happens with a misbehaving
                // host. Credit the actor rather than divide by zero.
                credit_solo(host, actor, gold);
            } else {
                let share = gold / eligible.len() as u64;
                let shared = eligible.len() > 1;
                for &member in &eligible {
                    host.credit_currency(member, share);
                    host.record_currency_achievement(member, share);
                    host.notify_currency(member, CurrencyNotice { amount: share, shared });
                }
                debug!(
                    owner = %session.owner(),
                    gold,
                    share,
                    eligible = eligible.len(),
                    discarded = gold % eligible.len() as u64,
                    "gold split among group"
                );
            }
        }
        None => credit_solo(host, actor, gold),
    }

    host.notify_money_removed(session.owner());
    if let SessionOwner::Container(container) = session.owner() {
        host.persist_remove_stored_money(container);
    }
    session.note_consumption();
}

fn credit_solo<H: LootHost>(host: &mut H, actor: PlayerId, gold: u64) {
    host.credit_currency(actor, gold);
    host.record_currency_achievement(actor, gold);
    host.notify_currency(actor, CurrencyNotice { amount: gold, shared: false });
}
