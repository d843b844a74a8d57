//! Session release: post-conditions after every distribution step.

use tracing::debug;

use lootforge_protocol::{PlayerId, SessionOwner};
use lootforge_session::{LootSession, SessionLifecycle};

use crate::LootHost;

/// Checks a session's post-conditions and performs teardown when it is
/// fully consumed.
///
/// Returns `true` when the session was torn down and should be dropped
/// from the engine's store. Each owner kind has its own once-guard:
///
/// - item containers gate on the `FullyConsumed → Released` lifecycle
///   transition, so the host's release call happens exactly once;
/// - corpses gate on the external lootable flag — the all-loot-removed
///   notification fires while the flag is still set, then the flag is
///   cleared, which makes repeat invocations no-ops. A corpse that was
///   drained before ever being opened here (lifecycle still
///   `Uninitialized`) is cleaned up all the same.
pub(crate) fn run<H: LootHost>(
    session: &mut LootSession,
    host: &mut H,
    actor: PlayerId,
) -> bool {
    if !session.is_fully_looted() {
        return false;
    }

    match session.owner() {
        SessionOwner::Container(container) => {
            if session
                .lifecycle()
                .can_transition_to(SessionLifecycle::Released)
                && session.advance(SessionLifecycle::Released).is_ok()
            {
                host.release_container(actor, container);
                debug!(%container, "container fully consumed, released");
                return true;
            }
            false
        }
        SessionOwner::Entity(entity) => {
            // Corpse teardown waits for the entity to actually be dead
            // and still flagged lootable.
            if !host.is_alive(entity) && host.is_lootable(entity) {
                host.notify_all_loot_removed(entity);
                host.clear_lootable(entity);
                // Sessions drained without ever being opened cannot reach
                // Released through the state machine; the flag above is
                // the real once-guard, so a failed advance is fine.
                let _ = session.advance(SessionLifecycle::Released);
                debug!(%entity, "corpse loot cleared");
                return true;
            }
            false
        }
    }
}
