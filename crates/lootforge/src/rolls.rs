//! The `RollCoordinator` trait — the seam to the external roll protocols.
//!
//! The multi-round vote/need/greed exchange that assigns above-threshold
//! items to a winner is *not* part of this engine. The engine's only
//! obligation is to kick the protocol off exactly once per session,
//! selecting the style from the owning group's loot method. The protocol
//! then runs asynchronously and reports its winner to the session out of
//! band.

use lootforge_group::LootMethod;
use lootforge_protocol::EntityId;
use lootforge_session::LootSession;

/// The three mutually exclusive roll styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollStyle {
    /// Roll items over the threshold; under-threshold items rotate
    /// round-robin.
    GroupRoll,
    /// Like `GroupRoll`, but need rolls outrank greed rolls.
    NeedBeforeGreed,
    /// The master looter receives the assignable-item list.
    MasterList,
}

impl RollStyle {
    /// Maps a loot method to its roll style. Free-for-all and round-robin
    /// methods never roll.
    pub fn for_method(method: LootMethod) -> Option<Self> {
        match method {
            LootMethod::GroupLoot => Some(Self::GroupRoll),
            LootMethod::NeedBeforeGreed => Some(Self::NeedBeforeGreed),
            LootMethod::MasterLoot => Some(Self::MasterList),
            LootMethod::FreeForAll | LootMethod::RoundRobin => None,
        }
    }
}

/// Starts the external roll protocol for a session.
///
/// Invoked at most once per session, by the opener that performs the
/// `None → kind` transition while a group owns the corpse. The
/// implementation may inspect and annotate the session (e.g. record the
/// round-robin holder) but must not consume rewards synchronously.
pub trait RollCoordinator {
    fn run_roll(&mut self, style: RollStyle, session: &mut LootSession, entity: EntityId);
}
