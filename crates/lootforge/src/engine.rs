//! The loot engine: session store, open core, and trigger adapters.

use std::collections::HashMap;

use tracing::{debug, info};

use lootforge_group::GroupRegistry;
use lootforge_protocol::{
    EntityId, LootKind, LootResponseError, PermissionTier, PlayerId, SessionOwner,
};
use lootforge_session::{LootRecipient, LootSession, RewardItem};

use crate::{
    items, money, permission, release, LootConfig, LootError, LootHost, RollCoordinator,
};

/// Owns every active loot session and tracks which player has which
/// session open.
///
/// Sessions are stored behind their stable [`SessionOwner`] handle, never
/// behind references into entity records — entity teardown cannot leave
/// dangling session access, only a failed lookup.
///
/// Two external triggers feed the engine and converge on the same `open`
/// core: [`LootEngine::auto_loot_sweep`] (ability-driven bulk loot over a
/// radius) and [`LootEngine::on_kill_credit`] (per-kill open for nearby
/// subgroup members). Neither duplicates distribution logic.
pub struct LootEngine {
    config: LootConfig,

    /// Active sessions, keyed by the entity or container they hang off.
    sessions: HashMap<SessionOwner, LootSession>,

    /// Maps each player to the session they currently have open.
    /// A player holds at most ONE loot target at a time (key invariant);
    /// opening a new session first releases the prior one.
    targets: HashMap<PlayerId, SessionOwner>,
}

impl LootEngine {
    /// Creates an engine with a validated config.
    pub fn new(config: LootConfig) -> Self {
        Self {
            config: config.validated(),
            sessions: HashMap::new(),
            targets: HashMap::new(),
        }
    }

    // -- session store ------------------------------------------------------

    /// Attaches a fresh session to an entity or container.
    ///
    /// Called by the host when the entity dies (or the container becomes
    /// interactable), with the rewards already generated.
    ///
    /// # Errors
    /// Returns [`LootError::SessionExists`] if the owner already carries
    /// a session.
    pub fn create_session(
        &mut self,
        owner: SessionOwner,
        recipient: LootRecipient,
        gold: u64,
        items: Vec<RewardItem>,
    ) -> Result<(), LootError> {
        if self.sessions.contains_key(&owner) {
            return Err(LootError::SessionExists(owner));
        }
        self.sessions
            .insert(owner, LootSession::new(owner, recipient, gold, items));
        debug!(%owner, "loot session created");
        Ok(())
    }

    /// Returns the session attached to `owner`, if any.
    pub fn session(&self, owner: SessionOwner) -> Option<&LootSession> {
        self.sessions.get(&owner)
    }

    /// Returns the session for mutation (e.g. for the roll protocol to
    /// record its winner out of band).
    pub fn session_mut(&mut self, owner: SessionOwner) -> Option<&mut LootSession> {
        self.sessions.get_mut(&owner)
    }

    /// Detaches and returns a session (external abandonment path).
    pub fn remove_session(&mut self, owner: SessionOwner) -> Option<LootSession> {
        self.targets.retain(|_, target| *target != owner);
        self.sessions.remove(&owner)
    }

    /// Number of active sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// The session a player currently has open, if any.
    pub fn loot_target(&self, player: PlayerId) -> Option<SessionOwner> {
        self.targets.get(&player).copied()
    }

    // -- open core ----------------------------------------------------------

    /// Opens a session for a player: the shared core both triggers use.
    ///
    /// Verifies the external lootable flag, resolves the permission tier
    /// (performing the one-shot kind transition and roll delegation),
    /// rejects `None` tiers with a "did not kill" notification, releases
    /// the player's prior loot target, registers them as a looter, and
    /// transmits the session view. Corpse-kind sessions on non-item
    /// containers additionally set the player's "currently looting" flag.
    pub fn open<H: LootHost, R: RollCoordinator>(
        &mut self,
        host: &mut H,
        rolls: &mut R,
        groups: &GroupRegistry,
        player: PlayerId,
        owner: SessionOwner,
        requested: LootKind,
    ) -> Result<PermissionTier, LootError> {
        let session = self
            .sessions
            .get_mut(&owner)
            .ok_or(LootError::NoSession(owner))?;

        if let Some(entity) = owner.entity() {
            if !host.is_lootable(entity) {
                host.send_loot_error(player, owner, LootResponseError::NotKillable);
                return Err(LootError::NotKillable(entity));
            }
        }

        let tier = permission::resolve(session, groups, host, rolls, player, requested)?;
        if !tier.allows_interaction() {
            host.send_loot_error(player, owner, LootResponseError::DidntKill);
            return Err(LootError::PermissionDenied { player, owner });
        }

        // One loot target at a time: opening a new session releases the
        // prior one first.
        if let Some(prev) = self.targets.get(&player).copied() {
            if prev != owner {
                self.release_player(host, player);
            }
        }
        self.targets.insert(player, owner);

        let session = self
            .sessions
            .get_mut(&owner)
            .expect("session present, checked above");
        session.mark_opened();
        session.add_looter(player);

        let max_slot = host.max_visible_slot(player, session);
        let view = session.view_for(player, max_slot);
        host.send_loot_view(player, &view);

        if session.kind() == LootKind::Corpse && !owner.is_container() {
            host.set_looting_flag(player);
        }

        info!(%player, %owner, %tier, kind = %session.kind(), "loot session opened");
        Ok(tier)
    }

    /// Releases a player's current loot target: removes them from the
    /// session's looter set and clears their looting flag.
    ///
    /// Called from the open core when switching targets and by the host
    /// when a player walks away or disconnects.
    pub fn release_player<H: LootHost>(&mut self, host: &mut H, player: PlayerId) {
        if let Some(owner) = self.targets.remove(&player) {
            if let Some(session) = self.sessions.get_mut(&owner) {
                session.remove_looter(player);
            }
            host.clear_looting_flag(player);
            debug!(%player, %owner, "loot target released");
        }
    }

    // -- distribution -------------------------------------------------------

    /// Runs the currency split for a player's open session.
    ///
    /// The player must have opened the session with a non-`None` tier
    /// (i.e. still be a registered looter).
    pub fn distribute_money<H: LootHost>(
        &mut self,
        host: &mut H,
        groups: &GroupRegistry,
        player: PlayerId,
        owner: SessionOwner,
    ) -> Result<(), LootError> {
        let session = self
            .sessions
            .get_mut(&owner)
            .ok_or(LootError::NoSession(owner))?;
        if !session.is_looter(player) {
            return Err(LootError::PermissionDenied { player, owner });
        }
        money::distribute(session, groups, host, player);
        self.finish_step(host, player, owner);
        Ok(())
    }

    /// Runs item distribution for a player's open session.
    ///
    /// Same permission requirement as [`LootEngine::distribute_money`].
    pub fn distribute_items<H: LootHost>(
        &mut self,
        host: &mut H,
        groups: &mut GroupRegistry,
        player: PlayerId,
        owner: SessionOwner,
    ) -> Result<(), LootError> {
        let session = self
            .sessions
            .get_mut(&owner)
            .ok_or(LootError::NoSession(owner))?;
        if !session.is_looter(player) {
            return Err(LootError::PermissionDenied { player, owner });
        }
        items::distribute_items(session, groups, host, player)?;
        self.finish_step(host, player, owner);
        Ok(())
    }

    /// Release post-conditions after a distribution step. Drops the
    /// session (and every target pointing at it) once released.
    fn finish_step<H: LootHost>(
        &mut self,
        host: &mut H,
        player: PlayerId,
        owner: SessionOwner,
    ) {
        let Some(session) = self.sessions.get_mut(&owner) else {
            return;
        };
        if release::run(session, host, player) {
            self.sessions.remove(&owner);
            let holders: Vec<PlayerId> = self
                .targets
                .iter()
                .filter_map(|(&p, &o)| (o == owner).then_some(p))
                .collect();
            for holder in holders {
                self.targets.remove(&holder);
                host.clear_looting_flag(holder);
            }
        }
    }

    // -- trigger adapters ---------------------------------------------------

    /// Ability-driven bulk trigger: sweeps dead entities around the
    /// caster and loots every session the caster is permitted to open.
    ///
    /// Returns the number of sessions actually opened and distributed.
    /// Denials are delivered to the caster per corpse and do not abort
    /// the sweep.
    pub fn auto_loot_sweep<H: LootHost, R: RollCoordinator>(
        &mut self,
        host: &mut H,
        rolls: &mut R,
        groups: &mut GroupRegistry,
        player: PlayerId,
    ) -> usize {
        let corpses = host.dead_entities_near(player, self.config.sweep_radius);
        let mut swept = 0;

        for entity in corpses {
            if host.is_alive(entity) {
                continue;
            }
            let owner = SessionOwner::Entity(entity);
            let Some(session) = self.sessions.get(&owner) else {
                continue;
            };

            if session.has_rewards() {
                if self
                    .open(host, rolls, groups, player, owner, LootKind::Corpse)
                    .is_ok()
                {
                    let _ = self.distribute_money(host, groups, player, owner);
                    let _ = self.distribute_items(host, groups, player, owner);
                    swept += 1;
                }
            } else {
                // Already drained by someone else: make sure the corpse
                // flag still gets cleared.
                self.finish_step(host, player, owner);
            }
        }

        debug!(%player, swept, "loot sweep finished");
        swept
    }

    /// Per-kill trigger: opens the session for every same-subgroup member
    /// of the killer's group within reward distance (the killer
    /// included). A solo killer opens alone.
    ///
    /// # Errors
    /// Returns [`LootError::NoSession`] if the entity carries no session.
    /// Per-member denials are delivered to each member by the open core
    /// and do not fail the kill credit.
    pub fn on_kill_credit<H: LootHost, R: RollCoordinator>(
        &mut self,
        host: &mut H,
        rolls: &mut R,
        groups: &GroupRegistry,
        killer: PlayerId,
        entity: EntityId,
    ) -> Result<(), LootError> {
        let owner = SessionOwner::Entity(entity);
        if !self.sessions.contains_key(&owner) {
            return Err(LootError::NoSession(owner));
        }

        let openers: Vec<PlayerId> = match groups
            .group_of(killer)
            .and_then(|group_id| groups.get(group_id))
        {
            Some(group) => group
                .members()
                .iter()
                .copied()
                .filter(|&member| {
                    group.same_subgroup(killer, member)
                        && host.within_reward_distance(killer, member)
                })
                .collect(),
            None => vec![killer],
        };

        for member in openers {
            let _ = self.open(host, rolls, groups, member, owner, LootKind::Corpse);
        }
        Ok(())
    }
}

impl Default for LootEngine {
    fn default() -> Self {
        Self::new(LootConfig::default())
    }
}
