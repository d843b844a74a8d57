//! A small skirmish: three players in a group cut down a pack of
//! creatures, then one of them sweeps the corpses.
//!
//! Everything physical (inventories, balances, corpse flags) lives in the
//! in-memory `DemoWorld` below; the engine only decides who may take what.
//!
//! Run with `RUST_LOG=debug` to watch the engine's internal decisions.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lootforge::{LootConfig, LootEngine, LootHost, PlacementOutcome, RollCoordinator, RollStyle};
use lootforge_group::GroupRegistry;
use lootforge_protocol::{
    ContainerId, CurrencyNotice, EntityId, ItemId, ItemQuality, ItemVisibility,
    LootResponseError, LootView, PlayerId, SessionOwner,
};
use lootforge_session::{LootRecipient, LootSession, RewardItem};

// ---------------------------------------------------------------------------
// DemoWorld
// ---------------------------------------------------------------------------

/// The host side of the demo: a flat little world where everyone stands
/// within reward distance of everyone else.
#[derive(Default)]
struct DemoWorld {
    alive: HashSet<EntityId>,
    lootable: HashSet<EntityId>,
    qualities: HashMap<ItemId, ItemQuality>,
    balances: HashMap<PlayerId, u64>,
    inventories: HashMap<PlayerId, Vec<(ItemId, u32)>>,
    looting: HashSet<PlayerId>,
    last_view: Option<LootView>,
}

impl LootHost for DemoWorld {
    fn is_alive(&self, entity: EntityId) -> bool {
        self.alive.contains(&entity)
    }

    fn is_lootable(&self, entity: EntityId) -> bool {
        self.lootable.contains(&entity)
    }

    fn clear_lootable(&mut self, entity: EntityId) {
        self.lootable.remove(&entity);
    }

    fn refresh_lootable_view(&mut self, _entity: EntityId) {}

    fn notify_all_loot_removed(&mut self, entity: EntityId) {
        info!(%entity, "corpse picked clean");
    }

    fn dead_entities_near(&self, _player: PlayerId, _radius: u32) -> Vec<EntityId> {
        self.lootable
            .iter()
            .copied()
            .filter(|entity| !self.alive.contains(entity))
            .collect()
    }

    fn within_reward_distance(&self, _a: PlayerId, _b: PlayerId) -> bool {
        true
    }

    fn set_looting_flag(&mut self, player: PlayerId) {
        self.looting.insert(player);
    }

    fn clear_looting_flag(&mut self, player: PlayerId) {
        self.looting.remove(&player);
    }

    fn item_quality(&self, item: ItemId) -> ItemQuality {
        self.qualities
            .get(&item)
            .copied()
            .unwrap_or(ItemQuality::Common)
    }

    fn max_visible_slot(&self, _player: PlayerId, session: &LootSession) -> u8 {
        session.items().len().min(usize::from(u8::MAX)) as u8
    }

    fn place_in_holdings(
        &mut self,
        player: PlayerId,
        item: ItemId,
        count: u32,
    ) -> PlacementOutcome {
        self.inventories.entry(player).or_default().push((item, count));
        PlacementOutcome::Stored
    }

    fn mail_item(&mut self, player: PlayerId, item: ItemId, count: u32) {
        info!(%player, %item, count, "item sent by mail");
    }

    fn credit_currency(&mut self, player: PlayerId, amount: u64) {
        *self.balances.entry(player).or_default() += amount;
    }

    fn notify_currency(&mut self, player: PlayerId, notice: CurrencyNotice) {
        if notice.shared {
            info!(%player, amount = notice.amount, "your share of the loot");
        } else {
            info!(%player, amount = notice.amount, "you loot");
        }
    }

    fn notify_money_removed(&mut self, _owner: SessionOwner) {}

    fn persist_remove_stored_money(&mut self, _container: ContainerId) {}

    fn skinning_rewards(&mut self, _entity: EntityId) -> (u64, Vec<RewardItem>) {
        (0, vec![RewardItem::new(ItemId(9000), 2, ItemVisibility::Normal)])
    }

    fn send_loot_view(&mut self, player: PlayerId, view: &LootView) {
        info!(
            %player,
            owner = %view.owner,
            gold = view.gold,
            slots = view.items.len(),
            "loot window opened"
        );
        self.last_view = Some(view.clone());
    }

    fn send_loot_error(
        &mut self,
        player: PlayerId,
        owner: SessionOwner,
        error: LootResponseError,
    ) {
        info!(%player, %owner, ?error, "loot denied");
    }

    fn release_container(&mut self, _player: PlayerId, container: ContainerId) {
        info!(%container, "container destroyed");
    }
}

/// A stand-in roll protocol: instead of collecting client rolls it just
/// draws the round-robin holder at random from the party.
struct DemoRolls {
    party: Vec<PlayerId>,
}

impl RollCoordinator for DemoRolls {
    fn run_roll(&mut self, style: RollStyle, session: &mut LootSession, entity: EntityId) {
        if self.party.is_empty() {
            return;
        }
        let holder = self.party[rand::rng().random_range(0..self.party.len())];
        info!(%entity, ?style, %holder, "roll protocol started");
        session.set_round_robin_holder(Some(holder));
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut rng = rand::rng();
    let mut world = DemoWorld::default();
    let mut engine = LootEngine::new(LootConfig::default());
    let mut groups = GroupRegistry::new();

    let party = [PlayerId(1), PlayerId(2), PlayerId(3)];
    groups.create_group(&party).expect("fresh registry");
    let mut rolls = DemoRolls { party: party.to_vec() };
    let gid = groups.group_of(party[0]).expect("just created");

    // Spawn a pack and cut it down. Rewards are rolled here, host-side;
    // the engine receives them ready-made.
    for n in 1..=5u64 {
        let entity = EntityId(n);
        let gold = rng.random_range(20..=200);
        let items: Vec<RewardItem> = (0..rng.random_range(1..=3u32))
            .map(|i| {
                let item = ItemId(1000 + n as u32 * 10 + i);
                let quality = if rng.random_range(0..10) == 0 {
                    ItemQuality::Epic
                } else {
                    ItemQuality::Common
                };
                world.qualities.insert(item, quality);
                RewardItem::new(item, 1, ItemVisibility::Normal)
            })
            .collect();

        world.lootable.insert(entity);
        engine
            .create_session(
                SessionOwner::Entity(entity),
                LootRecipient::Group(gid),
                gold,
                items,
            )
            .expect("entity ids are unique");
        engine
            .on_kill_credit(&mut world, &mut rolls, &groups, party[0], entity)
            .expect("session just created");
    }

    if let Some(view) = &world.last_view {
        info!(
            "last loot window as the client would receive it:\n{}",
            serde_json::to_string_pretty(view).expect("views always serialize")
        );
    }

    // One player sweeps every corpse in range.
    let sweeper = party[1];
    let swept = engine.auto_loot_sweep(&mut world, &mut rolls, &mut groups, sweeper);
    info!(%sweeper, swept, "sweep complete");

    for player in party {
        let balance = world.balances.get(&player).copied().unwrap_or(0);
        let items = world.inventories.get(&player).map_or(0, Vec::len);
        info!(%player, balance, items, "final tally");
    }
    info!(remaining_sessions = engine.session_count(), "done");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_party_roll_is_a_no_op() {
        let mut rolls = DemoRolls { party: Vec::new() };
        let mut session = LootSession::new(
            SessionOwner::Entity(EntityId(1)),
            LootRecipient::Player(PlayerId(1)),
            0,
            vec![RewardItem::new(ItemId(1), 1, ItemVisibility::Normal)],
        );
        rolls.run_roll(RollStyle::GroupRoll, &mut session, EntityId(1));
        assert_eq!(session.round_robin_holder(), None);
    }

    #[test]
    fn test_roll_picks_holder_from_party() {
        let party = vec![PlayerId(1), PlayerId(2)];
        let mut rolls = DemoRolls { party: party.clone() };
        let mut session = LootSession::new(
            SessionOwner::Entity(EntityId(2)),
            LootRecipient::Player(PlayerId(1)),
            0,
            vec![],
        );
        rolls.run_roll(RollStyle::GroupRoll, &mut session, EntityId(2));
        let holder = session.round_robin_holder().unwrap();
        assert!(party.contains(&holder));
    }
}
