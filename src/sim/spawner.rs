//! Procedural wave generation
//!
//! A wave is a burst of trees, maybe a hawk, maybe a bird watcher, a nest
//! piece and maybe a healing songbird, all placed around one anchor x.
//! Waves are laid out ahead of the player at start-up and then on a fixed
//! real-time cadence until the run ends.

use glam::Vec2;

use super::entity::{Bob, Entity, EntityId, EntityKind, EntityStore, Facing, FlightPath, Look};
use super::rng::SimRng;
use crate::config::GameConfig;
use crate::ms_to_ticks;

/// Pine sprite width / height
pub const PINE_ASPECT: f32 = 0.6;
pub const NEST_SIZE: Vec2 = Vec2::new(50.0, 40.0);
pub const HEAL_SIZE: Vec2 = Vec2::new(40.0, 32.0);
pub const WATCHER_SIZE: Vec2 = Vec2::new(42.0, 70.0);
pub const HAWK_SIZE: Vec2 = Vec2::new(60.0, 45.0);

/// Trees within this horizontal distance of the anchor can hold the nest
pub const NEST_TREE_RADIUS: f32 = 150.0;

const TREE_TINTS: [u32; 4] = [0xFFFFFF, 0xEEFFEE, 0xDDFFDD, 0xFFFFEE];

/// Wave cadence and anchor bookkeeping
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Anchor of the most recent periodic wave
    pub last_anchor: f32,
    interval: u64,
    /// Tick of the next periodic wave; None once cancelled
    next_due: Option<u64>,
    pub waves_spawned: u32,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        let interval = ms_to_ticks(config.spawn_interval_ms);
        Self {
            last_anchor: 0.0,
            interval,
            next_due: Some(interval),
            waves_spawned: 0,
        }
    }

    /// Check the cadence timer. Returns true (and re-arms) when a periodic
    /// wave is due at `tick`.
    pub fn poll(&mut self, tick: u64) -> bool {
        match self.next_due {
            Some(due) if tick >= due => {
                self.next_due = Some(due + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Pick the next periodic anchor and remember it
    pub fn advance_anchor(&mut self, rng: &mut SimRng, gap: (i32, i32)) -> f32 {
        self.last_anchor += rng.between(gap.0, gap.1) as f32;
        self.last_anchor
    }

    /// Stop the cadence timer. Returns true only for the call that
    /// actually stopped it.
    pub fn cancel(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.next_due.is_none()
    }
}

/// Shared inputs for placing entities
#[derive(Debug, Clone, Copy)]
pub struct WaveContext {
    /// Scroll factor given to gameplay entities
    pub scroll_factor: f32,
    /// Current tick, used as the start of bob animations
    pub tick: u64,
}

/// What one wave placed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveReport {
    pub anchor: f32,
    pub obstacles: Vec<EntityId>,
    pub flying_enemy: Option<EntityId>,
    pub static_enemy: Option<EntityId>,
    pub nest: Option<EntityId>,
    /// Whether the nest sits on a nearby tree rather than the fallback spot
    pub nest_on_tree: bool,
    pub heal: Option<EntityId>,
}

/// A tree top the nest can be placed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestSite {
    pub x: f32,
    pub top: f32,
}

/// Place one wave around `anchor`
pub fn spawn_wave(
    store: &mut EntityStore,
    rng: &mut SimRng,
    ctx: WaveContext,
    anchor: f32,
) -> WaveReport {
    let mut report = WaveReport {
        anchor,
        obstacles: place_trees(store, rng, ctx, anchor),
        ..Default::default()
    };

    if rng.roll(7) {
        report.flying_enemy = Some(place_hawk(store, rng, ctx, anchor));
    }

    if rng.roll(7) {
        report.static_enemy = Some(place_watcher(store, rng, ctx, anchor));
    }

    let sites = nest_sites(store, anchor);
    if let Some((id, on_tree)) = maybe_place_nest(store, rng, ctx, anchor, &sites) {
        report.nest = Some(id);
        report.nest_on_tree = on_tree;
    }

    if rng.roll(8) {
        report.heal = Some(place_heal(store, rng, ctx, anchor));
    }

    log::debug!(
        "Wave at {:.0}: {} trees, hawk={}, watcher={}, nest={}, heal={}",
        anchor,
        report.obstacles.len(),
        report.flying_enemy.is_some(),
        report.static_enemy.is_some(),
        report.nest.is_some(),
        report.heal.is_some()
    );
    report
}

/// The start-up landscape: evenly spaced waves ahead of the player
pub fn spawn_initial_landscape(
    store: &mut EntityStore,
    rng: &mut SimRng,
    config: &GameConfig,
    ctx: WaveContext,
) -> Vec<WaveReport> {
    (0..config.initial_waves)
        .map(|i| {
            let anchor = config.initial_wave_start + i as f32 * config.initial_wave_spacing;
            spawn_wave(store, rng, ctx, anchor)
        })
        .collect()
}

/// 1-3 trees scattered around the anchor, each with its own size and tint
fn place_trees(
    store: &mut EntityStore,
    rng: &mut SimRng,
    ctx: WaveContext,
    anchor: f32,
) -> Vec<EntityId> {
    let count = rng.between(1, 3);
    (0..count)
        .map(|_| {
            let height = rng.between(150, 200) as f32;
            let variation = rng.float_between(0.9, 1.1);
            let x = anchor + rng.between(-100, 100) as f32;
            let y = rng.between(450, 550) as f32;
            let tint = TREE_TINTS[rng.between(0, 3) as usize];

            let size = Vec2::new(height * PINE_ASPECT, height) * variation;
            let id = store.next_entity_id();
            store.insert(
                Entity::new(id, EntityKind::Obstacle, Vec2::new(x, y), size, ctx.scroll_factor)
                    .with_look(Look {
                        tint,
                        scale: variation,
                        ..Default::default()
                    }),
            )
        })
        .collect()
}

/// A hawk a little ahead of the anchor, facing the player
fn place_hawk(
    store: &mut EntityStore,
    rng: &mut SimRng,
    ctx: WaveContext,
    anchor: f32,
) -> EntityId {
    let x = anchor + rng.between(100, 200) as f32;
    let y = rng.between(150, 450) as f32;
    let angle = rng.between(-5, 5) as f32;

    let id = store.next_entity_id();
    let mut hawk = Entity::new(
        id,
        EntityKind::FlyingEnemy,
        Vec2::new(x, y),
        HAWK_SIZE,
        ctx.scroll_factor,
    )
    .with_look(Look {
        angle,
        ..Default::default()
    })
    .with_flight(FlightPath::default());
    hawk.facing = Facing::Left;
    store.insert(hawk)
}

/// A bird watcher standing near the anchor
fn place_watcher(
    store: &mut EntityStore,
    rng: &mut SimRng,
    ctx: WaveContext,
    anchor: f32,
) -> EntityId {
    let x = anchor + rng.between(-50, 50) as f32;
    let y = rng.between(350, 500) as f32;

    let id = store.next_entity_id();
    store.insert(Entity::new(
        id,
        EntityKind::StaticEnemy,
        Vec2::new(x, y),
        WATCHER_SIZE,
        ctx.scroll_factor,
    ))
}

/// Tops of every live tree near the anchor
pub fn nest_sites(store: &EntityStore, anchor: f32) -> Vec<NestSite> {
    store
        .of(EntityKind::Obstacle)
        .iter()
        .filter(|tree| (tree.pos.x - anchor).abs() < NEST_TREE_RADIUS)
        .map(|tree| NestSite {
            x: tree.pos.x,
            top: tree.top(),
        })
        .collect()
}

/// Place a nest piece with 3-in-11 odds, or always when there is no tree
/// to put it on.
///
/// The odds roll is drawn even when the override applies, so the random
/// stream does not depend on the tree layout. Returns the nest id and
/// whether it was placed on a tree.
pub fn maybe_place_nest(
    store: &mut EntityStore,
    rng: &mut SimRng,
    ctx: WaveContext,
    anchor: f32,
    sites: &[NestSite],
) -> Option<(EntityId, bool)> {
    let lucky = rng.roll(7);
    if !lucky && !sites.is_empty() {
        return None;
    }

    let (pos, on_tree) = match rng.pick(sites).copied() {
        Some(site) => {
            let x = site.x + rng.between(-30, 30) as f32;
            let y = site.top - rng.between(10, 50) as f32;
            (Vec2::new(x, y), true)
        }
        None => {
            let x = anchor + rng.between(-50, 50) as f32;
            let y = rng.between(400, 450) as f32;
            (Vec2::new(x, y), false)
        }
    };

    let bob = Bob {
        base_y: pos.y,
        amplitude: -(rng.between(5, 10) as f32),
        half_period: ms_to_ticks(rng.between(1000, 1500) as u32),
        start_tick: ctx.tick,
    };

    let id = store.next_entity_id();
    store.insert(
        Entity::new(id, EntityKind::Nest, pos, NEST_SIZE, ctx.scroll_factor).with_bob(bob),
    );
    Some((id, on_tree))
}

/// A healing songbird bobbing near the anchor
fn place_heal(
    store: &mut EntityStore,
    rng: &mut SimRng,
    ctx: WaveContext,
    anchor: f32,
) -> EntityId {
    let x = anchor + rng.between(-50, 50) as f32;
    let y = rng.between(200, 400) as f32;

    let bob = Bob {
        base_y: y,
        amplitude: 50.0,
        half_period: ms_to_ticks(1000),
        start_tick: ctx.tick,
    };

    let id = store.next_entity_id();
    store.insert(
        Entity::new(id, EntityKind::Heal, Vec2::new(x, y), HEAL_SIZE, ctx.scroll_factor)
            .with_bob(bob),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: WaveContext = WaveContext {
        scroll_factor: 1.0,
        tick: 0,
    };

    #[test]
    fn wave_places_one_to_three_trees_near_anchor() {
        for seed in 0..200 {
            let mut store = EntityStore::new();
            let mut rng = SimRng::new(seed);
            let report = spawn_wave(&mut store, &mut rng, CTX, 1000.0);

            assert!((1..=3).contains(&report.obstacles.len()));
            for &id in &report.obstacles {
                let tree = store.get(EntityKind::Obstacle, id).unwrap();
                assert!((900.0..=1100.0).contains(&tree.pos.x));
                assert!((450.0..=550.0).contains(&tree.pos.y));
                assert!(tree.size.y >= 150.0 * 0.9 - 1e-3 && tree.size.y <= 200.0 * 1.1 + 1e-3);
            }
        }
    }

    #[test]
    fn its_own_trees_make_the_nest_optional() {
        // A wave's own trees are always within reach, so nests follow the odds
        let with_nest = (0..500)
            .filter(|&seed| {
                let mut store = EntityStore::new();
                let mut rng = SimRng::new(seed);
                let report = spawn_wave(&mut store, &mut rng, CTX, 1000.0);
                if let Some(id) = report.nest {
                    assert!(report.nest_on_tree);
                    assert!(store.get(EntityKind::Nest, id).is_some());
                }
                report.nest.is_some()
            })
            .count();
        assert!(with_nest > 80 && with_nest < 200, "with_nest = {}", with_nest);
    }

    #[test]
    fn nest_is_guaranteed_without_nearby_trees() {
        for seed in 0..200 {
            let mut store = EntityStore::new();
            let mut rng = SimRng::new(seed);
            let placed = maybe_place_nest(&mut store, &mut rng, CTX, 2000.0, &[]);
            let (id, on_tree) = placed.expect("nest must be placed");
            assert!(!on_tree);

            let nest = store.get(EntityKind::Nest, id).unwrap();
            assert!((1950.0..=2050.0).contains(&nest.pos.x));
            assert!((400.0..=450.0).contains(&nest.pos.y));
        }
    }

    #[test]
    fn nest_sits_above_a_nearby_tree() {
        let sites = [NestSite { x: 500.0, top: 400.0 }];
        for seed in 0..200 {
            let mut store = EntityStore::new();
            let mut rng = SimRng::new(seed);
            let placed = maybe_place_nest(&mut store, &mut rng, CTX, 450.0, &sites);
            if let Some((id, on_tree)) = placed {
                assert!(on_tree);
                let nest = store.get(EntityKind::Nest, id).unwrap();
                assert!((470.0..=530.0).contains(&nest.pos.x));
                assert!((350.0..=390.0).contains(&nest.pos.y));
            }
        }
    }

    #[test]
    fn sites_only_include_trees_near_anchor() {
        let mut store = EntityStore::new();
        for x in [100.0, 240.0, 260.0, 400.0] {
            let id = store.next_entity_id();
            store.insert(Entity::new(
                id,
                EntityKind::Obstacle,
                Vec2::new(x, 500.0),
                Vec2::new(90.0, 160.0),
                1.0,
            ));
        }
        let sites = nest_sites(&store, 250.0);
        let xs: Vec<f32> = sites.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![240.0, 260.0]);
        assert_eq!(sites[0].top, 420.0);
    }

    #[test]
    fn hawks_spawn_ahead_facing_left() {
        let mut found = false;
        for seed in 0..100 {
            let mut store = EntityStore::new();
            let mut rng = SimRng::new(seed);
            let report = spawn_wave(&mut store, &mut rng, CTX, 1000.0);
            if let Some(id) = report.flying_enemy {
                found = true;
                let hawk = store.get(EntityKind::FlyingEnemy, id).unwrap();
                assert!((1100.0..=1200.0).contains(&hawk.pos.x));
                assert_eq!(hawk.facing, Facing::Left);
                assert!(!hawk.flight.unwrap().arc_initialized);
            }
        }
        assert!(found);
    }

    #[test]
    fn watchers_stand_near_the_anchor() {
        let mut watchers = 0;
        for seed in 0..2200 {
            let mut store = EntityStore::new();
            let mut rng = SimRng::new(seed);
            let report = spawn_wave(&mut store, &mut rng, CTX, 1000.0);
            if let Some(id) = report.static_enemy {
                watchers += 1;
                let watcher = store.get(EntityKind::StaticEnemy, id).unwrap();
                assert!((950.0..=1050.0).contains(&watcher.pos.x));
                assert!((350.0..=500.0).contains(&watcher.pos.y));
                assert_eq!(watcher.size, WATCHER_SIZE);
                assert!(watcher.bob.is_none());
            }
        }
        // 3 of 11 outcomes
        assert!((500..700).contains(&watchers), "watchers = {}", watchers);
    }

    #[test]
    fn heal_birds_bob_near_the_anchor() {
        let mut heals = 0;
        for seed in 0..2200 {
            let mut store = EntityStore::new();
            let mut rng = SimRng::new(seed);
            let ctx = WaveContext {
                scroll_factor: 1.0,
                tick: 90,
            };
            let report = spawn_wave(&mut store, &mut rng, ctx, 1000.0);
            if let Some(id) = report.heal {
                heals += 1;
                let heal = store.get(EntityKind::Heal, id).unwrap();
                assert!((950.0..=1050.0).contains(&heal.pos.x));
                assert!((200.0..=400.0).contains(&heal.pos.y));

                let bob = heal.bob.unwrap();
                assert_eq!(bob.base_y, heal.pos.y);
                assert_eq!(bob.amplitude, 50.0);
                assert_eq!(bob.half_period, 60);
                assert_eq!(bob.start_tick, 90);
            }
        }
        // 2 of 11 outcomes
        assert!((320..480).contains(&heals), "heals = {}", heals);
    }

    #[test]
    fn same_seed_same_wave() {
        let run = |seed| {
            let mut store = EntityStore::new();
            let mut rng = SimRng::new(seed);
            let report = spawn_wave(&mut store, &mut rng, CTX, 640.0);
            let positions: Vec<Vec2> = store.iter().map(|e| e.pos).collect();
            (report, positions)
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn initial_landscape_spacing() {
        let config = GameConfig::default();
        let mut store = EntityStore::new();
        let mut rng = SimRng::new(5);
        let reports = spawn_initial_landscape(&mut store, &mut rng, &config, CTX);
        let anchors: Vec<f32> = reports.iter().map(|r| r.anchor).collect();
        assert_eq!(anchors.len(), 10);
        assert_eq!(anchors[0], 800.0);
        assert_eq!(anchors[9], 800.0 + 9.0 * 300.0);
    }

    #[test]
    fn cadence_fires_every_interval_until_cancelled() {
        let config = GameConfig::default();
        let mut spawner = Spawner::new(&config);
        let fired: Vec<u64> = (0..=200).filter(|&t| spawner.poll(t)).collect();
        assert_eq!(fired, vec![60, 120, 180]);

        assert!(spawner.cancel());
        assert!(!spawner.cancel());
        assert!(spawner.is_cancelled());
        assert!(!(200..400).any(|t| spawner.poll(t)));
    }

    #[test]
    fn anchor_advances_by_bounded_gap() {
        let config = GameConfig::default();
        let mut spawner = Spawner::new(&config);
        let mut rng = SimRng::new(11);
        let mut last = spawner.last_anchor;
        for _ in 0..50 {
            let next = spawner.advance_anchor(&mut rng, config.wave_gap);
            assert!((400.0..=800.0).contains(&(next - last)));
            assert_eq!(spawner.last_anchor, next);
            last = next;
        }
    }
}
