//! Entity lifecycle: off-screen removal and decoration top-up

use glam::Vec2;

use super::entity::{Bob, Entity, EntityId, EntityKind, EntityStore, Look};
use super::rng::SimRng;
use super::spawner::PINE_ASPECT;
use super::world::Layer;
use crate::config::GameConfig;
use crate::ms_to_ticks;

/// Cloud sprite height / width
pub const CLOUD_ASPECT: f32 = 0.5;

const CLOUD_TINTS: [u32; 4] = [0xFFFFFF, 0xEEEEFF, 0xFFEEEE, 0xFFFFEE];
const PINE_TINTS: [u32; 7] = [
    0x779977, 0x668866, 0x557755, 0x889988, 0x446644, 0x335533, 0x88AA88,
];

/// Remove every entity left of `threshold`, in every collection.
/// Returns how many were removed.
pub fn purge_offscreen(store: &mut EntityStore, threshold: f32) -> usize {
    let before = store.total();
    for kind in EntityKind::ALL {
        store.of_mut(kind).retain(|e| e.pos.x >= threshold);
    }
    store.defeated.retain(|e| e.pos.x >= threshold);
    before - store.total()
}

/// Bring clouds and distant pines back up to their minimum counts,
/// spawning the new ones just past the right edge.
pub fn replenish_decorations(
    store: &mut EntityStore,
    rng: &mut SimRng,
    config: &GameConfig,
    tick: u64,
) {
    while store.count(EntityKind::Cloud) < config.min_clouds {
        let y = rng.between(30, 300) as f32;
        spawn_cloud(store, rng, config, Vec2::new(config.decoration_spawn_x, y), tick);
    }
    while store.count(EntityKind::BackgroundTree) < config.min_background_trees {
        spawn_background_tree(store, rng, config, config.decoration_spawn_x);
    }
}

/// Scatter the start-up decorations across the first three screens
pub fn populate_decorations(
    store: &mut EntityStore,
    rng: &mut SimRng,
    config: &GameConfig,
    tick: u64,
) {
    let span = (config.viewport_width * 3.0) as i32;
    for _ in 0..config.min_background_trees {
        let x = rng.between(0, span) as f32;
        spawn_background_tree(store, rng, config, x);
    }
    for _ in 0..config.min_clouds {
        let x = rng.between(0, span) as f32;
        let y = rng.between(30, 300) as f32;
        spawn_cloud(store, rng, config, Vec2::new(x, y), tick);
    }
}

/// A drifting cloud of random width and tint
pub fn spawn_cloud(
    store: &mut EntityStore,
    rng: &mut SimRng,
    config: &GameConfig,
    pos: Vec2,
    tick: u64,
) -> EntityId {
    let width = rng.between(200, 350) as f32;
    let tint = CLOUD_TINTS[rng.between(0, 3) as usize];
    let bob = Bob {
        base_y: pos.y,
        amplitude: rng.between(-20, 20) as f32,
        half_period: ms_to_ticks(rng.between(3000, 6000) as u32),
        start_tick: tick,
    };

    let id = store.next_entity_id();
    let factor = Layer::Clouds.factor(&config.parallax);
    store.insert(
        Entity::new(id, EntityKind::Cloud, pos, Vec2::new(width, width * CLOUD_ASPECT), factor)
            .with_look(Look {
                tint,
                alpha: 0.8,
                ..Default::default()
            })
            .with_bob(bob),
    )
}

/// A distant pine standing on the ground line.
/// Smaller, paler pines are drawn further back.
pub fn spawn_background_tree(
    store: &mut EntityStore,
    rng: &mut SimRng,
    config: &GameConfig,
    x: f32,
) -> EntityId {
    let height = rng.between(100, 350) as f32;
    let alpha = rng.float_between(0.4, 0.75);
    let tint = PINE_TINTS[rng.between(0, PINE_TINTS.len() as i32 - 1) as usize];

    let ground = config.viewport_height - 10.0;
    let pos = Vec2::new(x, ground - height / 2.0);
    let scale = height / 100.0;

    let id = store.next_entity_id();
    let factor = Layer::BackgroundTrees.factor(&config.parallax);
    store.insert(
        Entity::new(
            id,
            EntityKind::BackgroundTree,
            pos,
            Vec2::new(height * PINE_ASPECT, height),
            factor,
        )
        .with_look(Look {
            tint,
            scale,
            alpha,
            depth: alpha * scale * 10.0,
            angle: 0.0,
        }),
    )
}
