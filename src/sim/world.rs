//! World scroll model
//!
//! One base scroll speed drives everything. Each entity carries the
//! fraction of that speed it moves at, which gives the parallax layers.
//! Hawks additionally fly toward the player once they are on screen.

use super::entity::{EntityKind, EntityStore, Facing, FlightPath, yoyo};
use super::rng::SimRng;
use crate::config::ParallaxConfig;
use crate::consts::{BACKDROP_OVERLAP, DEFEAT_ANIMATION_MS};
use crate::{ease_sine_in_out, ms_to_ticks};

/// Extra leftward speed of a hunting hawk (pixels per tick)
pub const HAWK_CHASE_SPEED: f32 = 2.0;
/// Time for a hawk to swoop to the player's height
pub const HAWK_ARC_MS: u32 = 2000;

/// Depth layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    BackgroundTrees,
    Clouds,
}

impl Layer {
    pub fn of(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Cloud => Layer::Clouds,
            EntityKind::BackgroundTree => Layer::BackgroundTrees,
            _ => Layer::Foreground,
        }
    }

    /// Scroll multiplier in [0, 1]
    pub fn factor(self, parallax: &ParallaxConfig) -> f32 {
        let m = match self {
            Layer::Foreground => parallax.foreground,
            Layer::BackgroundTrees => parallax.background_trees,
            Layer::Clouds => parallax.clouds,
        };
        m.clamp(0.0, 1.0)
    }
}

/// Horizontally tiled background image
#[derive(Debug, Clone)]
pub struct Backdrop {
    /// Left edge of each tile
    pub tiles: Vec<f32>,
    /// Drawn width of one tile
    pub tile_width: f32,
    /// Distance between consecutive tile origins
    pub stride: f32,
}

impl Backdrop {
    /// Two viewport-wide tiles, each widened to overlap its neighbour
    pub fn new(viewport_width: f32) -> Self {
        let stride = viewport_width;
        Self {
            tiles: (0..2).map(|i| i as f32 * stride).collect(),
            tile_width: viewport_width + BACKDROP_OVERLAP,
            stride,
        }
    }

    /// Shift all tiles left; any tile fully past the left edge moves to
    /// just after the current rightmost tile.
    pub fn scroll(&mut self, distance: f32) {
        for x in &mut self.tiles {
            *x -= distance;
        }
        for i in 0..self.tiles.len() {
            if self.tiles[i] + self.tile_width <= 0.0 {
                let rightmost = self.tiles.iter().copied().fold(f32::MIN, f32::max);
                self.tiles[i] = rightmost + self.stride;
            }
        }
    }
}

/// Move every entity left by `speed` times its own scroll factor
pub fn scroll_entities(store: &mut EntityStore, speed: f32) {
    for kind in EntityKind::ALL {
        for entity in store.of_mut(kind).iter_mut() {
            entity.pos.x -= speed * entity.scroll_factor;
        }
    }
    for hawk in store.defeated.iter_mut() {
        hawk.pos.x -= speed * hawk.scroll_factor;
    }
}

/// Apply vertical yoyo motion to every bobbing entity
pub fn animate_bobs(store: &mut EntityStore, tick: u64) {
    for kind in EntityKind::ALL {
        for entity in store.of_mut(kind).iter_mut() {
            if let Some(bob) = entity.bob {
                entity.pos.y = bob.y_at(tick);
            }
        }
    }
}

/// Hawk behaviour: inside the hunting band they speed up and, the first
/// time, lock on to the player's current height.
pub fn fly_hawks(
    store: &mut EntityStore,
    rng: &mut SimRng,
    band: (f32, f32),
    player_y: f32,
    tick: u64,
) {
    let arc_ticks = ms_to_ticks(HAWK_ARC_MS);

    for hawk in store.of_mut(EntityKind::FlyingEnemy).iter_mut() {
        let in_band = hawk.pos.x > band.0 && hawk.pos.x < band.1;
        let flight = hawk.flight.get_or_insert_with(FlightPath::default);

        if in_band {
            hawk.pos.x -= HAWK_CHASE_SPEED;

            if !flight.arc_initialized {
                *flight = FlightPath {
                    arc_initialized: true,
                    origin_y: hawk.pos.y,
                    target_y: player_y,
                    start_tick: tick,
                    wobble_amplitude: rng.between(-30, 30) as f32,
                    wobble_half_period: ms_to_ticks(rng.between(1500, 2500) as u32),
                };
            }

            hawk.facing = Facing::Left;
            let tilt = if hawk.pos.y > flight.origin_y { 0.1 } else { -0.1 };
            hawk.look.angle = (hawk.look.angle + tilt).clamp(-10.0, 10.0);
        }

        if flight.arc_initialized {
            let elapsed = tick.saturating_sub(flight.start_tick);
            hawk.pos.y = if elapsed <= arc_ticks {
                let t = elapsed as f32 / arc_ticks as f32;
                flight.origin_y + (flight.target_y - flight.origin_y) * ease_sine_in_out(t)
            } else {
                flight.target_y
                    + flight.wobble_amplitude * yoyo(elapsed - arc_ticks, flight.wobble_half_period)
            };
        }
    }
}

/// Tumble struck hawks toward upside-down while they fade
pub fn animate_defeated(store: &mut EntityStore) {
    let steps = ms_to_ticks(DEFEAT_ANIMATION_MS) as f32;
    for hawk in store.defeated.iter_mut() {
        hawk.look.angle = (hawk.look.angle + 180.0 / steps).min(180.0);
        hawk.look.scale = (hawk.look.scale - 0.3 / steps).max(0.7);
        hawk.look.alpha = (hawk.look.alpha - 0.3 / steps).max(0.7);
    }
}
