//! Spawned world objects and their per-category collections

use glam::Vec2;

use crate::ease_sine_in_out;

pub type EntityId = u32;

/// Entity categories. Each category lives in its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Pine tree in the flight path; hurts on contact but survives
    Obstacle,
    /// Nest piece collectible
    Nest,
    /// Songbird that heals when caught
    Heal,
    /// Bird watcher on the ground
    StaticEnemy,
    /// Hawk that arcs toward the player
    FlyingEnemy,
    /// Decorative cloud
    Cloud,
    /// Decorative distant pine
    BackgroundTree,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Obstacle,
        EntityKind::Nest,
        EntityKind::Heal,
        EntityKind::StaticEnemy,
        EntityKind::FlyingEnemy,
        EntityKind::Cloud,
        EntityKind::BackgroundTree,
    ];
}

/// Which way a bird is looking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

/// Cosmetic appearance. Never read by gameplay code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Look {
    pub tint: u32,
    pub scale: f32,
    pub alpha: f32,
    pub depth: f32,
    /// Rotation in degrees
    pub angle: f32,
}

impl Default for Look {
    fn default() -> Self {
        Self {
            tint: 0xFFFFFF,
            scale: 1.0,
            alpha: 1.0,
            depth: 0.0,
            angle: 0.0,
        }
    }
}

/// Endless vertical yoyo around a resting height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bob {
    pub base_y: f32,
    /// Signed displacement at the far end of the swing
    pub amplitude: f32,
    /// Ticks to travel from rest to the far end
    pub half_period: u64,
    pub start_tick: u64,
}

impl Bob {
    /// Height at `tick`
    pub fn y_at(&self, tick: u64) -> f32 {
        self.base_y + self.amplitude * yoyo(tick.saturating_sub(self.start_tick), self.half_period)
    }
}

/// Normalized yoyo progress: eases 0 -> 1 over `half_period`, then back.
pub fn yoyo(elapsed: u64, half_period: u64) -> f32 {
    let half = half_period.max(1);
    let phase = elapsed % (half * 2);
    if phase <= half {
        ease_sine_in_out(phase as f32 / half as f32)
    } else {
        ease_sine_in_out((half * 2 - phase) as f32 / half as f32)
    }
}

/// Hawk flight state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightPath {
    /// Set the first tick the hawk enters the hunting band
    pub arc_initialized: bool,
    /// Height when the arc began
    pub origin_y: f32,
    /// Player height captured when the arc began
    pub target_y: f32,
    pub start_tick: u64,
    /// Oscillation once the target height is reached
    pub wobble_amplitude: f32,
    pub wobble_half_period: u64,
}

/// A spawned world object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Centre of the collision box
    pub pos: Vec2,
    /// Full width and height of the collision box
    pub size: Vec2,
    /// Fraction of the base scroll speed applied each tick
    pub scroll_factor: f32,
    pub facing: Facing,
    pub look: Look,
    pub bob: Option<Bob>,
    pub flight: Option<FlightPath>,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2, scroll_factor: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            scroll_factor,
            facing: Facing::Left,
            look: Look::default(),
            bob: None,
            flight: None,
        }
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn with_bob(mut self, bob: Bob) -> Self {
        self.bob = Some(bob);
        self
    }

    pub fn with_flight(mut self, flight: FlightPath) -> Self {
        self.flight = Some(flight);
        self
    }

    /// Top edge of the collision box
    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    /// Axis-aligned box overlap (touching edges do not count)
    pub fn overlaps(&self, pos: Vec2, size: Vec2) -> bool {
        let delta = (self.pos - pos).abs();
        let reach = (self.size + size) / 2.0;
        delta.x < reach.x && delta.y < reach.y
    }
}

/// All live entities, one collection per category, plus hawks that are
/// playing their defeat animation.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    obstacles: Vec<Entity>,
    nests: Vec<Entity>,
    heals: Vec<Entity>,
    static_enemies: Vec<Entity>,
    flying_enemies: Vec<Entity>,
    clouds: Vec<Entity>,
    background_trees: Vec<Entity>,
    /// Struck hawks; no longer part of any gameplay collection
    pub defeated: Vec<Entity>,
    next_id: EntityId,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn of(&self, kind: EntityKind) -> &[Entity] {
        match kind {
            EntityKind::Obstacle => &self.obstacles,
            EntityKind::Nest => &self.nests,
            EntityKind::Heal => &self.heals,
            EntityKind::StaticEnemy => &self.static_enemies,
            EntityKind::FlyingEnemy => &self.flying_enemies,
            EntityKind::Cloud => &self.clouds,
            EntityKind::BackgroundTree => &self.background_trees,
        }
    }

    pub fn of_mut(&mut self, kind: EntityKind) -> &mut Vec<Entity> {
        match kind {
            EntityKind::Obstacle => &mut self.obstacles,
            EntityKind::Nest => &mut self.nests,
            EntityKind::Heal => &mut self.heals,
            EntityKind::StaticEnemy => &mut self.static_enemies,
            EntityKind::FlyingEnemy => &mut self.flying_enemies,
            EntityKind::Cloud => &mut self.clouds,
            EntityKind::BackgroundTree => &mut self.background_trees,
        }
    }

    /// Add an entity to the collection of its kind
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.of_mut(entity.kind).push(entity);
        id
    }

    /// Take an entity out of its collection
    pub fn remove(&mut self, kind: EntityKind, id: EntityId) -> Option<Entity> {
        let collection = self.of_mut(kind);
        let index = collection.iter().position(|e| e.id == id)?;
        Some(collection.remove(index))
    }

    pub fn get(&self, kind: EntityKind, id: EntityId) -> Option<&Entity> {
        self.of(kind).iter().find(|e| e.id == id)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.of(kind).len()
    }

    /// Move a hawk from the flying-enemy collection into the defeated list
    pub fn retire_flying_enemy(&mut self, id: EntityId) -> bool {
        match self.remove(EntityKind::FlyingEnemy, id) {
            Some(hawk) => {
                self.defeated.push(hawk);
                true
            }
            None => false,
        }
    }

    /// Every live entity, gameplay and decoration
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        EntityKind::ALL
            .into_iter()
            .flat_map(move |kind| self.of(kind).iter())
            .chain(self.defeated.iter())
    }

    pub fn total(&self) -> usize {
        EntityKind::ALL.iter().map(|&k| self.count(k)).sum::<usize>() + self.defeated.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(store: &mut EntityStore, x: f32) -> EntityId {
        let id = store.next_entity_id();
        store.insert(Entity::new(
            id,
            EntityKind::Obstacle,
            Vec2::new(x, 500.0),
            Vec2::new(100.0, 160.0),
            1.0,
        ))
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut store = EntityStore::new();
        let a = tree(&mut store, 0.0);
        let b = tree(&mut store, 10.0);
        assert!(b > a);
    }

    #[test]
    fn insert_routes_by_kind() {
        let mut store = EntityStore::new();
        tree(&mut store, 0.0);
        assert_eq!(store.count(EntityKind::Obstacle), 1);
        assert_eq!(store.count(EntityKind::Nest), 0);
        assert_eq!(store.total(), 1);
    }

    #[test]
    fn remove_drops_only_that_entity() {
        let mut store = EntityStore::new();
        let a = tree(&mut store, 0.0);
        let b = tree(&mut store, 10.0);
        assert!(store.remove(EntityKind::Obstacle, a).is_some());
        assert!(store.remove(EntityKind::Obstacle, a).is_none());
        assert!(store.get(EntityKind::Obstacle, b).is_some());
    }

    #[test]
    fn retired_hawk_leaves_gameplay_collection() {
        let mut store = EntityStore::new();
        let id = store.next_entity_id();
        store.insert(Entity::new(
            id,
            EntityKind::FlyingEnemy,
            Vec2::ZERO,
            Vec2::new(60.0, 45.0),
            1.0,
        ));
        assert!(store.retire_flying_enemy(id));
        assert_eq!(store.count(EntityKind::FlyingEnemy), 0);
        assert_eq!(store.defeated.len(), 1);
        assert!(!store.retire_flying_enemy(id));
    }

    #[test]
    fn overlap_is_strict() {
        let e = Entity::new(1, EntityKind::Nest, Vec2::ZERO, Vec2::new(10.0, 10.0), 1.0);
        assert!(e.overlaps(Vec2::new(9.0, 0.0), Vec2::new(10.0, 10.0)));
        assert!(!e.overlaps(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)));
        assert!(!e.overlaps(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn bob_returns_to_rest() {
        let bob = Bob {
            base_y: 100.0,
            amplitude: 50.0,
            half_period: 60,
            start_tick: 10,
        };
        assert!((bob.y_at(10) - 100.0).abs() < 1e-4);
        assert!((bob.y_at(70) - 150.0).abs() < 1e-4);
        assert!((bob.y_at(130) - 100.0).abs() < 1e-4);
    }
}
