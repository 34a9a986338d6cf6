//! Player contact resolution
//!
//! The player is tested against every live entity of each gameplay
//! category. Every overlap fires on its own; there is no ordering promise
//! between simultaneous contacts beyond the fixed category order below.

use glam::Vec2;

use super::entity::{EntityId, EntityKind, EntityStore, Facing};
use super::schedule::{Action, Schedule};
use super::state::{GameEvent, GameState, Player};
use super::tick::Simulation;
use crate::consts::*;
use crate::ms_to_ticks;

const DAMAGE_TINT: u32 = 0xFF0000;

/// Ids of the entities of `kind` the player box currently overlaps
pub fn overlapping(store: &EntityStore, kind: EntityKind, pos: Vec2, size: Vec2) -> Vec<EntityId> {
    store
        .of(kind)
        .iter()
        .filter(|e| e.overlaps(pos, size))
        .map(|e| e.id)
        .collect()
}

/// Whether the player struck a hawk from behind.
///
/// A left-facing hawk is hit from behind when the player is strictly to
/// its right; a right-facing one when the player is strictly to its left.
/// Equal x is always a head-on hit.
pub fn attacked_from_behind(enemy_facing: Facing, enemy_x: f32, player_x: f32) -> bool {
    match enemy_facing {
        Facing::Left => player_x > enemy_x,
        Facing::Right => player_x < enemy_x,
    }
}

/// Effect of striking one hawk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatOutcome {
    pub from_behind: bool,
    pub score: u64,
    /// Intended health change before clamping
    pub health_delta: i32,
    /// Whether the player is knocked back
    pub push_back: bool,
}

impl CombatOutcome {
    pub fn for_attack(from_behind: bool) -> Self {
        if from_behind {
            Self {
                from_behind,
                score: AMBUSH_SCORE,
                health_delta: AMBUSH_HEAL,
                push_back: false,
            }
        } else {
            Self {
                from_behind,
                score: FRONTAL_SCORE,
                health_delta: -(FRONTAL_DAMAGE - FRONTAL_RESTORE),
                push_back: true,
            }
        }
    }
}

/// Apply a hawk strike to the game state. The hawk always dies; only the
/// reward and the damage depend on the approach.
pub fn resolve_combat(state: &mut GameState, from_behind: bool) -> CombatOutcome {
    let outcome = CombatOutcome::for_attack(from_behind);
    state.add_score(outcome.score);
    if outcome.health_delta >= 0 {
        state.heal(outcome.health_delta);
    } else {
        state.damage(-outcome.health_delta);
    }
    outcome
}

/// Check the player against every gameplay category and apply the effects
pub fn resolve_collisions(sim: &mut Simulation) {
    let viewport = sim.viewport();
    let now = sim.time_ticks;
    let Simulation {
        entities,
        player,
        state,
        schedule,
        events,
        ..
    } = sim;

    collect_nests(entities, player, state, events);
    collect_heals(entities, player, state, events);
    hit_watchers(entities, player, state, schedule, events, now);
    hit_trees(entities, player, state, schedule, events, viewport, now);
    strike_hawks(entities, player, state, schedule, events, viewport, now);
}

fn collect_nests(
    store: &mut EntityStore,
    player: &Player,
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
) {
    for id in overlapping(store, EntityKind::Nest, player.pos, player.size) {
        if let Some(nest) = store.remove(EntityKind::Nest, id) {
            state.collect_nest();
            events.push(GameEvent::NestCollected { pos: nest.pos });
        }
    }
}

fn collect_heals(
    store: &mut EntityStore,
    player: &Player,
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
) {
    for id in overlapping(store, EntityKind::Heal, player.pos, player.size) {
        if let Some(bird) = store.remove(EntityKind::Heal, id) {
            state.heal(HEAL_AMOUNT);
            state.add_score(HEAL_SCORE);
            events.push(GameEvent::Healed {
                pos: bird.pos,
                amount: HEAL_AMOUNT,
            });
        }
    }
}

fn hit_watchers(
    store: &mut EntityStore,
    player: &mut Player,
    state: &mut GameState,
    schedule: &mut Schedule,
    events: &mut Vec<GameEvent>,
    now: u64,
) {
    for id in overlapping(store, EntityKind::StaticEnemy, player.pos, player.size) {
        if store.remove(EntityKind::StaticEnemy, id).is_some() {
            state.damage(WATCHER_DAMAGE);
            events.push(GameEvent::ObstacleHit {
                damage: WATCHER_DAMAGE,
            });
            flash(player, schedule, events, now, HIT_TINT_MS, 200, 0.01);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn hit_trees(
    store: &mut EntityStore,
    player: &mut Player,
    state: &mut GameState,
    schedule: &mut Schedule,
    events: &mut Vec<GameEvent>,
    viewport: Vec2,
    now: u64,
) {
    // Trees survive contact; each overlapping tree hurts and knocks back.
    for _ in overlapping(store, EntityKind::Obstacle, player.pos, player.size) {
        state.damage(TREE_DAMAGE);
        player.push_back(PUSH_BACK, viewport);
        events.push(GameEvent::ObstacleHit {
            damage: TREE_DAMAGE,
        });
        flash(player, schedule, events, now, HIT_TINT_MS, 100, 0.005);
    }
}

#[allow(clippy::too_many_arguments)]
fn strike_hawks(
    store: &mut EntityStore,
    player: &mut Player,
    state: &mut GameState,
    schedule: &mut Schedule,
    events: &mut Vec<GameEvent>,
    viewport: Vec2,
    now: u64,
) {
    for id in overlapping(store, EntityKind::FlyingEnemy, player.pos, player.size) {
        let Some(hawk) = store.get(EntityKind::FlyingEnemy, id) else {
            continue;
        };
        let (hawk_pos, hawk_facing) = (hawk.pos, hawk.facing);
        let from_behind = attacked_from_behind(hawk_facing, hawk_pos.x, player.pos.x);

        store.retire_flying_enemy(id);
        schedule.after(now, ms_to_ticks(DEFEAT_ANIMATION_MS), Action::RemoveDefeated(id));

        let outcome = resolve_combat(state, from_behind);
        log::debug!(
            "Hawk {} struck {} at x={:.0} (player x={:.0}): +{} score, {:+} health",
            id,
            if from_behind { "from behind" } else { "head-on" },
            hawk_pos.x,
            player.pos.x,
            outcome.score,
            outcome.health_delta
        );
        events.push(GameEvent::EnemyDefeated {
            pos: hawk_pos,
            from_behind,
            score: outcome.score,
            health_delta: outcome.health_delta,
        });

        if outcome.push_back {
            player.push_back(PUSH_BACK, viewport);
            flash(player, schedule, events, now, FRONTAL_TINT_MS, 300, 0.025);
        }
    }
}

/// Red damage flash plus camera shake
fn flash(
    player: &mut Player,
    schedule: &mut Schedule,
    events: &mut Vec<GameEvent>,
    now: u64,
    tint_ms: u32,
    shake_ms: u32,
    intensity: f32,
) {
    player.tint = Some(DAMAGE_TINT);
    schedule.after(now, ms_to_ticks(tint_ms), Action::ClearTint);
    events.push(GameEvent::CameraShake {
        duration_ms: shake_ms,
        intensity,
    });
    events.push(GameEvent::PlayerTint { color: DAMAGE_TINT });
}
