//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (per-category insertion order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod lifecycle;
pub mod rng;
pub mod schedule;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CombatOutcome, attacked_from_behind, resolve_collisions, resolve_combat};
pub use entity::{Entity, EntityId, EntityKind, EntityStore, Facing, Look};
pub use rng::SimRng;
pub use schedule::{Action, Schedule};
pub use spawner::{Spawner, WaveReport, spawn_wave};
pub use state::{GameEvent, GamePhase, GameState, Player, TickInput};
pub use tick::{Simulation, tick};
pub use world::{Backdrop, Layer};
