//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::entity::EntityStore;
use super::lifecycle::{populate_decorations, purge_offscreen, replenish_decorations};
use super::rng::SimRng;
use super::schedule::{Action, Schedule};
use super::spawner::{Spawner, WaveContext, spawn_initial_landscape, spawn_wave};
use super::state::{GameEvent, GamePhase, GameState, Player, TickInput};
use super::world::{Backdrop, Layer, animate_bobs, animate_defeated, fly_hawks, scroll_entities};
use crate::config::GameConfig;
use crate::consts::SIM_DT;

const WIN_TINT: u32 = 0xFFD700;
const LOSE_TINT: u32 = 0xFF0000;

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct Simulation {
    pub config: GameConfig,
    pub rng: SimRng,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub state: GameState,
    pub entities: EntityStore,
    pub backdrop: Backdrop,
    pub spawner: Spawner,
    pub schedule: Schedule,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
}

impl Simulation {
    /// Build a fresh run: decorations, then the start-up waves
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let mut entities = EntityStore::new();

        populate_decorations(&mut entities, &mut rng, &config, 0);
        let ctx = WaveContext {
            scroll_factor: Layer::Foreground.factor(&config.parallax),
            tick: 0,
        };
        spawn_initial_landscape(&mut entities, &mut rng, &config, ctx);

        let (px, py) = config.player_start;
        log::info!(
            "New run (seed {}): {} entities, {} nests to collect",
            seed,
            entities.total(),
            config.required_nests
        );

        Self {
            rng,
            time_ticks: 0,
            player: Player::new(Vec2::new(px, py)),
            state: GameState::new(config.max_health),
            entities,
            backdrop: Backdrop::new(config.viewport_width),
            spawner: Spawner::new(&config),
            schedule: Schedule::new(),
            events: Vec::new(),
            config,
        }
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.config.viewport_width, self.config.viewport_height)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    /// Hand accumulated events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn wave_context(&self) -> WaveContext {
        WaveContext {
            scroll_factor: Layer::Foreground.factor(&self.config.parallax),
            tick: self.time_ticks,
        }
    }
}

/// Advance the simulation by one fixed timestep.
///
/// Order: player, world scroll, periodic spawn, delayed actions, contacts,
/// off-screen cleanup, then the win/lose check. Nothing runs once the run
/// has ended.
pub fn tick(sim: &mut Simulation, input: &TickInput) {
    if sim.state.is_terminal() {
        return;
    }

    sim.time_ticks += 1;
    let now = sim.time_ticks;
    let viewport = sim.viewport();

    // Player
    sim.player
        .steer(input, sim.config.player_speed_x, sim.config.player_speed_y);
    sim.player.integrate(SIM_DT, viewport);

    // World scroll
    let speed = sim.config.scroll_speed;
    sim.backdrop
        .scroll(speed * Layer::Foreground.factor(&sim.config.parallax));
    scroll_entities(&mut sim.entities, speed);
    fly_hawks(
        &mut sim.entities,
        &mut sim.rng,
        sim.config.flight_band(),
        sim.player.pos.y,
        now,
    );
    animate_bobs(&mut sim.entities, now);
    animate_defeated(&mut sim.entities);

    // Periodic wave
    if sim.spawner.poll(now) {
        let anchor = sim.spawner.advance_anchor(&mut sim.rng, sim.config.wave_gap);
        let ctx = sim.wave_context();
        spawn_wave(&mut sim.entities, &mut sim.rng, ctx, anchor);
        sim.spawner.waves_spawned += 1;
    }

    // Delayed actions
    for action in sim.schedule.take_due(now) {
        match action {
            Action::RemoveDefeated(id) => sim.entities.defeated.retain(|e| e.id != id),
            Action::ClearTint => {
                if sim.player.tint.take().is_some() {
                    sim.events.push(GameEvent::TintCleared);
                }
            }
        }
    }

    resolve_collisions(sim);

    // Lifecycle
    purge_offscreen(&mut sim.entities, sim.config.offscreen_x);
    replenish_decorations(&mut sim.entities, &mut sim.rng, &sim.config, now);

    // Win / lose
    if let Some(phase) = sim.state.evaluate(sim.config.required_nests) {
        end_run(sim, phase);
    }
}

/// One-time effects of entering a terminal phase
fn end_run(sim: &mut Simulation, phase: GamePhase) {
    if sim.spawner.cancel() {
        log::info!("Spawn timer stopped after {} waves", sim.spawner.waves_spawned);
    }
    sim.player.vel = Vec2::ZERO;

    match phase {
        GamePhase::Won => {
            sim.player.tint = Some(WIN_TINT);
            sim.events.push(GameEvent::Won);
            log::info!(
                "Nest complete! score {} at tick {}",
                sim.state.score(),
                sim.time_ticks
            );
        }
        GamePhase::Lost => {
            sim.player.tint = Some(LOSE_TINT);
            sim.events.push(GameEvent::Lost);
            log::info!(
                "Game over: score {}, {} nests at tick {}",
                sim.state.score(),
                sim.state.nests(),
                sim.time_ticks
            );
        }
        GamePhase::Playing => {}
    }
}
