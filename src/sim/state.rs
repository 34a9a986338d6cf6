//! Game state and core simulation types
//!
//! Health, score and nest progress, the win/lose state machine, the player
//! and the events the simulation reports to its host.

use glam::Vec2;

use super::entity::Facing;
use crate::consts::NEST_SCORE;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Nest completed
    Won,
    /// Health ran out
    Lost,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Health, score and progress.
///
/// Health is clamped to `[0, max_health]` after every change. Once the
/// phase is terminal, every mutator is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    health: i32,
    max_health: i32,
    score: u64,
    nests: u32,
    phase: GamePhase,
}

impl GameState {
    pub fn new(max_health: i32) -> Self {
        let max_health = max_health.max(1);
        Self {
            health: max_health,
            max_health,
            score: 0,
            nests: 0,
            phase: GamePhase::Playing,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn nests(&self) -> u32 {
        self.nests
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Add health, capped at the maximum
    pub fn heal(&mut self, amount: i32) {
        self.change_health(amount);
    }

    /// Remove health, floored at zero
    pub fn damage(&mut self, amount: i32) {
        self.change_health(-amount);
    }

    fn change_health(&mut self, delta: i32) {
        if self.is_terminal() {
            return;
        }
        self.health = self.health.saturating_add(delta).clamp(0, self.max_health);
    }

    pub fn add_score(&mut self, points: u64) {
        if self.is_terminal() {
            return;
        }
        self.score = self.score.saturating_add(points);
    }

    /// Bank one nest piece and its score
    pub fn collect_nest(&mut self) {
        if self.is_terminal() {
            return;
        }
        self.nests += 1;
        self.score = self.score.saturating_add(NEST_SCORE);
    }

    /// Run the end-of-tick win/lose check.
    ///
    /// The win check runs first, so a tick that both completes the nest and
    /// empties the health bar is a win. Returns the new phase on a
    /// transition.
    pub fn evaluate(&mut self, required_nests: u32) -> Option<GamePhase> {
        if self.is_terminal() {
            return None;
        }
        if self.nests >= required_nests {
            self.phase = GamePhase::Won;
            return Some(self.phase);
        }
        if self.health <= 0 {
            self.health = 0;
            self.phase = GamePhase::Lost;
            return Some(self.phase);
        }
        None
    }
}

/// Directional input, polled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// The player's bird
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Follows the last horizontal input
    pub facing: Facing,
    /// Damage flash colour while active
    pub tint: Option<u32>,
}

/// Player collision box
pub const PLAYER_SIZE: Vec2 = Vec2::new(80.0, 60.0);

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: PLAYER_SIZE,
            facing: Facing::Right,
            tint: None,
        }
    }

    /// Set velocity and facing from the held directions
    pub fn steer(&mut self, input: &TickInput, speed_x: f32, speed_y: f32) {
        self.vel.y = if input.up {
            -speed_y
        } else if input.down {
            speed_y
        } else {
            0.0
        };

        if input.left {
            self.vel.x = -speed_x;
            self.facing = Facing::Left;
        } else if input.right {
            self.vel.x = speed_x;
            self.facing = Facing::Right;
        } else {
            self.vel.x = 0.0;
        }
    }

    /// Advance by velocity and keep the bird inside the viewport
    pub fn integrate(&mut self, dt: f32, viewport: Vec2) {
        self.pos += self.vel * dt;
        self.clamp_to(viewport);
    }

    /// Knock the bird back along x
    pub fn push_back(&mut self, distance: f32, viewport: Vec2) {
        self.pos.x -= distance;
        self.clamp_to(viewport);
    }

    fn clamp_to(&mut self, viewport: Vec2) {
        let half = self.size / 2.0;
        self.pos = self.pos.clamp(half, (viewport - half).max(half));
    }
}

/// Things that happened during a tick, for audio and visual feedback
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    NestCollected { pos: Vec2 },
    Healed { pos: Vec2, amount: i32 },
    /// Tree or bird watcher contact
    ObstacleHit { damage: i32 },
    EnemyDefeated {
        pos: Vec2,
        from_behind: bool,
        score: u64,
        health_delta: i32,
    },
    CameraShake { duration_ms: u32, intensity: f32 },
    PlayerTint { color: u32 },
    TintCleared,
    Won,
    Lost,
}
