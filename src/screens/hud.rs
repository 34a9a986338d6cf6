//! Heads-up display model
//!
//! Plain data; the host decides how to draw it.

use crate::sim::{GamePhase, Simulation};

/// Health bar colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Green,
    Yellow,
    Red,
}

impl HealthBand {
    /// Green above 60, yellow above 30, red otherwise
    pub fn for_health(health: i32) -> Self {
        if health > 60 {
            HealthBand::Green
        } else if health > 30 {
            HealthBand::Yellow
        } else {
            HealthBand::Red
        }
    }

    pub fn css_color(self) -> &'static str {
        match self {
            HealthBand::Green => "#00ff00",
            HealthBand::Yellow => "#ffff00",
            HealthBand::Red => "#ff0000",
        }
    }
}

/// Snapshot of the gameplay overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    /// Health as a fraction of the maximum, in [0, 1]
    pub health_fraction: f32,
    pub health_band: HealthBand,
    pub nest_text: String,
    pub score_text: String,
    /// Banner shown once the run has ended
    pub banner: Option<&'static str>,
}

impl Hud {
    pub fn from_sim(sim: &Simulation) -> Self {
        let state = &sim.state;
        let banner = match state.phase() {
            GamePhase::Playing => None,
            GamePhase::Won => Some("NEST COMPLETE!\nYOU WIN!"),
            GamePhase::Lost => Some("GAME OVER"),
        };
        Self {
            health_fraction: state.health() as f32 / state.max_health() as f32,
            health_band: HealthBand::for_health(state.health()),
            nest_text: format!("Nest Pieces: {}/{}", state.nests(), sim.config.required_nests),
            score_text: format!("Score: {}", state.score()),
            banner,
        }
    }
}
