//! Golden Eagle - a side-scrolling bird-of-prey arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, spawning, combat, game state)
//! - `screens`: Menu / gameplay / high-score screens and the router between them
//! - `platform`: Storage and clock seams (LocalStorage on web, in-memory elsewhere)
//! - `audio`: Sound effect triggers and the Web Audio synthesizer
//! - `config`: Data-driven game tuning

pub mod audio;
pub mod config;
pub mod highscores;
pub mod platform;
pub mod screens;
pub mod sim;

pub use config::GameConfig;
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Nest piece pickup
    pub const NEST_SCORE: u64 = 100;
    /// Heal bird pickup
    pub const HEAL_AMOUNT: i32 = 20;
    pub const HEAL_SCORE: u64 = 50;
    /// Bird watcher contact
    pub const WATCHER_DAMAGE: i32 = 15;
    /// Tree contact
    pub const TREE_DAMAGE: i32 = 10;
    /// Horizontal knock-back after a tree or frontal hawk hit
    pub const PUSH_BACK: f32 = 30.0;

    /// Hawk struck from behind
    pub const AMBUSH_SCORE: u64 = 200;
    pub const AMBUSH_HEAL: i32 = 10;
    /// Hawk struck head-on: damage taken, minus a small restoration
    pub const FRONTAL_DAMAGE: i32 = 35;
    pub const FRONTAL_RESTORE: i32 = 5;
    pub const FRONTAL_SCORE: u64 = 50;

    /// How long a defeated hawk lingers for its fall animation
    pub const DEFEAT_ANIMATION_MS: u32 = 300;
    /// Red flash after taking a normal hit
    pub const HIT_TINT_MS: u32 = 200;
    /// Red flash after a frontal hawk hit
    pub const FRONTAL_TINT_MS: u32 = 350;

    /// Background tiles overlap by this many pixels to hide seams
    pub const BACKDROP_OVERLAP: f32 = 4.0;
}

/// Convert a duration in milliseconds to whole simulation ticks (rounded up)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    let ticks = (ms as u64 * consts::TICKS_PER_SECOND as u64).div_ceil(1000);
    ticks.max(1)
}

/// Sine ease-in-out on t in [0, 1]
#[inline]
pub fn ease_sine_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    -((std::f32::consts::PI * t).cos() - 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ms_to_ticks_rounds_up() {
        assert_eq!(ms_to_ticks(1000), 60);
        assert_eq!(ms_to_ticks(300), 18);
        assert_eq!(ms_to_ticks(10), 1);
        assert_eq!(ms_to_ticks(0), 1);
    }

    #[test]
    fn ease_endpoints() {
        assert!(ease_sine_in_out(0.0).abs() < 1e-6);
        assert!((ease_sine_in_out(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_sine_in_out(0.5) - 0.5).abs() < 1e-6);
    }
}
