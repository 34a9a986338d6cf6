//! Game tuning
//!
//! Everything the simulation constructor needs that used to live on the
//! scene object. Persisted (optionally) in the same key-value store as the
//! high scores.

use serde::{Deserialize, Serialize};

use crate::platform::{Storage, StorageError};

/// Horizontal scroll-speed fractions per depth layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Gameplay entities (trees, pickups, enemies) and the background image
    pub foreground: f32,
    /// Distant decorative pines
    pub background_trees: f32,
    /// Clouds
    pub clouds: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            foreground: 1.0,
            background_trees: 0.7,
            clouds: 0.5,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === World ===
    /// Base scroll speed in pixels per tick
    pub scroll_speed: f32,
    pub parallax: ParallaxConfig,
    /// Entities left of this x are removed
    pub offscreen_x: f32,

    // === Player ===
    pub player_start: (f32, f32),
    /// Horizontal flying speed (pixels/second)
    pub player_speed_x: f32,
    /// Vertical flying speed (pixels/second)
    pub player_speed_y: f32,

    // === Rules ===
    pub max_health: i32,
    pub required_nests: u32,

    // === Spawning ===
    /// Waves placed before the first tick
    pub initial_waves: u32,
    /// Anchor of the first initial wave
    pub initial_wave_start: f32,
    /// Spacing between initial waves
    pub initial_wave_spacing: f32,
    /// Real-time delay between periodic waves (milliseconds)
    pub spawn_interval_ms: u32,
    /// Random gap added to the previous anchor for each periodic wave
    pub wave_gap: (i32, i32),

    // === Decoration ===
    pub min_clouds: usize,
    pub min_background_trees: usize,
    /// Replenished decorations appear at this x
    pub decoration_spawn_x: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,

            scroll_speed: 3.0,
            parallax: ParallaxConfig::default(),
            offscreen_x: -100.0,

            player_start: (200.0, 300.0),
            player_speed_x: 150.0,
            player_speed_y: 200.0,

            max_health: 100,
            required_nests: 12,

            initial_waves: 10,
            initial_wave_start: 800.0,
            initial_wave_spacing: 300.0,
            spawn_interval_ms: 1000,
            wave_gap: (400, 800),

            min_clouds: 12,
            min_background_trees: 20,
            decoration_spawn_x: 900.0,
        }
    }
}

impl GameConfig {
    /// Storage key
    const STORAGE_KEY: &'static str = "golden_eagle_config";

    /// Horizontal band (exclusive) in which flying enemies actively hunt
    pub fn flight_band(&self) -> (f32, f32) {
        (-50.0, self.viewport_width + 50.0)
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load config from storage, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        if let Some(json) = storage.get(Self::STORAGE_KEY) {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from storage");
                    return config;
                }
                Err(e) => log::warn!("Ignoring corrupt game config: {}", e),
            }
        }

        log::info!("Using default game config");
        Self::default()
    }

    /// Save config to storage
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set(Self::STORAGE_KEY, &json)?;
        log::info!("Game config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[test]
    fn defaults_match_original_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.viewport_width, 800.0);
        assert_eq!(config.viewport_height, 600.0);
        assert_eq!(config.max_health, 100);
        assert_eq!(config.required_nests, 12);
        assert_eq!(config.spawn_interval_ms, 1000);
        assert_eq!(config.wave_gap, (400, 800));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{"required_nests": 3, "scroll_speed": 5.0}"#)
            .expect("valid json");
        assert_eq!(config.required_nests, 3);
        assert_eq!(config.scroll_speed, 5.0);
        assert_eq!(config.max_health, 100);
        assert_eq!(config.parallax, ParallaxConfig::default());
    }

    #[test]
    fn load_round_trips_through_storage() {
        let mut storage = MemoryStorage::new();
        let config = GameConfig {
            min_clouds: 4,
            ..Default::default()
        };
        config.save(&mut storage).expect("memory storage never fails");
        assert_eq!(GameConfig::load(&storage), config);
    }

    #[test]
    fn corrupt_config_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage
            .set(GameConfig::STORAGE_KEY, "{not json")
            .expect("memory storage never fails");
        assert_eq!(GameConfig::load(&storage), GameConfig::default());
    }
}
