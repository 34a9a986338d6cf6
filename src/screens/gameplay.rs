//! The running game

use super::{FrameInput, Hud, Route, Screen, ScreenCommand, ScreenId, Services, UiCommand};
use crate::audio::{SoundEffect, sound_for};
use crate::config::GameConfig;
use crate::highscores::HighScores;
use crate::sim::{GameEvent, Simulation, tick};

pub const COMBAT_TIP: &str =
    "Tip: Defeat hawks from behind (right side) for bonus points and health restoration!";

/// Owns one [`Simulation`] from `initialize` to `teardown`
pub struct GameplayScreen {
    config: GameConfig,
    seed: u64,
    sim: Option<Simulation>,
    hud: Option<Hud>,
    /// Events from the latest tick, kept for the renderer
    recent_events: Vec<GameEvent>,
    /// Rank achieved by the finished run; None until saved or if unranked
    rank: Option<usize>,
    score_saved: bool,
}

impl GameplayScreen {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            sim: None,
            hud: None,
            recent_events: Vec::new(),
            rank: None,
            score_saved: false,
        }
    }

    pub fn sim(&self) -> Option<&Simulation> {
        self.sim.as_ref()
    }

    pub fn recent_events(&self) -> &[GameEvent] {
        &self.recent_events
    }

    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    /// Append the finished run to the stored table, exactly once
    fn save_score(&mut self, services: &mut Services) {
        let Some(sim) = &self.sim else { return };
        if self.score_saved {
            return;
        }
        self.score_saved = true;

        let mut table = HighScores::load(services.storage.as_ref());
        self.rank = table.record(
            sim.state.score(),
            services.clock.date_label(),
            sim.state.nests(),
        );
        match self.rank {
            Some(rank) => log::info!("New high score #{}: {}", rank, sim.state.score()),
            None => log::info!("Score {} did not make the table", sim.state.score()),
        }
        if let Err(e) = table.save(services.storage.as_mut()) {
            log::warn!("Failed to save high scores: {}", e);
        }
    }
}

impl Screen for GameplayScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Gameplay
    }

    fn initialize(&mut self, _services: &mut Services) {
        let sim = Simulation::new(self.config.clone(), self.seed);
        self.hud = Some(Hud::from_sim(&sim));
        self.sim = Some(sim);
        self.recent_events.clear();
        self.rank = None;
        self.score_saved = false;
    }

    fn tick(&mut self, input: &FrameInput, services: &mut Services) -> ScreenCommand {
        let Some(sim) = self.sim.as_mut() else {
            return ScreenCommand::None;
        };

        if sim.state.is_terminal() {
            // Only the restart button is live once the run is over
            if input.command == Some(UiCommand::Restart) {
                services.audio.play(SoundEffect::Click);
                return ScreenCommand::SwitchTo(Route::HighScores {
                    last_score: Some(sim.state.score()),
                });
            }
            return ScreenCommand::None;
        }

        tick(sim, &input.directions);
        self.recent_events = sim.drain_events();
        for effect in self.recent_events.iter().filter_map(sound_for) {
            services.audio.play(effect);
        }

        self.hud = Some(Hud::from_sim(sim));
        if sim.state.is_terminal() {
            self.save_score(services);
        }
        ScreenCommand::None
    }

    fn teardown(&mut self, _services: &mut Services) {
        if let Some(sim) = self.sim.take() {
            log::debug!(
                "Leaving run (seed {}) after {} ticks",
                sim.rng.seed(),
                sim.time_ticks
            );
        }
        self.recent_events.clear();
    }

    fn hud(&self) -> Option<&Hud> {
        self.hud.as_ref()
    }

    fn lines(&self) -> Vec<String> {
        vec![COMBAT_TIP.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::tests::{SharedAudio, SharedStorage, instant_win_config, services};
    use crate::sim::GamePhase;

    fn quick_loss_config() -> GameConfig {
        GameConfig {
            max_health: 1,
            initial_waves: 0,
            ..Default::default()
        }
    }

    #[test]
    fn restart_is_ignored_while_playing() {
        let mut services = services(SharedStorage::default(), SharedAudio::default());
        let mut screen = GameplayScreen::new(GameConfig::default(), 1);
        screen.initialize(&mut services);
        let command = screen.tick(&FrameInput::command(UiCommand::Restart), &mut services);
        assert_eq!(command, ScreenCommand::None);
        assert_eq!(screen.sim().map(|s| s.time_ticks), Some(1));
    }

    #[test]
    fn win_saves_once_and_plays_sound() {
        let storage = SharedStorage::default();
        let audio = SharedAudio::default();
        let mut services = services(storage.clone(), audio.clone());
        let mut screen = GameplayScreen::new(instant_win_config(), 1);
        screen.initialize(&mut services);

        for _ in 0..10 {
            screen.tick(&FrameInput::default(), &mut services);
        }
        assert_eq!(screen.sim().map(|s| s.phase()), Some(GamePhase::Won));
        assert_eq!(screen.rank(), Some(1));
        assert_eq!(HighScores::load(&storage).entries.len(), 1);
        let wins = audio.0.borrow().iter().filter(|e| **e == SoundEffect::Win).count();
        assert_eq!(wins, 1);
        assert_eq!(
            screen.hud().and_then(|h| h.banner),
            Some("NEST COMPLETE!\nYOU WIN!")
        );
    }

    #[test]
    fn restart_after_loss_carries_the_score() {
        let mut services = services(SharedStorage::default(), SharedAudio::default());
        let mut screen = GameplayScreen::new(quick_loss_config(), 1);
        screen.initialize(&mut services);
        if let Some(sim) = screen.sim.as_mut() {
            sim.state.damage(1);
        }

        screen.tick(&FrameInput::default(), &mut services);
        assert!(screen.recent_events().contains(&GameEvent::Lost));
        assert_eq!(
            screen.tick(&FrameInput::command(UiCommand::Restart), &mut services),
            ScreenCommand::SwitchTo(Route::HighScores { last_score: Some(0) })
        );
    }

    #[test]
    fn shows_the_combat_tip() {
        let screen = GameplayScreen::new(GameConfig::default(), 1);
        let lines = screen.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("from behind"));
    }

    #[test]
    fn teardown_drops_the_run() {
        let mut services = services(SharedStorage::default(), SharedAudio::default());
        let mut screen = GameplayScreen::new(GameConfig::default(), 1);
        screen.initialize(&mut services);
        screen.teardown(&mut services);
        assert!(screen.sim().is_none());
        assert_eq!(screen.tick(&FrameInput::default(), &mut services), ScreenCommand::None);
    }
}
