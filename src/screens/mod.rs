//! Screens and the router between them
//!
//! Menu, gameplay and the high-score table each implement [`Screen`]. The
//! [`App`] owns the current screen plus the platform services, forwards
//! one [`FrameInput`] per fixed tick and performs the switch whenever a
//! screen asks for one: the old screen is torn down before the new one is
//! initialized.

mod gameplay;
mod high_scores;
mod hud;
mod menu;

pub use gameplay::GameplayScreen;
pub use high_scores::HighScoreScreen;
pub use hud::{HealthBand, Hud};
pub use menu::MenuScreen;

use crate::audio::AudioSink;
use crate::config::GameConfig;
use crate::platform::{Clock, Storage};
use crate::sim::TickInput;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Menu,
    Gameplay,
    HighScores,
}

/// Button presses (or their keyboard shortcuts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    StartGame,
    ShowHighScores,
    BackToMenu,
    PlayAgain,
    Restart,
}

/// Everything a screen sees in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub directions: TickInput,
    /// One-shot command, cleared by the host after the tick
    pub command: Option<UiCommand>,
}

impl FrameInput {
    pub fn command(command: UiCommand) -> Self {
        Self {
            command: Some(command),
            ..Default::default()
        }
    }
}

/// Where to go next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Menu,
    Gameplay,
    /// `last_score` is the run that just ended, if any
    HighScores { last_score: Option<u64> },
}

impl Route {
    pub fn id(self) -> ScreenId {
        match self {
            Route::Menu => ScreenId::Menu,
            Route::Gameplay => ScreenId::Gameplay,
            Route::HighScores { .. } => ScreenId::HighScores,
        }
    }
}

/// Result of a screen tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    None,
    SwitchTo(Route),
}

/// Platform collaborators shared by every screen
pub struct Services {
    pub storage: Box<dyn Storage>,
    pub audio: Box<dyn AudioSink>,
    pub clock: Box<dyn Clock>,
}

/// One screen of the game
pub trait Screen {
    fn id(&self) -> ScreenId;

    /// Called when the screen becomes current
    fn initialize(&mut self, services: &mut Services);

    fn tick(&mut self, input: &FrameInput, services: &mut Services) -> ScreenCommand;

    /// Called just before another screen replaces this one
    fn teardown(&mut self, services: &mut Services);

    /// HUD snapshot, for screens that have one
    fn hud(&self) -> Option<&Hud> {
        None
    }

    /// Text lines the screen displays besides its buttons
    fn lines(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Screen router
pub struct App {
    config: GameConfig,
    services: Services,
    screen: Box<dyn Screen>,
    /// Seed for the next run; bumped on every new game
    next_seed: u64,
    switches: u32,
}

impl App {
    /// Start on the menu
    pub fn new(config: GameConfig, services: Services, seed: u64) -> Self {
        let mut app = Self {
            config,
            services,
            screen: Box::new(MenuScreen::new()),
            next_seed: seed,
            switches: 0,
        };
        app.screen.initialize(&mut app.services);
        app
    }

    pub fn current(&self) -> ScreenId {
        self.screen.id()
    }

    pub fn screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn hud(&self) -> Option<&Hud> {
        self.screen.hud()
    }

    /// Number of screen switches so far
    pub fn switches(&self) -> u32 {
        self.switches
    }

    /// Run one fixed tick of the current screen
    pub fn tick(&mut self, input: &FrameInput) {
        if let ScreenCommand::SwitchTo(route) = self.screen.tick(input, &mut self.services) {
            self.switch_to(route);
        }
    }

    fn switch_to(&mut self, route: Route) {
        log::info!("Screen {:?} -> {:?}", self.screen.id(), route.id());
        self.screen.teardown(&mut self.services);
        self.screen = self.build(route);
        self.screen.initialize(&mut self.services);
        self.switches += 1;
    }

    fn build(&mut self, route: Route) -> Box<dyn Screen> {
        match route {
            Route::Menu => Box::new(MenuScreen::new()),
            Route::Gameplay => {
                let seed = self.next_seed;
                self.next_seed = self.next_seed.wrapping_add(1);
                Box::new(GameplayScreen::new(self.config.clone(), seed))
            }
            Route::HighScores { last_score } => Box::new(HighScoreScreen::new(last_score)),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::highscores::HighScores;
    use crate::platform::{FixedClock, MemoryStorage, StorageError};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Audio sink whose log outlives the boxed service
    #[derive(Clone, Default)]
    pub struct SharedAudio(pub Rc<RefCell<Vec<SoundEffect>>>);

    impl AudioSink for SharedAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.0.borrow_mut().push(effect);
        }
    }

    /// Storage whose contents outlive the boxed service
    #[derive(Clone, Default)]
    pub struct SharedStorage(pub Rc<RefCell<HashMap<String, String>>>);

    impl Storage for SharedStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    pub fn services(storage: SharedStorage, audio: SharedAudio) -> Services {
        Services {
            storage: Box::new(storage),
            audio: Box::new(audio),
            clock: Box::new(FixedClock("1/2/2025".to_string())),
        }
    }

    /// A config whose run is won on the first tick
    pub fn instant_win_config() -> GameConfig {
        GameConfig {
            required_nests: 0,
            initial_waves: 0,
            ..Default::default()
        }
    }

    fn app(config: GameConfig) -> (App, SharedStorage, SharedAudio) {
        let storage = SharedStorage::default();
        let audio = SharedAudio::default();
        let app = App::new(config, services(storage.clone(), audio.clone()), 42);
        (app, storage, audio)
    }

    #[test]
    fn starts_on_menu() {
        let (app, _, _) = app(GameConfig::default());
        assert_eq!(app.current(), ScreenId::Menu);
        assert!(app.hud().is_none());
    }

    #[test]
    fn menu_routes() {
        let (mut app, _, audio) = app(GameConfig::default());
        app.tick(&FrameInput::command(UiCommand::ShowHighScores));
        assert_eq!(app.current(), ScreenId::HighScores);

        app.tick(&FrameInput::command(UiCommand::BackToMenu));
        assert_eq!(app.current(), ScreenId::Menu);

        app.tick(&FrameInput::command(UiCommand::StartGame));
        assert_eq!(app.current(), ScreenId::Gameplay);
        assert!(app.hud().is_some());
        assert_eq!(app.switches(), 3);
        assert_eq!(audio.0.borrow().as_slice(), &[SoundEffect::Click; 3]);
    }

    #[test]
    fn full_round_trip_through_game_over() {
        let (mut app, storage, audio) = app(instant_win_config());
        app.tick(&FrameInput::command(UiCommand::StartGame));
        assert_eq!(app.current(), ScreenId::Gameplay);

        // Zero required nests: the first tick wins
        app.tick(&FrameInput::default());
        assert!(audio.0.borrow().contains(&SoundEffect::Win));
        let table = HighScores::load(&storage);
        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.entries[0].date, "1/2/2025");

        app.tick(&FrameInput::command(UiCommand::Restart));
        assert_eq!(app.current(), ScreenId::HighScores);

        app.tick(&FrameInput::command(UiCommand::PlayAgain));
        assert_eq!(app.current(), ScreenId::Gameplay);
    }

    #[test]
    fn play_again_needs_a_last_score() {
        let (mut app, _, _) = app(GameConfig::default());
        app.tick(&FrameInput::command(UiCommand::ShowHighScores));
        app.tick(&FrameInput::command(UiCommand::PlayAgain));
        assert_eq!(app.current(), ScreenId::HighScores);
    }

    #[test]
    fn storage_seam_accepts_memory_storage() {
        let services = Services {
            storage: Box::new(MemoryStorage::new()),
            audio: Box::new(crate::audio::MuteAudio),
            clock: Box::new(FixedClock::default()),
        };
        let app = App::new(GameConfig::default(), services, 1);
        assert!(app.services().storage.get(HighScores::STORAGE_KEY).is_none());
    }
}
