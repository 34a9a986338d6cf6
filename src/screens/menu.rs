//! Title menu

use super::{FrameInput, Route, Screen, ScreenCommand, ScreenId, Services, UiCommand};
use crate::audio::SoundEffect;

pub const TITLE: &str = "BIRD NEST ADVENTURE";
pub const INSTRUCTIONS: &str = "Use arrow keys to fly and collect nest pieces";

/// "Start Game" and "High Scores" buttons
#[derive(Debug, Default)]
pub struct MenuScreen;

impl MenuScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for MenuScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Menu
    }

    fn initialize(&mut self, _services: &mut Services) {}

    fn tick(&mut self, input: &FrameInput, services: &mut Services) -> ScreenCommand {
        let route = match input.command {
            Some(UiCommand::StartGame) => Route::Gameplay,
            Some(UiCommand::ShowHighScores) => Route::HighScores { last_score: None },
            _ => return ScreenCommand::None,
        };
        services.audio.play(SoundEffect::Click);
        ScreenCommand::SwitchTo(route)
    }

    fn teardown(&mut self, _services: &mut Services) {}

    fn lines(&self) -> Vec<String> {
        vec![TITLE.to_string(), INSTRUCTIONS.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::tests::{SharedAudio, SharedStorage, services};

    #[test]
    fn ignores_unrelated_commands() {
        let mut services = services(SharedStorage::default(), SharedAudio::default());
        let mut menu = MenuScreen::new();
        for command in [UiCommand::BackToMenu, UiCommand::PlayAgain, UiCommand::Restart] {
            assert_eq!(
                menu.tick(&FrameInput::command(command), &mut services),
                ScreenCommand::None
            );
        }
        assert_eq!(menu.tick(&FrameInput::default(), &mut services), ScreenCommand::None);
    }

    #[test]
    fn shows_title_and_controls() {
        let lines = MenuScreen::new().lines();
        assert_eq!(lines[0], "BIRD NEST ADVENTURE");
        assert!(lines[1].contains("arrow keys"));
    }

    #[test]
    fn high_scores_from_menu_have_no_last_score() {
        let mut services = services(SharedStorage::default(), SharedAudio::default());
        let mut menu = MenuScreen::new();
        assert_eq!(
            menu.tick(&FrameInput::command(UiCommand::ShowHighScores), &mut services),
            ScreenCommand::SwitchTo(Route::HighScores { last_score: None })
        );
    }
}
