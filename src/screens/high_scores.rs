//! High-score table screen

use super::{FrameInput, Route, Screen, ScreenCommand, ScreenId, Services, UiCommand};
use crate::audio::SoundEffect;
use crate::highscores::HighScores;

/// Shows the stored top scores and, after a run, the score just achieved
#[derive(Debug, Default)]
pub struct HighScoreScreen {
    last_score: Option<u64>,
    table: HighScores,
}

impl HighScoreScreen {
    pub fn new(last_score: Option<u64>) -> Self {
        Self {
            last_score,
            table: HighScores::new(),
        }
    }

    pub fn last_score(&self) -> Option<u64> {
        self.last_score
    }

    pub fn table(&self) -> &HighScores {
        &self.table
    }

    /// Display rows: rank, score, nest pieces, date
    pub fn rows(&self) -> Vec<String> {
        if self.table.is_empty() {
            return vec!["No high scores yet!\nComplete a game to set a record.".to_string()];
        }
        self.table
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!("{}       {}       {}         {}", i + 1, e.score, e.nests, e.date)
            })
            .collect()
    }
}

impl Screen for HighScoreScreen {
    fn id(&self) -> ScreenId {
        ScreenId::HighScores
    }

    fn initialize(&mut self, services: &mut Services) {
        self.table = HighScores::load(services.storage.as_ref());
    }

    fn tick(&mut self, input: &FrameInput, services: &mut Services) -> ScreenCommand {
        let route = match input.command {
            Some(UiCommand::BackToMenu) => Route::Menu,
            Some(UiCommand::PlayAgain) if self.last_score.is_some() => Route::Gameplay,
            _ => return ScreenCommand::None,
        };
        services.audio.play(SoundEffect::Click);
        ScreenCommand::SwitchTo(route)
    }

    fn teardown(&mut self, _services: &mut Services) {}

    fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .last_score
            .map(|score| format!("Your Score: {}", score))
            .into_iter()
            .collect();
        lines.extend(self.rows());
        lines
    }
}
