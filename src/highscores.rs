//! High score leaderboard system
//!
//! Persisted as a JSON array under a single storage key, tracks top 5 scores.

use serde::{Deserialize, Serialize};

use crate::platform::{Storage, StorageError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Locale date string when achieved
    pub date: String,
    /// Nest pieces collected during the run
    #[serde(rename = "nestPieces", default)]
    pub nests: u32,
}

/// High score leaderboard, ordered by descending score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "birdGameHighScores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished run.
    ///
    /// The entry is appended, the table re-sorted (stable, so earlier
    /// entries win ties) and cut back to capacity. Returns the 1-indexed
    /// rank, or None if the entry fell off the end.
    pub fn record(&mut self, score: u64, date: String, nests: u32) -> Option<usize> {
        self.entries.push(HighScoreEntry { score, date, nests });
        let new_index = self.entries.len() - 1;

        // Sort indices so the new entry can be found again after sorting.
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[b].score.cmp(&self.entries[a].score));
        let rank = order.iter().position(|&i| i == new_index);

        let mut sorted: Vec<HighScoreEntry> = order
            .into_iter()
            .map(|i| self.entries[i].clone())
            .collect();
        sorted.truncate(MAX_HIGH_SCORES);
        self.entries = sorted;

        rank.filter(|&r| r < MAX_HIGH_SCORES).map(|r| r + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Decode a stored table. Unsorted or oversized input is normalized.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }

    /// Load high scores; missing or corrupt data yields an empty table
    pub fn load(storage: &dyn Storage) -> Self {
        let Some(json) = storage.get(Self::STORAGE_KEY) else {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        };

        match Self::from_json(&json) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("High score table unreadable ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    /// Save high scores as the new canonical table
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
