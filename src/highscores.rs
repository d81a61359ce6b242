//! High score leaderboard
//!
//! Always exactly five entries, best first, padded with `---` placeholders.
//! Persisted as JSON through a [`KvStore`].

use serde::{Deserialize, Serialize};

use crate::consts::LEADERBOARD_SIZE;
use crate::persistence::KvStore;

/// Initials shown for empty slots
pub const PLACEHOLDER_INITIALS: &str = "---";

/// Initials used when the player leaves the field blank
pub const DEFAULT_INITIALS: &str = "UNK";

/// Maximum initials length
pub const MAX_INITIALS: usize = 3;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Up to three uppercase characters
    #[serde(alias = "name")]
    pub initials: String,
    pub score: u64,
}

impl LeaderboardEntry {
    fn placeholder() -> Self {
        Self {
            initials: PLACEHOLDER_INITIALS.to_string(),
            score: 0,
        }
    }
}

/// Normalize raw player input into leaderboard initials
pub fn normalize_initials(raw: &str) -> String {
    let initials: String = raw
        .trim()
        .chars()
        .flat_map(char::to_uppercase)
        .take(MAX_INITIALS)
        .collect();
    if initials.is_empty() {
        DEFAULT_INITIALS.to_string()
    } else {
        initials
    }
}

/// Top-five leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self {
            entries: vec![LeaderboardEntry::placeholder(); LEADERBOARD_SIZE],
        }
    }
}

impl Leaderboard {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neonShooter_highScores";

    /// Build a table from arbitrary entries: initials normalized, sorted,
    /// padded and truncated to five
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        for entry in &mut entries {
            entry.initials = normalize_initials(&entry.initials);
        }
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(LEADERBOARD_SIZE);
        entries.resize(LEADERBOARD_SIZE, LeaderboardEntry::placeholder());
        Self { entries }
    }

    /// Load from the store, writing defaults if nothing usable is stored
    pub fn load(store: &mut impl KvStore) -> Self {
        if let Some(json) = store.read(Self::STORAGE_KEY) {
            match serde_json::from_str::<Vec<LeaderboardEntry>>(&json) {
                Ok(entries) => {
                    log::info!("Loaded {} high scores", entries.len());
                    return Self::from_entries(entries);
                }
                Err(e) => log::warn!("Discarding malformed high scores: {}", e),
            }
        }

        log::info!("No high scores found, starting fresh");
        let board = Self::default();
        board.save(store);
        board
    }

    /// Persist to the store (failures are logged, not fatal)
    pub fn save(&self, store: &mut impl KvStore) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize high scores: {}", e);
                return;
            }
        };
        match store.write(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("High scores saved"),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }

    /// Entries, best first
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Score currently in last place
    pub fn lowest_score(&self) -> u64 {
        self.entries.last().map(|e| e.score).unwrap_or(0)
    }

    /// Get the top score
    pub fn top_score(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// Check if a score beats the current 5th place
    pub fn is_high_score(&self, score: u64) -> bool {
        score > self.lowest_score()
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.is_high_score(score) {
            return None;
        }
        self.entries.iter().position(|e| score > e.score).map(|i| i + 1)
    }

    /// Insert a score, keep the best five and persist
    ///
    /// Returns the rank achieved (1-indexed), or None if the score fell off the
    /// table. Ties keep the older entry ahead.
    pub fn submit(&mut self, store: &mut impl KvStore, initials: &str, score: u64) -> Option<usize> {
        let entry = LeaderboardEntry {
            initials: normalize_initials(initials),
            score,
        };
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(LEADERBOARD_SIZE);
        self.save(store);

        (pos < LEADERBOARD_SIZE).then_some(pos + 1)
    }
}
