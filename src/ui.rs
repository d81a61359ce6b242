//! HUD projection
//!
//! Pure read-only views of the session for whatever draws the overlay.

use serde::Serialize;

use crate::format_grouped;
use crate::highscores::Leaderboard;
use crate::sim::{GamePhase, GameState};

/// Values shown in the heads-up display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    /// Score with digit grouping, e.g. `12,300`
    pub score: String,
    pub level: u32,
    /// Kill progress on this level, e.g. `3/10`
    pub kills: String,
    pub lives: u32,
    /// Which overlay screen should be up, if any
    pub overlay: Option<Overlay>,
}

/// Full-screen or banner overlays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Overlay {
    Title,
    Paused,
    LevelBanner { level: u32 },
    GameOver { score: String, level: u32 },
    Win { score: String },
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let overlay = match state.phase {
            GamePhase::Menu => Some(Overlay::Title),
            _ if state.paused => Some(Overlay::Paused),
            GamePhase::LevelUp { .. } => Some(Overlay::LevelBanner { level: state.level }),
            GamePhase::GameOver => Some(Overlay::GameOver {
                score: format_grouped(state.score),
                level: state.level,
            }),
            GamePhase::Win => Some(Overlay::Win {
                score: format_grouped(state.score),
            }),
            GamePhase::Running => None,
        };

        Self {
            score: format_grouped(state.score),
            level: state.level,
            kills: format!("{}/{}", state.level_kills, state.kill_quota()),
            lives: state.lives,
            overlay,
        }
    }
}

/// Leaderboard rows as `(initials, grouped score)`
pub fn leaderboard_rows(board: &Leaderboard) -> Vec<(String, String)> {
    board
        .entries()
        .iter()
        .map(|e| (e.initials.clone(), format_grouped(e.score)))
        .collect()
}
