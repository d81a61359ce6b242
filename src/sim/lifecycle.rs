//! Session lifecycle: start, pause, level-up, game over and win
//!
//! ```text
//! Menu -> Running <-> (paused)
//! Running -> LevelUp -> Running
//! Running -> GameOver -> Running (restart)
//! Running -> Win (only when a level cap is set)
//! GameOver | Win | paused -> Menu
//! ```

use super::state::{GameEvent, GamePhase, GameState, Player};
use crate::consts::LEVEL_BANNER_MS;

/// Begin a fresh session, discarding whatever the previous one left behind
///
/// Valid from any phase; this is also the restart path.
pub fn start(state: &mut GameState) {
    reset_session(state);
    state.phase = GamePhase::Running;

    log::info!("Session started (seed {})", state.seed);
}

/// Abandon the session and return to the title screen
///
/// Valid from any phase. The leaderboard is untouched; a finished session's
/// score must be submitted before leaving.
pub fn to_menu(state: &mut GameState) {
    reset_session(state);
    state.phase = GamePhase::Menu;

    log::info!("Back to menu");
}

fn reset_session(state: &mut GameState) {
    state.paused = false;
    state.level = 1;
    state.score = 0;
    state.lives = state.tuning.lives;
    state.kills = 0;
    state.level_kills = 0;
    state.last_fire_ms = 0.0;
    state.last_spawn_ms = 0.0;
    state.frame = 0;
    state.player = Player::default();
    state.projectiles.clear();
    state.enemies.clear();
    state.particles.clear();
    state.events.clear();
}

/// Flip the pause flag while a session is running
///
/// Returns the new pause state. Outside a running session this does nothing.
pub fn toggle_pause(state: &mut GameState) -> bool {
    if !state.phase.is_running() {
        return state.paused;
    }
    state.paused = !state.paused;
    log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
    state.paused
}

/// Advance past a cleared level, or win if it was the last one
pub fn level_up(state: &mut GameState) {
    if state.tuning.max_level.is_some_and(|max| state.level >= max) {
        win(state);
        return;
    }

    state.level += 1;
    state.level_kills = 0;
    // Projectiles and particles carry over; only enemies are cleared
    state.enemies.clear();
    state.phase = GamePhase::LevelUp {
        until_ms: state.now_ms + LEVEL_BANNER_MS,
    };
    state.events.push(GameEvent::LevelUp { level: state.level });

    log::info!(
        "Level {} (score {}, quota {})",
        state.level,
        state.score,
        state.kill_quota()
    );
}

/// Hide the level banner once its time is up
pub fn update_banner(state: &mut GameState) {
    if let GamePhase::LevelUp { until_ms } = state.phase {
        if state.now_ms >= until_ms {
            state.phase = GamePhase::Running;
        }
    }
}

/// Stop the session after the last life is lost
pub fn game_over(state: &mut GameState) {
    if state.phase.is_finished() {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.paused = false;
    state.events.push(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
    log::info!("Game over: score {} on level {}", state.score, state.level);
}

/// Stop the session after clearing the final level
pub fn win(state: &mut GameState) {
    if state.phase.is_finished() {
        return;
    }
    state.phase = GamePhase::Win;
    state.paused = false;
    state.events.push(GameEvent::Win { score: state.score });
    log::info!("Victory! Final score {}", state.score);
}
