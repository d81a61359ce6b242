//! Neon Blaster - A single-screen neon arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, scoring, level flow)
//! - `game`: Frame host tying simulation, input, audio and leaderboard together
//! - `platform`: Browser/native platform abstraction (input, storage, time)
//! - `persistence`: Key-value storage for leaderboard and settings
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{Error, Result};
pub use game::Game;
pub use highscores::Leaderboard;
pub use settings::Settings;
pub use tuning::{QuotaPolicy, Tuning};

/// Game configuration constants
///
/// Fixed geometry only. Balance values that designers tweak live in [`Tuning`].
pub mod consts {
    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Distance of the ship centre above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;
    /// Invincibility after a hit (2 seconds at 60 Hz)
    pub const INVINCIBILITY_FRAMES: u32 = 120;
    /// Overlap allowed between ship and enemy before a hit registers
    pub const PLAYER_HIT_ALLOWANCE: f32 = 10.0;

    /// Projectiles (fired in pairs either side of the centreline)
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 20.0;
    pub const PROJECTILE_OFFSET: f32 = 15.0;

    /// Enemy size range
    pub const ENEMY_MIN_SIZE: f32 = 60.0;
    pub const ENEMY_MAX_SIZE: f32 = 90.0;
    /// Level after which enemy speed stops increasing
    pub const ENEMY_SPEED_LEVEL_CAP: u32 = 5;
    /// Spawn interval shrinks by this much per level (ms)
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 100.0;

    /// Explosions
    pub const EXPLOSION_PARTICLES: usize = 30;
    pub const EXPLOSION_PARTICLES_SMALL: usize = 15;
    pub const PARTICLE_SHRINK: f32 = 0.95;
    pub const PARTICLE_MIN_SIZE: f32 = 0.5;

    /// Background starfield
    pub const STAR_COUNT: usize = 100;

    /// Level-up banner duration (ms)
    pub const LEVEL_BANNER_MS: f64 = 2000.0;

    /// Leaderboard size
    pub const LEADERBOARD_SIZE: usize = 5;
}

/// Format an integer with comma digit grouping (`12345` -> `"12,345"`)
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
