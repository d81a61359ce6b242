//! Game state and core simulation types
//!
//! Entities are plain data; behaviour lives in `tick`, `spawn`, `collision`
//! and `lifecycle`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no session running
    Menu,
    /// Active gameplay
    Running,
    /// Active gameplay with the level banner showing until `until_ms`
    LevelUp { until_ms: f64 },
    /// Run ended by losing the last life
    GameOver,
    /// Run ended by clearing the final level
    Win,
}

impl GamePhase {
    /// Gameplay advances in this phase (when not paused)
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running | GamePhase::LevelUp { .. })
    }

    /// Session has ended
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Notifications raised during a tick, drained by the host afterwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A volley was fired
    Fire,
    /// A projectile destroyed an enemy
    EnemyDestroyed { pos: Vec2, points: u64 },
    /// An enemy rammed the player
    PlayerHit { lives_left: u32 },
    /// Advanced to a new level
    LevelUp { level: u32 },
    /// Last life lost
    GameOver { score: u64, level: u32 },
    /// Final level cleared
    Win { score: u64 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Centre position
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub invincible: bool,
    /// Frames of invincibility remaining
    pub invincible_frames: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT - PLAYER_BOTTOM_OFFSET),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            invincible: false,
            invincible_frames: 0,
        }
    }
}

impl Player {
    /// Smallest legal x
    #[inline]
    pub fn min_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Largest legal x
    #[inline]
    pub fn max_x(&self) -> f32 {
        CANVAS_WIDTH - self.width / 2.0
    }

    /// Move horizontally by `dx`, staying on screen
    pub fn shift(&mut self, dx: f32) {
        self.pos.x = (self.pos.x + dx).clamp(self.min_x(), self.max_x());
    }

    /// Start the post-hit invincibility window
    pub fn grant_invincibility(&mut self, frames: u32) {
        self.invincible = frames > 0;
        self.invincible_frames = frames;
    }

    /// Count down the invincibility window by one frame
    pub fn tick_invincibility(&mut self) {
        if self.invincible {
            self.invincible_frames = self.invincible_frames.saturating_sub(1);
            if self.invincible_frames == 0 {
                self.invincible = false;
            }
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Upward movement per frame
    pub speed: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            speed,
        }
    }

    /// Move up; returns false once fully off the top edge
    pub fn advance(&mut self) -> bool {
        self.pos.y -= self.speed;
        self.pos.y > -self.height
    }
}

/// A descending enemy (square, `size` x `size`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Downward movement per frame
    pub speed: f32,
    /// Sprite rotation (radians), cosmetic
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, size: f32, speed: f32) -> Self {
        Self {
            pos,
            width: size,
            height: size,
            speed,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    /// Move down and spin; returns false once fully past the bottom edge
    pub fn advance(&mut self) -> bool {
        self.pos.y += self.speed;
        self.rotation += self.rotation_speed;
        self.pos.y <= CANVAS_HEIGHT + self.height
    }
}

/// Particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Cyan,
    Magenta,
    Green,
}

impl ParticleColor {
    /// CSS colour for renderers
    pub fn as_hex(&self) -> &'static str {
        match self {
            ParticleColor::Cyan => "#00ffff",
            ParticleColor::Magenta => "#ff00ff",
            ParticleColor::Green => "#39ff14",
        }
    }
}

/// A particle for explosion effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0-1, decreases by `decay` each frame
    pub life: f32,
    pub decay: f32,
    pub color: ParticleColor,
}

impl Particle {
    /// Integrate one frame; returns false once the particle has faded out
    pub fn advance(&mut self) -> bool {
        self.pos += self.vel;
        self.life -= self.decay;
        self.size *= PARTICLE_SHRINK;
        self.life > 0.0 && self.size > PARTICLE_MIN_SIZE
    }
}

/// A background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Star {
    pub fn random(rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * CANVAS_WIDTH,
                rng.random::<f32>() * CANVAS_HEIGHT,
            ),
            size: rng.random::<f32>() * 2.0 + 0.5,
            speed: rng.random::<f32>() + 0.5,
        }
    }
}

/// Complete game state
///
/// Owned by the host and handed to [`super::tick`] once per frame. Timestamps
/// are host milliseconds; only differences between them matter.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (spawns, explosions)
    #[serde(skip)]
    pub rng: Pcg32,
    /// Cosmetic RNG (starfield) so background motion never shifts gameplay rolls
    #[serde(skip)]
    pub star_rng: Pcg32,
    /// Balance values
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Pause flag (only meaningful while running)
    pub paused: bool,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    /// Kills this session
    pub kills: u32,
    /// Kills on the current level
    pub level_kills: u32,
    /// Host time of the frame being simulated (ms)
    pub now_ms: f64,
    /// Time of the last volley (ms)
    pub last_fire_ms: f64,
    /// Time of the last enemy spawn (ms)
    pub last_spawn_ms: f64,
    /// Frames simulated this session
    pub frame: u64,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    /// Background starfield (animates in every phase)
    pub stars: Vec<Star>,
    /// Events raised since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state in the menu phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let rng = Pcg32::seed_from_u64(seed);
        let mut star_rng = Pcg32::seed_from_u64(seed.wrapping_add(0x9e37_79b9_7f4a_7c15));
        let stars = (0..STAR_COUNT).map(|_| Star::random(&mut star_rng)).collect();
        let lives = tuning.lives;

        Self {
            seed,
            rng,
            star_rng,
            tuning,
            phase: GamePhase::Menu,
            paused: false,
            level: 1,
            score: 0,
            lives,
            kills: 0,
            level_kills: 0,
            now_ms: 0.0,
            last_fire_ms: 0.0,
            last_spawn_ms: 0.0,
            frame: 0,
            player: Player::default(),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            stars,
            events: Vec::new(),
        }
    }

    /// Kills needed to clear the current level
    pub fn kill_quota(&self) -> u32 {
        self.tuning.kill_quota(self.level)
    }

    /// Gameplay is advancing this frame
    pub fn is_active(&self) -> bool {
        self.phase.is_running() && !self.paused
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drift stars downward, wrapping to the top at a fresh x
    pub fn update_stars(&mut self) {
        for star in &mut self.stars {
            star.pos.y += star.speed;
            if star.pos.y > CANVAS_HEIGHT {
                star.pos.y = 0.0;
                star.pos.x = self.star_rng.random::<f32>() * CANVAS_WIDTH;
            }
        }
    }
}
