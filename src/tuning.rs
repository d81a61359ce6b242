//! Data-driven game balance
//!
//! Every per-level scalar lives here so a tuning file can override any subset.
//! Missing keys fall back to [`Tuning::default`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How many kills a level requires before advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "kills", rename_all = "snake_case")]
pub enum QuotaPolicy {
    /// Same quota on every level
    Fixed(u32),
    /// `level * n` kills on each level
    PerLevel(u32),
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        QuotaPolicy::Fixed(10)
    }
}

impl QuotaPolicy {
    /// Kill quota for the given level (never zero)
    pub fn quota(&self, level: u32) -> u32 {
        let quota = match *self {
            QuotaPolicy::Fixed(n) => n,
            QuotaPolicy::PerLevel(n) => level.saturating_mul(n),
        };
        quota.max(1)
    }
}

/// Balance values (units are per frame unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Clearing this level wins the game; `None` plays forever
    pub max_level: Option<u32>,
    /// Lives at the start of a session
    pub lives: u32,
    /// Horizontal ship movement per frame
    pub player_speed: f32,
    /// Upward projectile movement per frame
    pub projectile_speed: f32,
    /// Minimum time between volleys (ms)
    pub fire_cooldown_ms: f64,
    /// Enemy fall speed on level 1
    pub base_enemy_speed: f32,
    /// Added fall speed per level (up to the speed level cap)
    pub enemy_speed_increment: f32,
    /// Points per kill, multiplied by the current level
    pub base_points: u64,
    /// Kills required to advance
    pub quota: QuotaPolicy,
    /// Spawn interval before the per-level reduction (ms)
    pub spawn_interval_base_ms: f64,
    /// Spawn interval floor (ms)
    pub spawn_interval_min_ms: f64,
    /// Upper bound on live particles
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_level: Some(10),
            lives: 3,
            player_speed: 6.0,
            projectile_speed: 12.0,
            fire_cooldown_ms: 150.0,
            base_enemy_speed: 1.5,
            enemy_speed_increment: 0.3,
            base_points: 100,
            quota: QuotaPolicy::default(),
            spawn_interval_base_ms: 1500.0,
            spawn_interval_min_ms: 500.0,
            max_particles: 512,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a file on disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            context: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<()> {
        if self.lives == 0 {
            return Err(Error::InvalidTuning {
                field: "lives",
                reason: "must be at least 1",
            });
        }
        if self.max_level == Some(0) {
            return Err(Error::InvalidTuning {
                field: "max_level",
                reason: "must be at least 1 when set",
            });
        }
        if !(self.spawn_interval_min_ms > 0.0) {
            return Err(Error::InvalidTuning {
                field: "spawn_interval_min_ms",
                reason: "must be positive",
            });
        }
        if self.spawn_interval_base_ms < self.spawn_interval_min_ms {
            return Err(Error::InvalidTuning {
                field: "spawn_interval_base_ms",
                reason: "must not be below spawn_interval_min_ms",
            });
        }
        if self.fire_cooldown_ms < 0.0 {
            return Err(Error::InvalidTuning {
                field: "fire_cooldown_ms",
                reason: "must not be negative",
            });
        }
        if self.player_speed < 0.0 || self.projectile_speed <= 0.0 || self.base_enemy_speed <= 0.0 {
            return Err(Error::InvalidTuning {
                field: "speeds",
                reason: "player speed must be non-negative and projectile/enemy speeds positive",
            });
        }
        Ok(())
    }

    /// Kill quota for a level under the configured policy
    pub fn kill_quota(&self, level: u32) -> u32 {
        self.quota.quota(level)
    }
}
