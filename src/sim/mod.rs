//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied timestamps only
//! - Seeded RNG only
//! - Stable iteration order (list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lifecycle;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{enemy_hits_player, point_in_enemy, resolve_collisions};
pub use spawn::{enemy_base_speed, spawn_interval};
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, Particle, ParticleColor, Player, Projectile, Star,
};
pub use tick::{TickInput, tick};
