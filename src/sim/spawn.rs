//! Enemy spawning and explosion effects
//!
//! All randomness comes from the state's seeded RNG so runs replay exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameState, Particle, ParticleColor};
use crate::consts::*;
use crate::tuning::Tuning;

/// Time between spawns on a level (ms), shrinking to the configured floor
pub fn spawn_interval(tuning: &Tuning, level: u32) -> f64 {
    let reduced = tuning.spawn_interval_base_ms - level as f64 * SPAWN_INTERVAL_STEP_MS;
    reduced.max(tuning.spawn_interval_min_ms)
}

/// Mean enemy fall speed on a level, before jitter
pub fn enemy_base_speed(tuning: &Tuning, level: u32) -> f32 {
    let steps = level.clamp(1, ENEMY_SPEED_LEVEL_CAP) - 1;
    tuning.base_enemy_speed + steps as f32 * tuning.enemy_speed_increment
}

/// Spawn one enemy if the level's interval has elapsed since the last spawn
///
/// Returns true when an enemy was created.
pub fn maybe_spawn(state: &mut GameState, now_ms: f64) -> bool {
    let interval = spawn_interval(&state.tuning, state.level);
    if now_ms - state.last_spawn_ms <= interval {
        return false;
    }
    spawn_enemy(state);
    state.last_spawn_ms = now_ms;
    true
}

/// Create an enemy just above the top edge
pub fn spawn_enemy(state: &mut GameState) {
    let rng = &mut state.rng;

    let size = rng.random_range(ENEMY_MIN_SIZE..=ENEMY_MAX_SIZE);
    let x = size / 2.0 + rng.random::<f32>() * (CANVAS_WIDTH - size);
    let jitter = (rng.random::<f32>() - 0.5) * 0.5;
    let speed = enemy_base_speed(&state.tuning, state.level) + jitter;

    let mut enemy = Enemy::new(Vec2::new(x, -size), size, speed);
    enemy.rotation = rng.random::<f32>() * std::f32::consts::TAU;
    enemy.rotation_speed = (rng.random::<f32>() - 0.5) * 0.05;

    log::debug!(
        "Spawned enemy at x={:.1} size={:.1} speed={:.2} (level {})",
        x,
        size,
        speed,
        state.level
    );
    state.enemies.push(enemy);
}

/// Burst of particles radiating from `pos`
///
/// Small bursts (player hits) use half the particles and half the speed.
/// The burst is truncated so the particle list never exceeds the tuning cap.
pub fn spawn_explosion(state: &mut GameState, pos: Vec2, small: bool) {
    let (count, base_speed) = if small {
        (EXPLOSION_PARTICLES_SMALL, 2.0)
    } else {
        (EXPLOSION_PARTICLES, 4.0)
    };
    let room = state
        .tuning
        .max_particles
        .saturating_sub(state.particles.len());
    let rng = &mut state.rng;

    for i in 0..count.min(room) {
        let angle = std::f32::consts::TAU * i as f32 / count as f32 + rng.random::<f32>() * 0.5;
        let speed = base_speed + rng.random::<f32>() * 2.0;
        let color = if rng.random_bool(0.5) {
            ParticleColor::Cyan
        } else if rng.random_bool(0.5) {
            ParticleColor::Magenta
        } else {
            ParticleColor::Green
        };

        state.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size: 3.0 + rng.random::<f32>() * 4.0,
            life: 1.0,
            decay: 0.02 + rng.random::<f32>() * 0.02,
            color,
        });
    }
}
