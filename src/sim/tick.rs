//! Per-frame simulation step
//!
//! Called once per rendered frame with the host's clock in milliseconds.
//! Movement is expressed in units per frame, so ship and enemy speed follow
//! the display refresh rate; only the fire cooldown, spawn interval and level
//! banner are measured in wall-clock time.

use super::collision::resolve_collisions;
use super::lifecycle;
use super::spawn::maybe_spawn;
use super::state::{GameEvent, GameState, Projectile};
use crate::consts::PROJECTILE_OFFSET;

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub move_left: bool,
    /// Move right held
    pub move_right: bool,
    /// Fire held
    pub fire: bool,
    /// Pause toggle (edge-triggered)
    pub pause: bool,
    /// Attract mode - the ship flies itself
    pub autopilot: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    state.now_ms = now_ms;

    // Background keeps drifting in every phase, paused or not
    state.update_stars();

    lifecycle::update_banner(state);

    if input.pause {
        lifecycle::toggle_pause(state);
    }

    if !state.is_active() {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        steer_autopilot(state, &mut input);
    }

    state.frame += 1;

    // Player movement (fixed per-frame step)
    let mut dx = 0.0;
    if input.move_left {
        dx -= state.tuning.player_speed;
    }
    if input.move_right {
        dx += state.tuning.player_speed;
    }
    state.player.shift(dx);

    // Fire gating
    if input.fire && now_ms - state.last_fire_ms > state.tuning.fire_cooldown_ms {
        fire(state);
        state.last_fire_ms = now_ms;
    }

    maybe_spawn(state, now_ms);

    state.projectiles.retain_mut(|p| p.advance());
    state.enemies.retain_mut(|e| e.advance());
    state.particles.retain_mut(|p| p.advance());

    resolve_collisions(state);
    if !state.phase.is_running() {
        return;
    }

    state.player.tick_invincibility();
}

/// Emit a pair of projectiles either side of the ship's centreline
pub fn fire(state: &mut GameState) {
    let x = state.player.pos.x;
    let y = state.player.pos.y - state.player.height / 2.0;
    let speed = state.tuning.projectile_speed;
    state
        .projectiles
        .push(Projectile::new(x - PROJECTILE_OFFSET, y, speed));
    state
        .projectiles
        .push(Projectile::new(x + PROJECTILE_OFFSET, y, speed));
    state.events.push(GameEvent::Fire);
}

/// Fill in movement and fire for attract mode
///
/// Chases the lowest enemy still above the ship and fires when lined up.
fn steer_autopilot(state: &GameState, input: &mut TickInput) {
    let player = &state.player;
    let target = state
        .enemies
        .iter()
        .filter(|e| e.pos.y < player.pos.y - player.height)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(enemy) = target else {
        input.move_left = false;
        input.move_right = false;
        input.fire = false;
        return;
    };

    let dx = enemy.pos.x - player.pos.x;
    let deadzone = state.tuning.player_speed;
    input.move_left = dx < -deadzone;
    input.move_right = dx > deadzone;
    input.fire = dx.abs() < enemy.width / 2.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Enemy, GamePhase};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        lifecycle::start(&mut state);
        state
    }

    fn fire_input() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_only_moves_stars() {
        let mut state = GameState::new(9, Tuning::default());
        let before: Vec<f32> = state.stars.iter().map(|s| s.pos.y).collect();
        tick(&mut state, &fire_input(), 10_000.0);
        assert_eq!(state.frame, 0);
        assert!(state.projectiles.is_empty());
        assert!(state.enemies.is_empty());
        let moved = state
            .stars
            .iter()
            .zip(&before)
            .any(|(s, y)| s.pos.y != *y);
        assert!(moved);
    }

    #[test]
    fn test_fire_emits_symmetric_pair() {
        let mut state = started(1);
        tick(&mut state, &fire_input(), 200.0);

        assert_eq!(state.projectiles.len(), 2);
        let px = state.player.pos.x;
        let left = &state.projectiles[0];
        let right = &state.projectiles[1];
        assert!((px - left.pos.x - PROJECTILE_OFFSET).abs() < 1e-4);
        assert!((right.pos.x - px - PROJECTILE_OFFSET).abs() < 1e-4);
        assert_eq!(left.pos.y, right.pos.y);
        assert_eq!(state.last_fire_ms, 200.0);
        assert!(state.events.contains(&GameEvent::Fire));
    }

    #[test]
    fn test_fire_cooldown() {
        let mut state = started(1);
        tick(&mut state, &fire_input(), 200.0);
        assert_eq!(state.projectiles.len(), 2);

        // Within cooldown: nothing new
        tick(&mut state, &fire_input(), 300.0);
        tick(&mut state, &fire_input(), 350.0);
        assert_eq!(state.projectiles.len(), 2);

        // Cooldown elapsed: exactly one more pair
        tick(&mut state, &fire_input(), 351.0);
        assert_eq!(state.projectiles.len(), 4);
    }

    #[test]
    fn test_projectiles_move_up() {
        let mut state = started(1);
        tick(&mut state, &fire_input(), 200.0);
        let y0 = state.projectiles[0].pos.y;
        tick(&mut state, &TickInput::default(), 216.0);
        assert_eq!(state.projectiles[0].pos.y, y0 - 12.0);
    }

    #[test]
    fn test_movement_per_frame() {
        let mut state = started(1);
        let x0 = state.player.pos.x;
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &left, 16.0);
        assert_eq!(state.player.pos.x, x0 - 6.0);

        let both = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &both, 32.0);
        assert_eq!(state.player.pos.x, x0 - 6.0);
    }

    #[test]
    fn test_spawner_runs_on_schedule() {
        let mut state = started(3);
        // Level 1 interval is 1400 ms
        tick(&mut state, &TickInput::default(), 1400.0);
        assert!(state.enemies.is_empty());
        tick(&mut state, &TickInput::default(), 1401.0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_pause_freezes_gameplay_but_not_stars() {
        let mut state = started(1);
        state.enemies.push(Enemy::new(Vec2::new(100.0, 100.0), 60.0, 2.0));

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 16.0);
        assert!(state.paused);
        let star_y = state.stars[0].pos.y;

        tick(&mut state, &fire_input(), 5000.0);
        assert_eq!(state.enemies[0].pos.y, 100.0);
        assert!(state.projectiles.is_empty());
        assert_ne!(state.stars[0].pos.y, star_y);

        tick(&mut state, &pause, 5016.0);
        assert!(!state.paused);
        assert_eq!(state.enemies[0].pos.y, 102.0);
    }

    #[test]
    fn test_invincibility_counts_down() {
        let mut state = started(1);
        state.player.grant_invincibility(2);
        tick(&mut state, &TickInput::default(), 16.0);
        assert!(state.player.invincible);
        tick(&mut state, &TickInput::default(), 32.0);
        assert!(!state.player.invincible);
    }

    #[test]
    fn test_level_one_scenario() {
        let mut state = started(77);
        let mut now = 0.0;

        for kill in 1..=10u32 {
            let x = 100.0 + kill as f32 * 50.0;
            // Enemy sits where the projectile will be after its first move
            state.enemies.push(Enemy::new(Vec2::new(x, 300.0), 60.0, 0.0));
            state.projectiles.push(Projectile::new(x, 312.0, 12.0));
            now += 16.0;
            tick(&mut state, &TickInput::default(), now);

            if kill < 10 {
                assert_eq!(state.score, 100 * kill as u64);
                assert_eq!(state.kills, kill);
                assert_eq!(state.level_kills, kill);
                assert_eq!(state.level, 1);
            }
        }

        assert_eq!(state.level, 2);
        assert_eq!(state.level_kills, 0);
        assert_eq!(state.kills, 10);
        assert_eq!(state.score, 1000);
        assert!(state.enemies.is_empty());
        assert!(matches!(state.phase, GamePhase::LevelUp { .. }));

        // Banner clears after two seconds
        tick(&mut state, &TickInput::default(), now + LEVEL_BANNER_MS);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_updates_are_noops_after_game_over() {
        let mut state = started(1);
        state.lives = 1;
        let pos = state.player.pos;
        state.enemies.push(Enemy::new(pos, 60.0, 0.0));
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.phase, GamePhase::GameOver);

        let frame = state.frame;
        let events = state.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count(),
            1
        );

        for i in 0..10 {
            tick(&mut state, &fire_input(), 5000.0 + i as f64 * 16.0);
        }
        assert_eq!(state.frame, frame);
        assert!(state.projectiles.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_autopilot_lines_up_and_fires() {
        let mut state = started(1);
        let target_x = state.player.pos.x + 100.0;
        state
            .enemies
            .push(Enemy::new(Vec2::new(target_x, 100.0), 60.0, 0.0));
        let auto = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut now = 200.0;
        for _ in 0..40 {
            tick(&mut state, &auto, now);
            now += 16.0;
        }
        assert!((state.player.pos.x - target_x).abs() <= state.tuning.player_speed);
        assert!(state.kills >= 1 || !state.projectiles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = started(99999);
        let mut b = started(99999);
        let inputs = [
            TickInput {
                autopilot: true,
                ..Default::default()
            },
            fire_input(),
            TickInput {
                move_right: true,
                fire: true,
                ..Default::default()
            },
        ];

        let mut now = 0.0;
        for step in 0..600 {
            let input = &inputs[step % inputs.len()];
            tick(&mut a, input, now);
            tick(&mut b, input, now);
            now += 1000.0 / 60.0;
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.player.pos, b.player.pos);
    }

    proptest! {
        #[test]
        fn player_stays_in_bounds(moves in proptest::collection::vec(0u8..4, 1..300)) {
            let mut state = started(5);
            let mut now = 0.0;
            for m in moves {
                let input = TickInput {
                    move_left: m & 1 != 0,
                    move_right: m & 2 != 0,
                    ..Default::default()
                };
                tick(&mut state, &input, now);
                now += 16.0;
                prop_assert!(state.player.pos.x >= state.player.width / 2.0);
                prop_assert!(state.player.pos.x <= CANVAS_WIDTH - state.player.width / 2.0);
            }
        }
    }
}
