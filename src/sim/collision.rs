//! Collision detection and scoring
//!
//! Two passes per frame: projectiles against enemies, then enemies against the
//! player. Hits are marked first and the lists rebuilt afterwards, so removal
//! never skips or double-processes an entity.

use glam::Vec2;

use super::lifecycle;
use super::spawn::spawn_explosion;
use super::state::{Enemy, GameEvent, GameState, Player};
use crate::consts::*;

/// Whether a point lies strictly inside an enemy's centred bounding box
#[inline]
pub fn point_in_enemy(point: Vec2, enemy: &Enemy) -> bool {
    let half_w = enemy.width / 2.0;
    let half_h = enemy.height / 2.0;
    point.x > enemy.pos.x - half_w
        && point.x < enemy.pos.x + half_w
        && point.y > enemy.pos.y - half_h
        && point.y < enemy.pos.y + half_h
}

/// Centre distance below which an enemy counts as hitting the player
#[inline]
pub fn player_hit_distance(player: &Player, enemy: &Enemy) -> f32 {
    (player.width + enemy.width) / 2.0 - PLAYER_HIT_ALLOWANCE
}

/// Whether an enemy is close enough to damage the player
#[inline]
pub fn enemy_hits_player(player: &Player, enemy: &Enemy) -> bool {
    player.pos.distance(enemy.pos) < player_hit_distance(player, enemy)
}

/// Keep only the items whose flag is false
fn retain_unmarked<T>(items: &mut Vec<T>, marks: Vec<bool>) {
    let mut marks = marks.into_iter();
    items.retain(|_| !marks.next().unwrap_or(false));
}

/// Run both collision passes for one frame
pub fn resolve_collisions(state: &mut GameState) {
    resolve_projectile_hits(state);
    if state.phase.is_running() {
        resolve_player_hits(state);
    }
}

/// Projectile x enemy pass
///
/// Each projectile destroys at most one enemy (the first in list order it
/// overlaps) and each enemy absorbs at most one projectile. Reaching the kill
/// quota ends the pass, since levelling up clears the enemy list.
pub fn resolve_projectile_hits(state: &mut GameState) {
    if state.projectiles.is_empty() || state.enemies.is_empty() {
        return;
    }

    let mut projectile_hit = vec![false; state.projectiles.len()];
    let mut enemy_hit = vec![false; state.enemies.len()];
    let mut explosions: Vec<Vec2> = Vec::new();
    let mut quota_reached = false;

    for (pi, projectile) in state.projectiles.iter().enumerate() {
        let target = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !enemy_hit[*ei] && point_in_enemy(projectile.pos, enemy))
            .map(|(ei, enemy)| (ei, enemy.pos));
        let Some((ei, enemy_pos)) = target else {
            continue;
        };

        projectile_hit[pi] = true;
        enemy_hit[ei] = true;
        explosions.push(enemy_pos);

        let points = state.tuning.base_points * state.level as u64;
        state.score += points;
        state.kills += 1;
        state.level_kills += 1;
        state.events.push(GameEvent::EnemyDestroyed {
            pos: enemy_pos,
            points,
        });

        if state.level_kills >= state.tuning.kill_quota(state.level) {
            quota_reached = true;
            break;
        }
    }

    retain_unmarked(&mut state.projectiles, projectile_hit);
    retain_unmarked(&mut state.enemies, enemy_hit);

    for pos in explosions {
        spawn_explosion(state, pos, false);
    }

    if quota_reached {
        lifecycle::level_up(state);
    }
}

/// Enemy x player pass (skipped while invincible)
///
/// Every enemy overlapping the ship at the start of the pass costs a life, in
/// list order. The pass stops as soon as the last life is gone.
pub fn resolve_player_hits(state: &mut GameState) {
    if state.player.invincible || state.enemies.is_empty() {
        return;
    }

    let hits: Vec<bool> = state
        .enemies
        .iter()
        .map(|enemy| enemy_hits_player(&state.player, enemy))
        .collect();
    if !hits.contains(&true) {
        return;
    }

    let mut removed = vec![false; hits.len()];
    let mut dead = false;
    for (i, hit) in hits.into_iter().enumerate() {
        if !hit {
            continue;
        }
        removed[i] = true;
        state.lives = state.lives.saturating_sub(1);
        let player_pos = state.player.pos;
        spawn_explosion(state, player_pos, true);
        state.events.push(GameEvent::PlayerHit {
            lives_left: state.lives,
        });
        if state.lives == 0 {
            dead = true;
            break;
        }
    }

    retain_unmarked(&mut state.enemies, removed);

    if dead {
        lifecycle::game_over(state);
    } else {
        state.player.grant_invincibility(INVINCIBILITY_FRAMES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Projectile};
    use crate::tuning::{QuotaPolicy, Tuning};

    fn running_state() -> GameState {
        let mut state = GameState::new(1234, Tuning::default());
        lifecycle::start(&mut state);
        state
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y), 60.0, 1.5)
    }

    #[test]
    fn test_point_in_enemy_is_strict() {
        let enemy = enemy_at(100.0, 100.0);
        assert!(point_in_enemy(Vec2::new(100.0, 100.0), &enemy));
        assert!(point_in_enemy(Vec2::new(129.9, 70.1), &enemy));
        assert!(!point_in_enemy(Vec2::new(130.0, 100.0), &enemy));
        assert!(!point_in_enemy(Vec2::new(100.0, 70.0), &enemy));
    }

    #[test]
    fn test_player_hit_distance() {
        let player = Player::default();
        let enemy = enemy_at(0.0, 0.0);
        // (40 + 60) / 2 - 10
        assert_eq!(player_hit_distance(&player, &enemy), 40.0);

        let near = enemy_at(player.pos.x + 39.0, player.pos.y);
        let far = enemy_at(player.pos.x + 40.0, player.pos.y);
        assert!(enemy_hits_player(&player, &near));
        assert!(!enemy_hits_player(&player, &far));
    }

    #[test]
    fn test_single_hit_scores_and_removes_one_of_each() {
        let mut state = running_state();
        state.enemies.push(enemy_at(200.0, 200.0));
        state.enemies.push(enemy_at(600.0, 200.0));
        state.projectiles.push(Projectile::new(200.0, 200.0, 12.0));
        state.projectiles.push(Projectile::new(400.0, 400.0, 12.0));

        resolve_projectile_hits(&mut state);

        assert_eq!(state.score, 100);
        assert_eq!(state.kills, 1);
        assert_eq!(state.level_kills, 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.x, 600.0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos.x, 400.0);
        assert_eq!(state.particles.len(), EXPLOSION_PARTICLES);
    }

    #[test]
    fn test_score_scales_with_level() {
        let mut state = running_state();
        state.level = 3;
        state.enemies.push(enemy_at(200.0, 200.0));
        state.projectiles.push(Projectile::new(200.0, 200.0, 12.0));
        resolve_projectile_hits(&mut state);
        assert_eq!(state.score, 300);
    }

    #[test]
    fn test_two_projectiles_one_enemy() {
        let mut state = running_state();
        state.enemies.push(enemy_at(200.0, 200.0));
        state.projectiles.push(Projectile::new(185.0, 200.0, 12.0));
        state.projectiles.push(Projectile::new(215.0, 200.0, 12.0));

        resolve_projectile_hits(&mut state);

        // Enemy absorbs only the first projectile
        assert_eq!(state.kills, 1);
        assert!(state.enemies.is_empty());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos.x, 215.0);
    }

    #[test]
    fn test_adjacent_hits_not_skipped() {
        let mut state = running_state();
        for i in 0..3 {
            let x = 100.0 + i as f32 * 100.0;
            state.enemies.push(enemy_at(x, 200.0));
            state.projectiles.push(Projectile::new(x, 200.0, 12.0));
        }
        resolve_projectile_hits(&mut state);
        assert_eq!(state.kills, 3);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_quota_triggers_level_up_and_clears_enemies() {
        let mut state = running_state();
        state.level_kills = 9;
        state.enemies.push(enemy_at(100.0, 200.0));
        state.enemies.push(enemy_at(300.0, 200.0));
        state.enemies.push(enemy_at(500.0, 200.0));
        state.projectiles.push(Projectile::new(100.0, 200.0, 12.0));
        state.projectiles.push(Projectile::new(300.0, 200.0, 12.0));

        resolve_projectile_hits(&mut state);

        assert_eq!(state.level, 2);
        assert_eq!(state.level_kills, 0);
        assert_eq!(state.kills, 1);
        assert!(state.enemies.is_empty());
        // Unused projectile survives the level change
        assert_eq!(state.projectiles.len(), 1);
        assert!(matches!(state.phase, GamePhase::LevelUp { .. }));
    }

    #[test]
    fn test_per_level_quota() {
        let tuning = Tuning {
            quota: QuotaPolicy::PerLevel(5),
            ..Tuning::default()
        };
        let mut state = GameState::new(1, tuning);
        lifecycle::start(&mut state);
        state.level = 2;
        state.level_kills = 8;
        state.enemies.push(enemy_at(100.0, 200.0));
        state.projectiles.push(Projectile::new(100.0, 200.0, 12.0));
        resolve_projectile_hits(&mut state);
        assert_eq!(state.level, 2);

        state.enemies.push(enemy_at(100.0, 200.0));
        state.projectiles.push(Projectile::new(100.0, 200.0, 12.0));
        resolve_projectile_hits(&mut state);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_player_hit_costs_life_and_grants_invincibility() {
        let mut state = running_state();
        let pos = state.player.pos;
        state.enemies.push(enemy_at(pos.x, pos.y));

        resolve_player_hits(&mut state);

        assert_eq!(state.lives, 2);
        assert!(state.enemies.is_empty());
        assert!(state.player.invincible);
        assert_eq!(state.player.invincible_frames, INVINCIBILITY_FRAMES);
        assert_eq!(state.particles.len(), EXPLOSION_PARTICLES_SMALL);
        assert!(state.events.contains(&GameEvent::PlayerHit { lives_left: 2 }));
    }

    #[test]
    fn test_invincible_player_ignores_enemies() {
        let mut state = running_state();
        state.player.grant_invincibility(10);
        let pos = state.player.pos;
        state.enemies.push(enemy_at(pos.x, pos.y));
        resolve_player_hits(&mut state);
        assert_eq!(state.lives, 3);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_simultaneous_hits_resolved_independently() {
        let mut state = running_state();
        let pos = state.player.pos;
        state.enemies.push(enemy_at(pos.x - 5.0, pos.y));
        state.enemies.push(enemy_at(300.0, 100.0));
        state.enemies.push(enemy_at(pos.x + 5.0, pos.y));

        resolve_player_hits(&mut state);

        assert_eq!(state.lives, 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.x, 300.0);
    }

    #[test]
    fn test_last_life_triggers_game_over_once() {
        let mut state = running_state();
        state.lives = 1;
        let pos = state.player.pos;
        state.enemies.push(enemy_at(pos.x, pos.y));
        state.enemies.push(enemy_at(pos.x + 1.0, pos.y));

        resolve_player_hits(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }
}
