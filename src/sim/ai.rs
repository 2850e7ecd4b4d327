//! Enemy decision making
//!
//! Enemies wander in random cardinal directions and take pot-shots, more
//! often when they are lined up with the player.

use rand::Rng;

use super::entity::{Direction, MoveResult, Projectile, Tank, TankRole};
use super::rect::Rect;
use crate::consts::ENEMY_STEP;

/// Top-left coordinates closer than this on either axis count as lined up
pub const ALIGN_THRESHOLD: i32 = 20;
/// Per-tick shot probability
pub const BASE_SHOOT_CHANCE: f64 = 0.01;
pub const ALIGNED_SHOOT_CHANCE: f64 = 0.05;

/// What an enemy did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AiStep {
    pub shot: bool,
    pub movement: MoveResult,
}

/// Shot probability for an enemy at `enemy` against a player at `player`
pub fn shoot_chance(enemy: &Rect, player: &Rect) -> f64 {
    let aligned = (enemy.pos.x - player.pos.x).abs() < ALIGN_THRESHOLD
        || (enemy.pos.y - player.pos.y).abs() < ALIGN_THRESHOLD;
    if aligned {
        ALIGNED_SHOOT_CHANCE
    } else {
        BASE_SHOOT_CHANCE
    }
}

/// Run one tick of enemy behaviour.
///
/// `obstacles` holds walls, the player and every other enemy. Non-enemy
/// tanks are left untouched.
pub fn update_enemy<R: Rng + ?Sized>(
    enemy: &mut Tank,
    player: &Rect,
    obstacles: &[Rect],
    now_ms: u64,
    rng: &mut R,
    projectiles: &mut Vec<Projectile>,
) -> AiStep {
    if !matches!(enemy.role, TankRole::Enemy(_)) {
        return AiStep::default();
    }

    let chance = shoot_chance(&enemy.rect, player);
    let shot = rng.random::<f64>() < chance && enemy.shoot(now_ms, projectiles);

    let step = match &mut enemy.role {
        TankRole::Enemy(brain) => {
            let due = match brain.move_timer_ms {
                None => true,
                Some(last) => now_ms.saturating_sub(last) > brain.move_delay_ms,
            };
            if due {
                let dir = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
                brain.current_move = dir.vector();
                brain.move_timer_ms = Some(now_ms);
            }
            brain.current_move * ENEMY_STEP
        }
        TankRole::Player { .. } => return AiStep::default(),
    };

    let movement = enemy.move_by(step, obstacles);

    // Fully blocked: pick a new direction on the next tick instead of
    // pushing against the wall for the rest of the interval.
    if !movement.moved {
        if let TankRole::Enemy(brain) = &mut enemy.role {
            brain.move_timer_ms = None;
        }
    }

    AiStep { shot, movement }
}
