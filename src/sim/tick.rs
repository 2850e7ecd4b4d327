//! Fixed timestep simulation tick
//!
//! One call advances a PLAYING session by one frame: player input, enemy AI,
//! projectiles, pickups, then the win/lose check.

use glam::IVec2;

use super::ai::update_enemy;
use super::collision::first_overlap;
use super::entity::{Owner, Pickup, PickupKind, Projectile, ProjectileImpact, WallHit};
use super::rect::Rect;
use super::screen::Screen;
use super::state::{GameEvent, GameSession};
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Movement intent; only the sign of each component matters
    pub movement: IVec2,
    /// Fire (held)
    pub shoot: bool,
    /// Confirm / Enter (edge-triggered by the frontend)
    pub confirm: bool,
}

impl TickInput {
    /// Combine four direction keys into one intent.
    ///
    /// With both keys of an axis held, right beats left and down beats up.
    pub fn from_keys(left: bool, right: bool, up: bool, down: bool) -> IVec2 {
        let mut movement = IVec2::ZERO;
        if left {
            movement.x = -1;
        }
        if right {
            movement.x = 1;
        }
        if up {
            movement.y = -1;
        }
        if down {
            movement.y = 1;
        }
        movement
    }
}

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not on the PLAYING screen; nothing simulated
    Idle,
    Continue,
    GameOver,
    LevelComplete { level_time: f64 },
    /// Final level cleared; the run time is ready to be recorded
    Victory { total_time: f64 },
}

/// Advance the session by one tick. `now_secs` is wall-clock time, used only
/// for level timing.
pub fn tick(session: &mut GameSession, input: &TickInput, now_secs: f64) -> TickOutcome {
    if session.screen != Screen::Playing {
        return TickOutcome::Idle;
    }

    session.time_ticks += 1;
    let now_ms = session.now_ms();

    apply_player_input(session, input, now_ms);
    run_enemies(session, now_ms);

    let mut projectiles = std::mem::take(&mut session.projectiles);
    projectiles.retain_mut(|projectile| !resolve_projectile(session, projectile));
    session.projectiles = projectiles;

    collect_pickups(session);

    evaluate(session, now_secs)
}

fn apply_player_input(session: &mut GameSession, input: &TickInput, now_ms: u64) {
    let delta = input.movement.signum() * PLAYER_SPEED;
    if delta != IVec2::ZERO {
        let obstacles: Vec<Rect> = session
            .walls
            .iter()
            .map(|w| w.rect)
            .chain(session.enemies.iter().map(|e| e.rect))
            .collect();
        let result = session.player.move_by(delta, &obstacles);
        if result.turned {
            session.events.push(GameEvent::TankTurned {
                owner: Owner::Player,
                facing: session.player.facing,
            });
        }
    }

    if input.shoot && session.player.shoot(now_ms, &mut session.projectiles) {
        session.events.push(GameEvent::ShotFired {
            owner: Owner::Player,
        });
    }
}

fn run_enemies(session: &mut GameSession, now_ms: u64) {
    let player_rect = session.player.rect;
    let wall_rects: Vec<Rect> = session.walls.iter().map(|w| w.rect).collect();

    for i in 0..session.enemies.len() {
        let mut obstacles = wall_rects.clone();
        obstacles.push(player_rect);
        obstacles.extend(
            session
                .enemies
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, e)| e.rect),
        );

        let step = update_enemy(
            &mut session.enemies[i],
            &player_rect,
            &obstacles,
            now_ms,
            &mut session.rng,
            &mut session.projectiles,
        );

        if step.shot {
            session.events.push(GameEvent::ShotFired {
                owner: Owner::Enemy,
            });
        }
        if step.movement.turned {
            session.events.push(GameEvent::TankTurned {
                owner: Owner::Enemy,
                facing: session.enemies[i].facing,
            });
        }
    }
}

/// Move one projectile and apply whatever it hits. Returns true when the
/// projectile is used up.
fn resolve_projectile(session: &mut GameSession, projectile: &mut Projectile) -> bool {
    match projectile.update(&mut session.walls, &session.playfield) {
        ProjectileImpact::OutOfBounds => return true,
        ProjectileImpact::Wall { index, outcome } => {
            let cell = session.walls[index].cell;
            if outcome == WallHit::Destroyed {
                session.walls.remove(index);
            }
            session.events.push(GameEvent::WallHit { cell, outcome });
            return true;
        }
        ProjectileImpact::None => {}
    }

    match projectile.owner {
        Owner::Player => {
            let Some(index) = first_overlap(&projectile.rect, session.enemies.iter().map(|e| &e.rect))
            else {
                return false;
            };

            let enemy = &mut session.enemies[index];
            enemy.take_damage(projectile.damage);
            if !enemy.is_alive() {
                let at = enemy.rect.center();
                session.enemies.remove(index);
                session.score += ENEMY_KILL_SCORE;
                session.events.push(GameEvent::EnemyDestroyed { at });
                log::debug!("Enemy destroyed at {}, {} left", at, session.enemies.len());

                if let Some(kind) = PickupKind::roll_drop(&mut session.rng) {
                    session.pickups.push(Pickup::new(at, kind));
                    session.events.push(GameEvent::PickupDropped { kind, at });
                }
            }
            true
        }
        Owner::Enemy => {
            if !projectile.rect.overlaps(&session.player.rect) {
                return false;
            }
            // Enemy fire always costs exactly one hit-point, whatever the
            // projectile's damage field says.
            session.player.take_damage(1);
            session.events.push(GameEvent::PlayerHit {
                hp_left: session.player.hp,
            });
            log::debug!("Player hit, {} hp left", session.player.hp);
            true
        }
    }
}

fn collect_pickups(session: &mut GameSession) {
    let player_rect = session.player.rect;
    let (taken, kept): (Vec<Pickup>, Vec<Pickup>) = std::mem::take(&mut session.pickups)
        .into_iter()
        .partition(|p| p.rect.overlaps(&player_rect));
    session.pickups = kept;

    for pickup in taken {
        session.player.apply_pickup(pickup.kind);
        session.score += pickup.kind.score();
        session.events.push(GameEvent::PickupCollected { kind: pickup.kind });
    }
}

fn evaluate(session: &mut GameSession, now_secs: f64) -> TickOutcome {
    if !session.player.is_alive() {
        session.screen = Screen::GameOver;
        session.events.push(GameEvent::GameOver);
        log::info!("Game over on level {} with score {}", session.level, session.score);
        return TickOutcome::GameOver;
    }

    if !session.enemies.is_empty() {
        return TickOutcome::Continue;
    }

    let level_time = (now_secs - session.level_started_at).max(0.0);
    session.total_time += level_time;
    session.events.push(GameEvent::LevelCleared {
        level: session.level,
        level_time,
    });
    log::info!(
        "Level {} cleared in {:.2}s (total {:.2}s)",
        session.level,
        level_time,
        session.total_time
    );

    if session.is_final_level() {
        session.screen = Screen::Win;
        session.events.push(GameEvent::Victory {
            total_time: session.total_time,
        });
        TickOutcome::Victory {
            total_time: session.total_time,
        }
    } else {
        session.screen = Screen::LevelComplete;
        TickOutcome::LevelComplete { level_time }
    }
}
