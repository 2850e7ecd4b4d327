//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Tick-counter time for cooldowns, wall-clock seconds passed in
//! - Seeded RNG only
//! - No file, rendering or platform dependencies

pub mod ai;
pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod grid;
pub mod rect;
pub mod screen;
pub mod state;
pub mod tick;

pub use ai::update_enemy;
pub use autopilot::autopilot_input;
pub use collision::{first_overlap, move_with_clamp};
pub use entity::{
    Direction, EnemyBrain, MoveResult, Owner, Pickup, PickupKind, Projectile, ProjectileImpact,
    Tank, TankRole, Wall, WallHit, WallKind,
};
pub use grid::{Cell, Grid};
pub use rect::Rect;
pub use screen::{ConfirmAction, Screen};
pub use state::{GameEvent, GameSession, LEVELS, LevelConfig, final_level, level_config};
pub use tick::{TickInput, TickOutcome, tick};
