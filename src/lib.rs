//! Battle City - A top-down tank battle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, tick, screens)
//! - `persistence`: Level grid files and the level store
//! - `highscores`: Best completion time file
//! - `game`: Frame driver tying the session, store and clock together
//! - `platform`: Clock abstraction
//! - `settings`: Runtime configuration
//! - `ui`: HUD and banner data for renderers

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::Game;
pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u64 = 60;

    /// Side length of one grid tile in pixels
    pub const TILE_SIZE: i32 = 50;

    /// Player movement per tick (pixels)
    pub const PLAYER_SPEED: i32 = 4;
    /// Enemy movement per tick (pixels)
    pub const ENEMY_STEP: i32 = 2;
    /// Player starting and maximum hit-points
    pub const PLAYER_HP: i32 = 3;
    pub const ENEMY_HP: i32 = 2;

    /// Minimum time between two shots of the same tank (ms)
    pub const SHOOT_DELAY_MS: u64 = 1000;
    /// Enemy movement re-decision interval (ms)
    pub const ENEMY_MOVE_DELAY_MS: u64 = 1000;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: i32 = 10;
    pub const PROJECTILE_SPEED: i32 = 7;

    pub const PICKUP_SIZE: i32 = 20;

    pub const BRICK_HP: i32 = 2;
    pub const STEEL_HP: i32 = 999;

    /// Score awards
    pub const ENEMY_KILL_SCORE: u64 = 100;
    pub const HEART_SCORE: u64 = 50;
    pub const SWORD_SCORE: u64 = 75;

    /// Stored best time when no record exists
    pub const NO_RECORD: f64 = 9999.0;
    /// Best times at or above this are not shown as records
    pub const RECORD_DISPLAY_LIMIT: f64 = 9000.0;
}

/// Top-left pixel of a grid tile
#[inline]
pub fn tile_to_pixel(col: i32, row: i32) -> IVec2 {
    IVec2::new(col * consts::TILE_SIZE, row * consts::TILE_SIZE)
}

/// Convert a tick count into elapsed milliseconds
#[inline]
pub fn ticks_to_ms(ticks: u64) -> u64 {
    ticks * 1000 / consts::TICK_RATE
}
