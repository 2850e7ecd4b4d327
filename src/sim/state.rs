//! Game session state and level setup
//!
//! Everything one playthrough needs lives in [`GameSession`]. The frame
//! driver owns it and hands it to the tick and to renderers by reference.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Direction, Owner, Pickup, PickupKind, Projectile, Tank, Wall, WallHit, WallKind};
use super::grid::{Cell, Grid};
use super::rect::Rect;
use super::screen::Screen;
use crate::consts::*;
use crate::ticks_to_ms;

/// Grid size and enemy count for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub size: usize,
    pub enemies: usize,
}

/// Levels 1 through 3
pub const LEVELS: [LevelConfig; 3] = [
    LevelConfig { size: 20, enemies: 4 },
    LevelConfig { size: 20, enemies: 6 },
    LevelConfig { size: 20, enemies: 9 },
];

/// Configuration for a 1-based level number
pub fn level_config(level: u32) -> Option<LevelConfig> {
    let index = usize::try_from(level).ok()?.checked_sub(1)?;
    LEVELS.get(index).copied()
}

/// Number of the last configured level
pub fn final_level() -> u32 {
    LEVELS.len() as u32
}

/// Random draws spent trying to place enemies before giving up
pub const ENEMY_PLACEMENT_ATTEMPTS: usize = 200;
/// Enemies never start this close (Manhattan tiles) to the player spawn
pub const ENEMY_SPAWN_CLEARANCE: i32 = 4;
/// Spawn used when a level file has no `p` cell
pub const FALLBACK_SPAWN: IVec2 = IVec2::new(1, 1);

/// Things that happened during a tick, for audio and effects
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    ShotFired { owner: Owner },
    TankTurned { owner: Owner, facing: Direction },
    WallHit { cell: IVec2, outcome: WallHit },
    EnemyDestroyed { at: IVec2 },
    PickupDropped { kind: PickupKind, at: IVec2 },
    PickupCollected { kind: PickupKind },
    PlayerHit { hp_left: i32 },
    LevelCleared { level: u32, level_time: f64 },
    GameOver,
    Victory { total_time: f64 },
    NewRecord { time: f64 },
}

/// Complete state of one playthrough
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub screen: Screen,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Seconds spent in cleared levels of this run
    pub total_time: f64,
    /// Wall-clock seconds when the current level started
    pub level_started_at: f64,
    /// Best recorded run time (seconds), `NO_RECORD` if none
    pub best_time: f64,
    /// Simulation tick counter; drives cooldowns and AI timers
    pub time_ticks: u64,
    /// Projectiles must stay fully inside this rectangle
    pub playfield: Rect,
    pub player: Tank,
    pub enemies: Vec<Tank>,
    pub walls: Vec<Wall>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    /// Pending events, drained by the frontend every frame
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// A fresh session sitting on the menu
    pub fn new(seed: u64, best_time: f64) -> Self {
        Self {
            seed,
            screen: Screen::Menu,
            level: 1,
            score: 0,
            total_time: 0.0,
            level_started_at: 0.0,
            best_time,
            time_ticks: 0,
            playfield: Rect::new(0, 0, 0, 0),
            player: Tank::player(FALLBACK_SPAWN.x, FALLBACK_SPAWN.y),
            enemies: Vec::new(),
            walls: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Current simulation time in milliseconds
    pub fn now_ms(&self) -> u64 {
        ticks_to_ms(self.time_ticks)
    }

    /// Seconds spent in the current level so far
    pub fn level_elapsed(&self, now_secs: f64) -> f64 {
        if self.screen == Screen::Playing {
            (now_secs - self.level_started_at).max(0.0)
        } else {
            0.0
        }
    }

    pub fn is_final_level(&self) -> bool {
        self.level >= final_level()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset per-run progress: level 1, no score, no time, a fresh player
    pub fn reset_run(&mut self) {
        self.level = 1;
        self.score = 0;
        self.total_time = 0.0;
        self.player = Tank::player(FALLBACK_SPAWN.x, FALLBACK_SPAWN.y);
    }

    /// Drop all level entities and go back to the title screen
    pub fn return_to_menu(&mut self) {
        self.clear_level();
        self.screen = Screen::Menu;
    }

    fn clear_level(&mut self) {
        self.enemies.clear();
        self.walls.clear();
        self.projectiles.clear();
        self.pickups.clear();
    }

    /// Build level `level` from `grid` and start playing it.
    ///
    /// The player keeps hit-points and damage modifier and is moved to the
    /// grid's spawn. A level number with no configuration means the run is
    /// already won.
    pub fn start_level(&mut self, level: u32, grid: &Grid, now_secs: f64) {
        let Some(config) = level_config(level) else {
            log::warn!("No configuration for level {}, treating run as won", level);
            self.screen = Screen::Win;
            return;
        };

        self.clear_level();
        self.level = level;

        let size = grid.size() as i32;
        self.playfield = Rect::new(0, 0, size * TILE_SIZE, size * TILE_SIZE);

        for (col, row, cell) in grid.iter() {
            let kind = match cell {
                Cell::Brick => WallKind::Brick,
                Cell::Steel => WallKind::Steel,
                Cell::Empty | Cell::PlayerSpawn => continue,
            };
            self.walls.push(Wall::new(col as i32, row as i32, kind));
        }

        let spawn = grid.spawn().unwrap_or_else(|| {
            log::warn!("Level {} has no player spawn, using {}", level, FALLBACK_SPAWN);
            FALLBACK_SPAWN
        });
        self.player.respawn_at(spawn.x, spawn.y);

        self.enemies = place_enemies(grid, spawn, config.enemies, &mut self.rng);
        if self.enemies.len() < config.enemies {
            log::warn!(
                "Level {}: placed {}/{} enemies",
                level,
                self.enemies.len(),
                config.enemies
            );
        }

        self.level_started_at = now_secs;
        self.screen = Screen::Playing;
        self.events.push(GameEvent::LevelStarted { level });
        log::info!(
            "Level {} started: {} walls, {} enemies, spawn {}",
            level,
            self.walls.len(),
            self.enemies.len(),
            spawn
        );
    }
}

/// Scatter up to `count` enemies on empty interior cells away from `spawn`.
///
/// Draws a bounded number of random cells, so a crowded grid yields fewer
/// enemies rather than looping.
pub fn place_enemies<R: Rng + ?Sized>(
    grid: &Grid,
    spawn: IVec2,
    count: usize,
    rng: &mut R,
) -> Vec<Tank> {
    let mut enemies: Vec<Tank> = Vec::with_capacity(count);
    if grid.size() < 3 {
        return enemies;
    }

    let max = grid.size() - 2;
    let mut attempts = 0;
    while enemies.len() < count && attempts < ENEMY_PLACEMENT_ATTEMPTS {
        attempts += 1;
        let col = rng.random_range(1..=max);
        let row = rng.random_range(1..=max);
        if grid.get(col, row) != Some(Cell::Empty) {
            continue;
        }

        let cell = IVec2::new(col as i32, row as i32);
        let distance = (cell - spawn).abs().element_sum();
        if distance <= ENEMY_SPAWN_CLEARANCE {
            continue;
        }

        let candidate = Tank::enemy(cell.x, cell.y);
        if enemies.iter().any(|e| e.rect.overlaps(&candidate.rect)) {
            continue;
        }
        enemies.push(candidate);
    }
    enemies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile_to_pixel;

    fn open_grid(size: usize) -> Grid {
        let mut grid = Grid::filled(size, Cell::Empty);
        for i in 0..size {
            grid.set(i, 0, Cell::Steel);
            grid.set(i, size - 1, Cell::Steel);
            grid.set(0, i, Cell::Steel);
            grid.set(size - 1, i, Cell::Steel);
        }
        grid.set(size / 2, size - 2, Cell::PlayerSpawn);
        grid
    }

    #[test]
    fn test_level_config_table() {
        assert_eq!(level_config(0), None);
        assert_eq!(level_config(1), Some(LevelConfig { size: 20, enemies: 4 }));
        assert_eq!(level_config(3).map(|c| c.enemies), Some(9));
        assert_eq!(level_config(4), None);
        assert_eq!(final_level(), 3);
    }

    #[test]
    fn test_start_level_builds_world() {
        let mut session = GameSession::new(42, NO_RECORD);
        let grid = open_grid(20);
        session.start_level(1, &grid, 10.0);

        assert_eq!(session.screen, Screen::Playing);
        assert_eq!(session.walls.len(), 76);
        assert_eq!(session.enemies.len(), 4);
        assert_eq!(session.player.rect.pos, tile_to_pixel(10, 18));
        assert_eq!(session.playfield, Rect::new(0, 0, 1000, 1000));
        assert_eq!(session.level_started_at, 10.0);
        assert_eq!(session.drain_events(), vec![GameEvent::LevelStarted { level: 1 }]);
    }

    #[test]
    fn test_enemies_keep_clear_of_spawn() {
        let mut rng = Pcg32::seed_from_u64(5);
        let grid = open_grid(20);
        let spawn = IVec2::new(10, 18);
        let enemies = place_enemies(&grid, spawn, 9, &mut rng);
        assert_eq!(enemies.len(), 9);
        for (i, enemy) in enemies.iter().enumerate() {
            let cell = enemy.rect.pos / TILE_SIZE;
            assert!((cell - spawn).abs().element_sum() > ENEMY_SPAWN_CLEARANCE);
            assert_eq!(grid.get(cell.x as usize, cell.y as usize), Some(Cell::Empty));
            for other in &enemies[i + 1..] {
                assert!(!enemy.rect.overlaps(&other.rect));
            }
        }
    }

    #[test]
    fn test_placement_gives_up_on_full_grid() {
        let mut rng = Pcg32::seed_from_u64(5);
        let grid = Grid::filled(20, Cell::Brick);
        assert!(place_enemies(&grid, IVec2::new(10, 18), 4, &mut rng).is_empty());
    }

    #[test]
    fn test_missing_spawn_falls_back() {
        let mut session = GameSession::new(1, NO_RECORD);
        let grid = Grid::filled(20, Cell::Empty);
        session.start_level(2, &grid, 0.0);
        assert_eq!(session.player.rect.pos, tile_to_pixel(1, 1));
        assert_eq!(session.level, 2);
    }

    #[test]
    fn test_player_carries_over_between_levels() {
        let mut session = GameSession::new(9, NO_RECORD);
        let grid = open_grid(20);
        session.start_level(1, &grid, 0.0);
        session.player.take_damage(1);
        session.player.damage_modifier = 2;

        session.start_level(2, &grid, 5.0);
        assert_eq!(session.player.hp, PLAYER_HP - 1);
        assert_eq!(session.player.damage_modifier, 2);

        session.reset_run();
        assert_eq!(session.player.hp, PLAYER_HP);
        assert_eq!(session.player.damage_modifier, 0);
    }

    #[test]
    fn test_unknown_level_is_a_win() {
        let mut session = GameSession::new(1, NO_RECORD);
        session.start_level(4, &open_grid(20), 0.0);
        assert_eq!(session.screen, Screen::Win);
    }
}
