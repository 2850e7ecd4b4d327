//! World entities: walls, tanks, projectiles and pickups
//!
//! Tanks are one struct with a role. Player and enemy share position, facing,
//! hit-points and the gun; the role carries what only one of them needs.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{first_overlap, move_with_clamp};
use super::rect::Rect;
use crate::consts::*;
use crate::tile_to_pixel;

/// Cardinal facing of a tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    /// Unit vector in screen space (+y is down)
    pub fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    fn from_x(x: i32) -> Option<Self> {
        match x.signum() {
            1 => Some(Direction::Right),
            -1 => Some(Direction::Left),
            _ => None,
        }
    }

    fn from_y(y: i32) -> Option<Self> {
        match y.signum() {
            1 => Some(Direction::Down),
            -1 => Some(Direction::Up),
            _ => None,
        }
    }

    /// Facing that results from a movement intent.
    ///
    /// A zero component leaves the other axis in charge. A diagonal intent
    /// keeps `current` if it is one of the two candidates, otherwise the
    /// horizontal one wins. No intent keeps `current`.
    pub fn from_intent(delta: IVec2, current: Direction) -> Direction {
        match (Self::from_x(delta.x), Self::from_y(delta.y)) {
            (Some(h), None) => h,
            (None, Some(v)) => v,
            (Some(h), Some(v)) => {
                if current == h || current == v {
                    current
                } else {
                    h
                }
            }
            (None, None) => current,
        }
    }
}

/// Wall material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    Brick,
    Steel,
}

/// What a single hit did to a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHit {
    /// Steel: nothing happens
    Absorbed,
    /// Brick lost a hit-point but still stands
    Damaged,
    /// Brick ran out of hit-points and must be removed
    Destroyed,
}

/// A tile-aligned obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    /// Grid cell (column, row)
    pub cell: IVec2,
    pub rect: Rect,
    pub kind: WallKind,
    pub hp: i32,
    /// Cosmetic cracked look for a brick on its last hit-point
    pub damaged: bool,
}

impl Wall {
    pub fn new(col: i32, row: i32, kind: WallKind) -> Self {
        let hp = match kind {
            WallKind::Brick => BRICK_HP,
            WallKind::Steel => STEEL_HP,
        };
        Self {
            cell: IVec2::new(col, row),
            rect: Rect {
                pos: tile_to_pixel(col, row),
                size: IVec2::splat(TILE_SIZE),
            },
            kind,
            hp,
            damaged: false,
        }
    }

    pub fn hit(&mut self) -> WallHit {
        if self.kind == WallKind::Steel {
            return WallHit::Absorbed;
        }
        self.hp -= 1;
        if self.hp == 1 {
            self.damaged = true;
        }
        if self.hp <= 0 {
            WallHit::Destroyed
        } else {
            WallHit::Damaged
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp <= 0
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// Movement state only enemies carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyBrain {
    /// Tick time (ms) of the last direction decision; `None` forces a new one
    pub move_timer_ms: Option<u64>,
    pub move_delay_ms: u64,
    /// Unit vector the enemy is currently trying to move along
    pub current_move: IVec2,
}

impl Default for EnemyBrain {
    fn default() -> Self {
        Self {
            move_timer_ms: None,
            move_delay_ms: ENEMY_MOVE_DELAY_MS,
            current_move: IVec2::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TankRole {
    Player {
        /// Top-left pixel of the spawn tile for the current level
        spawn: IVec2,
    },
    Enemy(EnemyBrain),
}

/// Result of a [`Tank::move_by`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    /// Position changed
    pub moved: bool,
    /// Facing changed, the barrel needs redrawing
    pub turned: bool,
}

/// A tank, player or enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub rect: Rect,
    pub facing: Direction,
    pub hp: i32,
    /// Tick time (ms) of the last shot; `None` until the first shot
    pub last_shot_ms: Option<u64>,
    /// Added to the base projectile damage of 1
    pub damage_modifier: i32,
    pub role: TankRole,
}

impl Tank {
    fn at_tile(col: i32, row: i32, hp: i32, role: TankRole) -> Self {
        Self {
            rect: Rect {
                pos: tile_to_pixel(col, row),
                size: IVec2::splat(TILE_SIZE),
            },
            facing: Direction::Up,
            hp,
            last_shot_ms: None,
            damage_modifier: 0,
            role,
        }
    }

    pub fn player(col: i32, row: i32) -> Self {
        let spawn = tile_to_pixel(col, row);
        Self::at_tile(col, row, PLAYER_HP, TankRole::Player { spawn })
    }

    pub fn enemy(col: i32, row: i32) -> Self {
        Self::at_tile(col, row, ENEMY_HP, TankRole::Enemy(EnemyBrain::default()))
    }

    pub fn owner(&self) -> Owner {
        match self.role {
            TankRole::Player { .. } => Owner::Player,
            TankRole::Enemy(_) => Owner::Enemy,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Put the tank back on a spawn tile, keeping hit-points and modifiers
    pub fn respawn_at(&mut self, col: i32, row: i32) {
        let spawn = tile_to_pixel(col, row);
        self.rect.pos = spawn;
        self.facing = Direction::Up;
        self.last_shot_ms = None;
        if let TankRole::Player { spawn: origin } = &mut self.role {
            *origin = spawn;
        }
    }

    /// Move by `delta` pixels, horizontal first, clamping against obstacles.
    ///
    /// `obstacles` must not contain the tank itself.
    pub fn move_by(&mut self, delta: IVec2, obstacles: &[Rect]) -> MoveResult {
        let before = self.rect.pos;
        self.rect = move_with_clamp(self.rect, delta, obstacles);

        let facing = Direction::from_intent(delta, self.facing);
        let turned = facing != self.facing;
        self.facing = facing;

        MoveResult {
            moved: self.rect.pos != before,
            turned,
        }
    }

    pub fn can_shoot(&self, now_ms: u64) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > SHOOT_DELAY_MS,
        }
    }

    /// Fire one projectile from the tank centre if the cooldown allows
    pub fn shoot(&mut self, now_ms: u64, projectiles: &mut Vec<Projectile>) -> bool {
        if !self.can_shoot(now_ms) {
            return false;
        }
        projectiles.push(Projectile::new(
            self.rect.center(),
            self.facing,
            self.owner(),
            1 + self.damage_modifier,
        ));
        self.last_shot_ms = Some(now_ms);
        true
    }

    /// Restore hit-points, never above the player maximum
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(PLAYER_HP);
    }

    /// Take `amount` damage; hit-points floor at zero
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    pub fn apply_pickup(&mut self, kind: PickupKind) {
        match kind {
            PickupKind::Heart => self.heal(1),
            PickupKind::Sword => self.damage_modifier += 1,
        }
    }

    /// Barrel rectangle in world space, pointing along the facing
    pub fn barrel_rect(&self) -> Rect {
        const WIDTH: i32 = 10;
        const LENGTH: i32 = 20;
        let half = TILE_SIZE / 2 - WIDTH / 2;
        let local = match self.facing {
            Direction::Up => Rect::new(half, 0, WIDTH, LENGTH),
            Direction::Down => Rect::new(half, TILE_SIZE - LENGTH, WIDTH, LENGTH),
            Direction::Right => Rect::new(TILE_SIZE - LENGTH, half, LENGTH, WIDTH),
            Direction::Left => Rect::new(0, half, LENGTH, WIDTH),
        };
        local.translated(self.rect.pos)
    }
}

/// What ended a projectile during [`Projectile::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileImpact {
    /// Still flying
    None,
    /// Left the playfield
    OutOfBounds,
    /// Struck the wall at `index`
    Wall { index: usize, outcome: WallHit },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    pub dir: IVec2,
    pub speed: i32,
    pub owner: Owner,
    pub damage: i32,
}

impl Projectile {
    pub fn new(center: IVec2, facing: Direction, owner: Owner, damage: i32) -> Self {
        Self {
            rect: Rect::centered(center, IVec2::splat(PROJECTILE_SIZE)),
            dir: facing.vector(),
            speed: PROJECTILE_SPEED,
            owner,
            damage,
        }
    }

    /// Advance one tick and resolve bounds and wall contact.
    ///
    /// Only the first overlapping wall is hit. Destroyed walls are left in
    /// the slice for the caller to remove.
    pub fn update(&mut self, walls: &mut [Wall], bounds: &Rect) -> ProjectileImpact {
        self.rect = self.rect.translated(self.dir * self.speed);

        if !bounds.contains_rect(&self.rect) {
            return ProjectileImpact::OutOfBounds;
        }

        match first_overlap(&self.rect, walls.iter().map(|w| &w.rect)) {
            Some(index) => ProjectileImpact::Wall {
                index,
                outcome: walls[index].hit(),
            },
            None => ProjectileImpact::None,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// +1 hit-point, capped
    Heart,
    /// +1 damage modifier
    Sword,
}

impl PickupKind {
    pub fn score(self) -> u64 {
        match self {
            PickupKind::Heart => HEART_SCORE,
            PickupKind::Sword => SWORD_SCORE,
        }
    }

    /// Drop roll for a destroyed enemy: 30% Heart, 20% Sword, else nothing
    pub fn roll_drop<R: Rng + ?Sized>(rng: &mut R) -> Option<Self> {
        let roll: f64 = rng.random();
        if roll < 0.30 {
            Some(PickupKind::Heart)
        } else if roll < 0.50 {
            Some(PickupKind::Sword)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub rect: Rect,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn new(center: IVec2, kind: PickupKind) -> Self {
        Self {
            rect: Rect::centered(center, IVec2::splat(PICKUP_SIZE)),
            kind,
        }
    }
}
