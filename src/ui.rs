//! HUD and banner data
//!
//! Renderers draw from these; nothing here touches pixels.

use serde::Serialize;

use crate::highscores::is_displayable;
use crate::sim::{GameSession, Pickup, Projectile, Rect, Screen, Tank, Wall};

/// Status strip shown while playing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    /// Player hit-points, one heart each
    pub lives: i32,
    pub score: u64,
    pub level: u32,
    /// Run time so far: cleared levels plus the current one
    pub elapsed_secs: f64,
}

impl Hud {
    pub fn from_session(session: &GameSession, now_secs: f64) -> Self {
        Self {
            lives: session.player.hp,
            score: session.score,
            level: session.level,
            elapsed_secs: session.total_time + session.level_elapsed(now_secs),
        }
    }

    /// Single-line text form, e.g. for a terminal status line
    pub fn line(&self) -> String {
        format!(
            "Lives: {} | Score: {} | Level: {} | Time: {}s",
            self.lives,
            self.score,
            self.level,
            self.elapsed_secs as u64
        )
    }
}

/// Full-screen message for every screen except PLAYING
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub title: String,
    pub subtitle: &'static str,
    /// Score and run time, on level clear and victory
    pub stats: Option<String>,
    /// Best recorded time, on victory when one exists
    pub best: Option<String>,
}

impl Banner {
    pub fn for_session(session: &GameSession) -> Option<Self> {
        let stats = || {
            Some(format!(
                "Score: {} | Time: {:.2}s",
                session.score, session.total_time
            ))
        };

        let banner = match session.screen {
            Screen::Playing => return None,
            Screen::Menu => Self {
                title: "BATTLE CITY".to_string(),
                subtitle: "Press ENTER to start",
                stats: None,
                best: None,
            },
            Screen::LevelComplete => Self {
                title: format!("LEVEL {} CLEARED", session.level),
                subtitle: "Press ENTER for next level",
                stats: stats(),
                best: None,
            },
            Screen::GameOver => Self {
                title: "GAME OVER".to_string(),
                subtitle: "Press ENTER to main menu",
                stats: None,
                best: None,
            },
            Screen::Win => Self {
                title: "VICTORY!".to_string(),
                subtitle: "Press ENTER",
                stats: stats(),
                best: is_displayable(session.best_time)
                    .then(|| format!("Best Record: {:.2}s", session.best_time)),
            },
        };
        Some(banner)
    }
}

/// Everything a renderer needs for one frame, borrowed from the session
#[derive(Debug, Serialize)]
pub struct FrameView<'a> {
    pub screen: Screen,
    pub playfield: Rect,
    pub hud: Hud,
    pub banner: Option<Banner>,
    pub player: &'a Tank,
    pub enemies: &'a [Tank],
    pub walls: &'a [Wall],
    pub projectiles: &'a [Projectile],
    pub pickups: &'a [Pickup],
}

impl<'a> FrameView<'a> {
    pub fn capture(session: &'a GameSession, now_secs: f64) -> Self {
        Self {
            screen: session.screen,
            playfield: session.playfield,
            hud: Hud::from_session(session, now_secs),
            banner: Banner::for_session(session),
            player: &session.player,
            enemies: &session.enemies,
            walls: &session.walls,
            projectiles: &session.projectiles,
            pickups: &session.pickups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{NO_RECORD, PLAYER_HP};
    use crate::sim::Grid;
    use crate::sim::grid::Cell;

    fn playing(seed: u64) -> GameSession {
        let mut session = GameSession::new(seed, NO_RECORD);
        let mut grid = Grid::filled(20, Cell::Empty);
        grid.set(10, 18, Cell::PlayerSpawn);
        session.start_level(1, &grid, 100.0);
        session
    }

    #[test]
    fn test_hud_adds_current_level_time() {
        let mut session = playing(3);
        session.total_time = 20.0;
        session.score = 250;

        let hud = Hud::from_session(&session, 112.5);
        assert_eq!(hud.lives, PLAYER_HP);
        assert_eq!(hud.elapsed_secs, 32.5);
        assert_eq!(hud.line(), "Lives: 3 | Score: 250 | Level: 1 | Time: 32s");

        session.screen = Screen::LevelComplete;
        assert_eq!(Hud::from_session(&session, 112.5).elapsed_secs, 20.0);
    }

    #[test]
    fn test_banner_per_screen() {
        let mut session = GameSession::new(1, NO_RECORD);
        let menu = Banner::for_session(&session).unwrap();
        assert_eq!(menu.title, "BATTLE CITY");
        assert_eq!(menu.subtitle, "Press ENTER to start");

        session.screen = Screen::Playing;
        assert!(Banner::for_session(&session).is_none());

        session.screen = Screen::LevelComplete;
        session.level = 2;
        session.score = 400;
        session.total_time = 41.239;
        let cleared = Banner::for_session(&session).unwrap();
        assert_eq!(cleared.title, "LEVEL 2 CLEARED");
        assert_eq!(cleared.stats.as_deref(), Some("Score: 400 | Time: 41.24s"));
        assert!(cleared.best.is_none());

        session.screen = Screen::GameOver;
        assert_eq!(
            Banner::for_session(&session).unwrap().subtitle,
            "Press ENTER to main menu"
        );
    }

    #[test]
    fn test_victory_best_record_only_when_real() {
        let mut session = GameSession::new(1, NO_RECORD);
        session.screen = Screen::Win;
        assert!(Banner::for_session(&session).unwrap().best.is_none());

        session.best_time = 75.5;
        let win = Banner::for_session(&session).unwrap();
        assert_eq!(win.title, "VICTORY!");
        assert_eq!(win.best.as_deref(), Some("Best Record: 75.50s"));
    }

    #[test]
    fn test_frame_view_serializes() {
        let session = playing(8);
        let view = FrameView::capture(&session, 101.0);
        assert_eq!(view.enemies.len(), 4);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["screen"], "Playing");
        assert_eq!(json["hud"]["level"], 1);
        assert!(json["banner"].is_null());
        assert_eq!(json["enemies"].as_array().map(|a| a.len()), Some(4));
    }
}
