//! Top-level screens and the confirm-driven transitions between them

use serde::{Deserialize, Serialize};

/// Current screen of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    /// Title screen, waiting for confirm
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// A level was cleared, waiting for confirm to load the next one
    LevelComplete,
    /// The player ran out of hit-points
    GameOver,
    /// The final level was cleared
    Win,
}

/// What a confirm press should do on a given screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Reset level, score and time, then load level 1
    StartRun,
    /// Load the level after the current one
    NextLevel,
    ReturnToMenu,
    Ignore,
}

impl Screen {
    pub fn on_confirm(self) -> ConfirmAction {
        match self {
            Screen::Menu => ConfirmAction::StartRun,
            Screen::LevelComplete => ConfirmAction::NextLevel,
            Screen::GameOver | Screen::Win => ConfirmAction::ReturnToMenu,
            Screen::Playing => ConfirmAction::Ignore,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Menu => "MENU",
            Screen::Playing => "PLAYING",
            Screen::LevelComplete => "LEVEL_COMPLETE",
            Screen::GameOver => "GAME_OVER",
            Screen::Win => "WIN",
        }
    }
}
