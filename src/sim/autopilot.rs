//! Demo mode: a simple bot that produces tick input
//!
//! It confirms through menus, lines up with the nearest enemy and fires.
//! The gun is always held since it also clears bricks along the way.

use glam::IVec2;

use super::screen::Screen;
use super::state::GameSession;
use super::tick::TickInput;

/// Centres closer than this on an axis count as lined up for a shot
const LINE_UP: i32 = 12;
/// Ticks between swaps of the preferred approach axis
const AXIS_SWAP_TICKS: u64 = 120;

/// Input for the next tick
pub fn autopilot_input(session: &GameSession) -> TickInput {
    match session.screen {
        Screen::Menu | Screen::LevelComplete => {
            return TickInput {
                confirm: true,
                ..Default::default()
            };
        }
        Screen::GameOver | Screen::Win => return TickInput::default(),
        Screen::Playing => {}
    }

    let me = session.player.rect.center();
    let Some(target) = session
        .enemies
        .iter()
        .map(|e| e.rect.center())
        .min_by_key(|c| (*c - me).abs().element_sum())
    else {
        return TickInput::default();
    };

    let delta = target - me;
    let movement = if delta.x.abs() < LINE_UP {
        aim(session, IVec2::new(0, delta.y.signum()))
    } else if delta.y.abs() < LINE_UP {
        aim(session, IVec2::new(delta.x.signum(), 0))
    } else {
        // Close the shorter gap first, but alternate now and then so a
        // wall on one axis does not pin the bot forever.
        let prefer_x = delta.x.abs() < delta.y.abs();
        let swap = (session.time_ticks / AXIS_SWAP_TICKS) % 3 == 2;
        if prefer_x != swap {
            IVec2::new(delta.x.signum(), 0)
        } else {
            IVec2::new(0, delta.y.signum())
        }
    };

    TickInput {
        movement,
        shoot: true,
        confirm: false,
    }
}

/// Turn toward `want` if not already facing it; otherwise hold still
fn aim(session: &GameSession, want: IVec2) -> IVec2 {
    if session.player.facing.vector() == want {
        IVec2::ZERO
    } else {
        want
    }
}
