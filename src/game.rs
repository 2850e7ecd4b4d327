//! Frame driver
//!
//! Owns the session, the level store and the clock. Each frame it applies a
//! confirm press to the current screen, runs one simulation tick and records
//! the best time when a run is won.

use crate::persistence::{LevelStore, StoreResult};
use crate::platform::Clock;
use crate::sim::{ConfirmAction, GameEvent, GameSession, Screen, TickInput, TickOutcome, level_config, tick};
use crate::ui::FrameView;

pub struct Game<C: Clock> {
    session: GameSession,
    store: LevelStore,
    clock: C,
    /// Screen seen at the end of the previous frame, for transition logs
    last_screen: Screen,
}

impl<C: Clock> Game<C> {
    /// Make sure every level file exists and read the stored best time
    pub fn new(mut store: LevelStore, clock: C, seed: u64) -> StoreResult<Self> {
        let generated = store.ensure_levels()?;
        if generated > 0 {
            log::info!("Generated {} missing level files", generated);
        }
        let best_time = store.load_highscore();
        log::info!("Session seed {}, best time {:.2}", seed, best_time);

        Ok(Self {
            session: GameSession::new(seed, best_time),
            store,
            clock,
            last_screen: Screen::Menu,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn store(&self) -> &LevelStore {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now_secs(&self) -> f64 {
        self.clock.now_secs()
    }

    /// Borrowed snapshot for renderers
    pub fn view(&self) -> FrameView<'_> {
        FrameView::capture(&self.session, self.now_secs())
    }

    /// Run one frame
    pub fn frame(&mut self, input: &TickInput) -> StoreResult<TickOutcome> {
        if input.confirm {
            self.confirm()?;
        }

        let now = self.clock.now_secs();
        let outcome = tick(&mut self.session, input, now);
        if let TickOutcome::Victory { total_time } = outcome {
            self.record_run(total_time);
        }

        if self.session.screen != self.last_screen {
            log::info!(
                "Screen {} -> {}",
                self.last_screen.as_str(),
                self.session.screen.as_str()
            );
            self.last_screen = self.session.screen;
        }
        Ok(outcome)
    }

    fn confirm(&mut self) -> StoreResult<()> {
        match self.session.screen.on_confirm() {
            ConfirmAction::StartRun => {
                self.session.reset_run();
                self.load_and_start(1)
            }
            ConfirmAction::NextLevel => {
                let next = self.session.level + 1;
                if level_config(next).is_none() {
                    self.session.screen = Screen::Win;
                    return Ok(());
                }
                self.load_and_start(next)
            }
            ConfirmAction::ReturnToMenu => {
                self.session.return_to_menu();
                Ok(())
            }
            ConfirmAction::Ignore => Ok(()),
        }
    }

    fn load_and_start(&mut self, level: u32) -> StoreResult<()> {
        let grid = self.store.load_level(level)?;
        let now = self.clock.now_secs();
        self.session.start_level(level, &grid, now);
        Ok(())
    }

    /// Save the run time if it is a new best. A failed write costs the
    /// record, not the run.
    fn record_run(&mut self, total_time: f64) {
        match self.store.save_highscore(total_time) {
            Ok(true) => {
                self.session.best_time = self.session.best_time.min(total_time);
                self.session.events.push(GameEvent::NewRecord { time: total_time });
                log::info!("New best time {:.2}s", total_time);
            }
            Ok(false) => log::info!(
                "Run finished in {:.2}s, record stays {:.2}s",
                total_time,
                self.session.best_time
            ),
            Err(e) => log::warn!("Could not save best time {:.2}s: {}", total_time, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NO_RECORD;
    use crate::platform::ManualClock;

    fn game(dir: &std::path::Path) -> Game<ManualClock> {
        let store = LevelStore::new(dir.join("levels"), dir.join("highscore.txt"), 3);
        Game::new(store, ManualClock::new(0.0), 11).unwrap()
    }

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_prepares_levels() {
        let dir = tempfile::tempdir().unwrap();
        let game = game(dir.path());
        assert!(game.store().level_path(1).exists());
        assert!(game.store().level_path(3).exists());
        assert_eq!(game.session().best_time, NO_RECORD);
        assert_eq!(game.session().screen, Screen::Menu);
    }

    #[test]
    fn test_confirm_starts_and_is_ignored_while_playing() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game(dir.path());
        game.clock().set(5.0);

        game.frame(&confirm()).unwrap();
        assert_eq!(game.session().screen, Screen::Playing);
        assert_eq!(game.session().level, 1);
        assert_eq!(game.session().level_started_at, 5.0);

        game.frame(&confirm()).unwrap();
        assert_eq!(game.session().screen, Screen::Playing);
        assert_eq!(game.session().level, 1);
    }

    #[test]
    fn test_victory_records_best_time() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game(dir.path());
        game.frame(&confirm()).unwrap();

        let session = game.session_mut();
        session.level = 3;
        session.total_time = 40.0;
        session.level_started_at = 0.0;
        session.enemies.clear();
        game.clock().set(20.0);

        let outcome = game.frame(&TickInput::default()).unwrap();
        assert_eq!(outcome, TickOutcome::Victory { total_time: 60.0 });
        assert_eq!(game.session().best_time, 60.0);
        assert_eq!(game.store().load_highscore(), 60.0);
        assert!(game
            .session()
            .events
            .contains(&GameEvent::NewRecord { time: 60.0 }));
    }

    #[test]
    fn test_unwritable_record_keeps_the_win() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the record file should be makes every write fail
        let record = dir.path().join("highscore.txt");
        std::fs::create_dir_all(&record).unwrap();
        let store = LevelStore::new(dir.path().join("levels"), &record, 3);
        let mut game = Game::new(store, ManualClock::new(0.0), 11).unwrap();
        game.frame(&confirm()).unwrap();

        let session = game.session_mut();
        session.level = 3;
        session.enemies.clear();
        game.clock().set(15.0);

        let outcome = game.frame(&TickInput::default()).unwrap();
        assert_eq!(outcome, TickOutcome::Victory { total_time: 15.0 });
        assert_eq!(game.session().screen, Screen::Win);
        assert_eq!(game.session().best_time, NO_RECORD);
        assert!(
            !game
                .session()
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::NewRecord { .. }))
        );

        game.frame(&confirm()).unwrap();
        assert_eq!(game.session().screen, Screen::Menu);
    }
}
