//! Battle City entry point
//!
//! Runs the game headless at a fixed frame rate with the demo autopilot at
//! the controls. Progress goes to the log; set `RUST_LOG=debug` to also get
//! per-entity events and the final frame as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use battle_city::Game;
use battle_city::Settings;
use battle_city::persistence::LevelStore;
use battle_city::platform::{FramePacer, SystemClock};
use battle_city::sim::{Screen, autopilot_input};
use battle_city::ui::Hud;

/// Frames between HUD log lines
const HUD_LOG_INTERVAL: u64 = 300;

#[derive(Parser, Debug)]
#[command(name = "battle-city", version, about = "Top-down tank battle on a tile grid")]
struct Args {
    /// JSON settings file
    #[arg(short, long, default_value = "settings.json")]
    settings: PathBuf,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// Target frame rate
    #[arg(long)]
    fps: Option<u32>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings = Settings::load(&args.settings);
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(frames) = args.frames {
        settings.max_frames = Some(frames);
    }
    if let Some(fps) = args.fps {
        settings.target_fps = fps;
    }

    let seed = settings.resolve_seed();
    log::info!("Battle City starting (seed {})", seed);

    let store = LevelStore::new(&settings.levels_dir, &settings.highscore_path, seed);
    let mut game = match Game::new(store, SystemClock::new(), seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to prepare levels: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut pacer = FramePacer::new(settings.target_fps);
    let mut frame = 0u64;
    let mut started = false;

    loop {
        let input = autopilot_input(game.session());
        if let Err(e) = game.frame(&input) {
            log::error!("Level store failure: {}", e);
            return ExitCode::FAILURE;
        }
        frame += 1;

        for event in game.session_mut().drain_events() {
            log::debug!("{:?}", event);
        }

        let screen = game.session().screen;
        started |= screen == Screen::Playing;
        if frame % HUD_LOG_INTERVAL == 0 && screen == Screen::Playing {
            log::info!("{}", Hud::from_session(game.session(), game.now_secs()).line());
        }

        let finished = started && matches!(screen, Screen::Win | Screen::GameOver);
        let out_of_frames = settings.max_frames.is_some_and(|max| frame >= max);
        if finished || out_of_frames {
            break;
        }
        pacer.wait();
    }

    let session = game.session();
    log::info!(
        "Stopped after {} frames on {} (level {}, score {})",
        frame,
        session.screen.as_str(),
        session.level,
        session.score
    );
    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&game.view()) {
            Ok(json) => log::debug!("Final frame: {}", json),
            Err(e) => log::warn!("Could not serialize final frame: {}", e),
        }
    }
    ExitCode::SUCCESS
}
