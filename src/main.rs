//! Block Breaker entry point
//!
//! Runs the game headlessly with the autopilot at the controls. Usage:
//!
//! ```text
//! block-breaker [settings.json] [frame-limit]
//! ```
//!
//! `RUST_LOG=info` shows mode changes and HUD text as the game plays.

use std::path::PathBuf;
use std::process::ExitCode;

use block_breaker::autopilot::AutoPilot;
use block_breaker::consts::WINDOW_CAPTION;
use block_breaker::platform::{LogPresenter, SystemClock};
use block_breaker::{FileLevelLoader, LevelSet, Machine, Settings};

/// Frames the autopilot plays before closing the window (15 minutes at
/// 30 FPS, long enough to play through the bundled levels)
const DEFAULT_FRAME_LIMIT: u64 = 30 * 60 * 15;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("{} starting...", WINDOW_CAPTION);

    let mut args = std::env::args().skip(1);
    let settings_path = PathBuf::from(args.next().unwrap_or_else(|| "settings.json".to_string()));
    let frame_limit = match args.next().map(|s| s.parse::<u64>()) {
        None => DEFAULT_FRAME_LIMIT,
        Some(Ok(limit)) => limit,
        Some(Err(e)) => {
            log::error!("Invalid frame limit: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let settings = match Settings::load_or_default(&settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let loader = FileLevelLoader::new(&settings.level_dir);
    log::info!("Loading {} levels from {}", settings.level_count, loader.dir().display());
    let levels = match LevelSet::load_all(&loader, settings.level_count) {
        Ok(levels) => levels,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut machine = match Machine::new(&settings, levels) {
        Ok(machine) => machine,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let clock = SystemClock::new();
    let mut pilot = AutoPilot::new().with_frame_limit(frame_limit);
    let mut presenter = LogPresenter::new();

    log::info!("Running with frame interval {} ms", settings.frame_interval_ms);
    while machine.is_running() {
        pilot.observe(&machine);
        machine.step(&clock, &mut pilot, &mut presenter);
        std::thread::yield_now();
    }

    log::info!("{} finished after {} frames", WINDOW_CAPTION, presenter.frames());
    ExitCode::SUCCESS
}
