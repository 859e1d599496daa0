//! Block Breaker - a classic Breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, blocks, collisions)
//! - `machine`: Stack of game modes driven by a frame-gated scheduler
//! - `level`: Level grids and the loaders that produce them
//! - `renderer`: Draw-command frames for an external presenter
//! - `platform`: Input events, presenters and clocks
//! - `settings`: JSON configuration

pub mod autopilot;
pub mod level;
pub mod machine;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use level::{FileLevelLoader, LevelError, LevelGrid, LevelLoader, LevelSet, MemoryLevelLoader};
pub use machine::{GameMode, Machine, StartupError};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const WINDOW_WIDTH: i32 = 800;
    pub const WINDOW_HEIGHT: i32 = 600;
    pub const WINDOW_CAPTION: &str = "Block Breaker";

    /// Milliseconds between processed frames (~30 FPS)
    pub const FRAME_RATE_MS: u64 = 1000 / 30;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 100;
    pub const PADDLE_HEIGHT: i32 = 20;
    pub const PLAYER_Y: i32 = 550;
    pub const PLAYER_SPEED: i32 = 10;

    /// Ball defaults
    pub const BALL_DIAMETER: i32 = 16;
    /// Vertical speed given to a docked ball on launch
    pub const BALL_SPEED_Y: i32 = 10;
    /// Paddle offset is divided by this to get the new horizontal speed
    pub const BALL_SPEED_MODIFIER: i32 = 5;

    /// Block grid
    pub const BLOCK_WIDTH: i32 = 80;
    pub const BLOCK_HEIGHT: i32 = 20;
    pub const BLOCK_SCREEN_BUFFER: i32 = 40;
    pub const NUM_ROWS: usize = 6;
    pub const NUM_COLS: usize = 9;
    /// Highest hit count a block can start with
    pub const MAX_BLOCK_HITS: u8 = 4;

    /// Session defaults
    pub const NUM_LIVES: u32 = 5;
    pub const NUM_LEVELS: u32 = 3;

    /// HUD label positions
    pub const LIVES_X: i32 = 10;
    pub const LIVES_Y: i32 = 5;
    pub const LEVEL_X: i32 = 75;
    pub const LEVEL_Y: i32 = 5;
}
