//! Deterministic simulation module
//!
//! All Playing-mode logic lives here. This module must stay pure:
//! - One fixed step per processed frame
//! - Integer pixel math only
//! - No rendering, input or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{StruckEdges, ball_hits_paddle, paddle_deflection, scan_blocks};
pub use rect::Rect;
pub use state::{Ball, Block, BlockArena, BlockColor, GameEvent, GameState, HitResult, Paddle, Rules};
pub use tick::{TickInput, tick};
