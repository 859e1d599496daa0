//! Platform abstraction layer
//!
//! The game core never talks to a window directly. This module defines the
//! seams a front end plugs into:
//! - Input events (`InputSource`)
//! - Drawing (`Presenter`)
//! - Time (`Clock`)

pub mod headless;
pub mod input;
pub mod time;

pub use headless::LogPresenter;
pub use input::{InputEvent, InputSource, Key, ScriptedInput};
pub use time::{Clock, FrameGate, ManualClock, SystemClock};

use crate::renderer::Frame;

/// Receives one finished frame of draw commands per processed frame
pub trait Presenter {
    fn present(&mut self, frame: &Frame);
}
