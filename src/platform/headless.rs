//! Headless presenter that reports frames through the log

use super::Presenter;
use crate::renderer::Frame;

/// Counts frames and logs the on-screen text whenever it changes
#[derive(Debug, Clone, Default)]
pub struct LogPresenter {
    frames: u64,
    last_text: Vec<String>,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Labels of the most recent frame
    pub fn last_text(&self) -> &[String] {
        &self.last_text
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        let text: Vec<String> = frame.texts().map(String::from).collect();
        if text != self.last_text {
            log::info!("[frame {}] {}", self.frames, text.join(" | "));
            self.last_text = text;
        }
        log::trace!("frame {}: {} blocks", self.frames, frame.block_count());
    }
}
