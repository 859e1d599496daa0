//! Draw-command frames handed to a presenter

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::sim::{BlockColor, Rect};

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const WHITE: Rgb = [255, 255, 255];
pub const HUD_GREEN: Rgb = [66, 239, 16];

/// Sprites drawn from the game's sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Paddle,
    Ball,
}

/// A single drawing operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: Rgb },
    Sprite { sprite: Sprite, rect: Rect },
    Block { rect: Rect, color: BlockColor },
    Text {
        text: String,
        pos: IVec2,
        size: u32,
        fg: Rgb,
        bg: Rgb,
    },
}

/// Everything drawn for one processed frame, in paint order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear { color });
    }

    pub fn sprite(&mut self, sprite: Sprite, rect: Rect) {
        self.commands.push(DrawCommand::Sprite { sprite, rect });
    }

    pub fn block(&mut self, rect: Rect, color: BlockColor) {
        self.commands.push(DrawCommand::Block { rect, color });
    }

    pub fn text(&mut self, text: impl Into<String>, x: i32, y: i32, fg: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos: IVec2::new(x, y),
            size: 12,
            fg,
            bg: BLACK,
        });
    }

    /// Text of every label, in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn block_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Block { .. }))
            .count()
    }
}
