//! Frame building
//!
//! Turns the active mode and game state into a [`Frame`] of draw commands.
//! Rasterising them is the presenter's job.

pub mod frame;

pub use frame::{DrawCommand, Frame, Rgb, Sprite};

use crate::consts::*;
use crate::machine::GameMode;
use crate::sim::GameState;
use frame::{BLACK, HUD_GREEN, WHITE};

const PROMPT_X: i32 = 350;
const QUIT_PROMPT: &str = "Quit Game (Y or N)?";

/// Build the frame for `mode`
pub fn draw(mode: GameMode, state: &GameState) -> Frame {
    let mut frame = Frame::new();
    frame.clear(BLACK);
    match mode {
        GameMode::MainMenu => {
            frame.text("Start (G)ame", PROMPT_X, 250, WHITE);
            frame.text("(Q)uit Game", PROMPT_X, 270, WHITE);
        }
        GameMode::Playing => draw_playfield(&mut frame, state),
        GameMode::ConfirmExit => {
            frame.text(QUIT_PROMPT, PROMPT_X, 260, WHITE);
        }
        GameMode::Won => {
            frame.text("You Win!!!", PROMPT_X, 250, WHITE);
            frame.text(QUIT_PROMPT, PROMPT_X, 270, WHITE);
        }
        GameMode::Lost => {
            frame.text("You Lose.", PROMPT_X, 250, WHITE);
            frame.text(QUIT_PROMPT, PROMPT_X, 270, WHITE);
        }
    }
    frame
}

fn draw_playfield(frame: &mut Frame, state: &GameState) {
    frame.sprite(Sprite::Paddle, state.paddle.rect);
    frame.sprite(Sprite::Ball, state.ball.rect);
    for block in state.blocks.iter() {
        frame.block(block.rect, block.color());
    }
    frame.text(format!("Lives: {}", state.lives), LIVES_X, LIVES_Y, HUD_GREEN);
    frame.text(format!("Level: {}", state.level), LEVEL_X, LEVEL_Y, HUD_GREEN);
}
