//! Fixed timestep simulation tick
//!
//! Advances the Playing mode by exactly one frame. Speeds are in pixels per
//! frame, so the frame gate alone sets the pace of the game.

use super::collision::{apply_block_bounce, ball_out_of_bounds, reflect_off_walls, resolve_paddle, scan_blocks};
use super::state::{GameEvent, GameState};
use crate::level::LevelSet;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move-left key is held
    pub move_left: bool,
    /// Move-right key is held
    pub move_right: bool,
    /// Launch a docked ball (edge-triggered)
    pub launch: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, levels: &LevelSet) {
    state.frame += 1;

    if input.move_left {
        state.paddle.move_left();
    }
    if input.move_right {
        state.paddle.move_right();
    }

    if input.launch && state.ball.launch(state.rules.launch_speed) {
        log::debug!("Ball launched on level {}", state.level);
        state.events.push(GameEvent::BallLaunched);
    }

    move_ball(state);
    if ball_out_of_bounds(&state.ball.rect) {
        lose_life(state, levels);
        return;
    }

    let paddle = state.paddle.rect;
    if let Some(offset) = resolve_paddle(&mut state.ball, &paddle, state.rules.deflection_divisor) {
        log::debug!("Paddle hit at offset {}, vel now {}", offset, state.ball.vel);
        state.events.push(GameEvent::PaddleHit { offset });
    }

    let struck = scan_blocks(&state.ball.rect, &mut state.blocks, &mut state.events);
    apply_block_bounce(&mut state.ball, struck);

    if struck.any() && state.blocks.is_empty() {
        advance_level(state, levels);
    }
}

/// Integrate the ball one frame and bounce it off the walls
fn move_ball(state: &mut GameState) {
    let ball = &mut state.ball;
    ball.rect.pos += ball.vel;
    reflect_off_walls(ball);
}

/// Ball fell past the paddle
fn lose_life(state: &mut GameState, levels: &LevelSet) {
    state.lives = state.lives.saturating_sub(1);
    state.ball.dock();
    log::info!("Life lost, {} remaining", state.lives);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        log::info!("Out of lives on level {}", state.level);
        state.reset(levels);
        state.events.push(GameEvent::GameLost);
    }
}

/// All blocks cleared: load the next level or finish the game
fn advance_level(state: &mut GameState, levels: &LevelSet) {
    if state.is_final_level() {
        log::info!("Final level cleared");
        state.reset(levels);
        state.events.push(GameEvent::GameWon);
        return;
    }

    state.level += 1;
    state.ball.dock();
    state.load_level(levels);
    state.events.push(GameEvent::LevelCleared {
        next_level: state.level,
    });
}
