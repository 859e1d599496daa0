//! Idle/demo mode - a scripted player
//!
//! Drives the game through the same input events a human would send: starts
//! a game from the menu, launches the ball, tracks it with the paddle, and
//! answers quit prompts with "yes". Used by the headless binary.

use std::collections::VecDeque;

use crate::consts::{PADDLE_WIDTH, WINDOW_WIDTH};
use crate::machine::{GameMode, Machine};
use crate::platform::{InputEvent, InputSource, Key};
use crate::sim::GameState;

/// Paddle stays put while the ball center is within this many pixels of the
/// paddle center
const DEAD_ZONE: i32 = 12;

/// Where the ball should land relative to the paddle center, cycled every
/// `AIM_PERIOD` frames. Landing off-center gives rebounds a horizontal speed
/// and keeps the ball from retracing the same path forever.
const AIM_OFFSETS: [i32; 3] = [20, -28, 36];
const AIM_PERIOD: u64 = 41;

/// Input source that plays the game on its own
#[derive(Debug, Clone, Default)]
pub struct AutoPilot {
    pending: VecDeque<InputEvent>,
    held: Option<Key>,
    frames: u64,
    frame_limit: Option<u64>,
    closed: bool,
    last_seen: Option<u64>,
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the window after this many observed frames
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    /// Look at the machine before it steps. Only reacts once per processed
    /// frame, so passes held back by the frame gate are ignored.
    pub fn observe(&mut self, machine: &Machine) {
        let frame = machine.frames();
        if self.last_seen == Some(frame) {
            return;
        }
        self.last_seen = Some(frame);
        self.decide(machine.mode(), machine.state());
    }

    /// Decide the next inputs from the current mode and game state
    fn decide(&mut self, mode: Option<GameMode>, state: &GameState) {
        if !self.pending.is_empty() || self.closed {
            return;
        }
        self.frames += 1;

        if self.frame_limit.is_some_and(|limit| self.frames > limit) {
            log::info!("Autopilot frame limit reached, closing");
            self.pending.push_back(InputEvent::WindowClose);
            self.closed = true;
            return;
        }

        match mode {
            Some(GameMode::MainMenu) => self.tap(Key::Start),
            Some(GameMode::Playing) => self.steer(state),
            Some(GameMode::ConfirmExit | GameMode::Won | GameMode::Lost) => {
                self.release();
                self.tap(Key::Confirm);
            }
            None => {}
        }
    }

    fn tap(&mut self, key: Key) {
        self.pending.push_back(InputEvent::KeyDown(key));
        self.pending.push_back(InputEvent::KeyUp(key));
    }

    fn release(&mut self) {
        if let Some(key) = self.held.take() {
            self.pending.push_back(InputEvent::KeyUp(key));
        }
    }

    fn hold(&mut self, key: Key) {
        if self.held == Some(key) {
            return;
        }
        self.release();
        self.pending.push_back(InputEvent::KeyDown(key));
        self.held = Some(key);
    }

    /// Track the ball's x position with the paddle, slightly off-center
    fn steer(&mut self, state: &GameState) {
        if state.ball.is_docked() {
            self.tap(Key::Launch);
            return;
        }

        let center = state.ball.rect.center().x;
        let mut aim = AIM_OFFSETS[(self.frames / AIM_PERIOD) as usize % AIM_OFFSETS.len()];
        // Paddle can't get past the walls; aim for the other side instead
        let reach = PADDLE_WIDTH / 2 + DEAD_ZONE..=WINDOW_WIDTH - PADDLE_WIDTH / 2 - DEAD_ZONE;
        if !reach.contains(&(center + aim)) {
            aim = -aim;
        }

        // Lead the ball by its horizontal speed
        let target = center + state.ball.vel.x + aim;
        let delta = target - state.paddle.rect.center().x;
        if delta < -DEAD_ZONE {
            self.hold(Key::Left);
        } else if delta > DEAD_ZONE {
            self.hold(Key::Right);
        } else {
            self.release();
        }
    }
}

impl InputSource for AutoPilot {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.pending.pop_front()
    }
}
