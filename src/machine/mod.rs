//! Game mode state machine
//!
//! A stack of [`GameMode`]s driven by a frame-gated scheduler. Each pass the
//! scheduler checks the gate; when a frame is due, the top mode consumes
//! input, the Playing mode advances the simulation, and the frame is drawn.
//! The run ends when the stack is empty.

pub mod stack;

pub use stack::StateStack;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level::{LevelError, LevelSet};
use crate::platform::{Clock, FrameGate, InputEvent, InputSource, Key, Presenter};
use crate::renderer;
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Screens the game can be on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    MainMenu,
    Playing,
    /// "Quit Game (Y or N)?" prompt
    ConfirmExit,
    Won,
    Lost,
}

/// Reasons a machine cannot be built
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKeys {
    left: bool,
    right: bool,
}

/// Owns the mode stack and everything the modes act on
#[derive(Debug)]
pub struct Machine {
    stack: StateStack,
    state: GameState,
    levels: LevelSet,
    gate: FrameGate,
    held: HeldKeys,
    launch_requested: bool,
    frames: u64,
}

impl Machine {
    /// Fresh run with the menu on screen. Fails on invalid settings or if
    /// `levels` is shorter than the configured level count.
    pub fn new(settings: &Settings, levels: LevelSet) -> Result<Self, StartupError> {
        settings.validate()?;
        let rules = settings.rules();
        if levels.len() < rules.level_count as usize {
            return Err(LevelError::Missing {
                level: levels.len() as u32 + 1,
            }
            .into());
        }
        let state = GameState::new(rules, &levels);
        Ok(Self {
            stack: StateStack::seeded(),
            state,
            levels,
            gate: FrameGate::new(settings.frame_interval_ms),
            held: HeldKeys::default(),
            launch_requested: false,
            frames: 0,
        })
    }

    /// Active mode, or `None` once the run is over
    pub fn mode(&self) -> Option<GameMode> {
        self.stack.top()
    }

    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Frames processed so far (passes held back by the gate don't count)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        !self.stack.is_empty()
    }

    /// One scheduler pass. Never blocks; returns false once the stack is empty.
    pub fn step(
        &mut self,
        clock: &impl Clock,
        input: &mut impl InputSource,
        presenter: &mut impl Presenter,
    ) -> bool {
        let Some(mode) = self.mode() else {
            return false;
        };
        if !self.gate.ready(clock.now_ms()) {
            return true;
        }
        self.frames += 1;

        self.process_input(input);

        if mode == GameMode::Playing && self.mode() == Some(GameMode::Playing) {
            self.update_playing();
        }

        if let Some(active) = self.mode() {
            presenter.present(&renderer::draw(active, &self.state));
        }

        self.is_running()
    }

    /// Run until the stack empties
    pub fn run(&mut self, clock: &impl Clock, input: &mut impl InputSource, presenter: &mut impl Presenter) {
        log::info!("Game loop started");
        while self.step(clock, input, presenter) {}
        log::info!("Game loop finished");
    }

    /// Feed pending events to the active mode, one at a time. Stops at the
    /// first event that changes the stack so the rest reach the new mode.
    fn process_input(&mut self, input: &mut impl InputSource) {
        while let Some(event) = input.poll_event() {
            if self.handle_event(event) {
                break;
            }
        }
    }

    /// Apply one event to the active mode. Returns true if the stack changed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        let Some(mode) = self.mode() else {
            return false;
        };
        let before = self.stack.clone();

        match (mode, event) {
            (_, InputEvent::WindowClose) => self.stack.clear(),

            (GameMode::MainMenu, InputEvent::KeyDown(Key::Start)) => {
                self.held = HeldKeys::default();
                self.launch_requested = false;
                self.stack.push(GameMode::Playing);
            }
            (GameMode::MainMenu, InputEvent::KeyDown(Key::Quit)) => self.stack.clear(),
            (GameMode::MainMenu, InputEvent::KeyDown(Key::Escape)) => {
                self.stack.pop();
            }

            (GameMode::Playing, InputEvent::KeyDown(Key::Escape)) => {
                self.stack.pop();
            }
            (GameMode::Playing, InputEvent::KeyDown(Key::Launch)) => self.launch_requested = true,
            (GameMode::Playing, InputEvent::KeyDown(key)) if key.is_held() => self.set_held(key, true),
            (GameMode::Playing, InputEvent::KeyUp(key)) if key.is_held() => self.set_held(key, false),

            (
                GameMode::ConfirmExit | GameMode::Won | GameMode::Lost,
                InputEvent::KeyDown(Key::Confirm | Key::Escape),
            ) => {
                self.stack.pop();
            }
            (GameMode::ConfirmExit | GameMode::Won | GameMode::Lost, InputEvent::KeyDown(Key::Decline)) => {
                self.stack.pop();
                self.stack.reseed();
            }

            (mode, InputEvent::KeyDown(key)) => {
                log::trace!("{:?} ignores key {}", mode, key.binding());
            }
            _ => {}
        }

        let changed = self.stack != before;
        if changed {
            log::info!("{:?} -> {:?}", mode, self.stack.as_slice());
        }
        changed
    }

    fn set_held(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.held.left = down,
            Key::Right => self.held.right = down,
            _ => {}
        }
    }

    /// Advance the simulation one frame and act on its outcome
    fn update_playing(&mut self) {
        let input = TickInput {
            move_left: self.held.left,
            move_right: self.held.right,
            launch: std::mem::take(&mut self.launch_requested),
        };
        tick(&mut self.state, &input, &self.levels);

        for event in self.state.drain_events() {
            match event {
                GameEvent::GameWon => self.finish(GameMode::Won),
                GameEvent::GameLost => self.finish(GameMode::Lost),
                GameEvent::LevelCleared { next_level } => {
                    log::info!("Advancing to level {}", next_level);
                }
                _ => {}
            }
        }
    }

    /// Replace the whole stack with an end screen
    fn finish(&mut self, end: GameMode) {
        log::info!("Game over: {:?}", end);
        self.stack.clear();
        self.stack.push(end);
        self.held = HeldKeys::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::level::MemoryLevelLoader;
    use crate::level::tests::level_text;
    use crate::platform::{LogPresenter, ManualClock, ScriptedInput};
    use crate::sim::{Block, Rect};
    use glam::IVec2;

    struct Harness {
        machine: Machine,
        clock: ManualClock,
        input: ScriptedInput,
        presenter: LogPresenter,
    }

    impl Harness {
        fn new() -> Self {
            let settings = Settings {
                level_count: 2,
                ..Settings::default()
            };
            let loader = MemoryLevelLoader::new()
                .with_level(1, level_text(&[(0, 1), (1, 1)]))
                .with_level(2, level_text(&[(0, 2)]));
            let levels = LevelSet::load_all(&loader, 2).unwrap();
            Self {
                machine: Machine::new(&settings, levels).unwrap(),
                clock: ManualClock::new(),
                input: ScriptedInput::default(),
                presenter: LogPresenter::new(),
            }
        }

        /// Advance one frame interval and run a scheduler pass
        fn frame(&mut self) -> bool {
            let running = self.machine.step(&self.clock, &mut self.input, &mut self.presenter);
            self.clock.advance(FRAME_RATE_MS);
            running
        }

        fn press(&mut self, key: Key) -> bool {
            self.input.push(InputEvent::KeyDown(key));
            self.frame()
        }

        fn stack(&self) -> Vec<GameMode> {
            self.machine.stack().as_slice().to_vec()
        }
    }

    #[test]
    fn test_initial_stack() {
        let h = Harness::new();
        assert_eq!(h.stack(), vec![GameMode::ConfirmExit, GameMode::MainMenu]);
        assert_eq!(h.machine.mode(), Some(GameMode::MainMenu));
    }

    #[test]
    fn test_frame_gate_skips_early_passes() {
        let mut h = Harness::new();
        h.machine.step(&h.clock, &mut h.input, &mut h.presenter);
        assert_eq!(h.presenter.frames(), 1);

        h.clock.advance(FRAME_RATE_MS - 1);
        h.input.push(InputEvent::KeyDown(Key::Start));
        assert!(h.machine.step(&h.clock, &mut h.input, &mut h.presenter));
        assert_eq!(h.presenter.frames(), 1);
        assert_eq!(h.machine.mode(), Some(GameMode::MainMenu));
        assert_eq!(h.input.len(), 1);

        h.clock.advance(1);
        h.machine.step(&h.clock, &mut h.input, &mut h.presenter);
        assert_eq!(h.presenter.frames(), 2);
        assert_eq!(h.machine.mode(), Some(GameMode::Playing));
    }

    #[test]
    fn test_menu_to_game_and_back() {
        let mut h = Harness::new();
        h.press(Key::Start);
        assert_eq!(h.stack(), vec![GameMode::ConfirmExit, GameMode::MainMenu, GameMode::Playing]);
        h.press(Key::Escape);
        assert_eq!(h.stack(), vec![GameMode::ConfirmExit, GameMode::MainMenu]);
    }

    #[test]
    fn test_escape_from_menu_then_decline() {
        let mut h = Harness::new();
        h.press(Key::Escape);
        assert_eq!(h.stack(), vec![GameMode::ConfirmExit]);
        assert_eq!(h.presenter.last_text().to_vec(), vec!["Quit Game (Y or N)?".to_string()]);
        h.press(Key::Decline);
        assert_eq!(h.stack(), vec![GameMode::ConfirmExit, GameMode::MainMenu]);
        h.press(Key::Escape);
        assert!(!h.press(Key::Confirm));
        assert!(!h.machine.is_running());
    }

    #[test]
    fn test_quit_and_window_close_end_run() {
        let mut h = Harness::new();
        assert!(!h.press(Key::Quit));

        let mut h = Harness::new();
        h.press(Key::Start);
        h.input.push(InputEvent::WindowClose);
        assert!(!h.frame());
        assert!(h.stack().is_empty());
        // Further passes are no-ops
        assert!(!h.frame());
    }

    #[test]
    fn test_events_after_transition_reach_new_mode() {
        let mut h = Harness::new();
        h.input.push(InputEvent::KeyDown(Key::Start));
        h.input.push(InputEvent::KeyDown(Key::Launch));
        h.frame();
        assert_eq!(h.machine.mode(), Some(GameMode::Playing));
        assert!(h.machine.state().ball.is_docked());
        h.frame();
        assert_eq!(h.machine.state().ball.vel, IVec2::new(0, BALL_SPEED_Y));
    }

    #[test]
    fn test_held_movement_keys() {
        let mut h = Harness::new();
        h.press(Key::Start);
        let x = h.machine.state().paddle.rect.pos.x;
        h.press(Key::Right);
        h.frame();
        h.frame();
        assert_eq!(h.machine.state().paddle.rect.pos.x, x + 3 * PLAYER_SPEED);
        h.input.push(InputEvent::KeyUp(Key::Right));
        h.frame();
        h.frame();
        assert_eq!(h.machine.state().paddle.rect.pos.x, x + 3 * PLAYER_SPEED);
    }

    #[test]
    fn test_losing_last_life_shows_lost() {
        let mut h = Harness::new();
        h.press(Key::Start);
        {
            let state = h.machine.state_mut();
            state.level = 2;
            state.lives = 1;
            state.ball.rect.pos = IVec2::new(10, WINDOW_HEIGHT - 5);
            state.ball.vel = IVec2::new(0, 10);
        }
        h.frame();
        assert_eq!(h.stack(), vec![GameMode::Lost]);
        assert_eq!(h.presenter.last_text().first().map(String::as_str), Some("You Lose."));
        assert_eq!(h.machine.state().lives, NUM_LIVES);
        assert_eq!(h.machine.state().level, 1);

        h.press(Key::Decline);
        assert_eq!(h.stack(), vec![GameMode::ConfirmExit, GameMode::MainMenu]);
    }

    #[test]
    fn test_clearing_final_level_shows_won() {
        let mut h = Harness::new();
        h.press(Key::Start);
        {
            let state = h.machine.state_mut();
            state.level = 2;
            let ball = state.ball.rect;
            let block = Rect::new(ball.center().x - 40, ball.top() - 25, BLOCK_WIDTH, BLOCK_HEIGHT);
            state.blocks.reload([Block::new(block, 1)]);
            state.ball.vel = IVec2::new(0, -10);
        }
        h.frame();
        assert_eq!(h.stack(), vec![GameMode::Won]);
        assert!(!h.press(Key::Confirm));
    }

    #[test]
    fn test_run_until_empty() {
        let settings = Settings {
            frame_interval_ms: 0,
            level_count: 1,
            ..Settings::default()
        };
        let loader = MemoryLevelLoader::new().with_level(1, level_text(&[(0, 3)]));
        let levels = LevelSet::load_all(&loader, 1).unwrap();
        let mut machine = Machine::new(&settings, levels).unwrap();
        let mut input = ScriptedInput::default();
        input.tap(Key::Start);
        input.tap(Key::Escape);
        input.push(InputEvent::KeyDown(Key::Escape));
        input.push(InputEvent::KeyDown(Key::Confirm));
        let mut presenter = LogPresenter::new();

        machine.run(&ManualClock::new(), &mut input, &mut presenter);
        assert!(!machine.is_running());
        assert!(input.is_empty());
    }

    #[test]
    fn test_too_few_levels_rejected() {
        let loader = MemoryLevelLoader::new().with_level(1, level_text(&[(0, 1)]));
        let levels = LevelSet::load_all(&loader, 1).unwrap();
        let err = Machine::new(&Settings::default(), levels).unwrap_err();
        assert!(matches!(err, StartupError::Level(LevelError::Missing { level: 2 })));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let loader = MemoryLevelLoader::new().with_level(1, level_text(&[(0, 1)]));
        let levels = LevelSet::load_all(&loader, 1).unwrap();
        let settings = Settings {
            level_count: 1,
            deflection_divisor: 0,
            ..Settings::default()
        };
        let err = Machine::new(&settings, levels).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Settings(SettingsError::Invalid {
                field: "deflection_divisor",
                ..
            })
        ));
    }
}
