//! Stack of game modes

use serde::{Deserialize, Serialize};

use super::GameMode;

/// LIFO stack of modes; only the top one runs.
///
/// Grows as needed. Popping an empty stack is a logic error and panics, since
/// a silent no-op would leave the screen and the game logic out of step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateStack {
    modes: Vec<GameMode>,
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start-up stack: the quit prompt under the main menu
    pub fn seeded() -> Self {
        let mut stack = Self::new();
        stack.reseed();
        stack
    }

    /// Push the quit prompt and the main menu on top
    pub fn reseed(&mut self) {
        self.push(GameMode::ConfirmExit);
        self.push(GameMode::MainMenu);
    }

    pub fn push(&mut self, mode: GameMode) {
        self.modes.push(mode);
    }

    pub fn pop(&mut self) -> GameMode {
        match self.modes.pop() {
            Some(mode) => mode,
            None => panic!("pop on an empty mode stack"),
        }
    }

    pub fn top(&self) -> Option<GameMode> {
        self.modes.last().copied()
    }

    pub fn clear(&mut self) {
        self.modes.clear();
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Modes from bottom to top
    pub fn as_slice(&self) -> &[GameMode] {
        &self.modes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_stack() {
        let stack = StateStack::seeded();
        assert_eq!(stack.as_slice(), &[GameMode::ConfirmExit, GameMode::MainMenu]);
        assert_eq!(stack.top(), Some(GameMode::MainMenu));
    }

    #[test]
    fn test_grows_past_old_limit() {
        let mut stack = StateStack::new();
        for _ in 0..64 {
            stack.push(GameMode::Playing);
        }
        assert_eq!(stack.len(), 64);
    }

    #[test]
    fn test_push_pop_clear() {
        let mut stack = StateStack::seeded();
        stack.push(GameMode::Playing);
        assert_eq!(stack.pop(), GameMode::Playing);
        assert_eq!(stack.pop(), GameMode::MainMenu);
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.top(), None);
    }

    #[test]
    #[should_panic(expected = "empty mode stack")]
    fn test_pop_empty_panics() {
        StateStack::new().pop();
    }
}
