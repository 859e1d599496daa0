//! Input events delivered by the front end

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    /// Start a game from the menu (G)
    Start,
    /// Quit from the menu (Q)
    Quit,
    /// Answer yes to a quit prompt (Y)
    Confirm,
    /// Answer no to a quit prompt (N)
    Decline,
    /// Launch a docked ball (Space)
    Launch,
    Left,
    Right,
}

impl Key {
    /// Default keyboard binding, as shown in prompts
    pub fn binding(&self) -> &'static str {
        match self {
            Key::Escape => "Esc",
            Key::Start => "G",
            Key::Quit => "Q",
            Key::Confirm => "Y",
            Key::Decline => "N",
            Key::Launch => "Space",
            Key::Left => "Left",
            Key::Right => "Right",
        }
    }

    /// Movement keys are tracked as held/released; everything else fires once
    pub fn is_held(&self) -> bool {
        matches!(self, Key::Left | Key::Right)
    }
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// The user closed the window
    WindowClose,
    KeyDown(Key),
    KeyUp(Key),
}

/// Source of pending input events
pub trait InputSource {
    /// Next pending event, or `None` if the queue is empty
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Pre-recorded event queue, drained front to back
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Queue a key press and its release
    pub fn tap(&mut self, key: Key) {
        self.push(InputEvent::KeyDown(key));
        self.push(InputEvent::KeyUp(key));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }
}
