//! # Input Module
//!
//! Translates raw input events into actions for the acting entity.
//!
//! The event source itself lives outside the core; [`keyboard`] adapts
//! macroquad's key state into [`InputEvent`]s for the binary.

pub mod keyboard;

pub use keyboard::*;

use crate::game::{Action, Direction, EntityId};
use serde::{Deserialize, Serialize};

/// Keys the dispatcher distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Char(char),
    /// Any key without a dedicated variant
    Other,
}

/// One discrete event from the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// The window or terminal asked to close
    Quit,
    /// A key was pressed
    KeyDown(Key),
    /// Anything else (mouse motion, focus changes, ...)
    Other,
}

/// Input handler mapping events to actions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl, yubn)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler with vi-keys enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{new_entity_id, Action, InputEvent, InputHandler, Key};
    ///
    /// let handler = InputHandler::new();
    /// let actor = new_entity_id();
    /// let action = handler.dispatch(&InputEvent::KeyDown(Key::Up), actor);
    /// assert_eq!(action, Some(Action::Bump { actor, dx: 0, dy: -1 }));
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Creates a handler that only reacts to arrow keys and escape.
    pub fn arrows_only() -> Self {
        Self {
            vi_keys_enabled: false,
        }
    }

    /// Converts an event into an action for `actor`.
    ///
    /// Unrecognised keys and non-key events yield `None`, so a stray key can
    /// never end the session. A quit request is treated like the escape key.
    pub fn dispatch(&self, event: &InputEvent, actor: EntityId) -> Option<Action> {
        match event {
            InputEvent::Quit => Some(Action::Escape { actor }),
            InputEvent::KeyDown(Key::Escape) => Some(Action::Escape { actor }),
            InputEvent::KeyDown(key) => self.direction_for(*key).map(|direction| {
                let (dx, dy) = direction.to_delta();
                Action::Bump { actor, dx, dy }
            }),
            InputEvent::Other => None,
        }
    }

    fn direction_for(&self, key: Key) -> Option<Direction> {
        match key {
            Key::Up => Some(Direction::North),
            Key::Down => Some(Direction::South),
            Key::Left => Some(Direction::West),
            Key::Right => Some(Direction::East),
            Key::Char(c) if self.vi_keys_enabled => match c {
                'k' => Some(Direction::North),
                'j' => Some(Direction::South),
                'h' => Some(Direction::West),
                'l' => Some(Direction::East),
                'y' => Some(Direction::Northwest),
                'u' => Some(Direction::Northeast),
                'b' => Some(Direction::Southwest),
                'n' => Some(Direction::Southeast),
                _ => None,
            },
            _ => None,
        }
    }
}
