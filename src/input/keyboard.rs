//! # Keyboard Source
//!
//! Reads macroquad's per-frame key state and turns it into input events.

use crate::input::{InputEvent, Key};
use macroquad::prelude::*;

/// Maps a macroquad key code onto the dispatcher's key set.
pub fn key_from_keycode(code: KeyCode) -> Key {
    match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Escape => Key::Escape,
        KeyCode::H => Key::Char('h'),
        KeyCode::J => Key::Char('j'),
        KeyCode::K => Key::Char('k'),
        KeyCode::L => Key::Char('l'),
        KeyCode::Y => Key::Char('y'),
        KeyCode::U => Key::Char('u'),
        KeyCode::B => Key::Char('b'),
        KeyCode::N => Key::Char('n'),
        _ => Key::Other,
    }
}

/// Returns the events that arrived since the previous frame.
///
/// A window close request is reported as [`InputEvent::Quit`]; it requires
/// `prevent_quit()` to have been called at startup.
pub fn poll_keyboard() -> Vec<InputEvent> {
    let mut events = Vec::new();

    if is_quit_requested() {
        events.push(InputEvent::Quit);
    }
    if let Some(code) = get_last_key_pressed() {
        events.push(InputEvent::KeyDown(key_from_keycode(code)));
    }

    events
}
