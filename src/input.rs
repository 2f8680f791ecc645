//! Keyboard handling for the interactive window.
//!
//! [`Input`] tracks which keys went down since the last frame and which are
//! held, then maps fresh presses onto the few [`Command`]s the window
//! understands:
//!
//! | Key | Command |
//! |-----|---------|
//! | `X`, `Escape` | [`Command::Quit`] |
//! | `Space` | [`Command::TogglePause`] |

use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// An action requested from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    TogglePause,
}

impl Command {
    /// The command bound to `key`, if any.
    pub fn for_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyX | KeyCode::Escape => Some(Command::Quit),
            KeyCode::Space => Some(Command::TogglePause),
            _ => None,
        }
    }
}

/// Per-frame keyboard state.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a key went down since the last [`begin_frame`](Input::begin_frame).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Commands triggered by this frame's key presses, without duplicates.
    pub fn commands(&self) -> Vec<Command> {
        let mut commands: Vec<Command> = self
            .keys_pressed
            .iter()
            .filter_map(|key| Command::for_key(*key))
            .collect();
        commands.sort_by_key(|c| *c as u8);
        commands.dedup();
        commands
    }

    /// Clear per-frame state. Call after the frame's commands were handled.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if let PhysicalKey::Code(key) = event.physical_key {
                match event.state {
                    ElementState::Pressed => self.press(key),
                    ElementState::Released => self.release(key),
                }
            }
        }
    }

    fn press(&mut self, key: KeyCode) {
        // Key repeat does not count as a new press.
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state() {
        let mut input = Input::new();
        assert!(!input.key_held(KeyCode::Space));

        input.press(KeyCode::Space);
        assert!(input.key_held(KeyCode::Space));
        assert!(input.key_pressed(KeyCode::Space));

        input.begin_frame();
        assert!(input.key_held(KeyCode::Space));
        assert!(!input.key_pressed(KeyCode::Space));

        input.release(KeyCode::Space);
        assert!(!input.key_held(KeyCode::Space));
    }

    #[test]
    fn test_repeat_is_not_a_press() {
        let mut input = Input::new();
        input.press(KeyCode::Space);
        input.begin_frame();
        input.press(KeyCode::Space);
        assert!(input.commands().is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut input = Input::new();
        input.press(KeyCode::KeyX);
        input.press(KeyCode::Escape);
        input.press(KeyCode::KeyA);
        assert_eq!(input.commands(), vec![Command::Quit]);
    }

    #[test]
    fn test_bindings() {
        assert_eq!(Command::for_key(KeyCode::Space), Some(Command::TogglePause));
        assert_eq!(Command::for_key(KeyCode::KeyQ), None);
    }
}
