//! Host input state
//!
//! Event listeners write here between frames; the player reads it during the
//! logic pass. Fields are independent scalars, so a write that lands between
//! passes can never be observed half-done.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shared pointer record fed by mouse/touch listeners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
}

impl PointerState {
    /// Pointer resting at the centre of a surface
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            x: width * 0.5,
            y: height * 0.5,
            pressed: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.pressed = true;
    }

    pub fn release(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.pressed = false;
    }

    /// Drag: the target only follows the pointer while a button is held
    pub fn move_to(&mut self, x: f32, y: f32) {
        if self.pressed {
            self.x = x;
            self.y = y;
        }
    }
}

/// Keyboard commands understood by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleDebug,
    Restart,
}

impl KeyAction {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "d" | "D" => Some(KeyAction::ToggleDebug),
            "r" | "R" => Some(KeyAction::Restart),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_only_tracks_while_pressed() {
        let mut pointer = PointerState::centered(100.0, 100.0);
        pointer.move_to(10.0, 10.0);
        assert_eq!(pointer.position(), Vec2::new(50.0, 50.0));

        pointer.press(20.0, 30.0);
        pointer.move_to(40.0, 60.0);
        assert_eq!(pointer.position(), Vec2::new(40.0, 60.0));

        pointer.release(45.0, 65.0);
        pointer.move_to(0.0, 0.0);
        assert_eq!(pointer.position(), Vec2::new(45.0, 65.0));
        assert!(!pointer.pressed);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyAction::from_key("d"), Some(KeyAction::ToggleDebug));
        assert_eq!(KeyAction::from_key("r"), Some(KeyAction::Restart));
        assert_eq!(KeyAction::from_key("x"), None);
    }
}
