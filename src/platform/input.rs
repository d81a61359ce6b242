//! Keyboard/touch input mapped to logical actions
//!
//! Event callbacks only flip flags here; the frame loop reads them once per
//! frame with [`InputState::take_frame`]. Keys with no mapping are ignored.

use crate::sim::TickInput;

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Pause,
    ToggleMute,
}

impl Action {
    /// Map a DOM-style key name (`KeyboardEvent.key` or `.code`) to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "arrowleft" | "a" | "keya" => Some(Action::MoveLeft),
            "arrowright" | "d" | "keyd" => Some(Action::MoveRight),
            " " | "space" | "spacebar" => Some(Action::Fire),
            "p" | "keyp" | "escape" => Some(Action::Pause),
            "m" | "keym" => Some(Action::ToggleMute),
            _ => None,
        }
    }

    /// Held actions stay active while the key is down; the rest fire once per press
    pub fn is_held(&self) -> bool {
        matches!(self, Action::MoveLeft | Action::MoveRight | Action::Fire)
    }
}

/// Input collected between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    fire: bool,
    pause_pressed: bool,
    mute_pressed: bool,
}

/// One frame's worth of input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub tick: TickInput,
    /// Mute toggle pressed since the last frame
    pub toggle_mute: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Action started (key down / touch start)
    pub fn press(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.left = true,
            Action::MoveRight => self.right = true,
            Action::Fire => self.fire = true,
            Action::Pause => self.pause_pressed = true,
            Action::ToggleMute => self.mute_pressed = true,
        }
    }

    /// Action ended (key up / touch end)
    pub fn release(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.left = false,
            Action::MoveRight => self.right = false,
            Action::Fire => self.fire = false,
            // Presses are consumed by the frame, not cancelled by release
            Action::Pause | Action::ToggleMute => {}
        }
    }

    /// Key down by name; returns whether the key was mapped
    pub fn key_down(&mut self, key: &str) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.press(action);
                true
            }
            None => false,
        }
    }

    /// Key up by name; returns whether the key was mapped
    pub fn key_up(&mut self, key: &str) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.release(action);
                true
            }
            None => false,
        }
    }

    /// Drop all held and pending input (e.g. on focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Read this frame's input, consuming one-shot presses
    pub fn take_frame(&mut self) -> FrameInput {
        let frame = FrameInput {
            tick: TickInput {
                move_left: self.left,
                move_right: self.right,
                fire: self.fire,
                pause: self.pause_pressed,
                autopilot: false,
            },
            toggle_mute: self.mute_pressed,
        };
        self.pause_pressed = false;
        self.mute_pressed = false;
        frame
    }
}
