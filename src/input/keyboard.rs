use glfw::{Action, Key, Modifiers, WindowEvent};

use crate::input::Input;

#[cfg(feature = "trace")]
use tracing::trace;

/// Key codes at or above this are ignored. GLFW's highest key is 348.
pub const KEY_COUNT: usize = 1024;

/// Held-key table indexed by GLFW key code.
#[derive(Debug, Clone)]
pub struct KeyBoard {
    keys: [bool; KEY_COUNT],
    just_pressed: Vec<i32>,
    modifiers: Modifiers
}

impl KeyBoard {
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_COUNT],
            just_pressed: Vec::new(),
            modifiers: Modifiers::empty()
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.is_code_pressed(key as i32)
    }

    pub fn is_code_pressed(&self, code: i32) -> bool {
        Self::slot(code)
            .map(|slot| self.keys[slot])
            .unwrap_or(false)
    }

    /// Records a raw key code. Returns false, leaving the table untouched,
    /// when the code is outside `0..KEY_COUNT`.
    pub fn set_code(&mut self, code: i32, pressed: bool) -> bool {
        match Self::slot(code) {
            Some(slot) => {
                self.keys[slot] = pressed;
                true
            },
            None => {
                #[cfg(feature = "trace")]
                trace!("Ignoring out-of-range key code {}", code);

                false
            }
        }
    }

    /// True if `key` went down (not a repeat) since the last `clear`.
    pub fn was_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&(key as i32))
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn shift_held(&self) -> bool {
        self.modifiers.contains(Modifiers::Shift)
            || self.is_pressed(Key::LeftShift)
            || self.is_pressed(Key::RightShift)
    }

    pub fn pressed_count(&self) -> usize {
        self.keys.iter().filter(|held| **held).count()
    }

    /// Forgets every held key, e.g. after focus is lost and releases were
    /// never delivered.
    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
        self.just_pressed.clear();
        self.modifiers = Modifiers::empty();
    }

    fn slot(code: i32) -> Option<usize> {
        if code >= 0 && (code as usize) < KEY_COUNT {
            Some(code as usize)
        } else {
            None
        }
    }
}

impl Default for KeyBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Input for KeyBoard {
    fn update(&mut self, event: &WindowEvent) {
        if let WindowEvent::Key(key, _scancode, action, modifiers) = event {
            self.modifiers = *modifiers;
            let code = *key as i32;
            match action {
                Action::Press => {
                    if self.set_code(code, true) {
                        self.just_pressed.push(code);
                    }
                },
                Action::Repeat => { self.set_code(code, true); },
                Action::Release => { self.set_code(code, false); }
            }
        }
    }

    fn clear(&mut self) {
        // Held keys persist across frames, only the edges go.
        self.just_pressed.clear();
    }
}
