use glfw::{MouseButton, Action, WindowEvent};
use crate::input::Input;

/// GLFW reports buttons 1 through 8.
const BUTTON_COUNT: usize = 8;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WheelMovement {
    /// The number of horizontal lines scrolled
    pub horizontal: f64,

    /// The number of vertical lines scrolled
    pub vertical: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorPosition {
    pub x: f64,
    pub y: f64
}

#[derive(Debug, Clone)]
pub struct Mouse {
    cursor_position: CursorPosition,
    cursor_offset: Option<(f64, f64)>,
    first_move: bool,
    wheel_movement: WheelMovement,
    is_cursor_owned: bool,
    is_cursor_within_window: bool,
    held_buttons: [bool; BUTTON_COUNT]
}

impl Mouse {
    pub fn new() -> Self {
        Mouse {
            cursor_position: CursorPosition { x: 0.0, y: 0.0 },
            cursor_offset: None,
            first_move: true,
            wheel_movement: WheelMovement { horizontal: 0.0, vertical: 0.0 },
            is_cursor_owned: true,
            is_cursor_within_window: false,
            held_buttons: [false; BUTTON_COUNT]
        }
    }

    pub fn get_cursor_position(&self) -> CursorPosition {
        self.cursor_position
    }

    /// Offset produced by the latest cursor event as `(dx, dy)` with `dy`
    /// positive upwards. `None` if that event was the first one seen since
    /// the cursor (re)entered the window.
    pub fn get_cursor_offset(&self) -> Option<(f64, f64)> {
        self.cursor_offset
    }

    pub fn get_wheel_movement(&self) -> WheelMovement {
        self.wheel_movement
    }

    pub fn is_cursor_owned(&self) -> bool {
        self.is_cursor_owned
    }

    pub fn is_cursor_within_window(&self) -> bool {
        self.is_cursor_within_window
    }

    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held_buttons
            .get(button as usize)
            .copied()
            .unwrap_or(false)
    }

    fn cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor_offset = if self.first_move {
            self.first_move = false;
            None
        } else {
            Some((x - self.cursor_position.x, self.cursor_position.y - y))
        };
        self.cursor_position = CursorPosition { x, y };
    }
}

impl Default for Mouse {
    fn default() -> Self {
        Self::new()
    }
}

impl Input for Mouse {
    fn update(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::Focus(is_focused) => {
                self.is_cursor_owned = is_focused;
                if !is_focused {
                    self.held_buttons = [false; BUTTON_COUNT];
                }
            },
            WindowEvent::CursorEnter(entered) => {
                self.is_cursor_within_window = entered;
                self.first_move = true;
            },
            WindowEvent::MouseButton(button, action, _modifiers) => {
                if let Some(held) = self.held_buttons.get_mut(button as usize) {
                    match action {
                        Action::Press => *held = true,
                        Action::Release => *held = false,
                        // Held state already covers repeats.
                        Action::Repeat => ()
                    }
                }
            },
            WindowEvent::CursorPos(x, y) => self.cursor_moved(x, y),
            WindowEvent::Scroll(delta_x, delta_y) => {
                self.wheel_movement = WheelMovement {
                    horizontal: delta_x,
                    vertical: delta_y
                };
            },
            _ => {/* Ignore anything unrelated to the mouse */ }
        }
    }

    fn clear(&mut self) {
        self.wheel_movement = WheelMovement { horizontal: 0.0, vertical: 0.0 };
        self.cursor_offset = None;
    }
}
