pub mod mouse;
pub mod keyboard;

use glfw::WindowEvent;

/// Input state that folds raw GLFW window events into something queryable.
pub trait Input {
    fn update(&mut self, event: &WindowEvent);

    /// Drops per-frame edges (clicks, scroll) while keeping held state.
    fn clear(&mut self);
}
