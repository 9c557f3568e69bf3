#![allow(dead_code)]

use gl_viewer::window::surface::Surface;
use glfw::{Action, Key, Modifiers, MouseButton, WindowEvent};

use std::path::PathBuf;

/// Scripted stand-in for the GLFW window. Every poll advances the clock by
/// `step` seconds and drains `queue`.
pub struct TestSurface {
    pub queue: Vec<WindowEvent>,
    pub now: f64,
    pub step: f64,
    pub size: (u32, u32),
    pub fullscreen_size: (u32, u32),
    pub fullscreen: bool,
    /// Behaves like a machine without a primary monitor.
    pub refuse_fullscreen: bool,
    pub should_close: bool,
    pub frames_begun: Vec<((u32, u32), [f32; 4])>,
    pub frames_ended: usize,
    pub pixels: Vec<u8>,
    pub title: String
}

impl TestSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            queue: Vec::new(),
            now: 0.0,
            step: 0.1,
            size: (width, height),
            fullscreen_size: (1920, 1080),
            fullscreen: false,
            refuse_fullscreen: false,
            should_close: false,
            frames_begun: Vec::new(),
            frames_ended: 0,
            pixels: vec![0; (width * height * 3) as usize],
            title: String::new()
        }
    }

    pub fn push(&mut self, event: WindowEvent) {
        self.queue.push(event);
    }
}

impl Surface for TestSurface {
    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.now += self.step;
        self.queue.drain(..).collect()
    }

    fn time(&self) -> f64 {
        self.now
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.size
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn set_fullscreen(&mut self, fullscreen: bool, windowed_size: (u32, u32)) -> bool {
        if fullscreen && self.refuse_fullscreen {
            return false
        }
        self.fullscreen = fullscreen;
        self.size = if fullscreen { self.fullscreen_size } else { windowed_size };

        true
    }

    fn begin_frame(&mut self, viewport: (u32, u32), clear_color: [f32; 4]) {
        self.frames_begun.push((viewport, clear_color));
    }

    fn end_frame(&mut self) {
        self.frames_ended += 1;
    }

    fn read_pixels(&mut self, _width: u32, _height: u32) -> Vec<u8> {
        self.pixels.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

pub fn key(key: Key, action: Action) -> WindowEvent {
    WindowEvent::Key(key, 0, action, Modifiers::empty())
}

pub fn left_button(action: Action) -> WindowEvent {
    WindowEvent::MouseButton(MouseButton::Button1, action, Modifiers::empty())
}

/// A path in the system temp dir unique to this process.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gl_viewer_{}_{}", std::process::id(), name))
}
