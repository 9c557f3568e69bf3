pub mod surface;
pub mod frame_timer;
pub mod snapshot;
pub mod window_loader;

use glfw::{Action, Key, Modifiers, MouseButton, WindowEvent};
use thiserror::Error;

use std::error::Error as StdError;
use std::path::Path;

#[cfg(feature = "trace")]
use tracing::{debug, error, instrument, trace};

use crate::camera::Camera;
use crate::camera::Movement;
use crate::camera::camera_loader::CameraLoadError;
use crate::camera::rig::CameraRig;
use crate::input::Input;
use crate::input::keyboard::KeyBoard;
use crate::input::mouse::Mouse;
use crate::load::LoadError;
use crate::window::frame_timer::FrameTimer;
use crate::window::snapshot::{image_from_readback, mean_non_black};
use crate::window::surface::{NativeSurface, Surface};
use crate::window::window_loader::{WindowJSON, WindowLoader};
use crate::window::WindowError::{PixelBufferError, SnapshotError, CameraConfigError};

pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Each movement fires once per frame however many of its keys are held.
const MOVEMENT_KEYS: [(Movement, [Key; 2]); 4] = [
    (Movement::Forward, [Key::W, Key::Up]),
    (Movement::Backward, [Key::S, Key::Down]),
    (Movement::Left, [Key::A, Key::Left]),
    (Movement::Right, [Key::D, Key::Right])
];

/// User hooks called after the built-in handling of each event. Every
/// method defaults to doing nothing.
pub trait WindowHandler {
    fn key(&mut self, _key: Key, _action: Action, _modifiers: Modifiers, _cameras: &mut CameraRig) {}

    fn mouse_button(&mut self, _button: MouseButton, _action: Action, _modifiers: Modifiers, _cameras: &mut CameraRig) {}

    fn cursor_moved(&mut self, _x: f64, _y: f64, _cameras: &mut CameraRig) {}

    fn scroll(&mut self, _x_offset: f64, _y_offset: f64, _cameras: &mut CameraRig) {}

    fn resized(&mut self, _width: u32, _height: u32, _cameras: &mut CameraRig) {}

    fn close_requested(&mut self) {}

    fn cursor_entered(&mut self, _entered: bool) {}

    fn focus_changed(&mut self, _focused: bool) {}
}

/// Handler that keeps only the built-in behaviour.
#[derive(Debug, Default)]
pub struct DefaultHandler;

impl WindowHandler for DefaultHandler {}

/// A native window, its cameras and the input state feeding them.
pub struct Window<S: Surface> {
    surface: S,
    cameras: CameraRig,
    keyboard: KeyBoard,
    mouse: Mouse,
    timer: FrameTimer,
    delta_time: f32,
    keyboard_enabled: bool,
    fullscreen: bool,
    windowed_size: (u32, u32),
    clear_color: [f32; 4],
    handler: Box<dyn WindowHandler>
}

impl Window<NativeSurface> {
    #[cfg_attr(feature = "trace", instrument)]
    pub fn create(width: u32, height: u32, resizable: bool, title: &str) -> Result<Self, WindowError> {
        NativeSurface::new(width, height, title, resizable, true)
            .map(Self::with_surface)
    }

    /// Hidden window, for rendering straight to `snapshot`.
    #[cfg_attr(feature = "trace", instrument)]
    pub fn create_offscreen(width: u32, height: u32) -> Result<Self, WindowError> {
        NativeSurface::new(width, height, "offscreen", false, false)
            .map(Self::with_surface)
    }

    /// Builds a window from a `"window"` JSON file.
    #[cfg_attr(feature = "trace", instrument(skip(path)))]
    pub fn from_config(path: impl AsRef<Path>) -> Result<Self, WindowError> {
        let config = WindowLoader::new(path).load()?;

        let mut window = if config.offscreen {
            Self::create_offscreen(config.width, config.height)?
        } else {
            Self::create(config.width, config.height, config.resizable, &config.title)?
        };
        window.apply_config(config)?;

        Ok(window)
    }
}

impl<S: Surface> Window<S> {
    /// Wraps an existing surface and gives it one default camera sized to
    /// its framebuffer.
    pub fn with_surface(surface: S) -> Self {
        let (width, height) = surface.framebuffer_size();
        let mut timer = FrameTimer::new();
        timer.tick(surface.time());

        Self {
            surface,
            cameras: CameraRig::new(Camera::with_viewport(width, height)),
            keyboard: KeyBoard::new(),
            mouse: Mouse::new(),
            timer,
            delta_time: 0.0,
            keyboard_enabled: false,
            fullscreen: false,
            windowed_size: (width, height),
            clear_color: DEFAULT_CLEAR_COLOR,
            handler: Box::new(DefaultHandler)
        }
    }

    /// Applies clear color and extra cameras from a window config. Config
    /// cameras are appended after the default one. Nothing changes unless
    /// every camera is valid.
    pub fn apply_config(&mut self, config: WindowJSON) -> Result<(), WindowError> {
        let (width, height) = self.surface.framebuffer_size();
        let cameras = config.cameras
            .into_iter()
            .enumerate()
            .map(|(index, camera)| {
                camera.into_camera(width, height)
                    .map_err(|e| {
                        #[cfg(feature = "trace")]
                        error!("Camera {} in window config is invalid", index);

                        CameraConfigError { index, source: e }
                    })
            })
            .collect::<Result<Vec<Camera>, WindowError>>()?;

        if let Some(color) = config.clear_color {
            self.clear_color = color;
        }
        for camera in cameras {
            self.cameras.push(camera);
        }

        Ok(())
    }

    pub fn set_handler(&mut self, handler: impl WindowHandler + 'static) {
        self.handler = Box::new(handler);
    }

    /// Routes one native event to the input state, the active camera and
    /// then the user handler.
    pub fn dispatch(&mut self, event: WindowEvent) {
        #[cfg(feature = "trace")]
        trace!("Dispatching event: {:?}", event);

        match event {
            WindowEvent::Key(key, _scancode, action, modifiers) => {
                self.keyboard.update(&event);
                if key == Key::Escape && action == Action::Press {
                    self.surface.set_should_close(true);
                }
                self.handler.key(key, action, modifiers, &mut self.cameras);
            },
            WindowEvent::CursorPos(x, y) => {
                self.mouse.update(&event);
                if let Some((dx, dy)) = self.mouse.get_cursor_offset() {
                    if self.keyboard_enabled && self.mouse.is_held(MouseButton::Button1) {
                        let pan = self.keyboard.shift_held();
                        self.cameras.active_mut().process_mouse_movement(dx as f32, dy as f32, pan, true);
                    }
                }
                self.handler.cursor_moved(x, y, &mut self.cameras);
            },
            WindowEvent::MouseButton(button, action, modifiers) => {
                self.mouse.update(&event);
                self.handler.mouse_button(button, action, modifiers, &mut self.cameras);
            },
            WindowEvent::Scroll(x_offset, y_offset) => {
                self.mouse.update(&event);
                self.cameras.active_mut().process_mouse_scroll(y_offset as f32);
                self.handler.scroll(x_offset, y_offset, &mut self.cameras);
            },
            WindowEvent::FramebufferSize(width, height) => {
                let (width, height) = (width.max(0) as u32, height.max(0) as u32);
                self.cameras.resize_all(width, height);
                self.handler.resized(width, height, &mut self.cameras);
            },
            WindowEvent::Close => {
                self.surface.set_should_close(true);
                self.handler.close_requested();
            },
            WindowEvent::CursorEnter(entered) => {
                self.mouse.update(&event);
                self.handler.cursor_entered(entered);
            },
            WindowEvent::Focus(focused) => {
                self.mouse.update(&event);
                if !focused {
                    self.keyboard.release_all();
                }
                self.handler.focus_changed(focused);
            },
            _ => ()
        }
    }

    /// Opens a frame: pumps events, advances the clock, applies held
    /// movement keys and clears the framebuffer for the active camera.
    ///
    /// Events queued before the first frame reach the input state but do
    /// not move the camera. Held movement keys take effect from the second
    /// frame on.
    pub fn render_begin(&mut self) {
        self.keyboard.clear();
        self.mouse.clear();

        let gate_was_open = self.keyboard_enabled;
        for event in self.surface.poll_events() {
            self.dispatch(event);
        }
        self.keyboard_enabled = true;

        self.delta_time = self.timer.tick(self.surface.time()) as f32;
        if gate_was_open {
            self.apply_movement_keys();
        }

        let viewport = self.cameras.active().viewport();
        self.surface.begin_frame(viewport, self.clear_color);
    }

    pub fn render_end(&mut self) {
        self.surface.end_frame();
    }

    fn apply_movement_keys(&mut self) {
        let keyboard = &self.keyboard;
        let camera = self.cameras.active_mut();
        for (movement, keys) in MOVEMENT_KEYS.iter() {
            if keys.iter().any(|key| keyboard.is_pressed(*key)) {
                camera.process_keyboard(*movement, self.delta_time);
            }
        }
    }

    /// Makes the next camera active, wrapping around. Returns the new index.
    pub fn change_camera(&mut self) -> usize {
        self.cameras.change_camera()
    }

    pub fn add_camera(&mut self, camera: Camera) -> usize {
        self.cameras.push(camera)
    }

    pub fn camera(&self) -> &Camera {
        self.cameras.active()
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        self.cameras.active_mut()
    }

    pub fn cameras(&self) -> &CameraRig {
        &self.cameras
    }

    pub fn cameras_mut(&mut self) -> &mut CameraRig {
        &mut self.cameras
    }

    pub fn active_camera_index(&self) -> usize {
        self.cameras.active_index()
    }

    /// Switches between fullscreen and the last windowed size. Returns false,
    /// leaving the mode as it was, when the surface refuses the switch.
    #[cfg_attr(feature = "trace", instrument(skip(self)))]
    pub fn toggle_fullscreen(&mut self) -> bool {
        let fullscreen = !self.fullscreen;
        let windowed_size = if fullscreen {
            self.surface.framebuffer_size()
        } else {
            self.windowed_size
        };

        if !self.surface.set_fullscreen(fullscreen, windowed_size) {
            #[cfg(feature = "trace")]
            error!("Surface refused to switch to fullscreen={}", fullscreen);

            return false
        }
        self.fullscreen = fullscreen;
        self.windowed_size = windowed_size;

        let (width, height) = self.surface.framebuffer_size();
        self.cameras.resize_all(width, height);

        #[cfg(feature = "trace")]
        debug!("Fullscreen={} framebuffer={}x{}", self.fullscreen, width, height);

        true
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn fps(&self) -> f64 {
        self.timer.fps()
    }

    /// Seconds between the last two `render_begin` calls.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn keyboard_enabled(&self) -> bool {
        self.keyboard_enabled
    }

    pub fn should_close(&self) -> bool {
        self.surface.should_close()
    }

    pub fn set_should_close(&mut self, value: bool) {
        self.surface.set_should_close(value);
    }

    pub fn set_title(&mut self, title: &str) {
        self.surface.set_title(title);
    }

    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn keyboard(&self) -> &KeyBoard {
        &self.keyboard
    }

    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Writes the current color buffer to `path`. The format follows the
    /// extension (`.bmp`, `.tiff`, `.png`, ...).
    #[cfg_attr(feature = "trace", instrument(skip(self, path)))]
    pub fn snapshot(&mut self, path: impl AsRef<Path>) -> Result<(), WindowError> {
        let path = path.as_ref();
        let (width, height) = self.surface.framebuffer_size();
        let pixels = self.surface.read_pixels(width, height);
        let actual = pixels.len();

        let image = image_from_readback(width, height, pixels)
            .ok_or(PixelBufferError {
                width,
                height,
                expected: width as usize * height as usize * 3,
                actual
            })?;

        image.save(path)
            .map_err(|e| {
                #[cfg(feature = "trace")]
                error!("Failed to write snapshot to {}", path.display());

                SnapshotError {
                    path: path.display().to_string(),
                    source: e
                }
            })
    }

    /// Mean color of the non-black pixels in the color buffer.
    pub fn pixels_value(&mut self) -> Option<[f32; 3]> {
        let (width, height) = self.surface.framebuffer_size();
        let pixels = self.surface.read_pixels(width, height);

        mean_non_black(&pixels)
    }
}

/// Reports `error` with its chain of causes on stderr and aborts the
/// process. Used where the native window or GL context is unusable.
pub fn fatal(error: &dyn StdError) -> ! {
    let mut message = format!("fatal: {}", error);
    let mut cause = error.source();
    while let Some(source) = cause {
        message.push_str(&format!("\n  caused by: {}", source));
        cause = source.source();
    }

    #[cfg(feature = "trace")]
    error!("{}", message);

    eprintln!("{}", message);
    std::process::abort()
}

/// Unwraps `result` or terminates through `fatal`.
pub fn abort_on_failure<T, E: StdError>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => fatal(&e)
    }
}

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Failed to create GLFW window {width}x{height} \"{title}\": {reason}")]
    SurfaceCreationError {
        width: u32,
        height: u32,
        title: String,
        reason: String
    },
    #[error("Failed to load window config from file: {path}")]
    ConfigError {
        path: String,
        source: LoadError
    },
    #[error("Camera {index} in window config is invalid")]
    CameraConfigError {
        index: usize,
        source: CameraLoadError
    },
    #[error("Read back {actual} bytes, expected {expected} for a {width}x{height} RGB frame")]
    PixelBufferError {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize
    },
    #[error("Failed to write snapshot to: {path}")]
    SnapshotError {
        path: String,
        source: image::ImageError
    }
}
