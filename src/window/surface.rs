use glfw::{Context as _, WindowEvent, WindowHint, WindowMode};
use luminance_glfw::{GlfwSurface, GL33Context};
use luminance_windowing::{WindowDim, WindowOpt};

use std::os::raw::c_void;
use std::sync::mpsc::Receiver;

#[cfg(feature = "trace")]
use tracing::{debug, error, instrument};

use crate::window::WindowError;
use crate::window::WindowError::SurfaceCreationError;

/// Everything the dispatcher needs from the native window and its GL
/// context. `NativeSurface` is the GLFW implementation; anything else
/// (a scripted test double, say) can drive a `Window` without a GPU.
pub trait Surface {
    /// Pumps the native event queue and returns what arrived, oldest first.
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    /// Seconds on a monotonic clock.
    fn time(&self) -> f64;

    fn framebuffer_size(&self) -> (u32, u32);

    fn should_close(&self) -> bool;

    fn set_should_close(&mut self, value: bool);

    /// Switches to the primary monitor, or back to a window of
    /// `windowed_size`. Returns false if the mode did not change.
    fn set_fullscreen(&mut self, fullscreen: bool, windowed_size: (u32, u32)) -> bool;

    /// Clears color and depth, sets the viewport, enables depth testing.
    fn begin_frame(&mut self, viewport: (u32, u32), clear_color: [f32; 4]);

    /// Disables depth testing and presents.
    fn end_frame(&mut self);

    /// Tightly packed RGB bytes of the color buffer, bottom row first.
    fn read_pixels(&mut self, width: u32, height: u32) -> Vec<u8>;

    fn set_title(&mut self, title: &str);
}

/// A GLFW window with a current OpenGL 3.3 context, created through
/// luminance-glfw.
pub struct NativeSurface {
    context: GL33Context,
    events: Receiver<(f64, WindowEvent)>,
    windowed_position: (i32, i32)
}

impl NativeSurface {
    /// Creates the window and makes its context current. GLFW itself is
    /// initialised on the first call; later calls reuse it.
    #[cfg_attr(feature = "trace", instrument)]
    pub fn new(width: u32, height: u32, title: &str, resizable: bool, visible: bool) -> Result<Self, WindowError> {
        let creation_error = |reason: String| {
            #[cfg(feature = "trace")]
            error!("An error occurred while creating the GlfwSurface: {}", reason);

            SurfaceCreationError {
                width,
                height,
                title: title.to_string(),
                reason
            }
        };

        // Window hints are global to GLFW, so a hidden window is never mapped.
        let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS)
            .map_err(|e| creation_error(format!("{:?}", e)))?;
        glfw.window_hint(WindowHint::Visible(visible));
        glfw.window_hint(WindowHint::Resizable(resizable));

        let options = WindowOpt::default()
            .set_dim(WindowDim::Windowed { width, height });
        let surface = GlfwSurface::new_gl33(title.to_string(), options);
        glfw.default_window_hints();
        let surface = surface.map_err(|e| creation_error(format!("{:?}", e)))?;

        let mut context = surface.context;
        let events = surface.events_rx;

        if !visible {
            context.window.hide();
        }
        let windowed_position = context.window.get_pos();

        // luminance's GL backend loads the same bindings; loading again keeps
        // the frame-state calls below independent of that detail.
        gl::load_with(|symbol| context.window.get_proc_address(symbol) as *const c_void);

        #[cfg(feature = "trace")]
        debug!("GlfwSurface created: {}x{}, resizable={}, visible={}", width, height, resizable, visible);

        Ok(Self {
            context,
            events,
            windowed_position
        })
    }

    /// The luminance context, for renderers drawing between
    /// `render_begin` and `render_end`.
    pub fn context(&mut self) -> &mut GL33Context {
        &mut self.context
    }
}

impl Surface for NativeSurface {
    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.context.window.glfw.poll_events();

        glfw::flush_messages(&self.events)
            .map(|(_time, event)| event)
            .collect()
    }

    fn time(&self) -> f64 {
        self.context.window.glfw.get_time()
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.context.window.get_framebuffer_size();

        (width.max(0) as u32, height.max(0) as u32)
    }

    fn should_close(&self) -> bool {
        self.context.window.should_close()
    }

    fn set_should_close(&mut self, value: bool) {
        self.context.window.set_should_close(value);
    }

    #[cfg_attr(feature = "trace", instrument(skip(self)))]
    fn set_fullscreen(&mut self, fullscreen: bool, windowed_size: (u32, u32)) -> bool {
        let mut glfw = self.context.window.glfw.clone();
        let window = &mut self.context.window;

        if fullscreen {
            let position = window.get_pos();
            let switched = glfw.with_primary_monitor_mut(|_, monitor| {
                match monitor.and_then(|m| m.get_video_mode().map(|mode| (m, mode))) {
                    Some((monitor, mode)) => {
                        window.set_monitor(
                            WindowMode::FullScreen(monitor),
                            0,
                            0,
                            mode.width,
                            mode.height,
                            Some(mode.refresh_rate)
                        );
                        true
                    },
                    None => {
                        #[cfg(feature = "trace")]
                        error!("No primary monitor or video mode, staying windowed");

                        false
                    }
                }
            });
            if switched {
                self.windowed_position = position;
            }

            switched
        } else {
            let (x, y) = self.windowed_position;
            let (width, height) = windowed_size;
            window.set_monitor(WindowMode::Windowed, x, y, width, height, None);

            true
        }
    }

    fn begin_frame(&mut self, viewport: (u32, u32), clear_color: [f32; 4]) {
        let [r, g, b, a] = clear_color;
        unsafe {
            gl::Viewport(0, 0, viewport.0 as i32, viewport.1 as i32);
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
            gl::Enable(gl::DEPTH_TEST);
        }
    }

    fn end_frame(&mut self) {
        unsafe {
            gl::Disable(gl::DEPTH_TEST);
        }
        self.context.window.swap_buffers();
    }

    fn read_pixels(&mut self, width: u32, height: u32) -> Vec<u8> {
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        unsafe {
            gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
            gl::ReadPixels(
                0,
                0,
                width as i32,
                height as i32,
                gl::RGB,
                gl::UNSIGNED_BYTE,
                pixels.as_mut_ptr() as *mut c_void
            );
        }

        pixels
    }

    fn set_title(&mut self, title: &str) {
        self.context.window.set_title(title);
    }
}
