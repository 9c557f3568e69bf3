use gl_viewer::camera::{Camera, CameraMode};
use gl_viewer::window::{abort_on_failure, Window};

use glam::Vec3;
use glfw::Key;

use anyhow::Result;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;
const TITLE: &str = "gl_viewer";
const SNAPSHOT_FILE: &str = "snapshot.bmp";

fn main() -> Result<()> {
    #[cfg(feature = "trace")]
    let _guard = gl_viewer::log::init_logger("logs")?;

    let mut window = abort_on_failure(Window::create(WIDTH, HEIGHT, true, TITLE));
    let (width, height) = window.camera().viewport();
    window.add_camera(Camera::new(width, height, 45.0, Vec3::new(0.0, 2.0, 6.0), CameraMode::Target, Vec3::ZERO));
    window.add_camera(Camera::new(width, height, 45.0, Vec3::new(0.0, 0.0, 6.0), CameraMode::Billboard, Vec3::ZERO));
    window.set_clear_color([0.1, 0.1, 0.12, 1.0]);

    let mut frames = 0u64;
    while !window.should_close() {
        window.render_begin();

        if window.keyboard().was_just_pressed(Key::C) {
            window.change_camera();
        }
        if window.keyboard().was_just_pressed(Key::F11) {
            window.toggle_fullscreen();
        }
        if window.keyboard().was_just_pressed(Key::P) {
            window.snapshot(SNAPSHOT_FILE)?;
        }

        window.render_end();

        frames += 1;
        if frames % 60 == 0 {
            let title = format!("{} - camera {} - {:.1} fps", TITLE, window.active_camera_index(), window.fps());
            window.set_title(&title);
        }
    }

    Ok(())
}
