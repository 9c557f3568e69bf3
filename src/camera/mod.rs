pub mod projection;
pub mod camera_loader;
pub mod rig;

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::Deserialize;

#[cfg(feature = "trace")]
use tracing::{debug, instrument};

use crate::camera::projection::{Projection, FOV, NEAR, FAR};

pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
pub const PITCH_LIMIT: f32 = 89.0;
pub const SPEED: f32 = 2.5;
pub const SENSITIVITY: f32 = 0.1;
pub const PAN_SENSITIVITY: f32 = 0.01;
pub const ZOOM_SPEED: f32 = 0.5;

/// Decides which fields drive the view and which input handlers are live.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// First-person fly camera driven by yaw/pitch.
    Free,
    /// Fixed look-at. Ignores keyboard and mouse.
    Target,
    /// Orbits `target`. `position` is an offset in camera space.
    Billboard
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    mode: CameraMode,
    projection: Projection,
    movement_speed: f32,
    mouse_sensitivity: f32,
    pan_sensitivity: f32,
    zoom_speed: f32
}

impl Camera {
    #[cfg_attr(feature = "trace", instrument)]
    pub fn new(width: u32, height: u32, fov: f32, position: Vec3, mode: CameraMode, target: Vec3) -> Self {
        let mut camera = Self {
            position,
            target,
            front: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::X,
            up: Vec3::Y,
            world_up: Vec3::Y,
            yaw: YAW,
            pitch: PITCH,
            mode,
            projection: Projection::new(width, height, fov, NEAR, FAR),
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            pan_sensitivity: PAN_SENSITIVITY,
            zoom_speed: ZOOM_SPEED
        };
        camera.update_camera_vectors();

        camera
    }

    /// Free camera three units back from the origin.
    pub fn with_viewport(width: u32, height: u32) -> Self {
        Self::new(width, height, FOV, Vec3::new(0.0, 0.0, 3.0), CameraMode::Free, Vec3::ZERO)
    }

    pub fn process_keyboard(&mut self, direction: Movement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;

        match self.mode {
            CameraMode::Free => match direction {
                Movement::Forward => self.position += self.front * velocity,
                Movement::Backward => self.position -= self.front * velocity,
                Movement::Left => self.position -= self.right * velocity,
                Movement::Right => self.position += self.right * velocity
            },
            // Screen axes only, the orbit itself is left to the mouse.
            CameraMode::Billboard => match direction {
                Movement::Forward => self.position.y += velocity,
                Movement::Backward => self.position.y -= velocity,
                Movement::Left => self.position.x -= velocity,
                Movement::Right => self.position.x += velocity
            },
            CameraMode::Target => ()
        }
    }

    /// Rotates by the cursor offsets, or pans when `modifier_held`.
    /// `y_offset` is positive when the cursor moves up.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, modifier_held: bool, constrain_pitch: bool) {
        if self.mode == CameraMode::Target {
            return
        }

        if modifier_held {
            let (dx, dy) = (x_offset * self.pan_sensitivity, y_offset * self.pan_sensitivity);
            match self.mode {
                CameraMode::Free => self.position -= self.right * dx + self.up * dy,
                _ => {
                    self.position.x -= dx;
                    self.position.y -= dy;
                }
            }
            return
        }

        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_camera_vectors();
    }

    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        if self.mode == CameraMode::Billboard {
            self.position.z -= y_offset * self.zoom_speed;
        }
    }

    pub fn projection(&self) -> Mat4 {
        self.projection.matrix()
    }

    pub fn view(&self) -> Mat4 {
        match self.mode {
            CameraMode::Free => Mat4::look_at_rh(self.position, self.position + self.front, self.up),
            CameraMode::Target => Mat4::look_at_rh(self.position, self.target, self.world_up),
            CameraMode::Billboard => {
                // Move the target to the origin, spin it, then push it out
                // by the camera-space offset.
                let t1 = Mat4::from_translation(-self.position);
                let r = Mat4::from_rotation_x(self.pitch.to_radians())
                    * Mat4::from_rotation_y((self.yaw - YAW).to_radians());
                let t2 = Mat4::from_translation(-self.target);

                t1 * r * t2
            }
        }
    }

    /// Pixel coordinates (origin top-left) of `world_coord` transformed by
    /// `model`, or `None` when the point is behind the camera or outside the
    /// near/far range.
    pub fn screen_position(&self, world_coord: Vec3, model: Mat4) -> Option<Vec2> {
        let clip: Vec4 = self.projection() * self.view() * model * world_coord.extend(1.0);
        if clip.w <= 0.0 {
            return None
        }

        let ndc = Vec3::new(clip.x, clip.y, clip.z) / clip.w;
        if ndc.z < -1.0 || ndc.z > 1.0 {
            return None
        }

        let (width, height) = self.projection.size();
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width as f32,
            (1.0 - ndc.y) * 0.5 * height as f32
        ))
    }

    /// `(horizontal, vertical)` field of view.
    pub fn fov(&self, in_degrees: bool) -> (f32, f32) {
        self.projection.fov_from_matrix(in_degrees)
    }

    pub fn aspect(&self) -> f32 {
        self.projection.aspect_from_matrix()
    }

    pub fn distance_to_fit(&self, bounding_radius: f32) -> f32 {
        self.projection.distance_to_fit(bounding_radius)
    }

    /// World-space eye position. In billboard mode `position` is a
    /// camera-space offset, so the view has to be inverted.
    pub fn eye_position(&self) -> Vec3 {
        match self.mode {
            CameraMode::Billboard => self.view().inverse().transform_point3(Vec3::ZERO),
            _ => self.position
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    #[cfg_attr(feature = "trace", instrument(skip(self)))]
    pub fn set_mode(&mut self, mode: CameraMode) {
        #[cfg(feature = "trace")]
        debug!("Camera mode {:?} -> {:?}", self.mode, mode);

        self.mode = mode;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Sets the Euler angles directly. Pitch is not clamped here.
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.update_camera_vectors();
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.projection.set_fov(fov);
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.projection.set_clip_planes(near, far);
    }

    /// Returns false when the size was ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        self.projection.set_viewport(width, height)
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.projection.size()
    }

    pub fn projection_params(&self) -> &Projection {
        &self.projection
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn set_movement_speed(&mut self, speed: f32) {
        self.movement_speed = speed;
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    pub fn set_mouse_sensitivity(&mut self, sensitivity: f32) {
        self.mouse_sensitivity = sensitivity;
    }

    pub fn set_pan_sensitivity(&mut self, sensitivity: f32) {
        self.pan_sensitivity = sensitivity;
    }

    pub fn set_zoom_speed(&mut self, speed: f32) {
        self.zoom_speed = speed;
    }

    fn update_camera_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos()
        ).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
