use crate::camera::Camera;

#[cfg(feature = "trace")]
use tracing::debug;

/// Ordered, never-empty set of cameras with one active entry. Index 0 is the
/// default camera created with the window.
#[derive(Debug, Clone)]
pub struct CameraRig {
    cameras: Vec<Camera>,
    active: usize
}

impl CameraRig {
    pub fn new(default: Camera) -> Self {
        Self {
            cameras: vec![default],
            active: 0
        }
    }

    /// Appends a camera and returns its index. The active camera is unchanged.
    pub fn push(&mut self, camera: Camera) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    /// Advances the active index, wrapping to 0 past the last camera.
    pub fn change_camera(&mut self) -> usize {
        self.active = (self.active + 1) % self.cameras.len();

        #[cfg(feature = "trace")]
        debug!("Active camera is now {} of {}", self.active, self.cameras.len());

        self.active
    }

    /// Returns false and keeps the current camera when `index` is out of range.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index < self.cameras.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Camera {
        &self.cameras[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Camera {
        &mut self.cameras[self.active]
    }

    pub fn get(&self, index: usize) -> Option<&Camera> {
        self.cameras.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Camera> {
        self.cameras.get_mut(index)
    }

    pub fn count(&self) -> usize {
        self.cameras.len()
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    /// Pushes a new viewport size to every camera. Zero sizes are dropped by
    /// each camera.
    pub fn resize_all(&mut self, width: u32, height: u32) {
        for camera in self.cameras.iter_mut() {
            camera.set_viewport(width, height);
        }
    }
}
