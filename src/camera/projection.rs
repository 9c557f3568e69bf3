use glam::Mat4;

#[cfg(feature = "trace")]
use tracing::{debug, instrument};

pub const FOV: f32 = 45.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

/// Perspective parameters plus the cached matrix built from them.
///
/// The matrix is a pure function of `(fov, width / height, near, far)` and is
/// rebuilt only when one of those changes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    fov: f32,
    near: f32,
    far: f32,
    width: u32,
    height: u32,
    matrix: Mat4
}

impl Projection {
    /// `fov` is the vertical field of view in degrees. A zero dimension is
    /// bumped to one so the aspect ratio stays finite.
    pub fn new(width: u32, height: u32, fov: f32, near: f32, far: f32) -> Self {
        let mut projection = Self {
            fov,
            near,
            far,
            width: width.max(1),
            height: height.max(1),
            matrix: Mat4::IDENTITY
        };
        projection.recompute();

        projection
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Aspect ratio from the stored viewport.
    pub fn viewport_aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Returns false and keeps the old viewport when either side is zero
    /// (a minimised window reports 0x0).
    #[cfg_attr(feature = "trace", instrument(skip(self)))]
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            #[cfg(feature = "trace")]
            debug!("Ignoring zero-sized viewport {}x{}", width, height);

            return false
        }

        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.recompute();
        }

        true
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.recompute();
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.recompute();
    }

    /// Horizontal and vertical field of view recovered from the matrix
    /// diagonal: `m00 = 1 / (aspect * tan(fy / 2))`, `m11 = 1 / tan(fy / 2)`.
    pub fn fov_from_matrix(&self, in_degrees: bool) -> (f32, f32) {
        let (half_x, half_y) = self.half_angles();
        let (fov_x, fov_y) = (2.0 * half_x, 2.0 * half_y);

        if in_degrees {
            (fov_x.to_degrees(), fov_y.to_degrees())
        } else {
            (fov_x, fov_y)
        }
    }

    /// Aspect ratio recovered from the matrix diagonal.
    pub fn aspect_from_matrix(&self) -> f32 {
        self.matrix.y_axis.y / self.matrix.x_axis.x
    }

    /// Distance at which a sphere of `radius` exactly fits the view on both
    /// axes. The narrower half-angle decides.
    pub fn distance_to_fit(&self, radius: f32) -> f32 {
        let (half_x, half_y) = self.half_angles();

        (radius / half_x.sin()).max(radius / half_y.sin())
    }

    fn half_angles(&self) -> (f32, f32) {
        (
            (1.0 / self.matrix.x_axis.x).atan(),
            (1.0 / self.matrix.y_axis.y).atan()
        )
    }

    fn recompute(&mut self) {
        self.matrix = Mat4::perspective_rh_gl(
            self.fov.to_radians(),
            self.viewport_aspect(),
            self.near,
            self.far
        );
    }
}
