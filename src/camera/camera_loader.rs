use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;

use std::path::{Path, PathBuf};

#[cfg(feature = "trace")]
use tracing::{debug, error, instrument};

use crate::camera::{Camera, CameraMode, PITCH_LIMIT};
use crate::camera::projection::{FOV, NEAR, FAR};
use crate::camera::camera_loader::CameraLoadError::{DeserializeError, ClipRangeError, PitchRangeError};
use crate::load::{load_deserializable_from_file, LoadError};

pub const CAMERA_LOAD_ID: &str = "camera";

/// Camera description as it appears in a config file. Every field is
/// optional and falls back to the `Camera::with_viewport` defaults.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CameraJSON {
    #[serde(default)]
    position: Option<[f32; 3]>,
    #[serde(default)]
    target: Option<[f32; 3]>,
    #[serde(default)]
    mode: Option<CameraMode>,
    #[serde(default)]
    yaw: Option<f32>,
    #[serde(default)]
    pitch: Option<f32>,
    #[serde(default)]
    fov: Option<f32>,
    #[serde(default)]
    near: Option<f32>,
    #[serde(default)]
    far: Option<f32>,
    #[serde(default)]
    movement_speed: Option<f32>,
    #[serde(default)]
    mouse_sensitivity: Option<f32>
}

impl CameraJSON {
    #[cfg_attr(feature = "trace", instrument)]
    pub fn into_camera(self, width: u32, height: u32) -> Result<Camera, CameraLoadError> {
        let defaults = Camera::with_viewport(width, height);

        let near = self.near.unwrap_or(NEAR);
        let far = self.far.unwrap_or(FAR);
        if near <= 0.0 || far <= near {
            #[cfg(feature = "trace")]
            error!("Rejecting clip range near={} far={}", near, far);

            return Err(ClipRangeError { near, far })
        }

        if let Some(pitch) = self.pitch {
            if !(-PITCH_LIMIT..=PITCH_LIMIT).contains(&pitch) {
                #[cfg(feature = "trace")]
                error!("Rejecting pitch {}", pitch);

                return Err(PitchRangeError { pitch, limit: PITCH_LIMIT })
            }
        }

        let mut camera = Camera::new(
            width,
            height,
            self.fov.unwrap_or(FOV),
            self.position.map(Vec3::from).unwrap_or_else(|| defaults.position()),
            self.mode.unwrap_or(CameraMode::Free),
            self.target.map(Vec3::from).unwrap_or_else(|| defaults.target())
        );
        camera.set_clip_planes(near, far);

        if self.yaw.is_some() || self.pitch.is_some() {
            camera.set_yaw_pitch(
                self.yaw.unwrap_or(defaults.yaw()),
                self.pitch.unwrap_or(defaults.pitch())
            );
        }
        if let Some(speed) = self.movement_speed {
            camera.set_movement_speed(speed);
        }
        if let Some(sensitivity) = self.mouse_sensitivity {
            camera.set_mouse_sensitivity(sensitivity);
        }

        Ok(camera)
    }
}

#[derive(Debug, Clone)]
pub struct CameraLoader {
    path: PathBuf,
}

impl CameraLoader {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            path: file_path.as_ref().to_path_buf()
        }
    }

    #[cfg_attr(feature = "trace", instrument)]
    pub fn load(&self, width: u32, height: u32) -> Result<Camera, CameraLoadError> {
        let json: CameraJSON = load_deserializable_from_file(&self.path, CAMERA_LOAD_ID)
            .map_err(|e| {
                #[cfg(feature = "trace")]
                error!("Failed to load Camera JSON from file: {:?}", self.path);

                DeserializeError {
                    path: self.path.display().to_string(),
                    source: e
                }
            })?;

        #[cfg(feature = "trace")]
        debug!("Loaded camera description: {:?}", json);

        json.into_camera(width, height)
    }
}

#[derive(Error, Debug)]
pub enum CameraLoadError {
    #[error("Failed to load Camera JSON from file: {path:?}")]
    DeserializeError {
        path: String,
        source: LoadError
    },
    #[error("Invalid clip range: near={near}, far={far}. Expected 0 < near < far")]
    ClipRangeError {
        near: f32,
        far: f32
    },
    #[error("Invalid pitch: {pitch}. Expected a value within +/-{limit} degrees")]
    PitchRangeError {
        pitch: f32,
        limit: f32
    }
}
