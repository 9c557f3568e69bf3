use serde::Deserialize;

use std::path::{Path, PathBuf};

#[cfg(feature = "trace")]
use tracing::{debug, error, instrument};

use crate::camera::camera_loader::CameraJSON;
use crate::load::load_deserializable_from_file;
use crate::window::WindowError;
use crate::window::WindowError::ConfigError;

pub const WINDOW_LOAD_ID: &str = "window";

fn default_width() -> u32 { 800 }

fn default_height() -> u32 { 600 }

fn default_resizable() -> bool { true }

fn default_title() -> String { String::from("gl_viewer") }

#[derive(Deserialize, Debug, Clone)]
pub struct WindowJSON {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_resizable")]
    pub resizable: bool,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub offscreen: bool,
    #[serde(default)]
    pub clear_color: Option<[f32; 4]>,
    /// Extra cameras, appended after the window's default camera.
    #[serde(default)]
    pub cameras: Vec<CameraJSON>
}

#[derive(Debug, Clone)]
pub struct WindowLoader {
    path: PathBuf
}

impl WindowLoader {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            path: file_path.as_ref().to_path_buf()
        }
    }

    #[cfg_attr(feature = "trace", instrument)]
    pub fn load(&self) -> Result<WindowJSON, WindowError> {
        let json: WindowJSON = load_deserializable_from_file(&self.path, WINDOW_LOAD_ID)
            .map_err(|e| {
                #[cfg(feature = "trace")]
                error!("Failed to load Window JSON from file: {:?}", self.path);

                ConfigError {
                    path: self.path.display().to_string(),
                    source: e
                }
            })?;

        #[cfg(feature = "trace")]
        debug!("Loaded window description: {:?}", json);

        Ok(json)
    }
}
