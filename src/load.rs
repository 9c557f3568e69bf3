use serde_json::{Value, from_str, from_value};
use serde::Deserialize;

use std::fs::read_to_string;
use std::path::Path;

use thiserror::Error;

#[cfg(feature="trace")]
use tracing::{instrument, trace, debug};

use crate::load::LoadError::{JSONLoadConversionError, ValueConversionError, ReadError, LoadIDError, DeserializationError};

/// Envelope every configuration file is wrapped in. `load_type_id` names the
/// payload so a camera file can't be fed to the window loader by accident.
#[derive(Deserialize, Debug, Clone)]
pub struct JSONLoad {
    pub load_type_id: String,
    pub actual_value: Value
}

#[cfg_attr(feature="trace", instrument(skip(file_path)))]
pub fn load_json(file_path: impl AsRef<Path>) -> Result<JSONLoad, LoadError> {
    let file_path = file_path.as_ref();
    #[cfg(feature="trace")]
    trace!("ENTER: load_json");

    let json_string = read_to_string(file_path)
        .map_err(|e| {
            ReadError {
                path: file_path.display().to_string(), source: e
            }
        })?;

    #[cfg(feature="trace")]
    debug!("Successfully loaded file into string from: {}", file_path.display());

    let json_value = from_str::<Value>(json_string.as_str())
        .map_err(|e| {
            ValueConversionError {
                string_value: json_string,
                source: e
            }
        })?;

    let load_json = from_value(json_value.clone())
        .map_err(|e| {
            JSONLoadConversionError {
                value: json_value,
                source: e
            }
        });

    #[cfg(feature="trace")]
    trace!("EXIT: load_json");

    load_json
}

#[cfg_attr(feature="trace", instrument(skip(file_path)))]
pub fn load_deserializable_from_file<T: for<'de> Deserialize<'de>>(file_path: impl AsRef<Path>, file_id: &str) -> Result<T, LoadError> {
    #[cfg(feature="trace")]
    trace!("ENTER: load_deserializable_from_file");

    let json_value = load_json(file_path)?;

    #[cfg(feature="trace")]
    trace!("Successfully loaded JSONLoad: {:#?}", json_value);

    load_deserializable_from_json(json_value, file_id)
}

#[cfg_attr(feature="trace", instrument)]
pub fn load_deserializable_from_json<T: for<'de> Deserialize<'de>>(json: JSONLoad, load_id: &str) -> Result<T, LoadError> {
    if json.load_type_id != load_id {
        return Err(LoadIDError {
            actual: json.load_type_id,
            expected: load_id.to_string()
        })
    }

    #[cfg(feature="trace")]
    trace!("Load ID: {} matched given file ID", json.load_type_id);

    from_value::<T>(json.actual_value.clone())
        .map_err(|e| {
            DeserializationError {
                value: json.actual_value,
                source: e
            }
        })
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error loading file at path: {path}")]
    ReadError {
        path: String,
        source: std::io::Error
    },
    #[error("Error creating serde_json::Value at (line: {:#?}, column: {:#?}) of type: {:#?} from file string: {string_value}", .source.line(), .source.column(), .source.classify())]
    ValueConversionError {
        string_value: String,
        source: serde_json::error::Error
    },
    #[error("Error creating load::JSONLoad from serde_json::value::Value. \nExpected: {{\"load_type_id\": String, \"actual_value\": Object}} \nGot: {value}")]
    JSONLoadConversionError {
        value: Value,
        source: serde_json::error::Error
    },
    #[error("Error matching given load ID to type expected.\nExpected: {expected}\nActual: {actual}")]
    LoadIDError {
        actual: String,
        expected: String,
    },
    #[error("Error deserializing serde_json::Value: {value}")]
    DeserializationError {
        value: Value,
        source: serde_json::error::Error
    }
}
