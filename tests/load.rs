mod test_surface;

use gl_viewer::camera::CameraMode;
use gl_viewer::camera::camera_loader::{CameraLoadError, CameraLoader};
use gl_viewer::load::{load_deserializable_from_json, load_json, JSONLoad, LoadError};
use gl_viewer::window::WindowError;
use gl_viewer::window::window_loader::WindowLoader;

use glam::Vec3;
use serde::Deserialize;
use serde_json::json;

use std::fs;
use std::path::PathBuf;

use test_surface::temp_path;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = temp_path(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_a_camera_file() {
    let path = write_temp("target_camera.json", r#"{
        "load_type_id": "camera",
        "actual_value": {
            "mode": "target",
            "position": [0.0, 1.0, 4.0],
            "target": [0.0, 1.0, 0.0],
            "fov": 60.0,
            "near": 0.5,
            "far": 50.0,
            "movement_speed": 5.0
        }
    }"#);

    let camera = CameraLoader::new(&path).load(640, 480).unwrap();

    assert_eq!(camera.mode(), CameraMode::Target);
    assert_eq!(camera.position(), Vec3::new(0.0, 1.0, 4.0));
    assert_eq!(camera.target(), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(camera.viewport(), (640, 480));
    assert_eq!(camera.movement_speed(), 5.0);
    assert!((camera.fov(true).1 - 60.0).abs() < 1e-3);

    fs::remove_file(&path).unwrap();
}

#[test]
fn empty_camera_description_uses_defaults() {
    let path = write_temp("empty_camera.json", r#"{"load_type_id": "camera", "actual_value": {}}"#);

    let camera = CameraLoader::new(&path).load(800, 600).unwrap();

    assert_eq!(camera.mode(), CameraMode::Free);
    assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 3.0));

    fs::remove_file(&path).unwrap();
}

#[test]
fn wrong_load_id_is_rejected() {
    let path = write_temp("wrong_id.json", r#"{"load_type_id": "window", "actual_value": {}}"#);

    match CameraLoader::new(&path).load(800, 600) {
        Err(CameraLoadError::DeserializeError { source: LoadError::LoadIDError { actual, expected }, .. }) => {
            assert_eq!(actual, "window");
            assert_eq!(expected, "camera");
        },
        other => panic!("unexpected result: {:?}", other)
    }

    fs::remove_file(&path).unwrap();
}

#[test]
fn missing_file_is_a_read_error() {
    let path = temp_path("does_not_exist.json");

    match CameraLoader::new(&path).load(800, 600) {
        Err(CameraLoadError::DeserializeError { source: LoadError::ReadError { .. }, .. }) => (),
        other => panic!("unexpected result: {:?}", other)
    }
}

#[test]
fn malformed_json_is_a_conversion_error() {
    let path = write_temp("malformed.json", "{ not json");

    match load_json(&path) {
        Err(LoadError::ValueConversionError { .. }) => (),
        other => panic!("unexpected result: {:?}", other)
    }

    fs::remove_file(&path).unwrap();
}

#[test]
fn inverted_clip_range_is_rejected() {
    let path = write_temp("bad_clip.json", r#"{
        "load_type_id": "camera",
        "actual_value": {"near": 10.0, "far": 1.0}
    }"#);

    match CameraLoader::new(&path).load(800, 600) {
        Err(CameraLoadError::ClipRangeError { near, far }) => {
            assert_eq!(near, 10.0);
            assert_eq!(far, 1.0);
        },
        other => panic!("unexpected result: {:?}", other)
    }

    fs::remove_file(&path).unwrap();
}

#[test]
fn pitch_beyond_the_limit_is_rejected() {
    let path = write_temp("steep_pitch.json", r#"{
        "load_type_id": "camera",
        "actual_value": {"pitch": 90.0}
    }"#);

    match CameraLoader::new(&path).load(800, 600) {
        Err(CameraLoadError::PitchRangeError { pitch, limit }) => {
            assert_eq!(pitch, 90.0);
            assert_eq!(limit, 89.0);
        },
        other => panic!("unexpected result: {:?}", other)
    }

    fs::remove_file(&path).unwrap();
}

#[test]
fn pitch_at_the_limit_is_accepted() {
    let path = write_temp("limit_pitch.json", r#"{
        "load_type_id": "camera",
        "actual_value": {"pitch": -89.0, "yaw": 0.0}
    }"#);

    let camera = CameraLoader::new(&path).load(800, 600).unwrap();

    assert_eq!(camera.pitch(), -89.0);
    assert_eq!(camera.yaw(), 0.0);
    assert!((camera.up().length() - 1.0).abs() < 1e-4);

    fs::remove_file(&path).unwrap();
}

#[derive(Deserialize, Debug, PartialEq)]
struct Sample {
    value: u32
}

#[test]
fn deserializes_the_actual_value() {
    let load = JSONLoad { load_type_id: String::from("sample"), actual_value: json!({"value": 7}) };

    let sample: Sample = load_deserializable_from_json(load.clone(), "sample").unwrap();
    assert_eq!(sample, Sample { value: 7 });

    let result: Result<Sample, LoadError> = load_deserializable_from_json(load, "other");
    assert!(matches!(result, Err(LoadError::LoadIDError { .. })));

    let bad = JSONLoad { load_type_id: String::from("sample"), actual_value: json!({"value": "seven"}) };
    let result: Result<Sample, LoadError> = load_deserializable_from_json(bad, "sample");
    assert!(matches!(result, Err(LoadError::DeserializationError { .. })));
}

#[test]
fn window_file_fills_in_defaults() {
    let path = write_temp("window.json", r#"{
        "load_type_id": "window",
        "actual_value": {"title": "viewer", "cameras": [{"mode": "billboard"}]}
    }"#);

    let config = WindowLoader::new(&path).load().unwrap();

    assert_eq!(config.width, 800);
    assert_eq!(config.height, 600);
    assert!(config.resizable);
    assert!(!config.offscreen);
    assert_eq!(config.title, "viewer");
    assert_eq!(config.clear_color, None);
    assert_eq!(config.cameras.len(), 1);

    fs::remove_file(&path).unwrap();
}

#[test]
fn window_file_errors_carry_the_path() {
    let path = temp_path("missing_window.json");

    match WindowLoader::new(&path).load() {
        Err(WindowError::ConfigError { path: reported, .. }) => {
            assert_eq!(reported, path.display().to_string());
        },
        other => panic!("unexpected result: {:?}", other)
    }
}
