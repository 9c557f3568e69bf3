use gl_viewer::window::{abort_on_failure, WindowError};

use std::env;
use std::process::Command;

const CHILD_ENV: &str = "GL_VIEWER_FATAL_CHILD";

fn failed_creation() -> Result<(), WindowError> {
    Err(WindowError::SurfaceCreationError {
        width: 640,
        height: 480,
        title: String::from("unusable"),
        reason: String::from("no display")
    })
}

// Only does something when re-run by `fatal_aborts_with_a_diagnostic`.
#[test]
fn fatal_child() {
    if env::var(CHILD_ENV).is_err() {
        return
    }

    abort_on_failure(failed_creation());
}

#[test]
fn fatal_aborts_with_a_diagnostic() {
    let output = Command::new(env::current_exe().unwrap())
        .args(&["fatal_child", "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fatal: Failed to create GLFW window 640x480 \"unusable\": no display"), "{}", stderr);
}

#[test]
fn abort_on_failure_passes_values_through() {
    let value: Result<u32, WindowError> = Ok(7);

    assert_eq!(abort_on_failure(value), 7);
}
