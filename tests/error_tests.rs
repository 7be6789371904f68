//! Error scenario integration tests

use std::process::Command;

fn screenrec_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_screenrec"))
}

#[test]
fn ctl_without_service_error() {
    let output = screenrec_bin()
        .args(["ctl", "status"])
        // Point the socket at a directory with no service
        .env("XDG_RUNTIME_DIR", "/nonexistent")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No service running"),
        "Expected error about missing service, got: {}",
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    let output = screenrec_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let output = screenrec_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_profile() {
    let output = screenrec_bin()
        .args(["config", "set", "profile", "invalid"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid") || stderr.contains("invalid") || stderr.contains("profile"),
        "Expected error about invalid profile, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_poll_interval() {
    let output = screenrec_bin()
        .args(["config", "set", "poll_interval_ms", "0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("greater than zero") || stderr.contains("poll_interval_ms"),
        "Expected error about poll period, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_notify() {
    let output = screenrec_bin()
        .args(["config", "set", "notify", "maybe"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") || stderr.contains("false"),
        "Expected error about boolean value, got: {}",
        stderr
    );
}
