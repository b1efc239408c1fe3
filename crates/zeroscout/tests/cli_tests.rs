//! CLI integration tests.
//!
//! These run the built binary. Only commands that work without the
//! discovery tools installed are exercised here.

use std::process::Command;

/// Get the path to the zeroscout binary.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("Failed to get current exe")
        .parent()
        .expect("Failed to get parent directory")
        .to_path_buf();

    // Go up from deps directory
    if path.ends_with("deps") {
        path.pop();
    }

    path.join("zeroscout").to_string_lossy().to_string()
}

#[test]
fn test_version_command() {
    let output = Command::new(binary_path())
        .arg("version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("zeroscout"));
}

#[test]
fn test_help_command() {
    let output = Command::new(binary_path())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Local-network service discovery"));
    assert!(stdout.contains("browse"));
    assert!(stdout.contains("publish"));
}

#[test]
fn test_browse_help_lists_filters() {
    let output = Command::new(binary_path())
        .args(["browse", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--name"));
    assert!(stdout.contains("--domain"));
    assert!(stdout.contains("--json"));
}

#[test]
fn test_publish_requires_arguments() {
    let output = Command::new(binary_path())
        .arg("publish")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
