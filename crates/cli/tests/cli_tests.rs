//! CLI integration tests

use std::process::Command;

fn repset(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "-p", "repset-cli", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = repset(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("capture"), "Should show capture command");
    assert!(stdout.contains("restore"), "Should show restore command");
    assert!(
        stdout.contains("--kubeconfig"),
        "Should show kubeconfig option"
    );
    assert!(
        stdout.contains("--service-account"),
        "Should show service-account option"
    );
    assert!(stdout.contains("--dry-run"), "Should show dry-run option");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = repset(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("repset"), "Should show binary name");
}

/// Test capture subcommand help
#[test]
fn test_capture_help() {
    let output = repset(&["capture", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Capture help should succeed");
    assert!(stdout.contains("--name"), "Should show name option");
    assert!(
        stdout.contains("--namespace"),
        "Should show namespace option"
    );
    assert!(stdout.contains("--file"), "Should show file option");
}

/// Test restore subcommand help
#[test]
fn test_restore_help() {
    let output = repset(&["restore", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Restore help should succeed");
    assert!(stdout.contains("--file"), "Should show file option");
    assert!(stdout.contains("--dry-run"), "Should show dry-run option");
}

/// Test format option
#[test]
fn test_format_option() {
    let output = repset(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = repset(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}

/// Test missing required argument error handling
#[test]
fn test_missing_argument() {
    let output = repset(&["capture"]);

    assert!(!output.status.success(), "Missing argument should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("required") || stderr.contains("error"),
        "Should show error about missing argument"
    );
}

/// The two auth modes are mutually exclusive
#[test]
fn test_conflicting_auth_flags() {
    let output = repset(&[
        "restore",
        "--file",
        "whatever.yml",
        "--kubeconfig",
        "/tmp/kubeconfig",
        "--service-account",
    ]);

    assert!(!output.status.success(), "Conflicting flags should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cannot be used with"),
        "Should show conflict message"
    );
}

/// Restoring from a missing file fails before any cluster contact
#[test]
fn test_restore_missing_file() {
    let output = repset(&["restore", "--file", "/nonexistent/preset.yml"]);

    assert_eq!(output.status.code(), Some(1), "Should fail generically");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("could not read preset file"),
        "Should show read error"
    );
}

/// A preset missing its namespace is rejected by validation, with a distinct
/// exit code, before any cluster contact
#[test]
fn test_restore_validation_failure() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("preset.yml");
    std::fs::write(
        &path,
        "name: nightly\ndeployments: []\nstateFulSets: []\n",
    )
    .unwrap();

    let output = repset(&["restore", "--file", path.to_str().unwrap()]);

    assert_eq!(
        output.status.code(),
        Some(4),
        "Should use the validation exit code"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("namespace"),
        "Should name the offending field"
    );
}
