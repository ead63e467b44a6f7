#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Runs the `petfinder-gateway` binary for the paths that exit on their own.

use std::process::{Command, Output, Stdio};

fn run_gateway(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_petfinder-gateway"))
        .args(args)
        .env_remove("PF_CLIENT_ID")
        .env_remove("PF_CLIENT_SECRET")
        .env_remove("PF_BASE_URL")
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute petfinder-gateway")
}

#[test]
fn help_lists_options() {
    let output = run_gateway(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    for flag in ["--config", "--port", "--env-file", "--log-format", "--verbose"] {
        assert!(stdout.contains(flag), "help should mention {flag}");
    }
}

#[test]
fn version_prints_binary_name() {
    let output = run_gateway(&["--version"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("petfinder-gateway"));
}

#[test]
fn missing_credentials_exit_non_zero() {
    let output = run_gateway(&["--env-file", "definitely-missing.env", "--port", "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to initialize Petfinder client"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn missing_config_file_exits_non_zero() {
    let output = run_gateway(&["--config", "definitely-missing.yaml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config file does not exist"));
}
