//! Integration tests for the `rentley` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `rentley` binary with env isolation.
///
/// Clears all `RENTLEY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn rentley_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("rentley");
    cmd.env("HOME", "/tmp/rentley-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/rentley-cli-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/rentley-cli-test-nonexistent")
        .env_remove("RENTLEY_PROFILE")
        .env_remove("RENTLEY_SERVER")
        .env_remove("RENTLEY_OUTPUT")
        .env_remove("RENTLEY_INSECURE")
        .env_remove("RENTLEY_TIMEOUT")
        .env_remove("RENTLEY_USERNAME")
        .env_remove("RENTLEY_PASSWORD")
        .env_remove("RENTLEY_TOKEN_FILE");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = rentley_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    rentley_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("rental")
            .and(predicate::str::contains("vehicles"))
            .and(predicate::str::contains("book"))
            .and(predicate::str::contains("rentals")),
    );
}

#[test]
fn test_version_flag() {
    rentley_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rentley"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    rentley_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    rentley_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = rentley_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_vehicles_list_no_server_configured() {
    rentley_cmd()
        .args(["vehicles", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("server")
                .or(predicate::str::contains("config"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_unknown_profile_is_reported() {
    let output = rentley_cmd()
        .args(["--profile", "nope", "vehicles", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("nope") || text.contains("Profile"),
        "Expected profile error:\n{text}"
    );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    rentley_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_invalid_output_format() {
    let output = rentley_cmd()
        .args(["--output", "invalid", "vehicles", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_book_requires_dates() {
    let output = rentley_cmd()
        .args(["book", "--vehicle", "5"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("--from") || text.contains("required"),
        "Expected missing-argument error:\n{text}"
    );
}

#[test]
fn test_book_rejects_malformed_date() {
    let output = rentley_cmd()
        .args([
            "book", "--vehicle", "5", "--from", "tomorrow", "--to", "2026-09-07",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_rentals_set_status_rejects_unknown_status() {
    let output = rentley_cmd()
        .args(["rentals", "set-status", "42", "--status", "parked"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("parked") || text.contains("status"),
        "Expected status parse error:\n{text}"
    );
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse correctly — the failure should be about
    // missing server config, not about argument parsing.
    rentley_cmd()
        .args([
            "--output",
            "json",
            "--verbose",
            "--insecure",
            "--timeout",
            "60",
            "vehicles",
            "list",
        ])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("server")
                .or(predicate::str::contains("config"))
                .or(predicate::str::contains("profile")),
        );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_vehicles_subcommands_exist() {
    rentley_cmd()
        .args(["vehicles", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("available"))
                .and(predicate::str::contains("search")),
        );
}

#[test]
fn test_rentals_subcommands_exist() {
    rentley_cmd()
        .args(["rentals", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("cancel"))
                .and(predicate::str::contains("complete"))
                .and(predicate::str::contains("set-status")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    rentley_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles")),
        );
}

// ── Commands requiring login fail cleanly without a token ───────────

#[test]
fn test_whoami_without_login() {
    let output = rentley_cmd()
        .args(["--server", "http://127.0.0.1:9", "whoami"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "auth errors exit with 3");
    let text = combined_output(&output);
    assert!(
        text.contains("log") || text.contains("Login") || text.contains("login"),
        "Expected login hint:\n{text}"
    );
}
