//! # CmdRS CLI Capture Integration Tests
//!
//! File: cli/tests/capture.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! ## Overview
//!
//! Integration tests for the `cmdrs capture` subcommand: synchronous
//! dispatch with captured stdout, shell-string mode, and the capture-mode
//! contract that a non-zero exit is an error carrying the captured text.
//!
//! **Note:** These tests spawn real POSIX utilities, so they are gated to
//! Unix hosts.
//!
#![cfg(unix)]

// Declare and use the common module
mod common;
use common::*;

use predicates::prelude::*;

/// # Test Capture Stdout (`test_capture_stdout`)
///
/// The child's stdout is captured, decoded, and printed verbatim.
#[test]
fn test_capture_stdout() {
    cmdrs_cmd()
        .args(["capture", "--", "echo", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::diff("hi\n"));
}

/// # Test Capture Shell String (`test_capture_shell_string`)
///
/// Shell-string mode joins the arguments into one interpreter command.
#[test]
fn test_capture_shell_string() {
    cmdrs_cmd()
        .args(["capture", "--shell", "--", "echo", "hello", "world"])
        .assert()
        .success()
        .stdout(predicate::str::diff("hello world\n"));
}

/// # Test Capture Non-Zero Exit (`test_capture_nonzero_exit`)
///
/// A non-zero exit in capture mode is an error, not output.
#[test]
fn test_capture_nonzero_exit() {
    cmdrs_cmd()
        .args(["capture", "--", "false"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("External command failed"));
}

/// # Test Capture Skip (`test_capture_skip`)
///
/// A skipped capture prints nothing and succeeds.
#[test]
fn test_capture_skip() {
    cmdrs_cmd()
        .args(["capture", "--skip", "--", "echo", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

/// # Test Capture Environment Overlay (`test_capture_env_overlay`)
///
/// Overlay variables reach the captured child.
#[test]
fn test_capture_env_overlay() {
    cmdrs_cmd()
        .args([
            "capture",
            "-e",
            "CMDRS_IT_PROBE=captured",
            "--",
            "sh",
            "-c",
            "echo $CMDRS_IT_PROBE",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("captured\n"));
}
