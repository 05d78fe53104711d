//! # CmdRS CLI Run Integration Tests
//!
//! File: cli/tests/run.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! ## Overview
//!
//! Integration tests for the `cmdrs run` subcommand: run-to-completion
//! dispatch with inherited stdio, exit-status reporting, the skip gate, and
//! the early binary-resolution error.
//!
//! **Note:** These tests spawn real POSIX utilities (`true`, `false`,
//! `echo`), so they are gated to Unix hosts.
//!
#![cfg(unix)]

// Declare and use the common module
mod common;
use common::*;

use predicates::prelude::*;

/// # Test Run Success (`test_run_success`)
///
/// A zero-exit child yields a zero-exit `cmdrs`.
#[test]
fn test_run_success() {
    cmdrs_cmd().args(["run", "--", "true"]).assert().success();
}

/// # Test Run Inherited Stdout (`test_run_inherits_stdout`)
///
/// Run mode does not capture: the child's output flows straight through.
#[test]
fn test_run_inherits_stdout() {
    cmdrs_cmd()
        .args(["run", "--", "echo", "through"])
        .assert()
        .success()
        .stdout(predicate::str::contains("through"));
}

/// # Test Run Non-Zero Exit (`test_run_nonzero_exit`)
///
/// A non-zero child exit is reported as an external-command failure.
#[test]
fn test_run_nonzero_exit() {
    cmdrs_cmd()
        .args(["run", "--", "false"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("External command failed"));
}

/// # Test Run Missing Binary (`test_run_missing_binary`)
///
/// A binary absent from the search path fails before anything is spawned.
#[test]
fn test_run_missing_binary() {
    cmdrs_cmd()
        .args(["run", "--", "cmdrs_nonexistent_binary_xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found on PATH"));
}

/// # Test Run Skip (`test_run_skip`)
///
/// The skip gate short-circuits: even a failing command yields success
/// because nothing is executed.
#[test]
fn test_run_skip() {
    cmdrs_cmd()
        .args(["run", "--skip", "--", "false"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

/// # Test Run Environment Overlay (`test_run_env_overlay`)
///
/// An overlay variable reaches the child without being exported by the
/// parent `cmdrs` process itself.
#[test]
fn test_run_env_overlay() {
    cmdrs_cmd()
        .args([
            "run",
            "--env",
            "CMDRS_IT_PROBE=overlay",
            "--",
            "sh",
            "-c",
            "echo probe=$CMDRS_IT_PROBE",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("probe=overlay"));
}

/// # Test Run Workdir (`test_run_workdir`)
///
/// `--workdir` applies to the child.
#[test]
fn test_run_workdir() {
    cmdrs_cmd()
        .args(["run", "-w", "/", "--", "pwd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/\n"));
}
