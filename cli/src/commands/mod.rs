//! # CmdRS Commands Module
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module aggregates the top-level CLI command handlers of CmdRS. Each
//! submodule owns one subcommand: its `clap` argument struct and its async
//! `handle_*` function. The handlers are thin: they load configuration,
//! assemble an `Invocation` for the command execution subsystem
//! (`common::process`), dispatch it, and report the outcome.
//!
//! ## Architecture
//!
//! One submodule per execution mode:
//!
//! - **`run`**: `cmdrs run` — execute to completion with inherited stdio and
//!   report the exit status.
//! - **`capture`**: `cmdrs capture` — execute synchronously and print the
//!   child's captured stdout.
//! - **`spawn`**: `cmdrs spawn` — spawn without waiting, optionally feeding
//!   the child's stdin through the queue-buffered writer, then supervise
//!   until exit.
//!
//! A small shared helper (`parse_env_assignments`) turns repeated
//! `--env KEY=VALUE` flags into overlay pairs for all three handlers.
//!
use crate::core::error::{CmdrsError, Result};
use anyhow::anyhow;

/// Implements the `cmdrs capture` command (runs and prints captured stdout).
pub mod capture;
/// Implements the `cmdrs run` command (runs to completion, inherited stdio).
pub mod run;
/// Implements the `cmdrs spawn` command (spawns and supervises a child).
pub mod spawn;

/// Parses repeated `KEY=VALUE` assignments into environment overlay pairs.
///
/// # Arguments
///
/// * `assignments` - Raw `--env` flag values as typed on the command line.
///
/// # Returns
///
/// * `Result<Vec<(String, String)>>` - Parsed pairs, order preserved.
///
/// # Errors
///
/// `CmdrsError::ArgumentParsing` when an assignment has no `=` or an empty
/// variable name.
pub(crate) fn parse_env_assignments(assignments: &[String]) -> Result<Vec<(String, String)>> {
    let mut vars = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        match assignment.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                vars.push((key.to_string(), value.to_string()));
            }
            _ => {
                return Err(anyhow!(CmdrsError::ArgumentParsing(format!(
                    "Invalid environment assignment '{}'. Expected KEY=VALUE.",
                    assignment
                ))))
            }
        }
    }
    Ok(vars)
}
