//! # CmdRS Process Dispatcher (`common::process::execute`)
//!
//! File: cli/src/common/process/execute.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module is the single entry point for running external processes. It
//! takes a fully-built `Invocation`, validates and normalizes it, applies the
//! behavioral gates (skip, shell-string, confirmation), merges the per-call
//! environment overlay, filters platform-specific options, and finally
//! dispatches by execution mode: capture stdout, run to completion, or spawn
//! and hand back a live handle.
//!
//! ## Architecture
//!
//! `execute` runs a fixed pipeline; each step either transforms the request
//! or short-circuits with a named outcome or error:
//!
//! 1. **Normalize**: flatten the argument fragments, dropping blocked
//!    sentinels. An empty result is an `InvalidInvocation`.
//! 2. **Mode resolution**: capture + spawn requested together is an
//!    `InvalidInvocation`, as is buffered stdin outside spawn mode.
//! 3. **Binary resolution**: unless running through the shell interpreter,
//!    `argv[0]` must resolve on the search path — converting a late, opaque
//!    OS spawn failure into an early `BinaryNotFound`.
//! 4. **Dispatch log**: one line with argv, working directory, and mode;
//!    info-level when running, debug when skipped or quiet.
//! 5. **Skip short-circuit**: `Outcome::Skipped`, nothing spawned.
//! 6. **Shell-string transform**: argv joined into one interpreter command
//!    string, with a security warning (sharper when unconfirmed).
//! 7. **Confirmation gate**: interactive yes/no; declining returns
//!    `Outcome::Declined`, which is not an error.
//! 8. **Environment overlay**: the merged parent ∪ overlay mapping is handed
//!    to the child; the parent's own environment is never mutated.
//! 9. **Platform filtering**: the pre-exec hook is applied on Unix and
//!    dropped with a logged notice elsewhere.
//! 10. **Mode dispatch**: capture / run / spawn, per `Outcome`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{execute, Invocation, Outcome};
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! // Capture: decoded stdout, non-zero exit is an error.
//! let text = match execute(Invocation::new().args(["git", "status"]).capture()).await? {
//!     Outcome::Captured(text) => text,
//!     _ => String::new(),
//! };
//!
//! // Run: the exit status is data, not an error.
//! if let Outcome::Completed(status) =
//!     execute(Invocation::new().args(["make", "lint"])).await?
//! {
//!     println!("lint exited with {:?}", status.code());
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::common::{args, system, ui::prompts};
use crate::core::error::{CmdrsError, Result};
use anyhow::{anyhow, Context};
use std::collections::HashMap;
use std::ffi::OsString;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::handle::ProcessHandle;
use super::invocation::{ExecMode, Invocation};
use super::stdin::StdinPump;

/// Result of one dispatched invocation.
///
/// `Skipped` and `Declined` are deliberate no-op outcomes, distinguishable
/// from success but never surfaced as errors.
#[derive(Debug)]
pub enum Outcome {
    /// Capture mode: decoded stdout of the exited child.
    Captured(String),
    /// Run mode: the child's exit status, zero or not.
    Completed(ExitStatus),
    /// Spawn mode: live handle to the still-running child.
    Spawned(ProcessHandle),
    /// The invocation carried `skip`; no process was created.
    Skipped,
    /// The user declined the confirmation prompt; no process was created.
    Declined,
}

/// Validates, normalizes, and executes one invocation.
///
/// # Arguments
///
/// * `invocation` - The fully-built request; consumed by the dispatch.
///
/// # Returns
///
/// * `Result<Outcome>` - Mode-dependent outcome; see `Outcome`.
///
/// # Errors
///
/// * `CmdrsError::InvalidInvocation` - empty argument vector after
///   normalization, capture + spawn requested together, or buffered stdin
///   without spawn mode.
/// * `CmdrsError::BinaryNotFound` - `argv[0]` absent from the search path
///   (non-shell mode only). Raised before any spawn attempt.
/// * `CmdrsError::ExternalCommand` - capture mode, child exited non-zero;
///   carries the exit code and the captured text.
pub async fn execute(invocation: Invocation) -> Result<Outcome> {
    // --- Step 1: Normalize ---
    // Flatten the fragments into the final argument vector, dropping the
    // blocked sentinel values.
    let mut argv = args::flatten_with(invocation.fragments.clone(), &invocation.blocked);
    if argv.is_empty() {
        return Err(anyhow!(CmdrsError::InvalidInvocation(
            "Empty argument vector after normalization".to_string()
        )));
    }

    // --- Step 2: Mode resolution ---
    // Capture and spawn are mutually exclusive; buffered stdin only makes
    // sense on a live handle.
    let mode = invocation.mode()?;
    if invocation.buffered_stdin && mode != ExecMode::Spawn {
        return Err(anyhow!(CmdrsError::InvalidInvocation(
            "Buffered stdin requires spawn mode".to_string()
        )));
    }

    // --- Step 3: Binary resolution ---
    // In shell-string mode the interpreter resolves the name itself.
    if !invocation.shell && system::find_binary(&argv[0]).is_none() {
        return Err(anyhow!(CmdrsError::BinaryNotFound {
            name: argv[0].clone()
        }));
    }

    // --- Step 4 + 5: Dispatch log, skip short-circuit ---
    let cwd_display = match &invocation.cwd {
        Some(dir) => dir.display().to_string(),
        None => std::env::current_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|_| "?".to_string()),
    };
    if invocation.skip {
        debug!("Skipping command {:?} @ ({}) [{:?}]", argv, cwd_display, mode);
        return Ok(Outcome::Skipped);
    }
    if invocation.quiet {
        debug!("Running command {:?} @ ({}) [{:?}]", argv, cwd_display, mode);
    } else {
        info!("Running command {:?} @ ({}) [{:?}]", argv, cwd_display, mode);
    }

    // --- Step 6: Shell-string transform ---
    // The argument vector collapses into one string for the interpreter.
    // The unconfirmed variant is the riskier path and gets the sharper
    // warning.
    if invocation.shell {
        if invocation.confirm {
            warn!("Running command through the platform shell interpreter, be careful..");
        } else {
            warn!(
                "Running command through the platform shell interpreter, be careful.. \
                 Consider requiring confirmation for shell-string invocations"
            );
        }
        argv = vec![argv.join(" ")];
    }

    // --- Step 7: Confirmation gate ---
    // Declining is a user decision, not a failure.
    if invocation.confirm && !prompts::confirm("Confirm running the command above")? {
        info!("Command declined by user; nothing was executed");
        return Ok(Outcome::Declined);
    }

    // --- Build the process-creation request ---
    let mut cmd = if invocation.shell {
        let (interpreter, flag) = system::shell_interpreter();
        let mut cmd = Command::new(interpreter);
        cmd.arg(flag).arg(&argv[0]);
        cmd
    } else {
        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]);
        cmd
    };
    if let Some(dir) = &invocation.cwd {
        cmd.current_dir(dir);
    }

    // --- Step 8: Environment overlay ---
    // An explicit merged mapping (overlay wins on collision) is handed to
    // the child; the parent environment is left untouched, so concurrent
    // dispatches never observe each other's overlays.
    let mut merged: HashMap<OsString, OsString> = std::env::vars_os().collect();
    for (key, value) in &invocation.env {
        merged.insert(OsString::from(key), OsString::from(value));
    }
    cmd.env_clear();
    cmd.envs(&merged);

    // --- Step 9: Platform filtering ---
    // Options the host cannot honor are dropped with a notice, not an error.
    #[cfg(unix)]
    {
        if let Some(hook) = invocation.pre_exec {
            unsafe {
                cmd.pre_exec(hook.0);
            }
        }
    }
    #[cfg(not(unix))]
    {
        if invocation.pre_exec.is_some() {
            warn!("Invocation pre_exec hook is not supported on this platform, ignoring..");
        }
    }

    // --- Step 10: Mode dispatch ---
    match mode {
        ExecMode::Capture => {
            // Pipe stdout for capture; stderr stays on the parent's stream.
            cmd.stdout(Stdio::piped());
            let child = cmd
                .spawn()
                .with_context(|| format!("Failed to spawn command {:?}", argv))?;
            let output = child
                .wait_with_output()
                .await
                .with_context(|| format!("Failed to collect output of command {:?}", argv))?;
            let text = String::from_utf8_lossy(&output.stdout).into_owned();
            if output.status.success() {
                Ok(Outcome::Captured(text))
            } else {
                // Non-zero exit in capture mode is an error carrying the
                // exit code and everything that was captured.
                Err(anyhow!(CmdrsError::ExternalCommand {
                    cmd: argv.join(" "),
                    status: output
                        .status
                        .code()
                        .map(|code| code.to_string())
                        .unwrap_or_else(|| output.status.to_string()),
                    output: text,
                }))
            }
        }
        ExecMode::Run => {
            // Inherit stdio, block until exit. Non-zero exit is a normal,
            // inspectable outcome here.
            let status = cmd
                .status()
                .await
                .with_context(|| format!("Failed to run command {:?}", argv))?;
            debug!("Command {:?} completed with status {}", argv, status);
            Ok(Outcome::Completed(status))
        }
        ExecMode::Spawn => {
            if invocation.buffered_stdin {
                cmd.stdin(Stdio::piped());
            }
            if invocation.pipe_stdout {
                cmd.stdout(Stdio::piped());
            }
            if invocation.pipe_stderr {
                cmd.stderr(Stdio::piped());
            }
            let mut child = cmd
                .spawn()
                .with_context(|| format!("Failed to spawn command {:?}", argv))?;
            debug!("Spawned command {:?} with pid {:?}", argv, child.id());
            // Transfer the raw stdin pipe into the buffered writer; from
            // here on the pump is its sole owner.
            let pump = if invocation.buffered_stdin {
                let stdin = child.stdin.take().ok_or_else(|| {
                    anyhow!(CmdrsError::StdinWriter(
                        "Spawned child has no stdin pipe to wrap".to_string()
                    ))
                })?;
                Some(StdinPump::new(stdin))
            } else {
                None
            };
            Ok(Outcome::Spawned(ProcessHandle::new(child, pump)))
        }
    }
}
