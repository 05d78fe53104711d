//! # CmdRS Capture Command Handler
//!
//! File: cli/src/commands/capture.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! This module implements the `cmdrs capture` subcommand: execute an external
//! command synchronously, capture its standard output, and print the decoded
//! text. Unlike `cmdrs run`, a non-zero exit here is always an error — the
//! captured text is part of the error report, mirroring the dispatcher's
//! capture-mode contract.
//!
//! ## Architecture
//!
//! The command flow is as follows:
//! 1. Parse command-line arguments (`CaptureArgs`) using `clap` — the same
//!    overlay/workdir/gate surface as `cmdrs run`.
//! 2. Load the CmdRS configuration for defaults and policy.
//! 3. Apply the shell-string policy gate.
//! 4. Assemble the `Invocation` with `capture()` and dispatch it.
//! 5. Print the captured text on success; skipped and declined invocations
//!    print nothing.
//!
//! ## Usage
//!
//! ```bash
//! # Capture a tool's output into the terminal (or a pipe)
//! cmdrs capture -- git rev-parse HEAD
//!
//! # Capture with an overlay variable
//! cmdrs capture --env LC_ALL=C -- date
//! ```
//!
use crate::{
    common::process::{self, Invocation, Outcome},
    core::{
        config,
        error::{CmdrsError, Result},
    },
};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// # Capture Command Arguments (`CaptureArgs`)
///
/// Defines the command-line arguments accepted by the `cmdrs capture`
/// subcommand.
#[derive(Parser, Debug)]
#[command(
    about = "Run a command and print its captured stdout",
    long_about = "Dispatches the command through the CmdRS execution pipeline, captures its standard output, and prints the decoded text. Non-zero exits are errors."
)]
pub struct CaptureArgs {
    /// Environment variables overlaid onto the child (repeatable).
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
    env: Vec<String>,

    /// Working directory for the child process.
    #[arg(short = 'w', long = "workdir")]
    workdir: Option<PathBuf>,

    /// Ask for interactive confirmation before running.
    #[arg(long)]
    confirm: bool,

    /// Log the command without running it.
    #[arg(long)]
    skip: bool,

    /// Join the arguments and run them through the platform shell
    /// interpreter (carries injection risk; a warning is logged).
    #[arg(long)]
    shell: bool,

    /// Demote the dispatch log line to debug level.
    #[arg(short = 'q', long)]
    quiet: bool,

    /// The command and its arguments to execute.
    #[arg(required = true, last = true)]
    command: Vec<String>,
}

/// # Handle Capture Command (`handle_capture`)
///
/// The main asynchronous handler function for the `cmdrs capture` command.
///
/// ## Workflow:
/// 1. Loads the CmdRS configuration.
/// 2. Applies the shell-string policy gate (`deny_unconfirmed_shell`).
/// 3. Assembles a capture-mode `Invocation` and dispatches it.
/// 4. Prints the captured text. Non-zero exits surface from the dispatcher
///    as `CmdrsError::ExternalCommand` (with the captured output attached)
///    and propagate unchanged.
///
/// ## Arguments
///
/// * `args`: The parsed `CaptureArgs` struct.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` after printing, or on a deliberate no-op.
pub async fn handle_capture(args: CaptureArgs) -> Result<()> {
    info!("Handling capture command...");
    debug!("Capture args: {:?}", args);

    let cfg = config::load_config().context("Failed to load CmdRS configuration")?;
    let invocation = build_invocation(&args, &cfg)?;

    let outcome = process::execute(invocation)
        .await
        .with_context(|| format!("Failed to dispatch command {:?}", args.command))?;

    match outcome {
        Outcome::Captured(text) => {
            // The captured text is the command's product; print it verbatim
            // (no added trailing newline).
            print!("{}", text);
            Ok(())
        }
        Outcome::Skipped => {
            info!("Command {:?} skipped; nothing was captured.", args.command);
            Ok(())
        }
        Outcome::Declined => {
            info!("Command {:?} declined; nothing was captured.", args.command);
            Ok(())
        }
        other => anyhow::bail!("Capture dispatch returned an unexpected outcome: {:?}", other),
    }
}

/// Assembles the capture-mode `Invocation` from configuration defaults and
/// command-line overrides.
fn build_invocation(args: &CaptureArgs, cfg: &config::Config) -> Result<Invocation> {
    let confirm = args.confirm || cfg.execution.always_confirm;
    if args.shell && !confirm && cfg.execution.deny_unconfirmed_shell {
        return Err(anyhow!(CmdrsError::InvalidInvocation(
            "Unconfirmed shell-string invocations are denied by configuration \
             (execution.deny_unconfirmed_shell)"
                .to_string()
        )));
    }

    let mut invocation = Invocation::new()
        .args(args.command.clone())
        .capture()
        .envs(cfg.execution.env_vars.clone())
        .envs(super::parse_env_assignments(&args.env)?);

    for blocked in cfg.execution.blocked_args.iter().filter(|v| !v.is_empty()) {
        invocation = invocation.block_value(blocked.clone());
    }

    if let Some(dir) = &args.workdir {
        invocation = invocation.current_dir(dir.clone());
    } else if let Some(dir) = &cfg.execution.default_workdir {
        invocation = invocation.current_dir(dir.clone());
    }

    if confirm {
        invocation = invocation.confirm();
    }
    if args.skip {
        invocation = invocation.skip();
    }
    if args.shell {
        invocation = invocation.shell();
    }
    if args.quiet {
        invocation = invocation.quiet();
    }
    Ok(invocation)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    /// Flags and the trailing command parse as expected.
    #[test]
    fn test_capture_args_parsing() {
        let args = CaptureArgs::try_parse_from([
            "capture",
            "--env",
            "LC_ALL=C",
            "--quiet",
            "--",
            "date",
            "-u",
        ])
        .unwrap();

        assert_eq!(args.env, vec!["LC_ALL=C"]);
        assert!(args.quiet);
        assert!(!args.confirm);
        assert_eq!(args.command, vec!["date", "-u"]);
    }

    /// The assembled invocation is capture-mode.
    #[test]
    fn test_build_invocation_sets_capture_mode() {
        let args = CaptureArgs::try_parse_from(["capture", "--", "date"]).unwrap();
        let cfg = config::Config::default();
        let invocation = build_invocation(&args, &cfg).unwrap();
        assert!(invocation.capture);
        assert!(!invocation.spawn);
    }

    /// The trailing command is required.
    #[test]
    fn test_capture_args_requires_command() {
        assert!(CaptureArgs::try_parse_from(["capture", "-q"]).is_err());
    }
}
