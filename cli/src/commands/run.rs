//! # CmdRS Run Command Handler
//!
//! File: cli/src/commands/run.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! This module implements the `cmdrs run` subcommand: execute an external
//! command to completion with inherited stdio, honoring the configured
//! environment overlay, working directory, and policy gates. The child's
//! exit status is the primary result; a non-zero exit is reported as an
//! `ExternalCommand` error so the CmdRS process itself exits non-zero.
//!
//! ## Architecture
//!
//! The command flow is as follows:
//! 1. Parse command-line arguments (`RunArgs`) using `clap`: overlay
//!    variables (`--env`), working directory (`--workdir`), the gates
//!    (`--confirm`, `--skip`, `--shell`, `--quiet`), and the trailing
//!    command vector.
//! 2. Load the CmdRS configuration (`core::config`) for defaults: the
//!    standing environment overlay, default workdir, `always_confirm`, the
//!    shell-string policy, and extra blocked argument sentinels.
//! 3. Apply the shell-string policy: when `deny_unconfirmed_shell` is set,
//!    an unconfirmed `--shell` invocation is rejected before dispatch.
//! 4. Assemble the `Invocation` (config overlay first, CLI overlay on top)
//!    and dispatch it through `common::process::execute`.
//! 5. Report the outcome: a zero exit returns `Ok(())`; a non-zero exit
//!    becomes a `CmdrsError::ExternalCommand`; skipped and declined
//!    invocations are no-ops.
//!
//! ## Usage
//!
//! ```bash
//! # Run a build with an overlay variable
//! cmdrs run --env RUST_LOG=debug -- cargo build --release
//!
//! # Ask before running, in a specific directory
//! cmdrs run --confirm -w /srv/app -- ./deploy.sh
//!
//! # Log what would run, without running it
//! cmdrs run --skip -- rm -rf target
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
use tracing::{debug, info, warn};

/// # Run Command Arguments (`RunArgs`)
///
/// Defines the command-line arguments accepted by the `cmdrs run` subcommand.
#[derive(Parser, Debug)]
#[command(
    about = "Run a command to completion with inherited stdio",
    long_about = "Dispatches the command through the CmdRS execution pipeline and waits for it to exit. The exit status is reported; stdio flows to the terminal."
)]
pub struct RunArgs {
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

/// # Handle Run Command (`handle_run`)
///
/// The main asynchronous handler function for the `cmdrs run` command.
///
/// ## Workflow:
/// 1. Loads the CmdRS configuration.
/// 2. Applies the shell-string policy gate (`deny_unconfirmed_shell`).
/// 3. Assembles the `Invocation` from configuration defaults plus the
///    command-line overrides.
/// 4. Dispatches it and maps the outcome: zero exit → `Ok(())`, non-zero
///    exit → `CmdrsError::ExternalCommand`, skip/decline → no-op `Ok(())`.
///
/// ## Arguments
///
/// * `args`: The parsed `RunArgs` struct.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` on zero exit or a deliberate no-op; `Err`
///   otherwise.
pub async fn handle_run(args: RunArgs) -> Result<()> {
    info!("Handling run command...");
    debug!("Run args: {:?}", args);

    let cfg = config::load_config().context("Failed to load CmdRS configuration")?;
    let invocation = build_invocation(&args, &cfg)?;

    let outcome = process::execute(invocation)
        .await
        .with_context(|| format!("Failed to dispatch command {:?}", args.command))?;

    match outcome {
        Outcome::Completed(status) => {
            if status.success() {
                info!("Command {:?} finished successfully (exit code 0).", args.command);
                Ok(())
            } else {
                let code = status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| status.to_string());
                warn!(
                    "Command {:?} finished with non-zero exit status: {}.",
                    args.command, code
                );
                Err(anyhow!(CmdrsError::ExternalCommand {
                    cmd: args.command.join(" "),
                    status: code.clone(),
                    output: format!("Command exited with status {}", code),
                }))
            }
        }
        Outcome::Skipped => {
            info!("Command {:?} skipped; nothing was executed.", args.command);
            Ok(())
        }
        Outcome::Declined => {
            info!("Command {:?} declined; nothing was executed.", args.command);
            Ok(())
        }
        other => anyhow::bail!("Run dispatch returned an unexpected outcome: {:?}", other),
    }
}

/// Assembles the `Invocation` for a run-mode dispatch from configuration
/// defaults and command-line overrides.
fn build_invocation(args: &RunArgs, cfg: &config::Config) -> Result<Invocation> {
    // Policy gate: configuration may refuse unconfirmed shell-string runs.
    let confirm = args.confirm || cfg.execution.always_confirm;
    if args.shell && !confirm && cfg.execution.deny_unconfirmed_shell {
        return Err(anyhow!(CmdrsError::InvalidInvocation(
            "Unconfirmed shell-string invocations are denied by configuration \
             (execution.deny_unconfirmed_shell)"
                .to_string()
        )));
    }

    // Config overlay first, command-line overlay on top (wins on collision).
    let mut invocation = Invocation::new()
        .args(args.command.clone())
        .envs(cfg.execution.env_vars.clone())
        .envs(super::parse_env_assignments(&args.env)?);

    // Extra sentinel values from configuration (the empty string is already
    // blocked by default).
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
