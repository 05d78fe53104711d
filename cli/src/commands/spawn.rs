//! # CmdRS Spawn Command Handler
//!
//! File: cli/src/commands/spawn.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! This module implements the `cmdrs spawn` subcommand: dispatch a command in
//! spawn mode, obtaining a live handle without waiting for exit, then
//! supervise it. With `--buffered-stdin`, CmdRS reads its own standard input
//! line by line and feeds each line to the child through the queue-buffered
//! stdin writer; on end of input the writer's close protocol runs — every
//! queued chunk drains to the pipe, the pipe closes, and the child is polled
//! until it exits.
//!
//! ## Architecture
//!
//! The command flow is as follows:
//! 1. Parse command-line arguments (`SpawnArgs`) using `clap` — the shared
//!    overlay/workdir/gate surface plus `--buffered-stdin`.
//! 2. Load the CmdRS configuration for defaults and policy.
//! 3. Apply the shell-string policy gate.
//! 4. Assemble a spawn-mode `Invocation` and dispatch it; the outcome is a
//!    `ProcessHandle` returned before the child exits.
//! 5. Supervise: pump host stdin through the buffered writer (when
//!    requested), close it, and report the child's exit status — non-zero
//!    becomes a `CmdrsError::ExternalCommand`.
//!
//! ## Usage
//!
//! ```bash
//! # Spawn a long-running process and wait for it
//! cmdrs spawn -- sleep 30
//!
//! # Feed generated input through the buffered stdin writer
//! seq 1 100000 | cmdrs spawn --buffered-stdin -- wc -l
//! ```
//!
use crate::{
    common::process::{self, Invocation, Outcome, ProcessHandle},
    core::{
        config,
        error::{CmdrsError, Result},
    },
};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// # Spawn Command Arguments (`SpawnArgs`)
///
/// Defines the command-line arguments accepted by the `cmdrs spawn`
/// subcommand.
#[derive(Parser, Debug)]
#[command(
    about = "Spawn a command and supervise it until exit",
    long_about = "Dispatches the command in spawn mode and supervises the returned handle. With --buffered-stdin, lines read from CmdRS's stdin are fed to the child through the queue-buffered writer before its pipe is closed."
)]
pub struct SpawnArgs {
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

    /// Feed lines from CmdRS's stdin to the child through the
    /// queue-buffered stdin writer.
    #[arg(long = "buffered-stdin")]
    buffered_stdin: bool,

    /// The command and its arguments to execute.
    #[arg(required = true, last = true)]
    command: Vec<String>,
}

/// # Handle Spawn Command (`handle_spawn`)
///
/// The main asynchronous handler function for the `cmdrs spawn` command.
///
/// ## Workflow:
/// 1. Loads the CmdRS configuration.
/// 2. Applies the shell-string policy gate (`deny_unconfirmed_shell`).
/// 3. Assembles a spawn-mode `Invocation` and dispatches it.
/// 4. Supervises the returned handle: optionally pumps host stdin through
///    the buffered writer and runs its close protocol, then reports the
///    child's exit status (non-zero → `CmdrsError::ExternalCommand`).
///
/// ## Arguments
///
/// * `args`: The parsed `SpawnArgs` struct.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` on zero exit or a deliberate no-op; `Err`
///   otherwise.
pub async fn handle_spawn(args: SpawnArgs) -> Result<()> {
    info!("Handling spawn command...");
    debug!("Spawn args: {:?}", args);

    let cfg = config::load_config().context("Failed to load CmdRS configuration")?;
    let invocation = build_invocation(&args, &cfg)?;

    let outcome = process::execute(invocation)
        .await
        .with_context(|| format!("Failed to dispatch command {:?}", args.command))?;

    match outcome {
        Outcome::Spawned(handle) => supervise(handle, &args).await,
        Outcome::Skipped => {
            info!("Command {:?} skipped; nothing was spawned.", args.command);
            Ok(())
        }
        Outcome::Declined => {
            info!("Command {:?} declined; nothing was spawned.", args.command);
            Ok(())
        }
        other => anyhow::bail!("Spawn dispatch returned an unexpected outcome: {:?}", other),
    }
}

/// Supervises a spawned child: pumps host stdin through the buffered writer
/// when requested, then waits for exit and reports the status.
async fn supervise(mut handle: ProcessHandle, args: &SpawnArgs) -> Result<()> {
    info!(
        "Spawned command {:?} with pid {:?}",
        args.command,
        handle.id()
    );

    if args.buffered_stdin {
        // Each host line becomes one queued chunk; the writer serializes
        // them onto the child's pipe in order.
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed reading from host stdin")?
        {
            handle.write_stdin(format!("{line}\n")).await?;
        }
        // End of input: drain the queue, close the pipe, wait for the
        // child to exit.
        handle.close_stdin().await?;
    }

    let status = handle.wait().await?;
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
            output: format!("Spawned command exited with status {}", code),
        }))
    }
}

/// Assembles the spawn-mode `Invocation` from configuration defaults and
/// command-line overrides.
fn build_invocation(args: &SpawnArgs, cfg: &config::Config) -> Result<Invocation> {
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
        .spawn()
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
    if args.buffered_stdin {
        invocation = invocation.buffered_stdin();
    }
    Ok(invocation)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    /// Flags and the trailing command parse as expected.
    #[test]
    fn test_spawn_args_parsing() {
        let args = SpawnArgs::try_parse_from([
            "spawn",
            "--buffered-stdin",
            "-e",
            "TERM=dumb",
            "--",
            "wc",
            "-l",
        ])
        .unwrap();

        assert!(args.buffered_stdin);
        assert_eq!(args.env, vec!["TERM=dumb"]);
        assert_eq!(args.command, vec!["wc", "-l"]);
    }

    /// The assembled invocation is spawn-mode, with buffered stdin when
    /// requested.
    #[test]
    fn test_build_invocation_sets_spawn_mode() {
        let args =
            SpawnArgs::try_parse_from(["spawn", "--buffered-stdin", "--", "cat"]).unwrap();
        let cfg = config::Config::default();
        let invocation = build_invocation(&args, &cfg).unwrap();
        assert!(invocation.spawn);
        assert!(invocation.buffered_stdin);
        assert!(!invocation.capture);
    }

    /// The trailing command is required.
    #[test]
    fn test_spawn_args_requires_command() {
        assert!(SpawnArgs::try_parse_from(["spawn"]).is_err());
    }
}
