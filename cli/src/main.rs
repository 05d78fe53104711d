//! # CmdRS Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! This file serves as the main entry point for the CmdRS CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! The application follows a modular command structure:
//! - Each top-level command (`run`, `capture`, `spawn`) is defined as a variant in the `Commands` enum
//! - Commands are mapped to handler functions in their respective modules
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! Basic CmdRS usage:
//!
//! ```bash
//! # Get help
//! cmdrs --help
//!
//! # Run a command with increased verbosity
//! cmdrs -vv run -- make check
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

// Declare the top-level modules of the CLI crate.
mod commands; // Handles specific command logic (run, capture, spawn).
mod common; // Contains shared utilities (process, args, system, ui).
mod core; // Core infrastructure (errors, config).

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "cmdrs",
    about = "🦀 CmdRS ⚙️: External Command Execution & Tooling",
    long_about = "Dispatch external commands with argument normalization, per-call environment\n\
                  overlays, confirmation gates, and queue-buffered stdin for spawned processes.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    #[command(alias = "c")]
    Capture(commands::capture::CaptureArgs),
    #[command(alias = "s")]
    Spawn(commands::spawn::SpawnArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Use anyhow::Result directly
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args).await,
        Commands::Capture(args) => commands::capture::handle_capture(args).await,
        Commands::Spawn(args) => commands::spawn::handle_spawn(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

// --- Basic Integration Tests ---
#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    fn cmdrs_cmd() -> Command {
        Command::cargo_bin("cmdrs").expect("Failed to find cmdrs binary for testing")
    }
    #[test]
    fn test_main_help_flag() {
        cmdrs_cmd().arg("--help").assert().success();
    }
    #[test]
    fn test_main_version_flag() {
        cmdrs_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
    #[test]
    #[cfg(unix)]
    fn test_main_run_reports_missing_binary() {
        cmdrs_cmd()
            .args(["run", "--", "cmdrs_nonexistent_binary_xyz"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found on PATH"));
    }
    #[test]
    #[cfg(unix)]
    fn test_main_capture_prints_stdout() {
        cmdrs_cmd()
            .args(["capture", "--", "echo", "hi"])
            .assert()
            .success()
            .stdout(predicate::str::diff("hi\n"));
    }
}
