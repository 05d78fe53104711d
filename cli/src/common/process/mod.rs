//! # CmdRS Process Execution (`common::process`)
//!
//! File: cli/src/common/process/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module is the command execution subsystem of CmdRS: everything
//! between a caller's intent ("run this tool with these arguments, like so")
//! and the operating system's process-creation primitive. It normalizes
//! heterogeneous argument fragments into a flat argument vector, applies
//! policy gates (confirmation, skip, shell-string warnings), overlays
//! per-call environment variables without touching the parent environment,
//! and executes in one of three modes — capture, run, or spawn — returning
//! text, an exit status, or a live handle respectively.
//!
//! ## Architecture
//!
//! The subsystem is split by concern:
//!
//! - **`invocation`**: The `Invocation` builder — argument fragments, mode
//!   flags, environment overlay, gates, and platform options.
//! - **`execute`**: The dispatcher pipeline — validation, normalization,
//!   policy, environment merge, platform filtering, and mode dispatch.
//! - **`handle`**: `ProcessHandle`, the caller's ownership of a spawned
//!   child: waiting, killing, piped streams, and the buffered-stdin close
//!   protocol.
//! - **`stdin`**: `StdinPump`, the bounded-queue-plus-worker writer that
//!   decouples producers from the blocking stdin pipe of a spawned child.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{execute, Invocation, Outcome};
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! // Synchronous capture of a tool's output.
//! let outcome = execute(Invocation::new().args(["uname", "-a"]).capture()).await?;
//!
//! // Fire-and-watch spawn with queue-buffered stdin.
//! let outcome = execute(
//!     Invocation::new().arg("cat").spawn().buffered_stdin().pipe_stdout(),
//! )
//! .await?;
//! if let Outcome::Spawned(mut handle) = outcome {
//!     handle.write_stdin("hello\n").await?;
//!     handle.close_stdin().await?;
//! }
//! # Ok(())
//! # }
//! ```
//!

/// The dispatcher pipeline and `Outcome` type.
pub mod execute;
/// Live handles to spawned processes.
pub mod handle;
/// The `Invocation` builder.
pub mod invocation;
/// The queue-buffered stdin writer.
pub mod stdin;

// Re-export the primary entry points for convenient access as
// `common::process::execute(...)` / `Invocation` / `Outcome`.
pub use execute::{execute, Outcome};
pub use handle::ProcessHandle;
pub use invocation::Invocation;
