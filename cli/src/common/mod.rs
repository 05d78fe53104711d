//! # CmdRS Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module serves as the root and organizational entry point for all
//! shared, common utility modules used throughout the CmdRS CLI application.
//! It aggregates the command execution subsystem and its supporting
//! concerns: argument normalization, host-system inspection, and terminal
//! UI elements.
//!
//! By centralizing these utilities under the `common::` namespace, CmdRS
//! keeps a clear separation between command-specific logic (`commands::`)
//! and core infrastructure (`core::`).
//!
//! ## Architecture
//!
//! The `common` module itself primarily consists of declarations (`pub mod`)
//! for its various submodules. Each submodule encapsulates a specific domain:
//!
//! - **`args`**: Normalization of heterogeneous argument fragments into flat
//!   string argument vectors (`ArgValue`, `flatten`, `all_present`).
//! - **`process`**: The command execution subsystem — the `Invocation`
//!   builder, the mode dispatcher, live process handles, and the
//!   queue-buffered stdin writer.
//! - **`system`**: Host inspection — search-path binary resolution and
//!   platform command-interpreter selection.
//! - **`ui`**: Terminal user-interface elements, currently the interactive
//!   confirmation prompt.
//!
//! ## Usage
//!
//! Command handlers import specific functionality directly from the required
//! submodule within `common`:
//!
//! ```rust
//! use crate::common::{process, system};
//! use crate::common::process::{Invocation, Outcome};
//! use crate::core::error::Result;
//!
//! # async fn run_example() -> Result<()> {
//! if system::find_binary("git").is_some() {
//!     let outcome = process::execute(Invocation::new().args(["git", "status"])).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!

/// Argument fragment normalization (flattening, sentinel filtering).
pub mod args;
/// The command execution subsystem (dispatcher, handles, buffered stdin).
pub mod process;
/// Host-system inspection (search path, platform interpreter).
pub mod system;
/// Terminal user-interface elements (confirmation prompts).
pub mod ui;
