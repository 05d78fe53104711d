//! # CmdRS UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module centralizes terminal user-interface elements used by CmdRS.
//! Today that is interactive prompting: the confirmation gate the process
//! dispatcher blocks on before running a command marked `confirm`.
//!
//! ## Architecture
//!
//! - **`prompts`**: Interactive yes/no confirmation built on `dialoguer`.
//!
//! Future candidates (progress bars for long-running spawned processes,
//! tabular status output) would live in sibling submodules here.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::ui::prompts;
//!
//! if prompts::confirm("Run the command above?")? {
//!     println!("Proceeding...");
//! } else {
//!     println!("Aborted.");
//! }
//! ```
//!

/// Interactive terminal prompts (confirmation gates).
pub mod prompts;
