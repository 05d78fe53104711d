//! # CmdRS Interactive Prompts (`common::ui::prompts`)
//!
//! File: cli/src/common/ui/prompts.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! Interactive confirmation prompting for CmdRS. The process dispatcher calls
//! `confirm` synchronously when an invocation carries the `confirm` gate; a
//! negative answer aborts the dispatch with a no-op outcome rather than an
//! error.
//!
use crate::core::error::Result;
use anyhow::Context;
use dialoguer::Confirm;

/// Asks the user a yes/no question on the terminal and blocks for an answer.
///
/// Defaults to "no" so that pressing Enter declines the destructive path.
///
/// # Arguments
///
/// * `message` - The question shown to the user.
///
/// # Returns
///
/// * `Result<bool>` - `true` if the user confirmed, `false` otherwise.
///
/// # Errors
///
/// Returns an `Err` if the terminal cannot be read (e.g., no TTY attached).
pub fn confirm(message: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .context("Failed to read confirmation from terminal")
}
