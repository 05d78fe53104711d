//! # CmdRS System Utilities (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module provides host-system inspection utilities needed by the process
//! dispatcher: resolving binaries on the search path and selecting the
//! platform command interpreter for shell-string execution.
//!
//! ## Architecture
//!
//! Two focused functions:
//! - **`find_binary`**: A single query — "does an executable named X exist on
//!   the current search path?" — answered via the `which` crate. The
//!   dispatcher uses this to convert a late, opaque OS-level spawn failure
//!   into an early, named `BinaryNotFound` error.
//! - **`shell_interpreter`**: Returns the platform command interpreter and
//!   its command flag (`sh -c` on Unix, `cmd /C` on Windows) for invocations
//!   running in shell-string mode.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::system;
//!
//! if system::find_binary("ffmpeg").is_none() {
//!     println!("ffmpeg is not installed");
//! }
//!
//! let (shell, flag) = system::shell_interpreter();
//! ```
//!
use std::path::PathBuf;
use tracing::debug;

/// Looks up an executable on the current search path.
///
/// # Arguments
///
/// * `name` - The binary name (or path) to resolve.
///
/// # Returns
///
/// * `Option<PathBuf>` - The resolved absolute path, or `None` if the binary
///   is not reachable on the search path.
pub fn find_binary(name: &str) -> Option<PathBuf> {
    match which::which(name) {
        Ok(path) => {
            debug!("Resolved binary '{}' to {}", name, path.display());
            Some(path)
        }
        Err(e) => {
            debug!("Binary '{}' not found on PATH: {}", name, e);
            None
        }
    }
}

/// Returns the platform command interpreter used for shell-string mode.
///
/// # Returns
///
/// * `(&'static str, &'static str)` - The interpreter program and the flag
///   that makes it execute its next argument as a command string.
pub fn shell_interpreter() -> (&'static str, &'static str) {
    if cfg!(windows) {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}
