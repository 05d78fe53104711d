//! # CmdRS Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! This module defines the error types and error handling mechanisms used throughout
//! the CmdRS application. It provides a consistent approach to error management
//! with detailed error information and context.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `CmdrsError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover various domains:
//! - Configuration errors
//! - Invocation construction errors (empty argument vector, conflicting modes)
//! - Binary resolution errors
//! - External command failures (capture mode, non-zero exit)
//! - Buffered stdin writer misuse
//!
//! ## Examples
//!
//! Using the error system:
//!
//! ```rust
//! // Return a specific error type
//! if argv.is_empty() {
//!     return Err(CmdrsError::InvalidInvocation("empty argument vector".into()))?;
//! }
//!
//! // Add context to errors using anyhow
//! let outcome = process::execute(invocation)
//!     .await
//!     .with_context(|| format!("Failed to dispatch command {:?}", name))?;
//!
//! // Pattern matching on error types
//! match result {
//!     Ok(value) => println!("Success: {:?}", value),
//!     Err(e) if e.downcast_ref::<CmdrsError>().map_or(false, |ce| matches!(ce, CmdrsError::BinaryNotFound { .. })) => {
//!         println!("Binary missing, nothing was spawned.");
//!     },
//!     Err(e) => return Err(e),
//! }
//! ```
//!
//! The error system provides detailed error messages to the user and
//! includes context information for debugging.
//!
use thiserror::Error;

/// Custom error type for the CmdRS application.
#[derive(Error, Debug)]
pub enum CmdrsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid invocation: {0}")]
    InvalidInvocation(String),

    #[error("Binary doesn't exist or was not found on PATH ({name})")]
    BinaryNotFound { name: String },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    #[error("Stdin writer error: {0}")]
    StdinWriter(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
