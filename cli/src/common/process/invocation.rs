//! # CmdRS Invocation Builder (`common::process::invocation`)
//!
//! File: cli/src/common/process/invocation.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module defines `Invocation`, the transient value describing one
//! request to run an external process: the argument fragments (flattened at
//! dispatch time), the execution mode, the per-call environment overlay, and
//! the behavioral gates (confirmation, skip, shell-string, buffered stdin).
//! An `Invocation` is assembled fluently by a caller and consumed exactly
//! once by `common::process::execute`.
//!
//! ## Architecture
//!
//! - **Mode selection**: `capture()` and `spawn()` are independent builder
//!   flags, with neither set meaning run-to-completion. Requesting both is a
//!   caller error surfaced as `InvalidInvocation` when the mode is resolved —
//!   deliberately a runtime check, so the conflicting request is reported
//!   rather than being unrepresentable and silently unreachable.
//! - **Environment overlay**: `env`/`envs` record variables merged *over* the
//!   parent environment for the child only. The parent's environment table is
//!   never touched.
//! - **Gates**: `confirm` (interactive yes/no before execution), `skip`
//!   (log-and-return no-op), `shell` (join argv into one interpreter command
//!   string), `quiet` (demote the dispatch log line to debug).
//! - **`pre_exec`**: A POSIX-only process-creation hook. The builder accepts
//!   it on every platform; the dispatcher drops it with a logged warning on
//!   hosts that cannot honor it.
//! - **`blocked`**: Sentinel values removed during argument normalization,
//!   defaulting to the empty string.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{execute, Invocation};
//! use crate::common::args::ArgValue;
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let outcome = execute(
//!     Invocation::new()
//!         .args(["ffmpeg", "-i", "input.mp4"])
//!         .arg(ArgValue::from(Some("-y")))
//!         .arg("output.mkv")
//!         .env("FFREPORT", "file=report.log")
//!         .confirm(),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
use crate::common::args::ArgValue;
use crate::core::error::{CmdrsError, Result};
use anyhow::anyhow;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Resolved execution mode of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Run synchronously, return decoded stdout text.
    Capture,
    /// Run synchronously to completion, return the exit status.
    Run,
    /// Spawn asynchronously, return a live process handle.
    Spawn,
}

/// A POSIX process-creation hook run in the child after fork, before exec.
pub struct PreExecHook(pub(crate) Box<dyn FnMut() -> io::Result<()> + Send + Sync + 'static>);

impl fmt::Debug for PreExecHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PreExecHook(..)")
    }
}

/// One request to execute an external process.
///
/// Built fluently, consumed by `common::process::execute`.
#[derive(Debug)]
pub struct Invocation {
    /// Ordered argument fragments; flattened into argv at dispatch time.
    pub(crate) fragments: Vec<ArgValue>,
    /// Capture-mode flag (mutually exclusive with `spawn`).
    pub(crate) capture: bool,
    /// Spawn-mode flag (mutually exclusive with `capture`).
    pub(crate) spawn: bool,
    /// Environment overlay merged over the parent environment, child only.
    pub(crate) env: HashMap<String, String>,
    /// Working directory for the child.
    pub(crate) cwd: Option<PathBuf>,
    /// Interactive confirmation gate.
    pub(crate) confirm: bool,
    /// Log-and-return no-op gate.
    pub(crate) skip: bool,
    /// Shell-string mode: argv joined and run through the interpreter.
    pub(crate) shell: bool,
    /// Replace the spawned child's stdin with the buffered writer.
    pub(crate) buffered_stdin: bool,
    /// Pipe the spawned child's stdout for caller consumption.
    pub(crate) pipe_stdout: bool,
    /// Pipe the spawned child's stderr for caller consumption.
    pub(crate) pipe_stderr: bool,
    /// Demote the dispatch log line to debug.
    pub(crate) quiet: bool,
    /// POSIX-only pre-exec hook; dropped with a notice elsewhere.
    pub(crate) pre_exec: Option<PreExecHook>,
    /// Sentinel values removed during normalization.
    pub(crate) blocked: Vec<String>,
}

impl Invocation {
    /// Creates an empty invocation with the default block list (the empty
    /// string).
    pub fn new() -> Self {
        Self {
            fragments: Vec::new(),
            capture: false,
            spawn: false,
            env: HashMap::new(),
            cwd: None,
            confirm: false,
            skip: false,
            shell: false,
            buffered_stdin: false,
            pipe_stdout: false,
            pipe_stderr: false,
            quiet: false,
            pre_exec: None,
            blocked: vec![String::new()],
        }
    }

    /// Appends one argument fragment.
    pub fn arg(mut self, value: impl Into<ArgValue>) -> Self {
        self.fragments.push(value.into());
        self
    }

    /// Appends a sequence of argument fragments.
    pub fn args<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ArgValue>,
    {
        self.fragments.extend(values.into_iter().map(Into::into));
        self
    }

    /// Requests capture mode: run synchronously and return decoded stdout.
    pub fn capture(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Requests spawn mode: return a live handle without waiting for exit.
    pub fn spawn(mut self) -> Self {
        self.spawn = true;
        self
    }

    /// Adds one variable to the environment overlay.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Adds every variable of `vars` to the environment overlay.
    pub fn envs(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(vars);
        self
    }

    /// Sets the child's working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Requires interactive confirmation before the process is created.
    pub fn confirm(mut self) -> Self {
        self.confirm = true;
        self
    }

    /// Marks the invocation as skipped: logged, never executed.
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Enables shell-string mode: argv is joined with spaces and handed to
    /// the platform command interpreter. Carries injection risk; the
    /// dispatcher logs a warning.
    pub fn shell(mut self) -> Self {
        self.shell = true;
        self
    }

    /// Replaces the spawned child's stdin with the queue-buffered writer.
    /// Only valid together with `spawn`.
    pub fn buffered_stdin(mut self) -> Self {
        self.buffered_stdin = true;
        self
    }

    /// Pipes the spawned child's stdout.
    pub fn pipe_stdout(mut self) -> Self {
        self.pipe_stdout = true;
        self
    }

    /// Pipes the spawned child's stderr.
    pub fn pipe_stderr(mut self) -> Self {
        self.pipe_stderr = true;
        self
    }

    /// Demotes the dispatch log line from info to debug.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Installs a POSIX pre-exec hook, run in the child between fork and
    /// exec. Ignored (with a logged notice) on platforms without the hook.
    pub fn pre_exec<F>(mut self, hook: F) -> Self
    where
        F: FnMut() -> io::Result<()> + Send + Sync + 'static,
    {
        self.pre_exec = Some(PreExecHook(Box::new(hook)));
        self
    }

    /// Adds a sentinel value to drop during argument normalization.
    pub fn block_value(mut self, value: impl Into<String>) -> Self {
        self.blocked.push(value.into());
        self
    }

    /// Resolves the execution mode from the `capture`/`spawn` flags.
    ///
    /// # Errors
    ///
    /// `CmdrsError::InvalidInvocation` when both flags are set.
    pub(crate) fn mode(&self) -> Result<ExecMode> {
        match (self.capture, self.spawn) {
            (true, true) => Err(anyhow!(CmdrsError::InvalidInvocation(
                "Cannot use capture and spawn at the same time".to_string()
            ))),
            (true, false) => Ok(ExecMode::Capture),
            (false, true) => Ok(ExecMode::Spawn),
            (false, false) => Ok(ExecMode::Run),
        }
    }
}

impl Default for Invocation {
    fn default() -> Self {
        Self::new()
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    /// Fragments accumulate in call order across `arg` and `args`.
    #[test]
    fn test_builder_accumulates_fragments_in_order() {
        let inv = Invocation::new()
            .arg("git")
            .args(["commit", "-m"])
            .arg("message");
        assert_eq!(
            inv.fragments,
            vec![
                ArgValue::Str("git".into()),
                ArgValue::Str("commit".into()),
                ArgValue::Str("-m".into()),
                ArgValue::Str("message".into()),
            ]
        );
    }

    /// Neither flag set resolves to run mode; each flag alone resolves to
    /// its mode.
    #[test]
    fn test_mode_resolution() {
        assert_eq!(Invocation::new().mode().unwrap(), ExecMode::Run);
        assert_eq!(Invocation::new().capture().mode().unwrap(), ExecMode::Capture);
        assert_eq!(Invocation::new().spawn().mode().unwrap(), ExecMode::Spawn);
    }

    /// Capture and spawn together are a caller error, whatever else is set.
    #[test]
    fn test_capture_and_spawn_conflict() {
        let err = Invocation::new()
            .arg("echo")
            .capture()
            .spawn()
            .skip()
            .quiet()
            .mode()
            .expect_err("conflicting modes must not resolve");
        assert!(err.to_string().contains("Invalid invocation"));
    }

    /// Later overlay entries win over earlier ones for the same key.
    #[test]
    fn test_env_overlay_last_write_wins() {
        let inv = Invocation::new()
            .env("KEY", "first")
            .envs(vec![("KEY".to_string(), "second".to_string())]);
        assert_eq!(inv.env.get("KEY").map(String::as_str), Some("second"));
    }

    /// The default block list drops empty strings only.
    #[test]
    fn test_default_block_list() {
        let inv = Invocation::new();
        assert_eq!(inv.blocked, vec![String::new()]);
        let custom = Invocation::new().block_value("none");
        assert_eq!(custom.blocked, vec![String::new(), "none".to_string()]);
    }
}
