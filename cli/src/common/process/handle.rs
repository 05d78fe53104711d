//! # CmdRS Live Process Handle (`common::process::handle`)
//!
//! File: cli/src/common/process/handle.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! The value returned by a spawn-mode dispatch: ownership of the running OS
//! process plus, when requested, the buffered stdin writer attached to its
//! input pipe. The handle is the caller's only window into the child —
//! pid, piped output streams, waiting, killing, and the stdin close
//! protocol all go through it.
//!
//! ## Architecture
//!
//! - **`ProcessHandle`**: Wraps the `tokio::process::Child` and an optional
//!   `StdinPump`. When the pump is attached, the child's raw stdin pipe has
//!   already been transferred into it; `write_stdin`/`close_stdin` are the
//!   only ways to reach that pipe.
//! - **`close_stdin`**: The shutdown protocol for buffered stdin, in strict
//!   order: wait for the queue to fully drain (every enqueued chunk written),
//!   close the raw pipe, let the worker exit, then poll the child at a short
//!   fixed interval (`EXIT_POLL_INTERVAL`) until it reports exited. There is
//!   no timeout — a child that never exits keeps `close_stdin` blocked.
//!   Calling it again once closed is a clean no-op; `write_stdin` after it
//!   fails fast.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{execute, Invocation, Outcome};
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let outcome = execute(
//!     Invocation::new().arg("cat").spawn().buffered_stdin().pipe_stdout(),
//! ).await?;
//! if let Outcome::Spawned(mut handle) = outcome {
//!     handle.write_stdin("line one\n").await?;
//!     handle.write_stdin("line two\n").await?;
//!     handle.close_stdin().await?; // returns after the child exited
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{CmdrsError, Result};
use anyhow::{anyhow, Context};
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::{Child, ChildStderr, ChildStdout};
use tracing::debug;

use super::stdin::StdinPump;

/// Fixed sleep interval for the post-close process-exit poll.
pub(crate) const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A live handle to a spawned process, owned by the caller.
#[derive(Debug)]
pub struct ProcessHandle {
    /// The spawned OS process.
    child: Child,
    /// Buffered stdin writer, if the invocation requested one. Taken out by
    /// `close_stdin`; `None` afterwards (and when never requested).
    stdin: Option<StdinPump>,
}

impl ProcessHandle {
    /// Binds a spawned child to its optional stdin pump.
    pub(crate) fn new(child: Child, stdin: Option<StdinPump>) -> Self {
        Self { child, stdin }
    }

    /// OS process id, while the child is running.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Enqueues a chunk on the buffered stdin writer.
    ///
    /// # Errors
    ///
    /// Fails fast with `CmdrsError::StdinWriter` when no writer is attached —
    /// either buffered stdin was never requested, or `close_stdin` already
    /// ran.
    pub async fn write_stdin(&self, chunk: impl Into<Vec<u8>>) -> Result<()> {
        match &self.stdin {
            Some(pump) => pump.write(chunk).await,
            None => Err(anyhow!(CmdrsError::StdinWriter(
                "No buffered stdin attached (not requested, or already closed)".to_string()
            ))),
        }
    }

    /// Runs the stdin shutdown protocol: drain the queue, close the pipe,
    /// then poll the child until it is observed exited.
    ///
    /// Blocks indefinitely if the child never exits. A second call is a
    /// no-op.
    pub async fn close_stdin(&mut self) -> Result<()> {
        let Some(pump) = self.stdin.take() else {
            debug!("close_stdin called with no active stdin writer; nothing to do");
            return Ok(());
        };
        // Phase 1 + 2: queue fully drained, pipe closed, worker exited.
        pump.close().await?;
        // Phase 3: observe the child exit before returning.
        loop {
            if self.try_wait()?.is_some() {
                break;
            }
            tokio::time::sleep(EXIT_POLL_INTERVAL).await;
        }
        debug!("Buffered stdin closed and child observed exited");
        Ok(())
    }

    /// Takes the child's piped stdout stream, if the invocation piped it.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Takes the child's piped stderr stream, if the invocation piped it.
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Waits for the child to exit and returns its status.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        self.child
            .wait()
            .await
            .context("Failed waiting for spawned process")
    }

    /// Non-blocking exit check: `Some(status)` once the child has exited.
    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        self.child
            .try_wait()
            .context("Failed polling spawned process for exit")
    }

    /// Forcibly terminates the child.
    pub async fn kill(&mut self) -> Result<()> {
        self.child
            .kill()
            .await
            .context("Failed to kill spawned process")
    }
}
