//! # CmdRS Buffered Stdin Writer (`common::process::stdin`)
//!
//! File: cli/src/common/process/stdin.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! A spawned process's standard-input pipe is a blocking resource: a producer
//! writing directly to it stalls whenever the child isn't consuming fast
//! enough. This module inserts a bounded queue and a dedicated background
//! worker between producers and the pipe, so producer code never blocks on
//! the pipe itself. When the queue fills, producers suspend on `write` until
//! the worker frees a slot — bounded backpressure instead of unbounded
//! memory growth.
//!
//! ## Architecture
//!
//! - **`StdinPump`**: Owns the sending half of a bounded `tokio::sync::mpsc`
//!   channel (capacity `QUEUE_CAPACITY`) and the join handle of the worker
//!   task. The worker owns the raw `ChildStdin` exclusively; once a pipe is
//!   wrapped, nothing else may write to it.
//! - **Worker loop**: Receives the next queued chunk and performs the
//!   blocking write to the pipe. Exactly one worker consumes the queue, so
//!   chunks reach the pipe in the exact order `write` was called. A pipe
//!   write failure terminates the loop; queued chunks behind the failure are
//!   discarded and later `write` calls fail fast.
//! - **Close protocol** (`close`, crate-internal; exposed to callers through
//!   `ProcessHandle::close_stdin`): consuming the pump drops the sender, the
//!   worker drains every remaining queued chunk to the pipe, shuts the pipe
//!   down, and exits. `close` returns once the worker has finished, i.e.
//!   after the pipe is closed. The owner (`ProcessHandle`) then polls the
//!   child for exit.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{execute, Invocation, Outcome};
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let outcome = execute(Invocation::new().arg("cat").spawn().buffered_stdin()).await?;
//! if let Outcome::Spawned(mut handle) = outcome {
//!     handle.write_stdin("fed through the queue\n").await?;
//!     handle.close_stdin().await?; // drains, closes the pipe, waits for exit
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{CmdrsError, Result};
use anyhow::anyhow;
use tokio::{
    io::AsyncWriteExt,
    process::ChildStdin,
    sync::mpsc,
    task::JoinHandle,
};
use tracing::{debug, warn};

/// Maximum number of chunks queued ahead of the pipe. A producer whose
/// `write` would exceed this suspends until the worker drains a slot.
pub(crate) const QUEUE_CAPACITY: usize = 10;

/// Queue-buffered writer owning a spawned process's stdin pipe.
///
/// Created at spawn time when an invocation requests buffered stdin; from
/// that point on the pump is the sole writer to the pipe. Any number of
/// producers may call `write` concurrently — the queue serializes them.
#[derive(Debug)]
pub struct StdinPump {
    /// Sending half of the bounded chunk queue.
    tx: mpsc::Sender<Vec<u8>>,
    /// Worker task draining the queue into the pipe.
    worker: JoinHandle<()>,
}

impl StdinPump {
    /// Wraps a child's stdin pipe, taking exclusive ownership of it.
    pub(crate) fn new(stdin: ChildStdin) -> Self {
        Self::with_writer(stdin)
    }

    /// Generic constructor over any async writer. The worker loop and close
    /// protocol are identical regardless of the sink; tests exercise them
    /// against an in-memory duplex stream.
    pub(crate) fn with_writer<W>(writer: W) -> Self
    where
        W: tokio::io::AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<Vec<u8>>(QUEUE_CAPACITY);
        // The worker is the single consumer: chunks hit the pipe in queue
        // order, one blocking write at a time.
        let worker = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(chunk) = rx.recv().await {
                if let Err(e) = writer.write_all(&chunk).await {
                    warn!("Stdin pipe write failed, discarding remaining queue: {}", e);
                    break;
                }
            }
            // Sender gone (close) or pipe dead: flush and close the pipe.
            if let Err(e) = writer.shutdown().await {
                debug!("Stdin pipe shutdown reported: {}", e);
            }
            debug!("Stdin pump worker exited");
        });
        Self { tx, worker }
    }

    /// Enqueues one chunk for the worker to write to the pipe.
    ///
    /// Suspends while the queue is full (backpressure). Chunks are written in
    /// exact `write` order.
    ///
    /// # Arguments
    ///
    /// * `chunk` - Bytes to send; `&str`, `String`, and `Vec<u8>` all convert.
    ///
    /// # Errors
    ///
    /// Fails fast with `CmdrsError::StdinWriter` if the worker has already
    /// terminated (pipe write failure). Data is never silently dropped.
    pub async fn write(&self, chunk: impl Into<Vec<u8>>) -> Result<()> {
        self.tx.send(chunk.into()).await.map_err(|_| {
            anyhow!(CmdrsError::StdinWriter(
                "Write rejected: the stdin worker has terminated".to_string()
            ))
        })
    }

    /// Drains the queue and closes the pipe. Terminal: the pump is consumed.
    ///
    /// Returns only after every chunk enqueued before the call has been
    /// written to the pipe and the pipe has been closed. Polling the owning
    /// process for exit is the caller's half of the protocol
    /// (`ProcessHandle::close_stdin`).
    pub(crate) async fn close(self) -> Result<()> {
        // Dropping the sender stops intake; the worker drains what's queued,
        // shuts the pipe down, then exits.
        drop(self.tx);
        self.worker
            .await
            .map_err(|e| anyhow!(CmdrsError::StdinWriter(format!("Stdin worker panicked: {e}"))))
    }
}

// --- Unit Tests ---
// The pump is exercised against an in-memory duplex pipe so ordering and
// backpressure are observable without a real child process.
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::AsyncReadExt;

    /// Chunks written by one producer reach the pipe in exactly that order.
    #[tokio::test]
    async fn test_fifo_ordering() -> Result<()> {
        let (writer, mut reader) = tokio::io::duplex(1024);
        let pump = StdinPump::with_writer(writer);

        pump.write("A").await?;
        pump.write("B").await?;
        pump.write("C").await?;
        pump.close().await?;

        let mut observed = String::new();
        reader.read_to_string(&mut observed).await?;
        assert_eq!(observed, "ABC");
        Ok(())
    }

    /// Close drains every queued chunk before the pipe closes: the reader
    /// observes all data, then end-of-stream.
    #[tokio::test]
    async fn test_close_drains_queue_before_closing_pipe() -> Result<()> {
        let (writer, mut reader) = tokio::io::duplex(1024);
        let pump = StdinPump::with_writer(writer);

        for i in 0..QUEUE_CAPACITY {
            pump.write(format!("chunk{i};")).await?;
        }
        pump.close().await?;

        let mut observed = String::new();
        reader.read_to_string(&mut observed).await?;
        for i in 0..QUEUE_CAPACITY {
            assert!(observed.contains(&format!("chunk{i};")));
        }
        Ok(())
    }

    /// A producer filling the queue past capacity while the pipe is stalled
    /// suspends; draining the pipe lets the suspended write complete.
    #[tokio::test]
    async fn test_backpressure_blocks_producer_when_queue_full() -> Result<()> {
        // 1-byte pipe buffer: the first two-byte chunk stalls the worker.
        let (writer, mut reader) = tokio::io::duplex(1);
        let pump = StdinPump::with_writer(writer);

        // Stall the worker mid-write, then give it time to dequeue.
        pump.write("aa").await?;
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Fill the queue to capacity; these enqueue without blocking.
        for _ in 0..QUEUE_CAPACITY {
            pump.write("b").await?;
        }

        // One more chunk exceeds capacity: the write must suspend.
        let overflow = tokio::time::timeout(Duration::from_millis(50), pump.write("c")).await;
        assert!(overflow.is_err(), "write into a full queue should block");

        // Draining the pipe unblocks the worker, freeing queue slots; the
        // retried write now completes.
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf).await?;
        let retried = tokio::time::timeout(Duration::from_millis(500), pump.write("c")).await;
        assert!(retried.is_ok(), "write should resume once a slot frees");
        retried.unwrap()?;
        Ok(())
    }

    /// A dead sink terminates the worker; later writes fail fast instead of
    /// silently queuing data that can never be written.
    #[tokio::test]
    async fn test_write_fails_fast_after_pipe_failure() -> Result<()> {
        let (writer, reader) = tokio::io::duplex(1024);
        let pump = StdinPump::with_writer(writer);
        drop(reader); // writes now error with a broken pipe

        // The first write may still be accepted by the queue; the worker dies
        // attempting it. Retry until the failure surfaces.
        let mut rejected = false;
        for _ in 0..20 {
            if pump.write("x").await.is_err() {
                rejected = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(rejected, "writes after a pipe failure must be rejected");
        Ok(())
    }
}
