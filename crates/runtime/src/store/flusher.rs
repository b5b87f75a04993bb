//! Background flush worker, one per collection slot.
//!
//! The worker is the slot's only writer. It drains its command channel
//! strictly in order, so a later snapshot can never be overtaken by an
//! earlier one that was slower to complete, and advances a watch watermark
//! as each command settles.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, warn};

use crate::events::StoreEvent;
use crate::storage::{SlotStore, StorageError};

/// Commands processed by the flush worker, strictly in arrival order.
pub(crate) enum FlushCommand {
    /// Overwrite the slot with a serialized snapshot.
    Write { seq: u64, payload: String },

    /// Drop the slot entirely.
    Remove { seq: u64 },
}

impl FlushCommand {
    fn seq(&self) -> u64 {
        match self {
            FlushCommand::Write { seq, .. } => *seq,
            FlushCommand::Remove { seq } => *seq,
        }
    }
}

/// Bounded exponential backoff for failed storage calls.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts per command (at least 1).
    pub attempts: u32,
    /// Delay before the second attempt; doubles each retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            base_delay: Duration::from_millis(100),
        }
    }
}

pub(crate) struct FlushWorker {
    slot: String,
    backend: Arc<dyn SlotStore>,
    command_rx: mpsc::Receiver<FlushCommand>,
    flushed_tx: watch::Sender<u64>,
    event_tx: broadcast::Sender<StoreEvent>,
    retry: RetryPolicy,
}

impl FlushWorker {
    pub(crate) fn new(
        slot: String,
        backend: Arc<dyn SlotStore>,
        command_rx: mpsc::Receiver<FlushCommand>,
        flushed_tx: watch::Sender<u64>,
        event_tx: broadcast::Sender<StoreEvent>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            slot,
            backend,
            command_rx,
            flushed_tx,
            event_tx,
            retry,
        }
    }

    /// Main worker loop. Runs until the store drops its command sender.
    pub(crate) async fn run(mut self) {
        debug!(slot = %self.slot, "flush worker started");

        while let Some(cmd) = self.command_rx.recv().await {
            let seq = cmd.seq();

            match self.apply_with_retry(&cmd).await {
                Ok(()) => {
                    let _ = self.event_tx.send(StoreEvent::Flushed { seq });
                }
                Err(e) => {
                    error!(
                        slot = %self.slot,
                        seq,
                        "giving up on flush after {} attempt(s): {}",
                        self.retry.attempts.max(1),
                        e
                    );
                    let _ = self.event_tx.send(StoreEvent::FlushFailed {
                        seq,
                        error: e.to_string(),
                    });
                }
            }

            // The watermark advances on failure too; FlushFailed events carry
            // the error.
            let _ = self.flushed_tx.send(seq);
        }

        debug!(slot = %self.slot, "flush worker stopped");
    }

    /// Applies one command with exponential backoff.
    async fn apply_with_retry(&self, cmd: &FlushCommand) -> Result<(), StorageError> {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.apply(cmd).await {
                Ok(()) => {
                    if attempt > 1 {
                        info!(slot = %self.slot, "flush succeeded after {} retries", attempt - 1);
                    }
                    return Ok(());
                }
                Err(e) if attempt < attempts => {
                    let delay = self.retry.base_delay * 2u32.saturating_pow(attempt - 1);
                    warn!(
                        slot = %self.slot,
                        "flush failed (attempt {}/{}): {}. Retrying in {:?}...",
                        attempt,
                        attempts,
                        e,
                        delay
                    );
                    sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn apply(&self, cmd: &FlushCommand) -> Result<(), StorageError> {
        match cmd {
            FlushCommand::Write { payload, .. } => self.backend.set(&self.slot, payload).await,
            FlushCommand::Remove { .. } => self.backend.remove(&self.slot).await,
        }
    }
}
