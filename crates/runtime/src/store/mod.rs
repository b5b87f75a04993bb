//! The collection store: one hydrated collection mirrored to one slot.

mod flusher;

pub use flusher::RetryPolicy;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, trace, warn};

use travelog_core::{
    ApplyOutcome, CollectionAction, CollectionState, MatchPolicy, Record, apply,
};

use crate::error::{Result, StoreError};
use crate::events::StoreEvent;
use crate::slot;
use crate::storage::SlotStore;
use flusher::{FlushCommand, FlushWorker};

/// Configuration for one collection store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Slot key in the backing store (`"cities"`, `"markers"`).
    pub slot: String,

    /// No-match behavior for `Update`/`Delete`.
    pub policy: MatchPolicy,

    /// Flush command queue depth.
    pub flush_buffer: usize,

    /// Event broadcast capacity.
    pub event_capacity: usize,

    /// Retry behavior for failed storage calls.
    pub retry: RetryPolicy,
}

impl StoreConfig {
    pub fn new(slot: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            policy: MatchPolicy::Lenient,
            flush_buffer: 16,
            event_capacity: 100,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Owner of one in-memory record collection, mirrored to a slot of the
/// backing [`SlotStore`].
///
/// The store is the exclusive owner of its sequence: reads go through
/// [`state`](Self::state), writes through [`dispatch`](Self::dispatch).
/// Mutations apply synchronously and are visible to the next read
/// immediately; the matching persistence write is queued on the slot's
/// flush worker and completes in dispatch order.
///
/// Hydration happens exactly once, inside [`open`](Self::open). A slot that
/// is absent, unreadable, or unparsable hydrates as an empty sequence with a
/// logged warning; it is never an error to the caller.
pub struct CollectionStore<T> {
    slot: String,
    policy: MatchPolicy,
    backend: Arc<dyn SlotStore>,
    state: CollectionState<T>,
    /// Sequence number of the last enqueued mutation.
    seq: u64,
    flush_tx: mpsc::Sender<FlushCommand>,
    flushed_rx: watch::Receiver<u64>,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl<T> CollectionStore<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    /// Opens the store: spawns the slot's flush worker, then hydrates from
    /// the backend.
    pub async fn open(backend: Arc<dyn SlotStore>, config: StoreConfig) -> Self {
        let (flush_tx, command_rx) = mpsc::channel(config.flush_buffer.max(1));
        let (flushed_tx, flushed_rx) = watch::channel(0u64);
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));

        let worker = FlushWorker::new(
            config.slot.clone(),
            Arc::clone(&backend),
            command_rx,
            flushed_tx,
            event_tx.clone(),
            config.retry,
        );
        tokio::spawn(worker.run());

        let state = hydrate(backend.as_ref(), &config.slot).await;
        debug!(slot = %config.slot, records = state.len(), "store hydrated");

        Self {
            slot: config.slot,
            policy: config.policy,
            backend,
            state,
            seq: 0,
            flush_tx,
            flushed_rx,
            event_tx,
        }
    }

    /// The current in-memory sequence, always consistent with the last
    /// applied action.
    pub fn state(&self) -> &CollectionState<T> {
        &self.state
    }

    /// Subscribe to flush/mutation notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    /// Applies one action to the in-memory sequence and, when it changed
    /// state, enqueues a snapshot on the slot's flush queue.
    ///
    /// A lenient no-match returns `Ok(ApplyOutcome::Unchanged)` and enqueues
    /// nothing; under [`MatchPolicy::Strict`] the same situation is a
    /// `NotFound` error.
    pub async fn dispatch(&mut self, action: CollectionAction<T>) -> Result<ApplyOutcome> {
        let kind = action.kind();
        let outcome = apply(&mut self.state, action, self.policy)?;

        if !outcome.changed() {
            trace!(slot = %self.slot, %kind, "no-op dispatch, skipping flush");
            return Ok(outcome);
        }

        self.seq += 1;
        let payload = slot::encode(self.state.records())?;
        self.flush_tx
            .send(FlushCommand::Write {
                seq: self.seq,
                payload,
            })
            .await
            .map_err(|_| StoreError::FlushChannelClosed)?;

        if self
            .event_tx
            .send(StoreEvent::Mutated {
                kind,
                seq: self.seq,
            })
            .is_err()
        {
            trace!(slot = %self.slot, "no subscribers for store events");
        }

        Ok(outcome)
    }

    /// The marker-editing flow: replace the record with a matching key, or
    /// append when nothing matches.
    pub async fn upsert(&mut self, record: T) -> Result<ApplyOutcome> {
        let key = record.key();
        let exists = self.state.iter().any(|r| r.key() == key);
        if exists {
            self.dispatch(CollectionAction::Update(record)).await
        } else {
            self.dispatch(CollectionAction::Add(record)).await
        }
    }

    /// Drops the persisted slot and resets in-memory state to empty.
    ///
    /// Succeeds even when the slot never existed.
    pub async fn clear(&mut self) -> Result<()> {
        self.state = CollectionState::new();
        self.seq += 1;
        self.flush_tx
            .send(FlushCommand::Remove { seq: self.seq })
            .await
            .map_err(|_| StoreError::FlushChannelClosed)?;
        Ok(())
    }

    /// Re-reads the slot, replacing the in-memory sequence; the
    /// screen-refocus reload. Fails soft exactly like the initial hydrate.
    pub async fn rehydrate(&mut self) {
        self.state = hydrate(self.backend.as_ref(), &self.slot).await;
        debug!(slot = %self.slot, records = self.state.len(), "store rehydrated");
    }

    /// Waits until the flush worker has settled every mutation enqueued so
    /// far.
    ///
    /// This is a progress signal, not a success signal: a flush abandoned
    /// after retries still advances the watermark, with the failure reported
    /// through [`StoreEvent::FlushFailed`].
    pub async fn flushed(&self) {
        let target = self.seq;
        let mut rx = self.flushed_rx.clone();
        let _ = rx.wait_for(|&settled| settled >= target).await;
    }
}

/// Reads and decodes a slot, failing soft to an empty collection.
async fn hydrate<T: DeserializeOwned>(backend: &dyn SlotStore, slot: &str) -> CollectionState<T> {
    let raw = match backend.get(slot).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return CollectionState::new(),
        Err(e) => {
            warn!(slot, "failed to read slot, starting empty: {e}");
            return CollectionState::new();
        }
    };

    match slot::decode(&raw) {
        Ok(records) => CollectionState::from_records(records),
        Err(e) => {
            warn!(slot, "failed to decode slot, starting empty: {e}");
            CollectionState::new()
        }
    }
}
