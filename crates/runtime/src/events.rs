//! Store notifications published over a broadcast channel.
//!
//! Events are best-effort: lagging or absent subscribers never block the
//! store. `FlushFailed` is the "changes not saved" signal the presentation
//! layer can surface, distinct from validation failures which are returned
//! from `dispatch` directly.

use serde::{Deserialize, Serialize};

use travelog_core::ActionKind;

/// Notification emitted by a collection store or its flush worker.
///
/// `seq` is the store's mutation sequence number: each state-changing
/// dispatch (and each clear) gets the next value, and flush outcomes carry
/// the sequence they settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StoreEvent {
    /// An action changed the in-memory sequence and a flush was enqueued.
    Mutated { kind: ActionKind, seq: u64 },

    /// The flush for `seq` reached the backend.
    Flushed { seq: u64 },

    /// The flush for `seq` was abandoned after exhausting retries.
    FlushFailed { seq: u64, error: String },
}
