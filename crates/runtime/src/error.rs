//! Unified error types surfaced by the store API.
//!
//! Wraps failures from the reducer contract and the storage layer so
//! clients can tell "your action was wrong" apart from "your data did not
//! persist".

use thiserror::Error;

use travelog_core::ApplyError;

pub use crate::storage::StorageError;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The reducer rejected the action (strict-mode no-match).
    #[error(transparent)]
    Apply(#[from] ApplyError),

    /// The storage layer failed while serializing or writing.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The slot's flush worker is gone; mutations can no longer be persisted.
    #[error("flush worker channel closed")]
    FlushChannelClosed,
}
