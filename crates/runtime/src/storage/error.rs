//! Error types raised by slot store implementations.

use thiserror::Error;

/// Errors surfaced by slot store implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("slot store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
