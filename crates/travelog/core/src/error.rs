//! Error types raised by the pure domain layer.

use thiserror::Error;

/// Errors surfaced by [`apply`](crate::reducer::apply).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// `Update`/`Delete` matched nothing under
    /// [`MatchPolicy::Strict`](crate::reducer::MatchPolicy). Lenient mode
    /// reports the same situation as
    /// [`ApplyOutcome::Unchanged`](crate::ApplyOutcome) instead.
    #[error("no record with key {key} in collection")]
    NotFound { key: String },
}

/// Record-level validation failures, checked before a record enters a
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("city name must not be empty")]
    EmptyName,

    #[error("a map location must be selected (non-zero coordinates)")]
    MissingLocation,
}
