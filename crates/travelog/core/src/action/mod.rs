//! The closed action protocol over record collections.
//!
//! Every mutation a collection can undergo is one of the four variants of
//! [`CollectionAction`]. The enum is matched exhaustively by the reducer, so
//! an out-of-protocol action is unrepresentable rather than a runtime
//! failure.

use serde::{Deserialize, Serialize};

/// A mutation request against one collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CollectionAction<T> {
    /// Replace the entire sequence (bulk load or bulk clear).
    Set(Vec<T>),
    /// Append a record to the end of the sequence. No uniqueness check is
    /// performed; callers generate non-colliding keys.
    Add(T),
    /// Replace the first record whose key matches, in place.
    Update(T),
    /// Remove every record whose key matches.
    Delete(T),
}

impl<T> CollectionAction<T> {
    pub fn kind(&self) -> ActionKind {
        match self {
            CollectionAction::Set(_) => ActionKind::Set,
            CollectionAction::Add(_) => ActionKind::Add,
            CollectionAction::Update(_) => ActionKind::Update,
            CollectionAction::Delete(_) => ActionKind::Delete,
        }
    }
}

/// Discriminant of a [`CollectionAction`], used in events and log lines.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ActionKind {
    Set,
    Add,
    Update,
    Delete,
}

/// What applying an action actually did to the sequence.
///
/// `Unchanged` marks the lenient no-match no-op; the store uses it to skip
/// the persistence round-trip entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The whole sequence was replaced; `count` is the new length.
    Replaced { count: usize },
    /// A record was appended.
    Appended,
    /// A record was replaced in place.
    Updated,
    /// Matching records were removed.
    Removed { count: usize },
    /// Nothing matched; the sequence is untouched.
    Unchanged,
}

impl ApplyOutcome {
    /// True when the action mutated the in-memory sequence.
    pub fn changed(self) -> bool {
        !matches!(self, ApplyOutcome::Unchanged)
    }
}
