//! Pure reducer applying [`CollectionAction`]s to a [`CollectionState`].
//!
//! The reducer mutates the in-memory sequence only; persistence is the
//! caller's concern. It is deterministic and synchronous, so the result of a
//! dispatch is visible to the very next read.

use crate::action::{ApplyOutcome, CollectionAction};
use crate::error::ApplyError;
use crate::record::Record;
use crate::state::CollectionState;

/// How `Update`/`Delete` behave when no record matches the key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// No match is a silent no-op. Matches the historical behavior; stale
    /// references never crash a caller, at the cost of masking bugs.
    #[default]
    Lenient,
    /// No match is an [`ApplyError::NotFound`], for callers that want
    /// fail-fast diagnostics.
    Strict,
}

/// Applies one action to the collection, returning what changed.
pub fn apply<T>(
    state: &mut CollectionState<T>,
    action: CollectionAction<T>,
    policy: MatchPolicy,
) -> Result<ApplyOutcome, ApplyError>
where
    T: Record,
{
    match action {
        CollectionAction::Set(records) => {
            let count = records.len();
            *state.records_mut() = records;
            Ok(ApplyOutcome::Replaced { count })
        }
        CollectionAction::Add(record) => {
            state.records_mut().push(record);
            Ok(ApplyOutcome::Appended)
        }
        CollectionAction::Update(record) => {
            let key = record.key();
            let records = state.records_mut();
            match records.iter().position(|r| r.key() == key) {
                Some(index) => {
                    records[index] = record;
                    Ok(ApplyOutcome::Updated)
                }
                None => no_match(key, policy),
            }
        }
        CollectionAction::Delete(record) => {
            let key = record.key();
            let records = state.records_mut();
            let before = records.len();
            records.retain(|r| r.key() != key);
            let removed = before - records.len();
            if removed == 0 {
                no_match(key, policy)
            } else {
                Ok(ApplyOutcome::Removed { count: removed })
            }
        }
    }
}

fn no_match<K: std::fmt::Debug>(
    key: K,
    policy: MatchPolicy,
) -> Result<ApplyOutcome, ApplyError> {
    match policy {
        MatchPolicy::Lenient => Ok(ApplyOutcome::Unchanged),
        MatchPolicy::Strict => Err(ApplyError::NotFound {
            key: format!("{key:?}"),
        }),
    }
}
