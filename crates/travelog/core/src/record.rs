//! Key-equality contract for collection records.

use std::fmt;

/// A record that can live in a keyed collection.
///
/// Each collection type declares its own equality policy through `Key`:
/// cities match on their surrogate [`CityId`](crate::CityId), waypoints match
/// structurally on their exact coordinate pair. The reducer only ever
/// compares keys, never whole records, so "same record" is whatever the
/// collection type says it is.
pub trait Record {
    /// Identity used for `Update`/`Delete` matching.
    type Key: PartialEq + Clone + fmt::Debug;

    /// Returns this record's key.
    fn key(&self) -> Self::Key;
}
