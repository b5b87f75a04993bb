//! Map waypoints (markers) keyed structurally by their coordinates.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Pin color used when the editing flow supplies none.
pub const DEFAULT_COLOR_TAG: &str = "#FF0000";

/// A map marker.
///
/// Waypoints carry no surrogate id: two waypoints are the same record when
/// their `(latitude, longitude)` pair matches exactly. That pair is the
/// upsert key of the marker-editing flow, where saving onto existing
/// coordinates replaces the marker and new coordinates append one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color_tag: String,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            color_tag: DEFAULT_COLOR_TAG.to_string(),
        }
    }

    pub fn with_color_tag(mut self, color_tag: impl Into<String>) -> Self {
        self.color_tag = color_tag.into();
        self
    }

    pub fn coordinate(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl Record for Waypoint {
    type Key = (f64, f64);

    fn key(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}
