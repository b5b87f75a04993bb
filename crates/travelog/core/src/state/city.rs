//! The city record: one visited place with its metadata and waypoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::record::Record;
use crate::state::common::CityId;
use crate::state::waypoint::Waypoint;

/// A visited city.
///
/// Serialized with camelCase field names (`visitedDate`, `hasPassport`).
/// `visited_date` and `waypoints` tolerate absence so blobs written before
/// those fields existed still hydrate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub visited_date: Option<DateTime<Utc>>,
    pub has_passport: bool,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl City {
    /// Creates a city with no visit date and no waypoints.
    pub fn new(
        id: CityId,
        name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            country: country.into(),
            visited_date: None,
            has_passport: false,
            latitude,
            longitude,
            waypoints: Vec::new(),
        }
    }

    pub fn with_visited_date(mut self, visited: DateTime<Utc>) -> Self {
        self.visited_date = Some(visited);
        self
    }

    pub fn with_passport(mut self, has_passport: bool) -> Self {
        self.has_passport = has_passport;
        self
    }

    /// Checks the submission rules the entry form enforces: a non-blank name
    /// and a selected map location (neither coordinate still at zero).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.latitude == 0.0 || self.longitude == 0.0 {
            return Err(ValidationError::MissingLocation);
        }
        Ok(())
    }

}

impl Record for City {
    type Key = CityId;

    fn key(&self) -> CityId {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> City {
        City::new(CityId::from("1700000000000"), "Paris", "FR", 48.85, 2.35)
    }

    #[test]
    fn validate_accepts_complete_city() {
        assert!(paris().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut city = paris();
        city.name = "   ".to_string();
        assert_eq!(city.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn validate_rejects_unselected_location() {
        let mut city = paris();
        city.longitude = 0.0;
        assert_eq!(city.validate(), Err(ValidationError::MissingLocation));
    }

    #[test]
    fn serde_uses_camel_case_and_defaults() {
        let json = r#"{
            "id": "1700000000000",
            "name": "Paris",
            "country": "FR",
            "hasPassport": true,
            "latitude": 48.85,
            "longitude": 2.35
        }"#;
        let city: City = serde_json::from_str(json).unwrap();
        assert_eq!(city.id, CityId::from("1700000000000"));
        assert!(city.has_passport);
        assert!(city.visited_date.is_none());
        assert!(city.waypoints.is_empty());

        let out = serde_json::to_value(&city).unwrap();
        assert!(out.get("hasPassport").is_some());
        assert!(out.get("visitedDate").is_some());
    }
}
