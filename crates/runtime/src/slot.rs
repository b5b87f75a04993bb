//! Versioned wire format for slot contents.
//!
//! Flushed payloads are a JSON envelope:
//!
//! ```text
//! {"version": 1, "records": [...]}
//! ```
//!
//! Decoding also accepts the bare JSON array earlier app versions wrote, so
//! legacy blobs hydrate without migration. Anything else is a decode error;
//! the store recovers from those by starting empty.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::storage::StorageError;

/// Current slot format version.
pub const SLOT_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u32,
    records: &'a [T],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Versioned { version: u32, records: Vec<T> },
    Legacy(Vec<T>),
}

/// Serializes a record sequence into the versioned envelope.
pub fn encode<T: Serialize>(records: &[T]) -> Result<String, StorageError> {
    serde_json::to_string(&Envelope {
        version: SLOT_FORMAT_VERSION,
        records,
    })
    .map_err(|e| StorageError::Json(e.to_string()))
}

/// Decodes slot contents, accepting both the envelope and the legacy bare
/// array.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, StorageError> {
    let payload: Payload<T> =
        serde_json::from_str(raw).map_err(|e| StorageError::Json(e.to_string()))?;

    match payload {
        Payload::Versioned { version, records } => {
            if version != SLOT_FORMAT_VERSION {
                return Err(StorageError::Json(format!(
                    "unsupported slot format version {version}"
                )));
            }
            Ok(records)
        }
        Payload::Legacy(records) => Ok(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travelog_core::Waypoint;

    #[test]
    fn encode_decode_roundtrip() {
        let waypoints = vec![
            Waypoint::new("Praia do Forte", -12.58, -38.00),
            Waypoint::new("Pelourinho", -12.97, -38.51).with_color_tag("#00FF00"),
        ];

        let raw = encode(&waypoints).unwrap();
        assert!(raw.starts_with(r#"{"version":1"#));

        let decoded: Vec<Waypoint> = decode(&raw).unwrap();
        assert_eq!(decoded, waypoints);
    }

    #[test]
    fn decode_accepts_legacy_bare_array() {
        let raw = r##"[{"name":"A","latitude":1.0,"longitude":2.0,"colorTag":"#FF0000"}]"##;
        let decoded: Vec<Waypoint> = decode(raw).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].coordinate(), (1.0, 2.0));
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let raw = r#"{"version":7,"records":[]}"#;
        let err = decode::<Waypoint>(raw).unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode::<Waypoint>("not json at all").is_err());
        assert!(decode::<Waypoint>(r#"{"cities": 3}"#).is_err());
    }
}
