//! Deterministic collection logic and record types shared across the runtime
//! and client.
//!
//! `travelog-core` defines the canonical domain model (cities, waypoints),
//! the closed action protocol over record collections, and the pure reducer
//! that applies it. There is no I/O here: persistence and orchestration live
//! in the `runtime` crate, which depends on the types re-exported below.
pub mod action;
pub mod error;
pub mod record;
pub mod reducer;
pub mod state;

pub use action::{ActionKind, ApplyOutcome, CollectionAction};
pub use error::{ApplyError, ValidationError};
pub use record::Record;
pub use reducer::{MatchPolicy, apply};
pub use state::{City, CityId, CollectionState, DEFAULT_COLOR_TAG, Waypoint};
