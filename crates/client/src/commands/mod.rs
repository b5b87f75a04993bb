//! Terminal commands over the two persisted collections.

mod city;
mod marker;
mod reset;

pub use city::CityCommand;
pub use marker::MarkerCommand;
pub use reset::Reset;

use std::sync::Arc;

use anyhow::Result;

use runtime::{CollectionStore, FileSlotStore, SlotStore, StoreConfig};
use travelog_core::{City, MatchPolicy, Waypoint};

use crate::config::ClientConfig;
use crate::dirs;

/// Slot key of the cities collection.
pub const CITIES_SLOT: &str = "cities";

/// Slot key of the markers collection.
pub const MARKERS_SLOT: &str = "markers";

/// Everything a command needs: the shared backend and the two hydrated
/// stores, passed in explicitly by the composition root.
pub struct App {
    pub backend: Arc<dyn SlotStore>,
    pub cities: CollectionStore<City>,
    pub markers: CollectionStore<Waypoint>,
}

impl App {
    /// Opens the file-backed slot store and hydrates both collections.
    pub async fn open(config: &ClientConfig) -> Result<Self> {
        let data_dir = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()?,
        };
        tracing::debug!("slot files under {}", data_dir.display());

        let backend: Arc<dyn SlotStore> = Arc::new(FileSlotStore::new(&data_dir)?);

        let policy = if config.strict {
            MatchPolicy::Strict
        } else {
            MatchPolicy::Lenient
        };

        let mut cities_config = StoreConfig::new(CITIES_SLOT).with_policy(policy);
        cities_config.flush_buffer = config.flush_buffer;
        let cities = CollectionStore::open(Arc::clone(&backend), cities_config).await;

        let mut markers_config = StoreConfig::new(MARKERS_SLOT).with_policy(policy);
        markers_config.flush_buffer = config.flush_buffer;
        let markers = CollectionStore::open(Arc::clone(&backend), markers_config).await;

        Ok(Self {
            backend,
            cities,
            markers,
        })
    }
}
