//! End-to-end lifecycle tests for the collection store: hydrate, dispatch,
//! flush ordering, restart, and failure recovery.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::time::Duration;

use runtime::storage::Result as StorageResult;
use runtime::{
    CollectionStore, FileSlotStore, MemorySlotStore, RetryPolicy, SlotStore, StoreConfig,
    StoreError, StoreEvent,
};
use travelog_core::{
    ApplyError, ApplyOutcome, City, CityId, CollectionAction, MatchPolicy, Waypoint,
};

fn city(id: &str, name: &str) -> City {
    City::new(CityId::from(id), name, "BR", -22.90, -43.17)
}

async fn open_cities(backend: Arc<dyn SlotStore>) -> CollectionStore<City> {
    CollectionStore::open(backend, StoreConfig::new("cities")).await
}

#[tokio::test]
async fn round_trip_survives_restart() {
    let temp = tempfile::TempDir::new().unwrap();
    let records = vec![city("1", "Rio de Janeiro"), city("2", "Salvador")];

    {
        let backend: Arc<dyn SlotStore> =
            Arc::new(FileSlotStore::new(temp.path()).unwrap());
        let mut store = open_cities(backend).await;
        store
            .dispatch(CollectionAction::Set(records.clone()))
            .await
            .unwrap();
        store.flushed().await;
    }

    // Simulated restart: a fresh store over the same directory.
    let backend: Arc<dyn SlotStore> = Arc::new(FileSlotStore::new(temp.path()).unwrap());
    let store = open_cities(backend).await;
    assert_eq!(store.state().records(), records.as_slice());
}

#[tokio::test]
async fn add_appends_in_dispatch_order() {
    let backend: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
    let mut store = open_cities(backend).await;

    store
        .dispatch(CollectionAction::Add(city("1", "Santos")))
        .await
        .unwrap();
    store
        .dispatch(CollectionAction::Add(city("2", "Recife")))
        .await
        .unwrap();

    let names: Vec<_> = store.state().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Santos", "Recife"]);
}

#[tokio::test]
async fn update_replaces_in_place_and_ignores_missing_keys() {
    let backend: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
    let mut store = open_cities(backend).await;
    store
        .dispatch(CollectionAction::Set(vec![
            city("1", "Santos"),
            city("2", "Recife"),
        ]))
        .await
        .unwrap();

    let outcome = store
        .dispatch(CollectionAction::Update(city("2", "Olinda")))
        .await
        .unwrap();
    assert_eq!(outcome, ApplyOutcome::Updated);
    assert_eq!(store.state().records()[1].name, "Olinda");

    let before = store.state().clone();
    let outcome = store
        .dispatch(CollectionAction::Update(city("9", "Nowhere")))
        .await
        .unwrap();
    assert_eq!(outcome, ApplyOutcome::Unchanged);
    assert_eq!(store.state(), &before);
}

#[tokio::test]
async fn strict_store_surfaces_not_found() {
    let backend: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
    let config = StoreConfig::new("cities").with_policy(MatchPolicy::Strict);
    let mut store: CollectionStore<City> = CollectionStore::open(backend, config).await;

    let err = store
        .dispatch(CollectionAction::Delete(city("9", "ghost")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Apply(ApplyError::NotFound { .. })
    ));
}

#[tokio::test]
async fn delete_removes_by_key() {
    let backend: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
    let mut store = open_cities(backend).await;
    store
        .dispatch(CollectionAction::Set(vec![
            city("1", "A"),
            city("2", "B"),
            city("3", "C"),
        ]))
        .await
        .unwrap();

    store
        .dispatch(CollectionAction::Delete(city("2", "B")))
        .await
        .unwrap();

    let ids: Vec<_> = store.state().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
}

#[tokio::test]
async fn upsert_replaces_same_coordinates_and_appends_new_ones() {
    let backend: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
    let mut store: CollectionStore<Waypoint> =
        CollectionStore::open(backend, StoreConfig::new("markers")).await;

    store.upsert(Waypoint::new("A", 1.0, 2.0)).await.unwrap();

    // Same coordinates: replace, not append.
    let outcome = store
        .upsert(Waypoint::new("B", 1.0, 2.0).with_color_tag("#00FF00"))
        .await
        .unwrap();
    assert_eq!(outcome, ApplyOutcome::Updated);
    assert_eq!(store.state().len(), 1);
    assert_eq!(store.state().records()[0].name, "B");
    assert_eq!(store.state().records()[0].color_tag, "#00FF00");

    // Different coordinates: append.
    let outcome = store.upsert(Waypoint::new("C", 3.0, 4.0)).await.unwrap();
    assert_eq!(outcome, ApplyOutcome::Appended);
    assert_eq!(store.state().len(), 2);
}

#[tokio::test]
async fn corrupt_slot_hydrates_empty() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(temp.path().join("cities.json"), "{definitely not json").unwrap();

    let backend: Arc<dyn SlotStore> = Arc::new(FileSlotStore::new(temp.path()).unwrap());
    let store = open_cities(backend).await;
    assert!(store.state().is_empty());
}

#[tokio::test]
async fn clear_drops_slot_and_memory() {
    let temp = tempfile::TempDir::new().unwrap();
    let backend: Arc<dyn SlotStore> = Arc::new(FileSlotStore::new(temp.path()).unwrap());

    let mut store = open_cities(Arc::clone(&backend)).await;
    store
        .dispatch(CollectionAction::Add(city("1", "Santos")))
        .await
        .unwrap();
    store.flushed().await;
    assert!(temp.path().join("cities.json").exists());

    store.clear().await.unwrap();
    store.flushed().await;

    assert!(store.state().is_empty());
    assert!(!temp.path().join("cities.json").exists());

    let reopened = open_cities(backend).await;
    assert!(reopened.state().is_empty());

    // Clearing again, with no slot on disk, still succeeds.
    let mut reopened = reopened;
    reopened.clear().await.unwrap();
    reopened.flushed().await;
}

#[tokio::test]
async fn paris_scenario_survives_restart() {
    let temp = tempfile::TempDir::new().unwrap();
    let visited = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let paris = City::new(CityId::from("1700000000000"), "Paris", "França", 48.85, 2.35)
        .with_passport(true)
        .with_visited_date(visited);

    {
        let backend: Arc<dyn SlotStore> =
            Arc::new(FileSlotStore::new(temp.path()).unwrap());
        let mut store = open_cities(backend).await;
        assert!(store.state().is_empty());

        store
            .dispatch(CollectionAction::Add(paris.clone()))
            .await
            .unwrap();
        assert_eq!(store.state().len(), 1);
        assert_eq!(store.state().records()[0], paris);
        store.flushed().await;
    }

    let backend: Arc<dyn SlotStore> = Arc::new(FileSlotStore::new(temp.path()).unwrap());
    let store = open_cities(backend).await;
    assert_eq!(store.state().records(), std::slice::from_ref(&paris));
}

#[tokio::test]
async fn legacy_bare_array_slot_hydrates() {
    // Blobs written before the versioned envelope were plain JSON arrays.
    let legacy = r#"[{"id":"1","name":"Santos","country":"BR","hasPassport":false,"latitude":-23.96,"longitude":-46.33}]"#;
    let seed = std::collections::HashMap::from([("cities".to_string(), legacy.to_string())]);
    let backend: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::with_slots(seed));

    let store = open_cities(backend).await;
    assert_eq!(store.state().len(), 1);
    assert_eq!(store.state().records()[0].name, "Santos");
    assert!(store.state().records()[0].waypoints.is_empty());
}

#[tokio::test]
async fn rehydrate_picks_up_external_writes() {
    let backend = Arc::new(MemorySlotStore::new());
    let mut store = open_cities(Arc::clone(&backend) as Arc<dyn SlotStore>).await;
    assert!(store.state().is_empty());

    // Another writer fills the slot behind the store's back.
    let payload = runtime::slot::encode(&[city("1", "Recife")]).unwrap();
    backend.set("cities", &payload).await.unwrap();

    store.rehydrate().await;
    assert_eq!(store.state().len(), 1);
    assert_eq!(store.state().records()[0].name, "Recife");
}

/// Backend that records every write so ordering can be asserted.
struct RecordingSlotStore {
    inner: MemorySlotStore,
    writes: Mutex<Vec<String>>,
}

impl RecordingSlotStore {
    fn new() -> Self {
        Self {
            inner: MemorySlotStore::new(),
            writes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SlotStore for RecordingSlotStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.writes.lock().unwrap().push(value.to_string());
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.remove(key).await
    }

    async fn clear_all(&self) -> StorageResult<()> {
        self.inner.clear_all().await
    }
}

#[tokio::test]
async fn rapid_dispatches_flush_in_dispatch_order() {
    let backend = Arc::new(RecordingSlotStore::new());
    let mut store = open_cities(Arc::clone(&backend) as Arc<dyn SlotStore>).await;

    for i in 0..20 {
        store
            .dispatch(CollectionAction::Add(city(&i.to_string(), "City")))
            .await
            .unwrap();
    }
    store.flushed().await;

    let writes = backend.writes.lock().unwrap();
    assert_eq!(writes.len(), 20);
    // Each successive snapshot must contain one more record than the last;
    // an overtaken write would break the monotonic growth.
    for (i, payload) in writes.iter().enumerate() {
        let decoded: Vec<City> = runtime::slot::decode(payload).unwrap();
        assert_eq!(decoded.len(), i + 1);
    }
    let last: Vec<City> = runtime::slot::decode(writes.last().unwrap()).unwrap();
    assert_eq!(last.as_slice(), store.state().records());
}

/// Backend whose writes always fail; reads behave like an empty store.
struct FailingSlotStore;

#[async_trait]
impl SlotStore for FailingSlotStore {
    async fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(std::io::Error::other("disk full").into())
    }

    async fn remove(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }

    async fn clear_all(&self) -> StorageResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn failed_flush_emits_event_without_wedging_waiters() {
    let backend: Arc<dyn SlotStore> = Arc::new(FailingSlotStore);
    let config = StoreConfig::new("cities").with_retry(RetryPolicy {
        attempts: 2,
        base_delay: Duration::from_millis(1),
    });
    let mut store: CollectionStore<City> = CollectionStore::open(backend, config).await;
    let mut events = store.subscribe();

    store
        .dispatch(CollectionAction::Add(city("1", "Santos")))
        .await
        .unwrap();

    // The in-memory mutation stands even though persistence failed.
    assert_eq!(store.state().len(), 1);

    // flushed() must settle despite the failure.
    store.flushed().await;

    let mut saw_failure = false;
    while let Ok(event) = events.try_recv() {
        if matches!(event, StoreEvent::FlushFailed { seq: 1, .. }) {
            saw_failure = true;
        }
    }
    assert!(saw_failure);
}
