//! In-memory SlotStore implementation for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::error::{Result, StorageError};
use super::traits::SlotStore;

/// In-memory implementation of [`SlotStore`].
///
/// Keeps slots in a `RwLock<HashMap>`; nothing survives the process.
pub struct MemorySlotStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemorySlotStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store pre-seeded with slot contents.
    pub fn with_slots(seed: HashMap<String, String>) -> Self {
        Self {
            slots: RwLock::new(seed),
        }
    }
}

impl Default for MemorySlotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| StorageError::LockPoisoned)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| StorageError::LockPoisoned)?;
        slots.remove(key);
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| StorageError::LockPoisoned)?;
        slots.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_roundtrip() {
        let store = MemorySlotStore::new();
        store.set("cities", "[]").await.unwrap();
        assert_eq!(store.get("cities").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn get_missing_slot_is_none() {
        let store = MemorySlotStore::new();
        assert!(store.get("markers").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_is_total_over_absent_slots() {
        let store = MemorySlotStore::new();
        store.remove("cities").await.unwrap();

        store.set("cities", "[]").await.unwrap();
        store.remove("cities").await.unwrap();
        assert!(store.get("cities").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_all_drops_every_slot() {
        let store = MemorySlotStore::new();
        store.set("cities", "[]").await.unwrap();
        store.set("markers", "[]").await.unwrap();
        store.clear_all().await.unwrap();
        assert!(store.get("cities").await.unwrap().is_none());
        assert!(store.get("markers").await.unwrap().is_none());
    }
}
