//! Storage contract consumed by the collection store.

use async_trait::async_trait;

use super::error::Result;

/// Async key-value storage over string keys and serialized string values.
///
/// Each collection persists into its own named slot (`"cities"`,
/// `"markers"`); no cross-slot atomicity is provided or required. Every
/// method is total over absent slots: reading one yields `None`, removing
/// one succeeds.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Returns the previously stored serialized value, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the slot.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Drops a single slot.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Drops every slot (the "reset all data" user action).
    async fn clear_all(&self) -> Result<()>;
}
