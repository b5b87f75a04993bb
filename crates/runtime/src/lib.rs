//! Async orchestration for persisted record collections.
//!
//! This crate wires the pure reducer from `travelog-core` to durable
//! storage. A [`CollectionStore`] owns one hydrated collection in memory,
//! applies dispatched actions synchronously, and mirrors every change to a
//! named slot of a [`SlotStore`] through a per-slot FIFO flush worker, so
//! persisted state can never be overtaken by an older write.
//!
//! Modules are organized by responsibility:
//! - [`storage`] defines the key-value slot contract and its in-memory and
//!   file-backed implementations
//! - [`store`] hosts the collection store and its flush worker
//! - [`slot`] is the versioned wire format written into each slot
//! - [`events`] carries flush/mutation notifications to subscribers
pub mod error;
pub mod events;
pub mod slot;
pub mod storage;
pub mod store;

pub use error::{Result, StoreError};
pub use events::StoreEvent;
pub use storage::{FileSlotStore, MemorySlotStore, SlotStore, StorageError};
pub use store::{CollectionStore, RetryPolicy, StoreConfig};
