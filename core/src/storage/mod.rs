//! Persisted key-value storage
//!
//! All application state lives in a flat string-to-string space where
//! every value is JSON text. Two backends implement [`KeyValueStore`]:
//! a SQLite file for the real app and an in-memory map for tests.

pub mod keys;
pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::StorageResult;

/// Flat persisted key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Insert or overwrite the value under `key`
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete the value under `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> StorageResult<()>;
}
