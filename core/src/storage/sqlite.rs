//! SQLite-backed key-value store
//!
//! One table, `kv_entries (key TEXT PRIMARY KEY, value TEXT)`, mirroring
//! the flat async-storage space the mobile app persists into. The schema
//! is created on open so the store works against a fresh file.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::KeyValueStore;
use crate::error::StorageResult;

/// SQLite-file-backed [`KeyValueStore`]
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database file (creating it if missing) and ensure the schema
    pub async fn open(path: &str, max_connections: u32) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite://{path}"))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        info!("Storage ready: path={}, max_connections={}", path, max_connections);
        Ok(store)
    }

    /// Open a private in-memory database
    ///
    /// A `sqlite::memory:` database exists per connection, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn open_in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as(r#"SELECT value FROM kv_entries WHERE key = ?"#)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        sqlx::query(r#"DELETE FROM kv_entries WHERE key = ?"#)
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
