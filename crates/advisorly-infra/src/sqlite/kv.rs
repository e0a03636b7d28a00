//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `advisorly-core` using sqlx with split
//! read/write pools. Values are stored as raw TEXT; callers serialize
//! structured data themselves (the turn log is a JSON array, the session
//! id a plain string).

use chrono::Utc;
use sqlx::Row;

use advisorly_core::storage::kv_store::KvStore;
use advisorly_types::error::StoreError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KvStore`.
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    /// Create a new KV store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value: String = row
                    .try_get("value")
                    .map_err(|e| StoreError::Query(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let store = SqliteKvStore::new(test_pool().await);

        store.set("chat.session", "sess-abc123").await.unwrap();

        let got = store.get("chat.session").await.unwrap();
        assert_eq!(got.as_deref(), Some("sess-abc123"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let store = SqliteKvStore::new(test_pool().await);
        let got = store.get("missing").await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let store = SqliteKvStore::new(test_pool().await);

        store.set("chat.turns", "[]").await.unwrap();
        store.set("chat.turns", r#"[{"role":"user"}]"#).await.unwrap();

        let got = store.get("chat.turns").await.unwrap();
        assert_eq!(got.as_deref(), Some(r#"[{"role":"user"}]"#));
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SqliteKvStore::new(test_pool().await);

        store.set("chat.session", "sess-1").await.unwrap();
        store.remove("chat.session").await.unwrap();

        assert!(store.get("chat.session").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_nonexistent_is_noop() {
        let store = SqliteKvStore::new(test_pool().await);
        // Should not error
        store.remove("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = SqliteKvStore::new(test_pool().await);

        store.set("chat.session", "sess-1").await.unwrap();
        store.set("chat.turns", "[]").await.unwrap();
        store.remove("chat.session").await.unwrap();

        assert!(store.get("chat.session").await.unwrap().is_none());
        assert_eq!(store.get("chat.turns").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_value_preserves_unicode_and_newlines() {
        let store = SqliteKvStore::new(test_pool().await);

        let value = "line one\nline two: ünïcode";
        store.set("chat.turns", value).await.unwrap();
        assert_eq!(store.get("chat.turns").await.unwrap().as_deref(), Some(value));
    }
}
