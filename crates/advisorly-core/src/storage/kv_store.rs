//! Key-value store trait.
//!
//! Defines the interface for durable local key-value storage. Values are
//! plain strings; callers serialize structured data themselves. Store
//! failures are reported, never swallowed here -- callers decide whether
//! persistence failure is fatal (for the conversation components it is not;
//! in-memory state stays authoritative).
//!
//! Uses RPITIT (native async fn in traits, Rust 2024 edition).
//! Implementations live in advisorly-infra.

use advisorly_types::error::StoreError;

/// Persisted key for the session id (owned by the session manager).
pub const SESSION_KEY: &str = "chat.session";

/// Persisted key for the serialized turn log (owned by the message log).
pub const TURNS_KEY: &str = "chat.turns";

/// Trait for durable key-value persistent storage.
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Remove a key. No-op if the key does not exist.
    fn remove(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
