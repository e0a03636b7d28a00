//! Append-only message log with write-behind persistence.
//!
//! The in-memory sequence is the source of truth for all reads; the
//! persisted copy is a best-effort mirror written after every append and
//! consulted only once, at [`MessageLog::load`]. A store failure never
//! blocks or reorders the in-memory log.

use tokio::sync::RwLock;
use tracing::warn;

use advisorly_types::chat::Turn;

use crate::storage::kv_store::{KvStore, TURNS_KEY};

/// Ordered, append-only record of conversation turns.
///
/// Interior mutability lets the orchestrator expose `&self` methods while
/// appends stay strictly ordered by call sequence: the write lock is held
/// across the mirror write, so no two mirrors interleave.
pub struct MessageLog<S> {
    store: S,
    turns: RwLock<Vec<Turn>>,
}

impl<S: KvStore> MessageLog<S> {
    /// Create an empty log backed by the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            turns: RwLock::new(Vec::new()),
        }
    }

    /// Replace the in-memory sequence with the persisted one.
    ///
    /// Absent or malformed persisted data yields an empty log, not an error.
    pub async fn load(&self) {
        let restored = match self.store.get(TURNS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Turn>>(&raw) {
                Ok(turns) => turns,
                Err(err) => {
                    warn!(error = %err, "persisted turn log is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read persisted turn log, starting empty");
                Vec::new()
            }
        };

        *self.turns.write().await = restored;
    }

    /// Append a turn to the tail and mirror the full sequence.
    ///
    /// The mirror is best-effort: a store failure is logged and the
    /// in-memory append stands.
    pub async fn append(&self, turn: Turn) {
        let turns = {
            let mut turns = self.turns.write().await;
            turns.push(turn);
            self.mirror(&turns).await;
            turns.len()
        };
        tracing::debug!(turns, "turn appended");
    }

    /// Empty the in-memory sequence and remove the persisted copy.
    pub async fn clear(&self) {
        let mut turns = self.turns.write().await;
        turns.clear();
        if let Err(err) = self.store.remove(TURNS_KEY).await {
            warn!(error = %err, "failed to remove persisted turn log");
        }
    }

    /// Snapshot of the ordered sequence.
    pub async fn turns(&self) -> Vec<Turn> {
        self.turns.read().await.clone()
    }

    /// Number of turns in the log.
    pub async fn len(&self) -> usize {
        self.turns.read().await.len()
    }

    /// Whether the log holds no turns.
    pub async fn is_empty(&self) -> bool {
        self.turns.read().await.is_empty()
    }

    async fn mirror(&self, turns: &[Turn]) {
        let serialized = match serde_json::to_string(turns) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(error = %err, "failed to serialize turn log for mirroring");
                return;
            }
        };
        if let Err(err) = self.store.set(TURNS_KEY, &serialized).await {
            warn!(error = %err, "failed to mirror turn log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingKvStore, MemoryKvStore};

    #[tokio::test]
    async fn test_append_mirrors_to_store() {
        let store = MemoryKvStore::new();
        let log = MessageLog::new(store.clone());

        log.append(Turn::user("hello")).await;

        let raw = store.get(TURNS_KEY).await.unwrap().unwrap();
        let mirrored: Vec<Turn> = serde_json::from_str(&raw).unwrap();
        assert_eq!(mirrored.len(), 1);
        assert_eq!(mirrored[0].content, "hello");
    }

    #[tokio::test]
    async fn test_load_roundtrip_is_field_for_field() {
        let store = MemoryKvStore::new();
        let log = MessageLog::new(store.clone());
        log.append(Turn::user("show balances")).await;
        log.append(Turn::assistant("Here you go.", None)).await;
        let before = log.turns().await;

        // A fresh log over the same store simulates an external reload.
        let reloaded = MessageLog::new(store);
        reloaded.load().await;
        assert_eq!(reloaded.turns().await, before);
    }

    #[tokio::test]
    async fn test_load_with_malformed_data_yields_empty() {
        let store = MemoryKvStore::new();
        store.set(TURNS_KEY, "not json").await.unwrap();

        let log = MessageLog::new(store);
        log.load().await;
        assert!(log.is_empty().await);
    }

    #[tokio::test]
    async fn test_load_with_absent_data_yields_empty() {
        let log = MessageLog::new(MemoryKvStore::new());
        log.load().await;
        assert!(log.is_empty().await);
    }

    #[tokio::test]
    async fn test_load_replaces_in_memory_state() {
        let store = MemoryKvStore::new();
        let log = MessageLog::new(store.clone());
        log.append(Turn::user("persisted")).await;

        let other = MessageLog::new(store);
        other.append(Turn::user("stale")).await;
        other.load().await;

        let turns = other.turns().await;
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "persisted");
    }

    #[tokio::test]
    async fn test_clear_empties_memory_and_store() {
        let store = MemoryKvStore::new();
        let log = MessageLog::new(store.clone());
        log.append(Turn::user("hello")).await;

        log.clear().await;

        assert!(log.is_empty().await);
        assert!(store.get(TURNS_KEY).await.unwrap().is_none());

        let reloaded = MessageLog::new(store);
        reloaded.load().await;
        assert!(reloaded.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_failure_does_not_block_append() {
        let log = MessageLog::new(FailingKvStore);
        log.append(Turn::user("hello")).await;
        log.append(Turn::assistant("hi", None)).await;

        // In-memory state stays authoritative.
        assert_eq!(log.len().await, 2);
    }

    #[tokio::test]
    async fn test_appends_keep_insertion_order() {
        let log = MessageLog::new(MemoryKvStore::new());
        for i in 0..5 {
            log.append(Turn::user(format!("turn {i}"))).await;
        }
        let turns = log.turns().await;
        let contents: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["turn 0", "turn 1", "turn 2", "turn 3", "turn 4"]);
    }
}
