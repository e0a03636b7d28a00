//! Session acquisition and lifecycle.
//!
//! A session is acquired at most once per process: restored from the
//! persisted id when one exists (zero remote calls), created remotely
//! otherwise. Acquisition is single-flight; a failed attempt is retried
//! only by the next `ensure` call. `Active` is terminal until a
//! user-initiated reset.

use tokio::sync::RwLock;
use tracing::{info, warn};

use advisorly_types::chat::Session;
use advisorly_types::error::SessionError;

use crate::api::AdvisorApi;
use crate::storage::kv_store::{KvStore, SESSION_KEY};

/// Lifecycle state of the session manager.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Acquiring,
    Active(Session),
    AcquisitionFailed,
}

/// Owns the conversation's session identity.
pub struct SessionManager<S> {
    store: S,
    advisor_id: String,
    state: RwLock<SessionState>,
}

impl<S: KvStore> SessionManager<S> {
    /// Create an uninitialized manager for the given advisor.
    pub fn new(store: S, advisor_id: impl Into<String>) -> Self {
        Self {
            store,
            advisor_id: advisor_id.into(),
            state: RwLock::new(SessionState::Uninitialized),
        }
    }

    /// The advisor identity this manager acquires sessions for.
    pub fn advisor_id(&self) -> &str {
        &self.advisor_id
    }

    /// Ensure a session exists, acquiring one if necessary.
    ///
    /// - `Active`: returns immediately with no remote call.
    /// - `Acquiring`: a concurrent attempt is in flight; this call is a no-op.
    /// - Otherwise: restore the persisted id if present, else call the remote
    ///   create-session operation, persisting the returned id (best-effort).
    ///
    /// On remote failure the state becomes `AcquisitionFailed` and the error
    /// is surfaced; the next `ensure` call retries.
    pub async fn ensure<A: AdvisorApi>(&self, api: &A) -> Result<(), SessionError> {
        {
            let mut state = self.state.write().await;
            match &*state {
                SessionState::Active(_) | SessionState::Acquiring => return Ok(()),
                SessionState::Uninitialized | SessionState::AcquisitionFailed => {}
            }

            if self.restore_locked(&mut state).await.is_some() {
                return Ok(());
            }

            *state = SessionState::Acquiring;
        }

        match api.create_session(&self.advisor_id).await {
            Ok(id) => {
                if let Err(err) = self.store.set(SESSION_KEY, &id).await {
                    warn!(error = %err, "failed to persist session id");
                }
                info!(session_id = %id, "session acquired");
                *self.state.write().await =
                    SessionState::Active(Session::new(id, &self.advisor_id));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "session acquisition failed");
                *self.state.write().await = SessionState::AcquisitionFailed;
                Err(SessionError::AcquisitionFailed(err.to_string()))
            }
        }
    }

    /// Restore the persisted session without any remote call.
    ///
    /// Returns the session when one is already active or a persisted id
    /// exists; `None` otherwise (including while an acquisition is in
    /// flight). Used by read-only commands that must not trigger
    /// acquisition.
    pub async fn restore(&self) -> Option<Session> {
        let mut state = self.state.write().await;
        match &*state {
            SessionState::Active(session) => Some(session.clone()),
            SessionState::Acquiring => None,
            SessionState::Uninitialized | SessionState::AcquisitionFailed => {
                self.restore_locked(&mut state).await
            }
        }
    }

    /// Restore from the persisted id while holding the state lock.
    async fn restore_locked(&self, state: &mut SessionState) -> Option<Session> {
        match self.store.get(SESSION_KEY).await {
            Ok(Some(id)) => {
                info!(session_id = %id, "restored persisted session");
                let session = Session::new(id, &self.advisor_id);
                *state = SessionState::Active(session.clone());
                Some(session)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "failed to read persisted session id");
                None
            }
        }
    }

    /// The active session, if one has been acquired.
    pub async fn session(&self) -> Option<Session> {
        match &*self.state.read().await {
            SessionState::Active(session) => Some(session.clone()),
            _ => None,
        }
    }

    /// Whether the manager is `Active`.
    pub async fn is_active(&self) -> bool {
        matches!(&*self.state.read().await, SessionState::Active(_))
    }

    /// Snapshot of the current lifecycle state.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// User-initiated reset: remove the persisted id and return to
    /// `Uninitialized` so the next `ensure` acquires a fresh session.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        if let Err(err) = self.store.remove(SESSION_KEY).await {
            warn!(error = %err, "failed to remove persisted session id");
        }
        *state = SessionState::Uninitialized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryKvStore, StubApi};

    #[tokio::test]
    async fn test_restores_persisted_session_without_remote_call() {
        let store = MemoryKvStore::new();
        store.set(SESSION_KEY, "sess-persisted").await.unwrap();
        let api = StubApi::new();

        let manager = SessionManager::new(store, "advisor-1");
        manager.ensure(&api).await.unwrap();

        let session = manager.session().await.unwrap();
        assert_eq!(session.id, "sess-persisted");
        assert_eq!(session.advisor_id, "advisor-1");
        assert_eq!(api.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_acquires_and_persists_when_nothing_stored() {
        let store = MemoryKvStore::new();
        let api = StubApi::new();

        let manager = SessionManager::new(store.clone(), "advisor-1");
        manager.ensure(&api).await.unwrap();

        assert_eq!(api.create_calls(), 1);
        let session = manager.session().await.unwrap();
        assert_eq!(store.get(SESSION_KEY).await.unwrap().as_deref(), Some(session.id.as_str()));
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent_once_active() {
        let api = StubApi::new();
        let manager = SessionManager::new(MemoryKvStore::new(), "advisor-1");

        manager.ensure(&api).await.unwrap();
        manager.ensure(&api).await.unwrap();

        // Zero additional remote calls while already Active.
        assert_eq!(api.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_then_retry_succeeds() {
        let api = StubApi::new().failing_create();
        let manager = SessionManager::new(MemoryKvStore::new(), "advisor-1");

        let err = manager.ensure(&api).await.unwrap_err();
        assert!(matches!(err, SessionError::AcquisitionFailed(_)));
        assert_eq!(manager.state().await, SessionState::AcquisitionFailed);
        assert!(!manager.is_active().await);

        // No automatic retry happened; the next ensure attempts again.
        api.set_create_failure(false);
        manager.ensure(&api).await.unwrap();
        assert!(manager.is_active().await);
        assert_eq!(api.create_calls(), 2);
    }

    #[tokio::test]
    async fn test_restore_never_calls_remote() {
        let api = StubApi::new();
        let manager = SessionManager::new(MemoryKvStore::new(), "advisor-1");

        assert!(manager.restore().await.is_none());
        assert_eq!(api.create_calls(), 0);

        let store = MemoryKvStore::new();
        store.set(SESSION_KEY, "sess-stored").await.unwrap();
        let manager = SessionManager::new(store, "advisor-1");
        let session = manager.restore().await.unwrap();
        assert_eq!(session.id, "sess-stored");
        assert!(manager.is_active().await);
        assert_eq!(api.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_reset_clears_persisted_id() {
        let store = MemoryKvStore::new();
        let api = StubApi::new();
        let manager = SessionManager::new(store.clone(), "advisor-1");
        manager.ensure(&api).await.unwrap();

        manager.reset().await;

        assert_eq!(manager.state().await, SessionState::Uninitialized);
        assert!(store.get(SESSION_KEY).await.unwrap().is_none());

        // A fresh ensure acquires a new session remotely.
        manager.ensure(&api).await.unwrap();
        assert_eq!(api.create_calls(), 2);
    }
}
