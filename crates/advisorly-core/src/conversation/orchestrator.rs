//! Top-level conversation coordinator.
//!
//! Composes the session manager, the message log, and the remote send
//! operation. Sends are fully serialized: an explicit single-flight guard
//! rejects a second call while one is pending, and every accepted send
//! commits exactly two turns -- the user turn unconditionally, then one
//! follow-up turn (the assistant's reply, or a synthesized error turn when
//! the remote call fails).

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use advisorly_types::chat::Turn;
use advisorly_types::error::{SendError, SessionError};

use crate::api::AdvisorApi;
use crate::conversation::{MessageLog, SessionManager};
use crate::storage::kv_store::KvStore;

/// Content of the synthesized assistant turn when a send fails.
pub const SEND_FAILURE_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Coordinates one conversation: session identity, turn log, remote sends.
pub struct ConversationOrchestrator<A, S> {
    api: A,
    session: SessionManager<S>,
    log: MessageLog<S>,
    in_flight: AtomicBool,
}

impl<A: AdvisorApi, S: KvStore> ConversationOrchestrator<A, S> {
    /// Compose an orchestrator from its parts.
    pub fn new(api: A, session: SessionManager<S>, log: MessageLog<S>) -> Self {
        Self {
            api,
            session,
            log,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Initialize: restore the persisted log, then ensure a session exists.
    ///
    /// Safe to call repeatedly; an already-active session performs zero
    /// remote calls, and a previously failed acquisition is retried.
    pub async fn init(&self) -> Result<(), SessionError> {
        self.log.load().await;
        self.session.ensure(&self.api).await
    }

    /// Send one user message and return the follow-up turn.
    ///
    /// Preconditions (checked in order, each a no-op rejection):
    /// trimmed text is non-empty, the session is `Active`, and no other
    /// send is in flight. Once accepted, the user turn is committed
    /// unconditionally and exactly one follow-up turn is committed after
    /// the remote call resolves -- the assistant reply on success, a fixed
    /// error turn on failure. The guard is released on both paths.
    pub async fn send_user_message(&self, text: &str) -> Result<Turn, SendError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SendError::EmptyMessage);
        }

        let Some(session) = self.session.session().await else {
            return Err(SendError::SessionNotActive);
        };

        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SendError::SendInFlight);
        }

        self.log.append(Turn::user(text)).await;

        let follow_up = match self
            .api
            .send_message(text, &session.advisor_id, &session.id)
            .await
        {
            Ok(reply) => Turn::assistant(reply.response, reply.chart_data),
            Err(err) => {
                warn!(error = %err, "send-message call failed");
                Turn::assistant(SEND_FAILURE_MESSAGE, None)
            }
        };
        self.log.append(follow_up.clone()).await;

        self.in_flight.store(false, Ordering::SeqCst);
        Ok(follow_up)
    }

    /// Load persisted conversation state without acquiring a session.
    ///
    /// For read-only surfaces (history, status) that must not trigger a
    /// remote create-session call.
    pub async fn restore(&self) {
        self.log.load().await;
        let _ = self.session.restore().await;
    }

    /// Whether a send is currently pending.
    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Snapshot of the conversation's ordered turns.
    pub async fn turns(&self) -> Vec<Turn> {
        self.log.turns().await
    }

    /// Empty the turn log and its persisted copy; the session is kept.
    pub async fn clear_conversation(&self) {
        self.log.clear().await;
    }

    /// User-initiated reset: clear the conversation and drop the session
    /// so the next `init` acquires a fresh one.
    pub async fn reset(&self) {
        self.log.clear().await;
        self.session.reset().await;
    }

    /// The session manager owned by this conversation.
    pub fn session_manager(&self) -> &SessionManager<S> {
        &self.session
    }

    /// The remote collaborator, for read-through operations (history,
    /// customers, chart generation) that bypass the conversation log.
    pub fn api(&self) -> &A {
        &self.api
    }
}
