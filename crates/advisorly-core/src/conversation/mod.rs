//! The conversation state machine.
//!
//! Three components with distinct ownership: the message log (ordered turns
//! plus write-behind persistence), the session manager (acquisition
//! lifecycle), and the orchestrator that composes them with the remote
//! send operation.

mod log;
mod orchestrator;
mod session;

pub use log::MessageLog;
pub use orchestrator::{ConversationOrchestrator, SEND_FAILURE_MESSAGE};
pub use session::{SessionManager, SessionState};
