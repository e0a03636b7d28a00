//! Conversation session and turn types for Advisorly.
//!
//! These types model the client-side view of a conversation with the
//! remote advisory assistant: the acquired session identity and the
//! ordered sequence of turns exchanged within it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::chart::ChartDescriptor;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// A single turn in the conversation.
///
/// Turns are immutable once appended to the log; insertion order is
/// conversation order. Assistant turns may carry a chart descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartDescriptor>,
}

impl Turn {
    /// Create a user turn stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            chart_data: None,
        }
    }

    /// Create an assistant turn stamped with the current time.
    pub fn assistant(content: impl Into<String>, chart_data: Option<ChartDescriptor>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            chart_data,
        }
    }
}

/// A server-acknowledged conversation identity scoping message exchange
/// with one advisor.
///
/// Created once per conversation and immutable thereafter. Only the id is
/// persisted; `created_at` records when this process acquired (or adopted
/// a previously persisted) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub advisor_id: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a session record for the given ids, stamped now.
    pub fn new(id: impl Into<String>, advisor_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            advisor_id: advisor_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// Successful reply from the remote send-message operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    pub response: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::User, TurnRole::Assistant] {
            let s = role.to_string();
            let parsed: TurnRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_turn_role_serde() {
        let json = serde_json::to_string(&TurnRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: TurnRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TurnRole::Assistant);
    }

    #[test]
    fn test_turn_role_rejects_unknown() {
        assert!("system".parse::<TurnRole>().is_err());
    }

    #[test]
    fn test_turn_serde_roundtrip() {
        let turn = Turn::user("What is my client's balance?");
        let json = serde_json::to_string(&turn).unwrap();
        let parsed: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, turn);
        // chart_data is omitted from the wire form when absent
        assert!(!json.contains("chart_data"));
    }

    #[test]
    fn test_turn_deserializes_without_chart_data() {
        let json = r#"{"role":"assistant","content":"Hi","timestamp":"2024-06-01T10:00:00Z"}"#;
        let turn: Turn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.role, TurnRole::Assistant);
        assert!(turn.chart_data.is_none());
    }

    #[test]
    fn test_session_new() {
        let session = Session::new("sess-1", "advisor-1");
        assert_eq!(session.id, "sess-1");
        assert_eq!(session.advisor_id, "advisor-1");
        assert!(session.created_at <= Utc::now());
    }
}
