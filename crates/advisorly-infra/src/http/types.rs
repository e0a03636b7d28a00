//! Advisory backend wire types.
//!
//! These are the backend-specific request/response structures used for HTTP
//! communication. They are NOT the domain types from advisorly-types --
//! those stay transport-agnostic; conversion happens at this boundary.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use advisorly_types::chart::ChartDescriptor;
use advisorly_types::chat::{Turn, TurnRole};
use advisorly_types::error::ApiError;

/// Request body for POST `/api/v1/chat/session`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest {
    pub advisor_id: String,
}

/// Response body for POST `/api/v1/chat/session`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    #[allow(dead_code)]
    pub advisor_id: String,
}

/// Request body for POST `/api/v1/chat/message`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageRequest {
    pub message: String,
    pub advisor_id: String,
    pub session_id: String,
}

/// Response body for POST `/api/v1/chat/message`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageResponse {
    pub response: String,
    pub session_id: String,
    #[serde(default)]
    pub chart_data: Option<ChartDescriptor>,
}

/// Response body for GET `/api/v1/chat/history/{session_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatHistoryResponse {
    #[allow(dead_code)]
    pub session_id: String,
    pub messages: Vec<HistoryMessage>,
}

/// One message record within a history response.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryMessage {
    #[allow(dead_code)]
    pub id: i64,
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub chart_data: Option<ChartDescriptor>,
    pub timestamp: String,
}

impl HistoryMessage {
    /// Convert a history record into a domain turn.
    ///
    /// The backend emits naive-UTC isoformat timestamps; RFC 3339 is tried
    /// first for forward compatibility.
    pub fn into_turn(self) -> Result<Turn, ApiError> {
        let role: TurnRole = self
            .role
            .parse()
            .map_err(|e: String| ApiError::Deserialization(e))?;
        let timestamp = parse_backend_timestamp(&self.timestamp)?;

        Ok(Turn {
            role,
            content: self.content,
            timestamp,
            chart_data: self.chart_data,
        })
    }
}

/// Parse a backend timestamp: RFC 3339, or naive isoformat treated as UTC.
fn parse_backend_timestamp(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| ApiError::Deserialization(format!("invalid timestamp '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_request_serialization() {
        let req = ChatMessageRequest {
            message: "Show me account balances".to_string(),
            advisor_id: "advisor-1".to_string(),
            session_id: "sess-1".to_string(),
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["message"], "Show me account balances");
        assert_eq!(json["advisor_id"], "advisor-1");
        assert_eq!(json["session_id"], "sess-1");
    }

    #[test]
    fn test_chat_message_response_without_chart() {
        let json = r#"{"response": "Done.", "session_id": "sess-1"}"#;
        let resp: ChatMessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.response, "Done.");
        assert!(resp.chart_data.is_none());
    }

    #[test]
    fn test_chat_message_response_with_chart() {
        let json = r#"{
            "response": "Here is the breakdown.",
            "session_id": "sess-1",
            "chart_data": {
                "chartType": "pie",
                "data": {"labels": ["Stocks", "Bonds"], "datasets": []},
                "options": {"responsive": true}
            }
        }"#;
        let resp: ChatMessageResponse = serde_json::from_str(json).unwrap();
        let chart = resp.chart_data.unwrap();
        assert_eq!(chart.chart_type.as_deref(), Some("pie"));
        assert_eq!(chart.data["labels"][0], "Stocks");
    }

    #[test]
    fn test_history_message_into_turn() {
        let json = r#"{
            "id": 4,
            "role": "assistant",
            "content": "Hello",
            "chart_data": null,
            "timestamp": "2024-06-01T10:15:30.123456"
        }"#;
        let msg: HistoryMessage = serde_json::from_str(json).unwrap();
        let turn = msg.into_turn().unwrap();
        assert_eq!(turn.role, TurnRole::Assistant);
        assert_eq!(turn.timestamp.to_rfc3339(), "2024-06-01T10:15:30.123456+00:00");
    }

    #[test]
    fn test_history_message_rfc3339_timestamp() {
        let msg = HistoryMessage {
            id: 1,
            role: "user".to_string(),
            content: "hi".to_string(),
            chart_data: None,
            timestamp: "2024-06-01T10:15:30Z".to_string(),
        };
        let turn = msg.into_turn().unwrap();
        assert_eq!(turn.timestamp.to_rfc3339(), "2024-06-01T10:15:30+00:00");
    }

    #[test]
    fn test_history_message_bad_role_is_error() {
        let msg = HistoryMessage {
            id: 1,
            role: "system".to_string(),
            content: "hi".to_string(),
            chart_data: None,
            timestamp: "2024-06-01T10:15:30Z".to_string(),
        };
        assert!(matches!(
            msg.into_turn().unwrap_err(),
            ApiError::Deserialization(_)
        ));
    }

    #[test]
    fn test_bad_timestamp_is_error() {
        assert!(parse_backend_timestamp("yesterday").is_err());
    }
}
