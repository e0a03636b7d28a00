use thiserror::Error;

/// Errors from the remote advisory API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("not found")]
    NotFound,

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from the persistent key-value store (used by trait definitions
/// in advisorly-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage connection error")]
    Connection,

    #[error("storage query error: {0}")]
    Query(String),
}

/// Errors from session acquisition and lifecycle.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session acquisition failed: {0}")]
    AcquisitionFailed(String),
}

/// Rejections from `send_user_message`.
///
/// These are precondition failures: no turn is appended and no remote call
/// is made. A remote send that fails after being accepted is not an error
/// here -- it is recovered by synthesizing a visible error turn.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("another send is already in flight")]
    SendInFlight,

    #[error("no active session")]
    SessionNotActive,
}

/// Errors from chart dispatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    /// Carries the original, non-normalized chart type string for display.
    #[error("unsupported chart type: {0}")]
    UnsupportedType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Http {
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: internal error");
    }

    #[test]
    fn test_chart_error_preserves_original_type() {
        let err = ChartError::UnsupportedType("Scatter".to_string());
        assert_eq!(err.to_string(), "unsupported chart type: Scatter");
    }

    #[test]
    fn test_send_error_display() {
        assert_eq!(
            SendError::SendInFlight.to_string(),
            "another send is already in flight"
        );
    }
}
