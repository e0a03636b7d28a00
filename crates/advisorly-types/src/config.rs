//! Client configuration types for Advisorly.
//!
//! `ClientConfig` represents the top-level `config.toml` that names the
//! advisory backend and the advisor identity used for all requests.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Advisorly client.
///
/// Loaded from `~/.advisorly/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the advisory backend.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Advisor identity sent with every request.
    #[serde(default = "default_advisor_id")]
    pub advisor_id: String,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_advisor_id() -> String {
    "advisor-1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            advisor_id: default_advisor_id(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.advisor_id, "advisor-1");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ClientConfig = toml::from_str(r#"advisor_id = "advisor-42""#).unwrap();
        assert_eq!(config.advisor_id, "advisor-42");
        assert_eq!(config.server_url, "http://localhost:8000");
    }

    #[test]
    fn test_full_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
server_url = "https://advisory.internal"
advisor_id = "advisor-9"
request_timeout_secs = 10
"#,
        )
        .unwrap();
        assert_eq!(config.server_url, "https://advisory.internal");
        assert_eq!(config.request_timeout_secs, 10);
    }
}
