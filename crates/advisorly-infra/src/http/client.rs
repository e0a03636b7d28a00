//! AdvisorHttpClient -- concrete [`AdvisorApi`] implementation over reqwest.
//!
//! Sends JSON requests to the advisory backend's REST routes. No retry or
//! backoff lives here: every operation resolves exactly once, and callers
//! own the recovery policy.

use std::time::Duration;

use advisorly_core::api::AdvisorApi;
use advisorly_types::chart::{ChartDescriptor, ChartRequest};
use advisorly_types::chat::{AssistantReply, Turn};
use advisorly_types::customer::{CustomerDetail, CustomerSummary};
use advisorly_types::error::ApiError;

use super::types::{
    ChatHistoryResponse, ChatMessageRequest, ChatMessageResponse, CreateSessionRequest,
    CreateSessionResponse,
};

/// HTTP client for the advisory backend.
pub struct AdvisorHttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl AdvisorHttpClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Override the base URL (useful for tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response into an [`ApiError`].
    async fn error_for(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::NOT_FOUND {
            ApiError::NotFound
        } else {
            ApiError::Http {
                status: status.as_u16(),
                body,
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

impl AdvisorApi for AdvisorHttpClient {
    async fn create_session(&self, advisor_id: &str) -> Result<String, ApiError> {
        let body = CreateSessionRequest {
            advisor_id: advisor_id.to_string(),
        };
        let response: CreateSessionResponse =
            self.post_json("/api/v1/chat/session", &body).await?;
        Ok(response.session_id)
    }

    async fn send_message(
        &self,
        message: &str,
        advisor_id: &str,
        session_id: &str,
    ) -> Result<AssistantReply, ApiError> {
        let body = ChatMessageRequest {
            message: message.to_string(),
            advisor_id: advisor_id.to_string(),
            session_id: session_id.to_string(),
        };
        let response: ChatMessageResponse = self.post_json("/api/v1/chat/message", &body).await?;
        Ok(AssistantReply {
            response: response.response,
            session_id: response.session_id,
            chart_data: response.chart_data,
        })
    }

    async fn chat_history(
        &self,
        session_id: &str,
        advisor_id: &str,
    ) -> Result<Vec<Turn>, ApiError> {
        let path = format!("/api/v1/chat/history/{session_id}");
        let response: ChatHistoryResponse =
            self.get_json(&path, &[("advisor_id", advisor_id)]).await?;

        response
            .messages
            .into_iter()
            .map(|message| message.into_turn())
            .collect()
    }

    async fn generate_chart(&self, request: &ChartRequest) -> Result<ChartDescriptor, ApiError> {
        self.post_json("/api/v1/charts/generate", request).await
    }

    async fn list_customers(&self, advisor_id: &str) -> Result<Vec<CustomerSummary>, ApiError> {
        self.get_json("/api/v1/customers", &[("advisor_id", advisor_id)])
            .await
    }

    async fn get_customer(
        &self,
        customer_id: i64,
        advisor_id: &str,
    ) -> Result<CustomerDetail, ApiError> {
        let path = format!("/api/v1/customers/{customer_id}");
        self.get_json(&path, &[("advisor_id", advisor_id)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> AdvisorHttpClient {
        AdvisorHttpClient::new("http://localhost:8000", Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = make_client();
        assert_eq!(
            client.url("/api/v1/chat/message"),
            "http://localhost:8000/api/v1/chat/message"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client =
            AdvisorHttpClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.url("/api/v1/customers"),
            "http://localhost:8000/api/v1/customers"
        );
    }

    #[test]
    fn test_base_url_override() {
        let client = make_client().with_base_url("http://127.0.0.1:9999");
        assert_eq!(
            client.url("/api/v1/chat/session"),
            "http://127.0.0.1:9999/api/v1/chat/session"
        );
    }
}
