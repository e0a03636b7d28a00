//! AdvisorApi trait definition.
//!
//! The remote collaborator contract: session creation, message exchange,
//! history retrieval, chart generation, and the customer directory.
//! Retry, backoff, and auth are the transport's concern, not this trait's --
//! every operation resolves exactly once with success or failure.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//! Implementations live in advisorly-infra (e.g., `AdvisorHttpClient`).

use advisorly_types::chart::{ChartDescriptor, ChartRequest};
use advisorly_types::chat::{AssistantReply, Turn};
use advisorly_types::customer::{CustomerDetail, CustomerSummary};
use advisorly_types::error::ApiError;

/// Remote operations consumed by the client.
pub trait AdvisorApi: Send + Sync {
    /// Create a new conversation session for an advisor.
    ///
    /// Returns the server-issued session id.
    fn create_session(
        &self,
        advisor_id: &str,
    ) -> impl std::future::Future<Output = Result<String, ApiError>> + Send;

    /// Send one user message within a session and receive the assistant's
    /// reply, which may carry a chart descriptor.
    fn send_message(
        &self,
        message: &str,
        advisor_id: &str,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<AssistantReply, ApiError>> + Send;

    /// Fetch the server-side history of a session, ordered oldest first.
    fn chat_history(
        &self,
        session_id: &str,
        advisor_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, ApiError>> + Send;

    /// Generate a chart descriptor from a data type, filters, and chart type.
    fn generate_chart(
        &self,
        request: &ChartRequest,
    ) -> impl std::future::Future<Output = Result<ChartDescriptor, ApiError>> + Send;

    /// List all customers assigned to an advisor.
    fn list_customers(
        &self,
        advisor_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<CustomerSummary>, ApiError>> + Send;

    /// Fetch one customer's detail, including accounts and total balance.
    fn get_customer(
        &self,
        customer_id: i64,
        advisor_id: &str,
    ) -> impl std::future::Future<Output = Result<CustomerDetail, ApiError>> + Send;
}
