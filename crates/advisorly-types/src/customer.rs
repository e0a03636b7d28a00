//! Customer directory types for Advisorly.
//!
//! Read-through views of the backend's customer records. The client never
//! mutates these; they are fetched per request with no caching invariants.

use serde::{Deserialize, Serialize};

/// A customer as returned by the directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub account_status: String,
}

/// A financial account held by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub account_number: String,
    /// Backend free text: checking, savings, investment, retirement.
    pub account_type: String,
    pub balance: f64,
}

/// Detailed customer view including accounts and aggregate balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetail {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub account_status: String,
    pub accounts: Vec<Account>,
    pub total_balance: f64,
}
