//! HTTP client for the advisory backend.
//!
//! This module provides the [`AdvisorHttpClient`] which implements the
//! [`AdvisorApi`](advisorly_core::api::AdvisorApi) trait against the
//! backend's REST routes.

pub mod client;
pub mod types;

pub use client::AdvisorHttpClient;
