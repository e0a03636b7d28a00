//! Infrastructure layer for Advisorly.
//!
//! Contains implementations of the traits defined in `advisorly-core`:
//! SQLite-backed key-value storage and the HTTP client for the advisory
//! backend, plus configuration loading and data-directory resolution.

pub mod config;
pub mod http;
pub mod sqlite;
