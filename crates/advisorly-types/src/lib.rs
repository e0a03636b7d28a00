//! Shared domain types for Advisorly.
//!
//! This crate contains the core domain types used across the Advisorly client:
//! conversation turns, sessions, chart descriptors, customer records, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chart;
pub mod chat;
pub mod config;
pub mod customer;
pub mod error;
