//! Storage abstractions for Advisorly.
//!
//! Defines the key-value store trait used for durable local persistence.
//! Implementations live in advisorly-infra.

pub mod kv_store;
