//! Shared fakes for core tests: an in-memory key-value store, a store that
//! always fails, and a scriptable stub of the remote advisory API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use advisorly_types::chart::{ChartDescriptor, ChartRequest};
use advisorly_types::chat::{AssistantReply, Turn};
use advisorly_types::customer::{CustomerDetail, CustomerSummary};
use advisorly_types::error::{ApiError, StoreError};

use crate::api::AdvisorApi;
use crate::storage::kv_store::KvStore;

/// In-memory KvStore; clones share the same map, mimicking two components
/// holding handles onto one store.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A store where every operation fails, for persistence-failure paths.
#[derive(Clone, Copy)]
pub struct FailingKvStore;

impl KvStore for FailingKvStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Query("injected read failure".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Query("injected write failure".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Query("injected remove failure".to_string()))
    }
}

/// Scriptable stub of the remote advisory API.
///
/// Counts calls, can be told to fail session creation or sends, and can
/// gate sends on a semaphore so tests control when the remote call resolves.
pub struct StubApi {
    create_calls: AtomicUsize,
    send_calls: AtomicUsize,
    fail_create: AtomicBool,
    fail_send: AtomicBool,
    reply: String,
    chart: Option<ChartDescriptor>,
    send_gate: Option<Arc<Semaphore>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self {
            create_calls: AtomicUsize::new(0),
            send_calls: AtomicUsize::new(0),
            fail_create: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
            reply: "Acknowledged.".to_string(),
            chart: None,
            send_gate: None,
        }
    }

    pub fn failing_create(self) -> Self {
        self.fail_create.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_send(self) -> Self {
        self.fail_send.store(true, Ordering::SeqCst);
        self
    }

    pub fn replying_with(mut self, reply: &str) -> Self {
        self.reply = reply.to_string();
        self
    }

    pub fn replying_with_chart(mut self, reply: &str, chart: ChartDescriptor) -> Self {
        self.reply = reply.to_string();
        self.chart = Some(chart);
        self
    }

    /// Block each send on the semaphore until the test adds a permit.
    pub fn gated_send(mut self, gate: Arc<Semaphore>) -> Self {
        self.send_gate = Some(gate);
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn set_create_failure(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_send_failure(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }
}

impl AdvisorApi for StubApi {
    async fn create_session(&self, _advisor_id: &str) -> Result<String, ApiError> {
        let call = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ApiError::Http {
                status: 500,
                body: "create failed".to_string(),
            });
        }
        Ok(format!("sess-{call}"))
    }

    async fn send_message(
        &self,
        _message: &str,
        _advisor_id: &str,
        session_id: &str,
    ) -> Result<AssistantReply, ApiError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.send_gate {
            let permit = gate.acquire().await.map_err(|_| ApiError::Transport("gate closed".to_string()))?;
            permit.forget();
        }
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        Ok(AssistantReply {
            response: self.reply.clone(),
            session_id: session_id.to_string(),
            chart_data: self.chart.clone(),
        })
    }

    async fn chat_history(
        &self,
        _session_id: &str,
        _advisor_id: &str,
    ) -> Result<Vec<Turn>, ApiError> {
        Ok(Vec::new())
    }

    async fn generate_chart(&self, request: &ChartRequest) -> Result<ChartDescriptor, ApiError> {
        Ok(ChartDescriptor {
            chart_type: Some(request.chart_type.clone()),
            data: serde_json::json!({"labels": [], "datasets": []}),
            options: None,
        })
    }

    async fn list_customers(&self, _advisor_id: &str) -> Result<Vec<CustomerSummary>, ApiError> {
        Ok(Vec::new())
    }

    async fn get_customer(
        &self,
        _customer_id: i64,
        _advisor_id: &str,
    ) -> Result<CustomerDetail, ApiError> {
        Err(ApiError::NotFound)
    }
}
