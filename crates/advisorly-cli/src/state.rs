//! Application state wiring all components together.
//!
//! AppState pins the generic core components to the concrete infra
//! implementations: the reqwest-backed advisory client and the SQLite
//! key-value store.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use advisorly_core::conversation::{ConversationOrchestrator, MessageLog, SessionManager};
use advisorly_infra::config::{load_client_config, resolve_data_dir};
use advisorly_infra::http::AdvisorHttpClient;
use advisorly_infra::sqlite::kv::SqliteKvStore;
use advisorly_infra::sqlite::pool::DatabasePool;
use advisorly_types::config::ClientConfig;

/// Concrete orchestrator type pinned to the infra implementations.
pub type ConcreteOrchestrator = ConversationOrchestrator<AdvisorHttpClient, SqliteKvStore>;

/// Shared application state for all CLI commands.
pub struct AppState {
    pub config: ClientConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
    pub conversation: Arc<ConcreteOrchestrator>,
}

impl AppState {
    /// Initialize the application state: resolve config, open the local
    /// database, and wire the conversation orchestrator.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_client_config(&data_dir).await;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("advisorly.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let api = AdvisorHttpClient::new(
            config.server_url.as_str(),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        let session = SessionManager::new(
            SqliteKvStore::new(db_pool.clone()),
            config.advisor_id.clone(),
        );
        let log = MessageLog::new(SqliteKvStore::new(db_pool.clone()));
        let conversation = Arc::new(ConversationOrchestrator::new(api, session, log));

        Ok(Self {
            config,
            data_dir,
            db_pool,
            conversation,
        })
    }
}
