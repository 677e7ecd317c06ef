use std::sync::Arc;

use cybermind_db::{ContactStore, MemoryContactStore, PgContactStore};

use crate::config::{ServerConfig, StoreBackend};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Contact persistence. The PostgreSQL store connects on first use.
    pub store: Arc<dyn ContactStore>,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state with the store selected by `config.store`.
    pub fn from_config(config: ServerConfig) -> Self {
        let store: Arc<dyn ContactStore> = match &config.store {
            StoreBackend::Postgres(db) => Arc::new(PgContactStore::new(db.clone())),
            StoreBackend::Memory => Arc::new(MemoryContactStore::new()),
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: ServerConfig, store: Arc<dyn ContactStore>) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
