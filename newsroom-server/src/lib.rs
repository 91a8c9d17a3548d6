//! newsroom-server: feedback resource over HTTP
//!
//! Serves create/list/update/delete for reader feedback, backed by a
//! lazily connected Postgres store (or an in-process store for demos).

pub mod db;
pub mod http;
pub mod models;

use std::sync::Arc;

pub use db::{FeedbackStore, MemoryFeedbackStore, PgConnector, PgFeedbackStore};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};

/// Where feedback records live.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// Postgres, connected on first request.
    Postgres {
        database_url: Option<String>,
        max_connections: u32,
    },
    /// Process memory; lost on exit.
    Memory,
}

impl StoreBackend {
    /// Build the store. Nothing connects until the first request.
    pub fn into_store(self) -> Arc<dyn FeedbackStore> {
        match self {
            Self::Postgres {
                database_url,
                max_connections,
            } => {
                let connector = PgConnector::new(database_url).with_max_connections(max_connections);
                Arc::new(PgFeedbackStore::new(connector))
            }
            Self::Memory => Arc::new(MemoryFeedbackStore::new()),
        }
    }
}
