use std::sync::Arc;

use comicat_service::CatalogService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: comicat_db::DbPool,
    /// Catalog operations over the same pool.
    pub catalog: CatalogService,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: comicat_db::DbPool, config: ServerConfig) -> Self {
        Self {
            catalog: CatalogService::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
