use std::sync::Arc;

use crate::config::ServerConfig;
use crate::handler::ProjectHandler;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by the health check.
    pub pool: webbuilder_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Project request handler shared by every route.
    pub handler: ProjectHandler,
}

impl AppState {
    pub fn new(pool: webbuilder_db::DbPool, config: ServerConfig) -> Self {
        Self {
            handler: ProjectHandler::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
