use std::sync::Arc;

use crate::config::ServerConfig;
use crate::middleware::throttle::Throttle;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gamesapi_db::DbPool,
    /// Server configuration (JWT, paging, throttle rates, public URL).
    pub config: Arc<ServerConfig>,
    /// Per-client request history for throttled routes.
    pub throttle: Arc<Throttle>,
}

impl AppState {
    pub fn new(pool: gamesapi_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            throttle: Arc::new(Throttle::new()),
        }
    }
}
