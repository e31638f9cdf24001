use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: solestyle_db::DbPool,
    /// Server configuration (JWT settings, cookie flags, login path).
    pub config: Arc<ServerConfig>,
}
