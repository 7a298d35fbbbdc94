/**
 * Application State Management
 *
 * This module defines the state container shared by every handler. All of
 * it is read-only after startup: the pool hands out connections, the
 * session keys and configuration sit behind `Arc`. Nothing here needs a
 * lock, which is what keeps concurrent requests fully independent.
 */

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::server::config::AppConfig;

/// Central state container
///
/// Cloned per request by Axum; every clone shares the same pool, keys,
/// and configuration.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Token issuer/verifier built from the configured secret and TTL
    pub sessions: Arc<SessionKeys>,
    /// Process configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the state from a pool and loaded configuration
    ///
    /// The signing secret leaves the config exactly once, here, to
    /// construct the session keys.
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let sessions = Arc::new(SessionKeys::new(&config.jwt_secret, config.token_ttl));
        Self {
            db,
            sessions,
            config: Arc::new(config),
        }
    }
}
