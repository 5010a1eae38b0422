//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::SellerApiClient;
use crate::config::SellerConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SellerConfig,
    pool: PgPool,
    api: SellerApiClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: SellerConfig, pool: PgPool) -> Self {
        let api = SellerApiClient::new(&config.backend);

        Self {
            inner: Arc::new(AppStateInner { config, pool, api }),
        }
    }

    /// Get a reference to the seller configuration.
    #[must_use]
    pub fn config(&self) -> &SellerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the backend seller API client.
    #[must_use]
    pub fn api(&self) -> &SellerApiClient {
        &self.inner.api
    }
}
