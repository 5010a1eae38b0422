//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::BackendClient;
use crate::config::StorefrontConfig;
use crate::razorpay::RazorpayClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    backend: BackendClient,
    razorpay: RazorpayClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let backend = BackendClient::new(&config.backend);
        let razorpay = RazorpayClient::new(&config.razorpay);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                backend,
                razorpay,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Azlok backend API client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the Razorpay client.
    #[must_use]
    pub fn razorpay(&self) -> &RazorpayClient {
        &self.inner.razorpay
    }
}
