//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "az_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the `PostgreSQL` session store.
///
/// The caller runs `store.migrate()` once at startup; app tables are
/// migrated separately via the CLI.
#[must_use]
pub fn create_session_store(pool: &PgPool) -> PostgresStore {
    PostgresStore::new(pool.clone())
}

/// Create the session layer over a store.
///
/// # Arguments
///
/// * `store` - `PostgreSQL` session store
/// * `config` - Storefront configuration (for the HTTPS check)
#[must_use]
pub fn create_session_layer(
    store: PostgresStore,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore> {
    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
