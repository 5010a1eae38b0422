//! Session middleware configuration.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::SellerConfig;

/// Session cookie name (distinct from the storefront cookie; both services
/// may share a hostname behind the internal proxy).
pub const SESSION_COOKIE_NAME: &str = "az_seller_session";

/// Session expiry time in seconds (24 hours; dashboard sessions are short).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the `PostgreSQL` session store.
#[must_use]
pub fn create_session_store(pool: &PgPool) -> PostgresStore {
    PostgresStore::new(pool.clone())
}

/// Create the session layer over a store.
#[must_use]
pub fn create_session_layer(
    store: PostgresStore,
    config: &SellerConfig,
) -> SessionManagerLayer<PostgresStore> {
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
