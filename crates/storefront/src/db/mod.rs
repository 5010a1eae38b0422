//! Database operations for the frontend `PostgreSQL` database.
//!
//! # Database: `azlok_frontend`
//!
//! Stores local data only (the backend API is the source of truth for
//! catalog, cart, and order data):
//!
//! ## Tables
//!
//! - `users` - Site accounts (email + argon2 password hash)
//! - `account_deletion_requests` - Deletion workflow rows (PENDING /
//!   APPROVED / REJECTED)
//! - `seller_users` - Seller dashboard accounts (written by the seller
//!   service, created here because the schema has a single owner)
//! - tower-sessions storage (created by the session store itself)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p azlok-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod deletion_requests;
pub mod users;

pub use deletion_requests::DeletionRequestRepository;
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, duplicate pending request).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
