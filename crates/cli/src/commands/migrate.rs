//! Database migration command.
//!
//! The frontend schema (users, deletion requests, seller accounts) has a
//! single owner: `crates/storefront/migrations/`. Both services connect to
//! the same database, so there is exactly one migration set to run.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL`
//!   connection string

use sqlx::PgPool;

/// Errors from the migrate command.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the frontend database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    tracing::info!("Connecting to frontend database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running frontend migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Frontend migrations complete");
    Ok(())
}
