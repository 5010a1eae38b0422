//! Seller account management command.

use secrecy::SecretString;

use azlok_core::Email;
use azlok_seller::db::{self, SellerUserRepository};
use azlok_seller::services::auth;

/// Errors from seller account commands.
#[derive(Debug, thiserror::Error)]
pub enum SellerCommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Password hash error: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Database(#[from] azlok_seller::db::RepositoryError),

    #[error("Connection error: {0}")]
    Connection(#[from] sqlx::Error),
}

/// Create a seller dashboard account.
///
/// # Errors
///
/// Returns an error if validation, hashing, or the insert fails.
pub async fn create(email: &str, name: &str, password: &str) -> Result<(), SellerCommandError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email).map_err(|e| SellerCommandError::InvalidEmail(e.to_string()))?;

    let database_url = std::env::var("SELLER_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SellerCommandError::MissingEnvVar("SELLER_DATABASE_URL"))?;

    let pool = db::create_pool(&SecretString::from(database_url)).await?;

    let password_hash =
        auth::hash_password(password).map_err(|e| SellerCommandError::Hash(e.to_string()))?;

    let seller = SellerUserRepository::new(&pool)
        .create(&email, name, &password_hash)
        .await?;

    tracing::info!(seller_id = %seller.id, email = %seller.email, "Seller account created");

    #[allow(clippy::print_stdout)]
    {
        println!("Created seller account {} ({})", seller.email, seller.id);
    }

    Ok(())
}
