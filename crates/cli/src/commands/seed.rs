//! Database seed command for local development.

use secrecy::SecretString;

use azlok_core::Email;
use azlok_seller::db::{self, RepositoryError, SellerUserRepository};
use azlok_seller::services::auth;

use super::seller::SellerCommandError;

/// Demo seller credentials for local development.
const DEMO_SELLER_EMAIL: &str = "demo-seller@azlok.test";
const DEMO_SELLER_NAME: &str = "Demo Seller";
const DEMO_SELLER_PASSWORD: &str = "demo-seller-password";

/// Seed the database with a demo seller account.
///
/// Safe to run repeatedly: an existing demo account is left alone.
///
/// # Errors
///
/// Returns an error if the connection or insert fails.
pub async fn run() -> Result<(), SellerCommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SELLER_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SellerCommandError::MissingEnvVar("SELLER_DATABASE_URL"))?;

    let pool = db::create_pool(&SecretString::from(database_url)).await?;

    let email = Email::parse(DEMO_SELLER_EMAIL)
        .map_err(|e| SellerCommandError::InvalidEmail(e.to_string()))?;
    let password_hash = auth::hash_password(DEMO_SELLER_PASSWORD)
        .map_err(|e| SellerCommandError::Hash(e.to_string()))?;

    match SellerUserRepository::new(&pool)
        .create(&email, DEMO_SELLER_NAME, &password_hash)
        .await
    {
        Ok(seller) => {
            tracing::info!(seller_id = %seller.id, "Demo seller created");

            #[allow(clippy::print_stdout)]
            {
                println!("Demo seller: {DEMO_SELLER_EMAIL} / {DEMO_SELLER_PASSWORD}");
            }
        }
        Err(RepositoryError::Conflict(_)) => {
            tracing::info!("Demo seller already exists, skipping");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
