//! Seller authentication: login and password hashing.
//!
//! Registration has no self-service path; accounts are created with
//! `azlok-cli seller create`.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use sqlx::PgPool;
use thiserror::Error;

use azlok_core::Email;

use crate::db::{RepositoryError, SellerUserRepository};
use crate::models::SellerUser;

/// Errors from seller authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password combination did not match (or the account is inactive).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password hash error: {0}")]
    Hash(String),

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Hash a password with argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
#[must_use]
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::error!("stored seller password hash failed to parse");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Log a seller in with email and password.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` for unknown emails, inactive
/// accounts, and wrong passwords alike.
pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<SellerUser, AuthError> {
    let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

    let repo = SellerUserRepository::new(pool);
    let Some((_, stored_hash)) = repo.credentials_by_email(&email).await? else {
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(&stored_hash, password) {
        return Err(AuthError::InvalidCredentials);
    }

    repo.get_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("seller-pass-123!").expect("hash");
        assert!(verify_password(&hash, "seller-pass-123!"));
        assert!(!verify_password(&hash, "other-pass"));
    }

    #[test]
    fn test_verify_bad_stored_hash() {
        assert!(!verify_password("garbage", "anything"));
    }
}
