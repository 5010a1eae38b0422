//! Authentication service: registration, login, and password re-checks.
//!
//! Passwords are hashed with argon2id using per-password random salts. The
//! deletion-request flow reuses [`verify_password`] to re-authenticate the
//! user before accepting the request.

mod error;

pub use error::AuthError;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::PgPool;

use azlok_core::{Email, UserId};

use crate::db::UserRepository;
use crate::models::user::User;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length (argon2 input bound, not a policy).
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate a password against the strength policy.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` describing the first failed rule.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
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
///
/// An unparseable stored hash verifies as false rather than erroring; the
/// caller cannot do anything better with it than reject the login.
#[must_use]
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::error!("stored password hash failed to parse");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Register a new site account.
///
/// # Errors
///
/// Returns `AuthError::InvalidEmail` or `AuthError::WeakPassword` on
/// validation failure, `AuthError::UserAlreadyExists` if the email is
/// taken, and `AuthError::Repository` for database failures.
pub async fn register(
    pool: &PgPool,
    email: &str,
    full_name: Option<&str>,
    password: &str,
) -> Result<User, AuthError> {
    let email = Email::parse(email).map_err(|e| AuthError::InvalidEmail(e.to_string()))?;
    validate_password(password)?;

    let password_hash = hash_password(password)?;

    // TODO: send a verification mail; email_verified stays false until then
    let repo = UserRepository::new(pool);
    match repo.create(&email, full_name, &password_hash).await {
        Ok(user) => Ok(user),
        Err(crate::db::RepositoryError::Conflict(_)) => Err(AuthError::UserAlreadyExists),
        Err(e) => Err(e.into()),
    }
}

/// Log a user in with email and password.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` when the email is unknown or the
/// password does not match; the two cases are indistinguishable to the
/// caller.
pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<User, AuthError> {
    let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

    let repo = UserRepository::new(pool);
    let Some((user_id, stored_hash)) = repo.credentials_by_email(&email).await? else {
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(&stored_hash, password) {
        return Err(AuthError::InvalidCredentials);
    }

    repo.get_by_id(user_id)
        .await?
        .ok_or(AuthError::InvalidCredentials)
}

/// Re-check a logged-in user's password (deletion-request flow).
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password does not match
/// or the account has no stored hash.
pub async fn recheck_password(
    pool: &PgPool,
    user_id: UserId,
    password: &str,
) -> Result<(), AuthError> {
    let repo = UserRepository::new(pool);
    let Some(stored_hash) = repo.password_hash_by_id(user_id).await? else {
        return Err(AuthError::InvalidCredentials);
    };

    if verify_password(&stored_hash, password) {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_validate_password_too_long() {
        let long = "a".repeat(200);
        assert!(matches!(
            validate_password(&long),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_validate_password_ok() {
        assert!(validate_password("correct horse battery").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("tr0ub4dor&3-plus").expect("hash");
        assert!(verify_password(&hash, "tr0ub4dor&3-plus"));
        assert!(!verify_password(&hash, "tr0ub4dor&3-minus"));
    }

    #[test]
    fn test_verify_password_bad_stored_hash() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-password-1").expect("hash");
        let b = hash_password("same-password-1").expect("hash");
        assert_ne!(a, b);
    }
}
