//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password combination did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration attempted with an email that already has an account.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password failed the strength policy.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    /// Password hashing or parsing failed.
    #[error("password hash error: {0}")]
    Hash(String),

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
