//! User repository for database operations.
//!
//! Queries use the sqlx runtime API with `FromRow` row types mapped into
//! domain models, keeping invalid database contents out of the rest of the
//! code.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use azlok_core::{Email, UserId};

use super::RepositoryError;
use crate::models::user::User;

/// Internal row type for user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    full_name: Option<String>,
    email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            email,
            full_name: self.full_name,
            email_verified: self.email_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, email, full_name, email_verified, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Create a new user with an argon2 password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        full_name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, full_name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(full_name)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_user()
    }

    /// Get the password hash for an email, for login verification.
    ///
    /// Returns the user ID alongside so a successful login needs no second
    /// query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(UserId, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, (i32, String)>(
            "SELECT id, password_hash FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, hash)| (UserId::new(id), hash)))
    }

    /// Get the password hash for a user ID, for re-authentication checks
    /// (the deletion-request flow asks for the password again).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn password_hash_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query_as::<_, (String,)>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(|(hash,)| hash))
    }
}
