//! Seller user repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use azlok_core::{Email, SellerUserId};

use super::RepositoryError;
use crate::models::SellerUser;

/// Internal row type for seller user queries.
#[derive(Debug, sqlx::FromRow)]
struct SellerUserRow {
    id: i32,
    email: String,
    display_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SellerUserRow {
    fn into_user(self) -> Result<SellerUser, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(SellerUser {
            id: SellerUserId::new(self.id),
            email,
            display_name: self.display_name,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELLER_COLUMNS: &str = "id, email, display_name, is_active, created_at, updated_at";

/// Repository for seller user database operations.
pub struct SellerUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SellerUserRepository<'a> {
    /// Create a new seller user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a seller user by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<SellerUser>, RepositoryError> {
        let row = sqlx::query_as::<_, SellerUserRow>(&format!(
            "SELECT {SELLER_COLUMNS} FROM seller_users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(SellerUserRow::into_user).transpose()
    }

    /// Get the password hash for an active seller, for login verification.
    ///
    /// Inactive accounts return `None`, indistinguishable from unknown
    /// emails.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(SellerUserId, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, (i32, String)>(
            "SELECT id, password_hash FROM seller_users WHERE email = $1 AND is_active",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, hash)| (SellerUserId::new(id), hash)))
    }

    /// Create a seller account (used by the CLI).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub async fn create(
        &self,
        email: &Email,
        display_name: &str,
        password_hash: &str,
    ) -> Result<SellerUser, RepositoryError> {
        let row = sqlx::query_as::<_, SellerUserRow>(&format!(
            "INSERT INTO seller_users (email, display_name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {SELLER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(display_name)
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
}
