//! Account-deletion request repository (user-facing side).
//!
//! The admin side (listing and resolving requests) lives in the seller
//! service; this repository only creates requests and shows a user their
//! own.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use azlok_core::{DeletionRequestId, DeletionRequestStatus, UserId};

use super::RepositoryError;
use crate::models::deletion_request::DeletionRequest;

/// Internal row type for deletion request queries.
#[derive(Debug, sqlx::FromRow)]
struct DeletionRequestRow {
    id: i32,
    user_id: i32,
    reason: Option<String>,
    status: String,
    resolved_by: Option<String>,
    requested_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl DeletionRequestRow {
    fn into_request(self) -> Result<DeletionRequest, RepositoryError> {
        let status: DeletionRequestStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(DeletionRequest {
            id: DeletionRequestId::new(self.id),
            user_id: UserId::new(self.user_id),
            reason: self.reason,
            status,
            resolved_by: self.resolved_by,
            requested_at: self.requested_at,
            resolved_at: self.resolved_at,
        })
    }
}

const REQUEST_COLUMNS: &str =
    "id, user_id, reason, status, resolved_by, requested_at, resolved_at";

/// Repository for account-deletion requests.
pub struct DeletionRequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DeletionRequestRepository<'a> {
    /// Create a new deletion-request repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a pending deletion request for a user.
    ///
    /// A partial unique index allows at most one `PENDING` request per user;
    /// a second submission maps to `Conflict`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a pending request already
    /// exists, `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        reason: Option<&str>,
    ) -> Result<DeletionRequest, RepositoryError> {
        let row = sqlx::query_as::<_, DeletionRequestRow>(&format!(
            "INSERT INTO account_deletion_requests (user_id, reason)
             VALUES ($1, $2)
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(user_id)
        .bind(reason)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "a pending deletion request already exists".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        row.into_request()
    }

    /// Get the most recent deletion request for a user, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn latest_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<DeletionRequest>, RepositoryError> {
        let row = sqlx::query_as::<_, DeletionRequestRow>(&format!(
            "SELECT {REQUEST_COLUMNS}
             FROM account_deletion_requests
             WHERE user_id = $1
             ORDER BY requested_at DESC
             LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(DeletionRequestRow::into_request).transpose()
    }
}
