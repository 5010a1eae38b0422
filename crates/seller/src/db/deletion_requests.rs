//! Account-deletion request review repository (admin side).
//!
//! The whole workflow is one guarded UPDATE: a request moves from PENDING
//! to APPROVED or REJECTED exactly once. The `status = 'PENDING'` predicate
//! makes concurrent resolutions race safely; the loser sees zero rows and
//! gets a conflict.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use azlok_core::{DeletionRequestId, DeletionRequestStatus, UserId};

use super::RepositoryError;
use crate::models::DeletionRequestSummary;

/// Internal row type for review queries (request joined with user email).
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    user_id: i32,
    user_email: String,
    reason: Option<String>,
    status: String,
    resolved_by: Option<String>,
    requested_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl ReviewRow {
    fn into_summary(self) -> Result<DeletionRequestSummary, RepositoryError> {
        let status: DeletionRequestStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(DeletionRequestSummary {
            id: DeletionRequestId::new(self.id),
            user_id: UserId::new(self.user_id),
            user_email: self.user_email,
            reason: self.reason,
            status,
            resolved_by: self.resolved_by,
            requested_at: self.requested_at,
            resolved_at: self.resolved_at,
        })
    }
}

const REVIEW_COLUMNS: &str = "r.id, r.user_id, u.email AS user_email, r.reason, r.status, \
                              r.resolved_by, r.requested_at, r.resolved_at";

/// Repository for reviewing account-deletion requests.
pub struct DeletionReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DeletionReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List requests, pending first, newest within each status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, limit: i64) -> Result<Vec<DeletionRequestSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS}
             FROM account_deletion_requests r
             JOIN users u ON u.id = r.user_id
             ORDER BY (r.status = 'PENDING') DESC, r.requested_at DESC
             LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ReviewRow::into_summary).collect()
    }

    /// Count requests awaiting review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn pending_count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM account_deletion_requests WHERE status = 'PENDING'",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Resolve a pending request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request does not exist,
    /// `RepositoryError::Conflict` if it is no longer pending, and
    /// `RepositoryError::Database` for query failures.
    pub async fn resolve(
        &self,
        id: DeletionRequestId,
        approve: bool,
        resolved_by: &str,
    ) -> Result<DeletionRequestSummary, RepositoryError> {
        let new_status = if approve {
            DeletionRequestStatus::Approved
        } else {
            DeletionRequestStatus::Rejected
        };

        let updated = sqlx::query_as::<_, ReviewRow>(&format!(
            "UPDATE account_deletion_requests r
             SET status = $2, resolved_by = $3, resolved_at = NOW()
             FROM users u
             WHERE r.id = $1 AND r.status = 'PENDING' AND u.id = r.user_id
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(id)
        .bind(new_status.as_str())
        .bind(resolved_by)
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = updated {
            return row.into_summary();
        }

        // Nothing updated: distinguish "gone" from "already resolved"
        let exists: Option<(String,)> =
            sqlx::query_as("SELECT status FROM account_deletion_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        match exists {
            Some((status,)) => Err(RepositoryError::Conflict(format!(
                "request already resolved ({status})"
            ))),
            None => Err(RepositoryError::NotFound),
        }
    }
}
