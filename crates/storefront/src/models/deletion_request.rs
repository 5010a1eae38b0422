//! Account-deletion request domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use azlok_core::{DeletionRequestId, DeletionRequestStatus, UserId};

/// A request to delete a site account.
///
/// Created by the account owner after re-entering their password; resolved
/// by an admin in the seller dashboard. The status column is the whole
/// lifecycle: `PENDING` until an admin sets `APPROVED` or `REJECTED`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionRequest {
    /// Request ID.
    pub id: DeletionRequestId,
    /// Account the request belongs to.
    pub user_id: UserId,
    /// Optional free-text reason given by the user.
    pub reason: Option<String>,
    /// Current status.
    pub status: DeletionRequestStatus,
    /// Email of the admin who resolved the request, if resolved.
    pub resolved_by: Option<String>,
    /// When the request was created.
    pub requested_at: DateTime<Utc>,
    /// When the request was approved or rejected.
    pub resolved_at: Option<DateTime<Utc>>,
}
