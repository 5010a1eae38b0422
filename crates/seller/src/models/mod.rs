//! Domain models for the seller dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use azlok_core::{DeletionRequestId, DeletionRequestStatus, Email, SellerUserId, UserId};

/// A seller dashboard account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerUser {
    /// Seller user's database ID.
    pub id: SellerUserId,
    /// Login email.
    pub email: Email,
    /// Name shown in the dashboard header.
    pub display_name: String,
    /// Deactivated accounts cannot log in.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Session-stored seller identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSeller {
    /// Seller user's database ID.
    pub id: SellerUserId,
    /// Login email (recorded as `resolved_by` on deletion requests).
    pub email: Email,
    /// Display name for the dashboard header.
    pub display_name: String,
}

/// An account-deletion request joined with the requesting user's email,
/// as shown on the review page.
#[derive(Debug, Clone)]
pub struct DeletionRequestSummary {
    /// Request ID.
    pub id: DeletionRequestId,
    /// Account the request belongs to.
    pub user_id: UserId,
    /// The requesting account's email.
    pub user_email: String,
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

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in seller.
    pub const CURRENT_SELLER: &str = "current_seller";
}
