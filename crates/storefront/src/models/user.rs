//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use azlok_core::{Email, UserId};

/// A storefront site account.
///
/// The password hash never leaves the repository layer; this struct is what
/// handlers and templates see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User's database ID.
    pub id: UserId,
    /// User's email address (also their backend customer identity).
    pub email: Email,
    /// Display name shown in account pages.
    pub full_name: Option<String>,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
