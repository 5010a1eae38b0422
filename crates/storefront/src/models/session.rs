//! Session-related types.
//!
//! Types stored in the session for authentication and cart state.

use serde::{Deserialize, Serialize};

use azlok_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
}

/// Session keys for authentication and cart data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the backend cart ID.
    pub const CART_ID: &str = "cart_id";
}
