//! HTTP route handlers for the seller dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                               - Dashboard (counts)
//! GET  /health                         - Health check
//!
//! # Auth
//! GET  /auth/login                     - Login page
//! POST /auth/login                     - Login action
//! POST /auth/logout                    - Logout action
//!
//! # Inventory
//! GET  /inventory                      - Stock listing (filter + paginate)
//! POST /inventory/adjust               - Relative stock adjustment
//! POST /inventory/set                  - Absolute stock level
//!
//! # Orders
//! GET  /orders                         - Order listing (status filter)
//! GET  /orders/{id}                    - Order detail
//! POST /orders/{id}/status             - Status transition
//!
//! # Deletion requests
//! GET  /deletion-requests              - Review queue
//! POST /deletion-requests/{id}/approve - Approve (PENDING only)
//! POST /deletion-requests/{id}/reject  - Reject (PENDING only)
//! ```

pub mod auth;
pub mod dashboard;
pub mod deletion_requests;
pub mod inventory;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Precomputed pagination state for templates.
#[derive(Debug, Clone)]
pub struct Pager {
    pub current: u32,
    pub total: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev: u32,
    pub next: u32,
}

impl Pager {
    /// Build a pager, clamping `current` into `1..=total`.
    #[must_use]
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        let current = current.clamp(1, total);
        Self {
            current,
            total,
            has_prev: current > 1,
            has_next: current < total,
            prev: current.saturating_sub(1).max(1),
            next: (current + 1).min(total),
        }
    }
}

/// Create all routes for the seller dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/inventory", get(inventory::index))
        .route("/inventory/adjust", post(inventory::adjust))
        .route("/inventory/set", post(inventory::set))
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", post(orders::update_status))
        .route("/deletion-requests", get(deletion_requests::index))
        .route(
            "/deletion-requests/{id}/approve",
            post(deletion_requests::approve),
        )
        .route(
            "/deletion-requests/{id}/reject",
            post(deletion_requests::reject),
        )
}
