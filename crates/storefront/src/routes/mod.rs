//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Product listing
//! GET  /products/{slug}        - Product detail
//! GET  /categories             - Category listing
//! GET  /categories/{slug}      - Category detail
//! GET  /search                 - Search results
//!
//! # Cart (fragments for dynamic updates)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count fragment)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Checkout page (Razorpay button)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires auth)
//! GET  /account                - Account overview
//! GET  /account/orders         - Order history
//! GET  /account/orders/{id}    - Order detail
//! GET  /account/invoices       - Invoice list
//! GET  /account/deletion       - Deletion request page
//! POST /account/deletion       - Submit deletion request
//!
//! # SEO artifacts
//! GET  /robots.txt             - Crawl directives
//! GET  /sitemap.xml            - Catalog sitemap (cached 1 hour)
//!
//! # BFF API (JSON)
//! GET  /api/products                    - Product listing passthrough
//! GET  /api/products/{slug}             - Product detail passthrough
//! GET  /api/search                      - Search passthrough
//! GET  /api/cart/summary                - Session cart summary
//! GET  /api/orders                      - Order history (requires auth)
//! GET  /api/orders/{id}                 - Order detail (requires auth)
//! GET  /api/invoices                    - Invoice history (requires auth)
//! GET  /api/invoices/{id}               - Invoice detail (requires auth)
//! POST /api/payment/create-order        - Create Razorpay + backend order
//! POST /api/payment/verify              - Verify payment signature
//! POST /api/payment/webhook             - Razorpay webhook receiver
//! GET  /api/account/deletion-request    - Deletion request status
//! POST /api/account/deletion-request    - Submit deletion request
//! ```

pub mod account;
pub mod api;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod home;
pub mod products;
pub mod search;
pub mod seo;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Precomputed pagination state for templates.
///
/// Templates get plain fields so they never do arithmetic.
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

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{slug}", get(categories::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/orders", get(account::orders))
        .route("/orders/{id}", get(account::order_detail))
        .route("/invoices", get(account::invoices))
        .route(
            "/deletion",
            get(account::deletion_page).post(account::submit_deletion),
        )
}

/// Create the BFF API router (JSON in, JSON out).
pub fn api_routes() -> Router<AppState> {
    let payment = Router::new()
        .route("/create-order", post(api::payment::create_order))
        .route("/verify", post(api::payment::verify))
        .route("/webhook", post(api::payment::webhook))
        .layer(auth_rate_limiter());

    Router::new()
        .route("/products", get(api::catalog::list_products))
        .route("/products/{slug}", get(api::catalog::get_product))
        .route("/search", get(api::catalog::search))
        .route("/cart/summary", get(api::catalog::cart_summary))
        .route("/orders", get(api::catalog::list_orders))
        .route("/orders/{id}", get(api::catalog::get_order))
        .route("/invoices", get(api::catalog::list_invoices))
        .route("/invoices/{id}", get(api::catalog::get_invoice))
        .route(
            "/account/deletion-request",
            get(api::account::deletion_request_status).post(api::account::submit_deletion_request),
        )
        .layer(api_rate_limiter())
        .nest("/payment", payment)
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .route("/search", get(search::search))
        // Cart
        .nest("/cart", cart_routes())
        // Checkout page
        .route("/checkout", get(checkout::show))
        // Account pages
        .nest("/account", account_routes())
        // Auth (strict rate limit tier)
        .nest("/auth", auth_routes().layer(auth_rate_limiter()))
        // SEO artifacts
        .route("/robots.txt", get(seo::robots))
        .route("/sitemap.xml", get(seo::sitemap))
        // BFF API
        .nest("/api", api_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pager_middle_page() {
        let pager = Pager::new(3, 10);
        assert!(pager.has_prev);
        assert!(pager.has_next);
        assert_eq!(pager.prev, 2);
        assert_eq!(pager.next, 4);
    }

    #[test]
    fn test_pager_clamps_out_of_range() {
        let pager = Pager::new(99, 5);
        assert_eq!(pager.current, 5);
        assert!(!pager.has_next);

        let pager = Pager::new(0, 5);
        assert_eq!(pager.current, 1);
        assert!(!pager.has_prev);
    }

    #[test]
    fn test_pager_single_page() {
        let pager = Pager::new(1, 0);
        assert_eq!(pager.total, 1);
        assert!(!pager.has_prev);
        assert!(!pager.has_next);
    }
}
