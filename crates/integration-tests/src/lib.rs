//! Shared helpers for Azlok integration tests.
//!
//! The tests in `tests/` drive running services over HTTP. They require:
//! - A running `PostgreSQL` database with migrations applied
//!   (`azlok-cli migrate`)
//! - The storefront running (`cargo run -p azlok-storefront`)
//! - The seller dashboard running (`cargo run -p azlok-seller`)
//! - A backend API (or stub) at `AZLOK_API_BASE_URL`

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the seller dashboard (configurable via environment).
#[must_use]
pub fn seller_base_url() -> String {
    std::env::var("SELLER_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Create an HTTP client with a cookie store (sessions need it).
///
/// # Panics
///
/// Panics if the client cannot be constructed; tests cannot proceed
/// without one.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email for test-account registration.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@azlok.test", uuid::Uuid::new_v4().simple())
}
