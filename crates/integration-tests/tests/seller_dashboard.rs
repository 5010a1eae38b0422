//! Integration tests for the seller dashboard.
//!
//! These tests require:
//! - A running `PostgreSQL` database (azlok-cli migrate && azlok-cli seed)
//! - The seller dashboard running (cargo run -p azlok-seller)
//! - A backend API (or stub) serving the seller endpoints
//!
//! Run with: cargo test -p azlok-integration-tests -- --ignored

use reqwest::{Client, StatusCode};

use azlok_integration_tests::{client, seller_base_url};

/// Credentials created by `azlok-cli seed`.
const DEMO_EMAIL: &str = "demo-seller@azlok.test";
const DEMO_PASSWORD: &str = "demo-seller-password";

/// Log in with the seeded demo seller and return the client.
async fn logged_in_client() -> Client {
    let base_url = seller_base_url();
    let client = client();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("email", DEMO_EMAIL), ("password", DEMO_PASSWORD)])
        .send()
        .await
        .expect("Failed to log in demo seller");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    client
}

#[tokio::test]
#[ignore = "Requires running seller dashboard"]
async fn test_dashboard_redirects_unauthenticated_to_login() {
    let base_url = seller_base_url();
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client");

    let resp = client
        .get(format!("{base_url}/inventory"))
        .send()
        .await
        .expect("Failed to fetch inventory page");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running seller dashboard, database, and backend API"]
async fn test_login_and_view_dashboard() {
    let base_url = seller_base_url();
    let client = logged_in_client().await;

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to fetch dashboard");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Pending orders"));
    assert!(body.contains("Deletion requests"));
}

#[tokio::test]
#[ignore = "Requires running seller dashboard, database, and backend API"]
async fn test_inventory_page_lists_stock() {
    let base_url = seller_base_url();
    let client = logged_in_client().await;

    let resp = client
        .get(format!("{base_url}/inventory"))
        .send()
        .await
        .expect("Failed to fetch inventory page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Inventory"));
}

#[tokio::test]
#[ignore = "Requires running seller dashboard and database"]
async fn test_resolving_missing_deletion_request_is_404() {
    let base_url = seller_base_url();
    let client = logged_in_client().await;

    let resp = client
        .post(format!("{base_url}/deletion-requests/999999/approve"))
        .send()
        .await
        .expect("Failed to post approval");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
