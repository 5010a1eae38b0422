//! Integration tests for the account-deletion workflow.
//!
//! These tests require:
//! - A running `PostgreSQL` database (azlok-cli migrate)
//! - The storefront running (cargo run -p azlok-storefront)
//!
//! Run with: cargo test -p azlok-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::json;

use azlok_integration_tests::{client, storefront_base_url, unique_email};

const TEST_PASSWORD: &str = "integration-test-pass";

/// Register a fresh account and return the logged-in client.
async fn registered_client() -> Client {
    let base_url = storefront_base_url();
    let client = client();

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .form(&[
            ("email", unique_email("deletion-test").as_str()),
            ("full_name", "Deletion Test"),
            ("password", TEST_PASSWORD),
        ])
        .send()
        .await
        .expect("Failed to register test account");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    client
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_deletion_request_requires_auth() {
    let base_url = storefront_base_url();
    let resp = client()
        .post(format!("{base_url}/api/account/deletion-request"))
        .json(&json!({ "password": "whatever" }))
        .send()
        .await
        .expect("Failed to call deletion-request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_deletion_request_missing_password_is_400() {
    let base_url = storefront_base_url();
    let client = registered_client().await;

    let resp = client
        .post(format!("{base_url}/api/account/deletion-request"))
        .json(&json!({ "reason": "no password given" }))
        .send()
        .await
        .expect("Failed to call deletion-request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_deletion_request_wrong_password_is_401() {
    let base_url = storefront_base_url();
    let client = registered_client().await;

    let resp = client
        .post(format!("{base_url}/api/account/deletion-request"))
        .json(&json!({ "password": "not-the-password" }))
        .send()
        .await
        .expect("Failed to call deletion-request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_deletion_request_lifecycle() {
    let base_url = storefront_base_url();
    let client = registered_client().await;

    // No request yet
    let resp = client
        .get(format!("{base_url}/api/account/deletion-request"))
        .send()
        .await
        .expect("Failed to get status");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse body");
    assert!(body.is_null());

    // Submit
    let resp = client
        .post(format!("{base_url}/api/account/deletion-request"))
        .json(&json!({ "password": TEST_PASSWORD, "reason": "testing" }))
        .send()
        .await
        .expect("Failed to submit deletion request");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body["status"], "PENDING");

    // A second submission conflicts
    let resp = client
        .post(format!("{base_url}/api/account/deletion-request"))
        .json(&json!({ "password": TEST_PASSWORD }))
        .send()
        .await
        .expect("Failed to resubmit deletion request");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Status now reports the pending request
    let resp = client
        .get(format!("{base_url}/api/account/deletion-request"))
        .send()
        .await
        .expect("Failed to get status");
    let body: serde_json::Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body["status"], "PENDING");
}
