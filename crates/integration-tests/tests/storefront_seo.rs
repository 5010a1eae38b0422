//! Integration tests for the storefront's SEO artifacts.
//!
//! These tests require:
//! - The storefront running (cargo run -p azlok-storefront)
//! - A backend API (or stub) serving the catalog endpoints
//!
//! Run with: cargo test -p azlok-integration-tests -- --ignored

use reqwest::StatusCode;

use azlok_integration_tests::{client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront and backend API"]
async fn test_robots_txt_names_sitemap() {
    let base_url = storefront_base_url();
    let resp = client()
        .get(format!("{base_url}/robots.txt"))
        .send()
        .await
        .expect("Failed to fetch robots.txt");

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("User-agent: *"));
    assert!(body.contains("Disallow: /account"));
    assert!(body.contains("/sitemap.xml"));
}

#[tokio::test]
#[ignore = "Requires running storefront and backend API"]
async fn test_sitemap_is_valid_urlset() {
    let base_url = storefront_base_url();
    let resp = client()
        .get(format!("{base_url}/sitemap.xml"))
        .send()
        .await
        .expect("Failed to fetch sitemap.xml");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.starts_with("<?xml"));
    assert!(body.contains("<urlset"));
    assert!(body.contains(&format!("<loc>{base_url}/products</loc>")));
}

#[tokio::test]
#[ignore = "Requires running storefront and backend API"]
async fn test_product_page_embeds_structured_data() {
    let base_url = storefront_base_url();
    let slug = std::env::var("TEST_PRODUCT_SLUG")
        .unwrap_or_else(|_| "organic-wild-honey-500g".to_string());

    let resp = client()
        .get(format!("{base_url}/products/{slug}"))
        .send()
        .await
        .expect("Failed to fetch product page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("application/ld+json"));
    assert!(body.contains("\"@type\":\"Product\""));
    assert!(body.contains("\"priceCurrency\":\"INR\""));
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_unknown_product_slug_is_404() {
    let base_url = storefront_base_url();
    let resp = client()
        .get(format!("{base_url}/products/definitely-not-a-real-slug"))
        .send()
        .await
        .expect("Failed to fetch product page");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_security_headers_present() {
    let base_url = storefront_base_url();
    let resp = client()
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to fetch home page");

    let headers = resp.headers();
    assert_eq!(
        headers.get("x-frame-options").map(|v| v.to_str().unwrap_or("")),
        Some("DENY")
    );
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("x-request-id"));
}
