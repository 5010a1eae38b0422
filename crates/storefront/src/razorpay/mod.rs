//! Razorpay payment integration.
//!
//! Two concerns live here:
//!
//! - [`RazorpayClient`] - order creation against the Razorpay Orders API
//!   (basic auth, amounts in paise)
//! - Signature verification for checkout callbacks and webhooks, following
//!   Razorpay's documented HMAC-SHA256 scheme over `order_id|payment_id`
//!   (checkout) or the raw request body (webhooks)
//!
//! Verification never touches the network; a payment is only reported to
//! the backend after the signature checks out.

use std::sync::Arc;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::instrument;

use crate::config::RazorpayConfig;

/// Razorpay REST API base URL.
const API_BASE_URL: &str = "https://api.razorpay.com";

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur when talking to Razorpay.
#[derive(Debug, Error)]
pub enum RazorpayError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Razorpay returned a non-success status.
    #[error("Razorpay returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description from Razorpay's response body.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An order as created on Razorpay.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayOrder {
    /// Razorpay order ID (e.g., `order_IluGWxBm9U8zJ8`).
    pub id: String,
    /// Amount in the smallest currency unit (paise).
    pub amount: i64,
    /// ISO currency code (e.g., "INR").
    pub currency: String,
    /// Our order reference, echoed back.
    pub receipt: Option<String>,
    /// Razorpay order status (`created`, `attempted`, `paid`).
    pub status: String,
}

/// Request body for the Razorpay order-creation endpoint.
#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

/// Client for the Razorpay Orders API.
///
/// Cheaply cloneable; holds the key pair and a `reqwest` client.
#[derive(Clone)]
pub struct RazorpayClient {
    inner: Arc<RazorpayClientInner>,
}

struct RazorpayClientInner {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: SecretString,
    webhook_secret: Option<SecretString>,
}

impl RazorpayClient {
    /// Create a new Razorpay client from configuration.
    #[must_use]
    pub fn new(config: &RazorpayConfig) -> Self {
        Self::with_base_url(config, API_BASE_URL)
    }

    /// Create a client against a custom base URL (integration tests point
    /// this at a local stub).
    #[must_use]
    pub fn with_base_url(config: &RazorpayConfig, base_url: &str) -> Self {
        Self {
            inner: Arc::new(RazorpayClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                key_id: config.key_id.clone(),
                key_secret: config.key_secret.clone(),
                webhook_secret: config.webhook_secret.clone(),
            }),
        }
    }

    /// The public key ID, embedded in the checkout page.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.inner.key_id
    }

    /// Whether a webhook secret is configured.
    #[must_use]
    pub fn webhooks_enabled(&self) -> bool {
        self.inner.webhook_secret.is_some()
    }

    /// Create an order on Razorpay.
    ///
    /// `amount_paise` is in the smallest currency unit; `receipt` is our
    /// order reference for reconciliation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Razorpay rejects it.
    #[instrument(skip(self), fields(receipt = %receipt))]
    pub async fn create_order(
        &self,
        amount_paise: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<RazorpayOrder, RazorpayError> {
        let body = CreateOrderBody {
            amount: amount_paise,
            currency,
            receipt,
        };

        let response = self
            .inner
            .client
            .post(format!("{}/v1/orders", self.inner.base_url))
            .basic_auth(&self.inner.key_id, Some(self.inner.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Razorpay order creation failed"
            );
            return Err(RazorpayError::Api {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        Ok(serde_json::from_str(&response_text)?)
    }

    /// Verify a checkout payment signature.
    ///
    /// Razorpay signs `"{order_id}|{payment_id}"` with the key secret
    /// (HMAC-SHA256, hex-encoded). Comparison is constant-time via the
    /// `hmac` crate's verifier.
    #[must_use]
    pub fn verify_payment_signature(
        &self,
        razorpay_order_id: &str,
        razorpay_payment_id: &str,
        signature: &str,
    ) -> bool {
        verify_hex_signature(
            self.inner.key_secret.expose_secret().as_bytes(),
            format!("{razorpay_order_id}|{razorpay_payment_id}").as_bytes(),
            signature,
        )
    }

    /// Verify a webhook body against the `X-Razorpay-Signature` header.
    ///
    /// Returns `false` when no webhook secret is configured.
    #[must_use]
    pub fn verify_webhook_signature(&self, body: &[u8], signature: &str) -> bool {
        let Some(secret) = &self.inner.webhook_secret else {
            return false;
        };
        verify_hex_signature(secret.expose_secret().as_bytes(), body, signature)
    }
}

/// Verify a hex-encoded HMAC-SHA256 signature in constant time.
fn verify_hex_signature(key: &[u8], message: &[u8], signature_hex: &str) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(message);

    mac.verify_slice(&signature).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_client(webhook_secret: Option<&str>) -> RazorpayClient {
        let config = RazorpayConfig {
            key_id: "rzp_test_1DP5mmOlF5G5ag".to_string(),
            key_secret: SecretString::from("k9sZqAb3fGh2jXcV"),
            webhook_secret: webhook_secret.map(SecretString::from),
        };
        RazorpayClient::new(&config)
    }

    /// Sign a message the way Razorpay does, for test fixtures.
    fn sign(key: &str, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(key.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_verify_payment_signature_valid() {
        let client = test_client(None);
        let signature = sign("k9sZqAb3fGh2jXcV", "order_IluGWxBm9U8zJ8|pay_IluGLxBm9U8zJ9");

        assert!(client.verify_payment_signature(
            "order_IluGWxBm9U8zJ8",
            "pay_IluGLxBm9U8zJ9",
            &signature
        ));
    }

    #[test]
    fn test_verify_payment_signature_tampered_payment_id() {
        let client = test_client(None);
        let signature = sign("k9sZqAb3fGh2jXcV", "order_IluGWxBm9U8zJ8|pay_IluGLxBm9U8zJ9");

        assert!(!client.verify_payment_signature(
            "order_IluGWxBm9U8zJ8",
            "pay_SOMEOTHERPAYMENT",
            &signature
        ));
    }

    #[test]
    fn test_verify_payment_signature_wrong_key() {
        let client = test_client(None);
        let signature = sign("not-the-key", "order_IluGWxBm9U8zJ8|pay_IluGLxBm9U8zJ9");

        assert!(!client.verify_payment_signature(
            "order_IluGWxBm9U8zJ8",
            "pay_IluGLxBm9U8zJ9",
            &signature
        ));
    }

    #[test]
    fn test_verify_payment_signature_not_hex() {
        let client = test_client(None);
        assert!(!client.verify_payment_signature("order_x", "pay_y", "zz-not-hex-zz"));
        assert!(!client.verify_payment_signature("order_x", "pay_y", ""));
    }

    #[test]
    fn test_verify_webhook_signature_valid() {
        let client = test_client(Some("wh_4tQpXzR8vLm6yNb1"));
        let body = br#"{"event":"payment.captured","payload":{}}"#;
        let signature = sign(
            "wh_4tQpXzR8vLm6yNb1",
            r#"{"event":"payment.captured","payload":{}}"#,
        );

        assert!(client.verify_webhook_signature(body, &signature));
    }

    #[test]
    fn test_verify_webhook_signature_tampered_body() {
        let client = test_client(Some("wh_4tQpXzR8vLm6yNb1"));
        let signature = sign(
            "wh_4tQpXzR8vLm6yNb1",
            r#"{"event":"payment.captured","payload":{}}"#,
        );

        assert!(!client.verify_webhook_signature(br#"{"event":"payment.failed"}"#, &signature));
    }

    #[test]
    fn test_verify_webhook_signature_without_secret() {
        let client = test_client(None);
        let body = b"anything";
        // No secret configured: always reject, never panic
        assert!(!client.verify_webhook_signature(body, "00ff"));
        assert!(!client.webhooks_enabled());
    }
}
