//! Razorpay payment API routes.
//!
//! Three endpoints:
//!
//! - `POST /api/payment/create-order` - compute the amount server-side from
//!   the session cart, create the Razorpay order, then the backend order
//! - `POST /api/payment/verify` - verify the checkout signature
//!   (HMAC-SHA256 over `order_id|payment_id`) and mark the order paid
//! - `POST /api/payment/webhook` - verify and dispatch Razorpay webhooks
//!
//! The client never supplies an amount, and nothing is mutated before a
//! signature verifies.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use azlok_core::Price;

use crate::backend::types::{ConfirmPaymentRequest, CreateOrderRequest, FailPaymentRequest};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::routes::cart::{clear_cart_id, get_cart_id};
use crate::state::AppState;

/// Webhook signature header set by Razorpay.
const WEBHOOK_SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// Response body for order creation.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub razorpay_order_id: String,
    /// Amount in paise, as the checkout script expects.
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
    /// Our order reference for display.
    pub order_reference: String,
}

/// Request body for payment verification.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
}

/// Response body for payment verification.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reference: Option<String>,
}

/// Create a Razorpay order and the matching backend order.
///
/// The amount comes from the backend's cart summary, never from the client.
#[instrument(skip(state, session))]
pub async fn create_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Json<CreateOrderResponse>> {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Err(AppError::BadRequest("no cart in session".to_string()));
    };

    let summary = state.backend().cart_summary(&cart_id).await?;
    if summary.item_count == 0 {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let total = Price::new(summary.total, summary.currency);
    let amount_paise = total.as_minor_units();
    if amount_paise <= 0 {
        return Err(AppError::BadRequest("cart total is not payable".to_string()));
    }

    let razorpay_order = state
        .razorpay()
        .create_order(amount_paise, summary.currency.code(), &cart_id)
        .await?;

    let order = state
        .backend()
        .create_order(&CreateOrderRequest {
            cart_id,
            customer_email: user.email.to_string(),
            razorpay_order_id: razorpay_order.id.clone(),
        })
        .await?;

    tracing::info!(
        order_reference = %order.reference,
        razorpay_order_id = %razorpay_order.id,
        amount_paise,
        "Payment order created"
    );

    Ok(Json(CreateOrderResponse {
        razorpay_order_id: razorpay_order.id,
        amount: amount_paise,
        currency: razorpay_order.currency,
        key_id: state.razorpay().key_id().to_string(),
        order_reference: order.reference,
    }))
}

/// Verify a checkout payment signature and mark the order paid.
#[instrument(skip(state, session, body))]
pub async fn verify(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(body): Json<VerifyRequest>,
) -> Result<Response> {
    if body.razorpay_order_id.is_empty()
        || body.razorpay_payment_id.is_empty()
        || body.razorpay_signature.is_empty()
    {
        return Err(AppError::BadRequest(
            "razorpay_order_id, razorpay_payment_id, and razorpay_signature are required"
                .to_string(),
        ));
    }

    let valid = state.razorpay().verify_payment_signature(
        &body.razorpay_order_id,
        &body.razorpay_payment_id,
        &body.razorpay_signature,
    );

    if !valid {
        tracing::warn!(
            razorpay_order_id = %body.razorpay_order_id,
            "Payment signature verification failed"
        );
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(VerifyResponse {
                verified: false,
                order_reference: None,
            }),
        )
            .into_response());
    }

    let order = state
        .backend()
        .confirm_payment(&ConfirmPaymentRequest {
            razorpay_order_id: body.razorpay_order_id.clone(),
            razorpay_payment_id: body.razorpay_payment_id.clone(),
        })
        .await?;

    // The cart is spent once the order is paid
    clear_cart_id(&session).await;

    tracing::info!(
        order_reference = %order.reference,
        razorpay_payment_id = %body.razorpay_payment_id,
        "Payment verified"
    );

    Ok(Json(VerifyResponse {
        verified: true,
        order_reference: Some(order.reference),
    })
    .into_response())
}

/// Webhook event envelope from Razorpay.
#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(default)]
    event: String,
    #[serde(default)]
    payload: serde_json::Value,
}

/// Receive and dispatch a Razorpay webhook.
///
/// The raw body is verified against the `X-Razorpay-Signature` header
/// before any parsing. Unknown events are acknowledged and ignored.
#[instrument(skip(state, headers, body))]
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode> {
    if !state.razorpay().webhooks_enabled() {
        return Err(AppError::NotFound("webhooks not configured".to_string()));
    }

    let signature = headers
        .get(WEBHOOK_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing webhook signature".to_string()))?;

    if !state.razorpay().verify_webhook_signature(&body, signature) {
        tracing::warn!("Webhook signature verification failed");
        return Err(AppError::Unauthorized("invalid webhook signature".to_string()));
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid webhook body: {e}")))?;

    let payment = &event.payload["payment"]["entity"];
    let payment_id = payment["id"].as_str().unwrap_or_default();
    let razorpay_order_id = payment["order_id"].as_str().unwrap_or_default();

    match event.event.as_str() {
        "payment.captured" => {
            if payment_id.is_empty() || razorpay_order_id.is_empty() {
                return Err(AppError::BadRequest(
                    "payment.captured event missing payment entity".to_string(),
                ));
            }
            state
                .backend()
                .confirm_payment(&ConfirmPaymentRequest {
                    razorpay_order_id: razorpay_order_id.to_string(),
                    razorpay_payment_id: payment_id.to_string(),
                })
                .await?;
            tracing::info!(razorpay_order_id, "Webhook confirmed payment");
        }
        "payment.failed" => {
            if razorpay_order_id.is_empty() {
                return Err(AppError::BadRequest(
                    "payment.failed event missing payment entity".to_string(),
                ));
            }
            let reason = payment["error_description"].as_str().map(String::from);
            state
                .backend()
                .fail_payment(&FailPaymentRequest {
                    razorpay_order_id: razorpay_order_id.to_string(),
                    reason,
                })
                .await?;
            tracing::info!(razorpay_order_id, "Webhook recorded failed payment");
        }
        other => {
            tracing::debug!(event = other, "Ignoring unhandled webhook event");
        }
    }

    Ok(StatusCode::OK)
}
