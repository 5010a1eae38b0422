//! Checkout page route handler.
//!
//! The page shows the backend-computed totals and mounts the Razorpay
//! checkout button. Order creation and verification happen in the payment
//! API routes; this page never computes an amount itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::seo::PageMeta;
use crate::state::AppState;

use super::cart::get_cart_id;
use super::products::format_price;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub meta: PageMeta,
    pub item_count: i64,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
    /// Razorpay key ID, consumed by the checkout script via data attribute.
    pub razorpay_key_id: String,
    pub customer_email: String,
}

/// Display the checkout page.
///
/// An empty or missing cart redirects back to the cart page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Redirect::to("/cart").into_response();
    };

    let summary = match state.backend().cart_summary(&cart_id).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Failed to fetch cart summary for checkout: {e}");
            return Redirect::to("/cart").into_response();
        }
    };

    if summary.item_count == 0 {
        return Redirect::to("/cart").into_response();
    }

    let base_url = &state.config().base_url;
    CheckoutTemplate {
        meta: PageMeta::page(
            "Checkout",
            "Complete your Azlok order.",
            format!("{base_url}/checkout"),
        ),
        item_count: summary.item_count,
        subtotal: format_price(summary.subtotal, summary.currency),
        shipping: format_price(summary.shipping, summary.currency),
        tax: format_price(summary.tax, summary.currency),
        total: format_price(summary.total, summary.currency),
        razorpay_key_id: state.razorpay().key_id().to_string(),
        customer_email: user.email.to_string(),
    }
    .into_response()
}
