//! Cart route handlers.
//!
//! The cart itself lives in the backend; the session only remembers the
//! backend cart ID. Mutating endpoints return HTML fragments so the page
//! script can swap them in without a full reload.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use azlok_core::ProductId;

use crate::backend::types::Cart as BackendCart;
use crate::filters;
use crate::models::session_keys;
use crate::seo::PageMeta;
use crate::state::AppState;

use super::products::format_price;

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub line_id: String,
    pub slug: String,
    pub title: String,
    pub image_url: String,
    pub quantity: i64,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: i64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(rust_decimal::Decimal::ZERO, azlok_core::CurrencyCode::INR),
            item_count: 0,
        }
    }
}

impl From<&BackendCart> for CartView {
    fn from(cart: &BackendCart) -> Self {
        Self {
            items: cart
                .lines
                .iter()
                .map(|line| CartItemView {
                    line_id: line.id.clone(),
                    slug: line.slug.to_string(),
                    title: line.title.clone(),
                    image_url: line.image_url.clone().unwrap_or_default(),
                    quantity: line.quantity,
                    unit_price: format_price(line.unit_price, cart.currency),
                    line_total: format_price(line.line_total, cart.currency),
                })
                .collect(),
            subtotal: format_price(cart.subtotal, cart.currency),
            item_count: cart.total_quantity,
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the backend cart ID from the session.
pub async fn get_cart_id(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Set the backend cart ID in the session.
pub async fn set_cart_id(
    session: &Session,
    cart_id: &str,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART_ID, cart_id).await
}

/// Drop the cart ID from the session (after successful payment).
pub async fn clear_cart_id(session: &Session) {
    if let Err(e) = session.remove::<String>(session_keys::CART_ID).await {
        tracing::warn!("Failed to clear cart ID from session: {e}");
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub meta: PageMeta,
    pub cart: CartView,
}

/// Cart items fragment template (for dynamic updates).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: i64,
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> CartShowTemplate {
    let cart = match get_cart_id(&session).await {
        Some(cart_id) => match state.backend().get_cart(&cart_id).await {
            Ok(cart) => CartView::from(&cart),
            Err(e) => {
                tracing::warn!("Failed to fetch cart {cart_id}: {e}");
                CartView::empty()
            }
        },
        None => CartView::empty(),
    };

    let base_url = &state.config().base_url;
    CartShowTemplate {
        meta: PageMeta::page("Cart", "Your shopping cart.", format!("{base_url}/cart")),
        cart,
    }
}

/// Add item to cart.
///
/// Creates a backend cart if the session has none yet. Returns the cart
/// count fragment with a trigger header for other page elements.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let quantity = i64::from(form.quantity.unwrap_or(1).max(1));
    let product_id = ProductId::new(form.product_id);

    let result = match get_cart_id(&session).await {
        Some(cart_id) => {
            state
                .backend()
                .add_to_cart(&cart_id, product_id, quantity)
                .await
        }
        None => match state.backend().create_cart().await {
            Ok(cart) => {
                state
                    .backend()
                    .add_to_cart(&cart.id, product_id, quantity)
                    .await
            }
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(cart) => {
            // Save cart ID to session
            if let Err(e) = set_cart_id(&session, &cart.id).await {
                tracing::error!("Failed to save cart ID to session: {e}");
            }

            (
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                CartCountTemplate {
                    count: cart.total_quantity,
                },
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to add item to cart: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<span class=\"cart-error\">Error adding to cart</span>"),
            )
                .into_response()
        }
    }
}

/// Update cart item quantity.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    match state
        .backend()
        .update_cart_line(&cart_id, &form.line_id, i64::from(form.quantity))
        .await
    {
        Ok(cart) => {
            let cart = CartView::from(&cart);
            (
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                CartItemsTemplate { cart },
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to update cart: {e}");
            CartItemsTemplate {
                cart: CartView::empty(),
            }
            .into_response()
        }
    }
}

/// Remove item from cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    match state
        .backend()
        .remove_cart_line(&cart_id, &form.line_id)
        .await
    {
        Ok(cart) => {
            let cart = CartView::from(&cart);
            (
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                CartItemsTemplate { cart },
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to remove from cart: {e}");
            CartItemsTemplate {
                cart: CartView::empty(),
            }
            .into_response()
        }
    }
}

/// Get cart count badge fragment.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> CartCountTemplate {
    let count = match get_cart_id(&session).await {
        Some(cart_id) => state
            .backend()
            .get_cart(&cart_id)
            .await
            .map(|cart| cart.total_quantity)
            .unwrap_or(0),
        None => 0,
    };

    CartCountTemplate { count }
}
