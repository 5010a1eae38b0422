//! Catalog and order passthrough API routes.
//!
//! These endpoints forward to the backend REST API with minor reshaping:
//! typed deserialization in, the same typed shape back out. Client-side
//! components consume them instead of talking to the backend directly.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tower_sessions::Session;
use tracing::instrument;

use azlok_core::{InvoiceId, OrderId, Slug};

use crate::backend::types::{
    Cart, CartSummary, Invoice, Order, Page, Product, ProductSort, SearchFilters,
};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::routes::cart::get_cart_id;
use crate::state::AppState;

fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct ApiSearchQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_price: Option<Decimal>,
    pub in_stock: Option<String>,
}

/// History pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
}

/// `GET /api/products` - product listing passthrough.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Product>>> {
    let category = query
        .category
        .as_deref()
        .map(Slug::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest(format!("invalid category: {e}")))?;

    let sort = ProductSort::from_query_value(query.sort.as_deref().unwrap_or(""));
    let page = query.page.unwrap_or(1).max(1);

    let listing = state
        .backend()
        .list_products(page, category.as_ref(), sort)
        .await?;

    Ok(Json(listing))
}

/// `GET /api/products/{slug}` - product detail passthrough.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound(format!("product {slug}")))?;
    let product = state.backend().get_product_by_slug(&slug).await?;
    Ok(Json(product))
}

/// `GET /api/search` - search passthrough.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<ApiSearchQuery>,
) -> Result<Json<Page<Product>>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(AppError::BadRequest("query parameter q is required".to_string()));
    }

    let filters = SearchFilters {
        query: q.to_string(),
        min_price: query.min_price,
        max_price: query.max_price,
        in_stock_only: query.in_stock.as_deref() == Some("1"),
        page: query.page.unwrap_or(1).max(1),
    };

    let results = state.backend().search_products(&filters).await?;
    Ok(Json(results))
}

/// Cart summary response; flattens the backend summary with the cart lines.
#[derive(Debug, serde::Serialize)]
pub struct CartSummaryResponse {
    pub summary: CartSummary,
    pub cart: Cart,
}

/// `GET /api/cart/summary` - session cart summary.
#[instrument(skip(state, session))]
pub async fn cart_summary(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CartSummaryResponse>> {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Err(AppError::NotFound("no cart in session".to_string()));
    };

    let cart = state.backend().get_cart(&cart_id).await?;
    let summary = state.backend().cart_summary(&cart_id).await?;

    Ok(Json(CartSummaryResponse { summary, cart }))
}

/// `GET /api/orders` - order history for the logged-in user.
#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Page<Order>>> {
    let page = query.page.unwrap_or(1).max(1);
    let listing = state.backend().list_orders(user.email.as_str(), page).await?;
    Ok(Json(listing))
}

/// `GET /api/orders/{id}` - one order for the logged-in user.
#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<Order>> {
    let order = state
        .backend()
        .get_order(OrderId::new(id), user.email.as_str())
        .await?;
    Ok(Json(order))
}

/// `GET /api/invoices` - invoice history for the logged-in user.
#[instrument(skip(state))]
pub async fn list_invoices(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Page<Invoice>>> {
    let page = query.page.unwrap_or(1).max(1);
    let listing = state
        .backend()
        .list_invoices(user.email.as_str(), page)
        .await?;
    Ok(Json(listing))
}

/// `GET /api/invoices/{id}` - one invoice for the logged-in user.
#[instrument(skip(state))]
pub async fn get_invoice(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<Invoice>> {
    let invoice = state
        .backend()
        .get_invoice(InvoiceId::new(id), user.email.as_str())
        .await?;
    Ok(Json(invoice))
}
