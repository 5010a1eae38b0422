//! Inventory management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use azlok_core::{CurrencyCode, Price, ProductId};

use crate::backend::InventoryFilter;
use crate::backend::types::InventoryItem;
use crate::error::Result;
use crate::middleware::RequireSellerAuth;
use crate::state::AppState;

use super::Pager;

/// Low stock threshold (items at or below this are highlighted).
const LOW_STOCK_THRESHOLD: i64 = 10;

/// Query parameters for the inventory page.
#[derive(Debug, Deserialize)]
pub struct InventoryQuery {
    pub page: Option<u32>,
    pub q: Option<String>,
    pub low_stock: Option<String>,
}

/// Form input for a relative stock adjustment.
#[derive(Debug, Deserialize)]
pub struct AdjustForm {
    pub product_id: i32,
    pub delta: i64,
    pub reason: Option<String>,
}

/// Form input for an absolute stock level.
#[derive(Debug, Deserialize)]
pub struct SetForm {
    pub product_id: i32,
    pub quantity: i64,
    pub reason: Option<String>,
}

/// Inventory row for templates.
#[derive(Debug, Clone)]
pub struct InventoryRowView {
    pub product_id: i32,
    pub slug: String,
    pub title: String,
    pub sku: String,
    pub image_url: String,
    pub quantity: i64,
    pub price: String,
    pub is_low_stock: bool,
    pub in_stock: bool,
}

impl From<&InventoryItem> for InventoryRowView {
    fn from(item: &InventoryItem) -> Self {
        Self {
            product_id: item.product_id.as_i32(),
            slug: item.slug.to_string(),
            title: item.title.clone(),
            sku: item.sku.clone().unwrap_or_default(),
            image_url: item.image_url.clone().unwrap_or_default(),
            quantity: item.stock_quantity,
            price: format_price(item.price, item.currency),
            is_low_stock: item.stock_quantity <= LOW_STOCK_THRESHOLD,
            in_stock: item.in_stock,
        }
    }
}

fn format_price(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}

/// Inventory page template.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/index.html")]
pub struct InventoryIndexTemplate {
    pub title: String,
    pub seller_name: String,
    pub items: Vec<InventoryRowView>,
    pub pager: Pager,
    pub query: String,
    pub low_stock_only: bool,
}

/// Display the inventory listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireSellerAuth(seller): RequireSellerAuth,
    Query(query): Query<InventoryQuery>,
) -> Result<InventoryIndexTemplate> {
    let q = query.q.unwrap_or_default();
    let filter = InventoryFilter {
        query: (!q.trim().is_empty()).then(|| q.trim().to_string()),
        low_stock_only: query.low_stock.as_deref() == Some("1"),
        page: query.page.unwrap_or(1).max(1),
    };

    let listing = state.api().list_inventory(&filter).await?;

    Ok(InventoryIndexTemplate {
        title: "Inventory".to_string(),
        seller_name: seller.display_name,
        items: listing.items.iter().map(InventoryRowView::from).collect(),
        pager: Pager::new(listing.page, listing.total_pages()),
        query: q,
        low_stock_only: filter.low_stock_only,
    })
}

/// Apply a relative stock adjustment.
#[instrument(skip(state, form), fields(product_id = form.product_id, delta = form.delta))]
pub async fn adjust(
    State(state): State<AppState>,
    RequireSellerAuth(seller): RequireSellerAuth,
    Form(form): Form<AdjustForm>,
) -> Result<Redirect> {
    let reason = form.reason.filter(|r| !r.trim().is_empty());
    let item = state
        .api()
        .adjust_stock(ProductId::new(form.product_id), form.delta, reason)
        .await?;

    tracing::info!(
        seller = %seller.email,
        product_id = form.product_id,
        delta = form.delta,
        new_quantity = item.stock_quantity,
        "Stock adjusted"
    );

    Ok(Redirect::to("/inventory"))
}

/// Set an absolute stock level.
#[instrument(skip(state, form), fields(product_id = form.product_id, quantity = form.quantity))]
pub async fn set(
    State(state): State<AppState>,
    RequireSellerAuth(seller): RequireSellerAuth,
    Form(form): Form<SetForm>,
) -> Result<Redirect> {
    let reason = form.reason.filter(|r| !r.trim().is_empty());
    let item = state
        .api()
        .set_stock(ProductId::new(form.product_id), form.quantity, reason)
        .await?;

    tracing::info!(
        seller = %seller.email,
        product_id = form.product_id,
        new_quantity = item.stock_quantity,
        "Stock set"
    );

    Ok(Redirect::to("/inventory"))
}
