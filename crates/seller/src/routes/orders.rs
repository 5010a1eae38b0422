//! Order management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use azlok_core::{CurrencyCode, OrderId, OrderStatus, Price};

use crate::backend::types::SellerOrder;
use crate::error::{AppError, Result};
use crate::middleware::RequireSellerAuth;
use crate::state::AppState;

use super::Pager;

/// Date format for order tables.
const DATE_FORMAT: &str = "%d %b %Y %H:%M";

/// Statuses a seller can move an order into, in menu order.
const TRANSITION_TARGETS: &[OrderStatus] = &[
    OrderStatus::Confirmed,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

/// Parse a status filter value from the query string.
fn parse_status(s: &str) -> Option<OrderStatus> {
    match s {
        "PENDING" => Some(OrderStatus::Pending),
        "CONFIRMED" => Some(OrderStatus::Confirmed),
        "PROCESSING" => Some(OrderStatus::Processing),
        "SHIPPED" => Some(OrderStatus::Shipped),
        "DELIVERED" => Some(OrderStatus::Delivered),
        "CANCELLED" => Some(OrderStatus::Cancelled),
        "RETURNED" => Some(OrderStatus::Returned),
        _ => None,
    }
}

fn format_price(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}

/// Query parameters for the order listing.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub page: Option<u32>,
    pub status: Option<String>,
}

/// Form input for a status transition.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Order row for the listing table.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: i32,
    pub reference: String,
    pub customer_email: String,
    pub status: String,
    pub payment_status: String,
    pub item_count: i64,
    pub total: String,
    pub placed_on: String,
}

impl From<&SellerOrder> for OrderRowView {
    fn from(order: &SellerOrder) -> Self {
        Self {
            id: order.id.as_i32(),
            reference: order.reference.clone(),
            customer_email: order.customer_email.clone(),
            status: order.status.label().to_string(),
            payment_status: format!("{:?}", order.payment_status),
            item_count: order.item_count,
            total: format_price(order.total, order.currency),
            placed_on: order.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Order line for the detail page.
#[derive(Debug, Clone)]
pub struct OrderItemRowView {
    pub title: String,
    pub quantity: i64,
    pub unit_price: String,
    pub line_total: String,
}

/// A status transition option for the detail page form.
#[derive(Debug, Clone)]
pub struct TransitionOption {
    pub value: String,
    pub label: String,
}

/// Full order data for the detail page.
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub id: i32,
    pub reference: String,
    pub customer_email: String,
    pub status: String,
    pub payment_status: String,
    pub items: Vec<OrderItemRowView>,
    pub total: String,
    pub shipping_address: String,
    pub placed_on: String,
}

impl From<&SellerOrder> for OrderDetailView {
    fn from(order: &SellerOrder) -> Self {
        Self {
            id: order.id.as_i32(),
            reference: order.reference.clone(),
            customer_email: order.customer_email.clone(),
            status: order.status.label().to_string(),
            payment_status: format!("{:?}", order.payment_status),
            items: order
                .items
                .iter()
                .map(|item| OrderItemRowView {
                    title: item.title.clone(),
                    quantity: item.quantity,
                    unit_price: format_price(item.unit_price, order.currency),
                    line_total: format_price(item.line_total, order.currency),
                })
                .collect(),
            total: format_price(order.total, order.currency),
            shipping_address: order.shipping_address.clone().unwrap_or_default(),
            placed_on: order.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Order listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub title: String,
    pub seller_name: String,
    pub orders: Vec<OrderRowView>,
    pub pager: Pager,
    pub status_filter: String,
}

/// Order detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub title: String,
    pub seller_name: String,
    pub order: OrderDetailView,
    pub transitions: Vec<TransitionOption>,
}

/// Display the order listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireSellerAuth(seller): RequireSellerAuth,
    Query(query): Query<OrdersQuery>,
) -> Result<OrdersIndexTemplate> {
    let status_filter = query.status.unwrap_or_default();
    let status = parse_status(&status_filter);
    let page = query.page.unwrap_or(1).max(1);

    let listing = state.api().list_orders(status, page).await?;

    Ok(OrdersIndexTemplate {
        title: "Orders".to_string(),
        seller_name: seller.display_name,
        orders: listing.items.iter().map(OrderRowView::from).collect(),
        pager: Pager::new(listing.page, listing.total_pages()),
        status_filter,
    })
}

/// Display one order.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireSellerAuth(seller): RequireSellerAuth,
    Path(id): Path<i32>,
) -> Result<OrderShowTemplate> {
    let order = state.api().get_order(OrderId::new(id)).await?;

    let transitions = TRANSITION_TARGETS
        .iter()
        .filter(|&&target| target != order.status)
        .map(|&target| TransitionOption {
            value: target.label().to_uppercase(),
            label: target.label().to_string(),
        })
        .collect();

    Ok(OrderShowTemplate {
        title: format!("Order {}", order.reference),
        seller_name: seller.display_name,
        order: OrderDetailView::from(&order),
        transitions,
    })
}

/// Transition an order to a new status.
///
/// The backend owns transition validity; an invalid move comes back 409
/// and is surfaced as-is.
#[instrument(skip(state, form), fields(order_id = id))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireSellerAuth(seller): RequireSellerAuth,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let status = parse_status(&form.status)
        .ok_or_else(|| AppError::BadRequest(format!("unknown status: {}", form.status)))?;

    let order = state
        .api()
        .update_order_status(OrderId::new(id), status)
        .await?;

    tracing::info!(
        seller = %seller.email,
        order_reference = %order.reference,
        new_status = status.label(),
        "Order status updated"
    );

    Ok(Redirect::to(&format!("/orders/{id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_known_values() {
        assert_eq!(parse_status("SHIPPED"), Some(OrderStatus::Shipped));
        assert_eq!(parse_status("PENDING"), Some(OrderStatus::Pending));
    }

    #[test]
    fn test_parse_status_unknown() {
        assert_eq!(parse_status("shipped"), None);
        assert_eq!(parse_status(""), None);
    }

    #[test]
    fn test_transition_targets_exclude_current() {
        let options: Vec<OrderStatus> = TRANSITION_TARGETS
            .iter()
            .copied()
            .filter(|&s| s != OrderStatus::Shipped)
            .collect();
        assert!(!options.contains(&OrderStatus::Shipped));
        assert!(options.contains(&OrderStatus::Delivered));
    }
}
