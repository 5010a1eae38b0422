//! Wire types for the backend API's seller surface.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use azlok_core::{CurrencyCode, OrderId, OrderStatus, PaymentStatus, ProductId, Slug};

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// Total number of pages for this listing.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.per_page));
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }
}

/// One sellable product with its stock level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub product_id: ProductId,
    pub slug: Slug,
    pub title: String,
    pub sku: Option<String>,
    pub image_url: Option<String>,
    pub stock_quantity: i64,
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub in_stock: bool,
    pub updated_at: DateTime<Utc>,
}

/// An order as the seller sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerOrder {
    pub id: OrderId,
    pub reference: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub customer_email: String,
    #[serde(default)]
    pub items: Vec<SellerOrderItem>,
    pub item_count: i64,
    pub total: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub shipping_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line in a seller order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerOrderItem {
    pub title: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Request body for a relative stock adjustment.
#[derive(Debug, Clone, Serialize)]
pub struct AdjustStockRequest {
    pub delta: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Request body for an absolute stock level.
#[derive(Debug, Clone, Serialize)]
pub struct SetStockRequest {
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Request body for an order status transition.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_item_deserializes_backend_json() {
        let json = r#"{
            "product_id": 41,
            "slug": "organic-wild-honey-500g",
            "title": "Organic Wild Honey 500g",
            "sku": "HNY-500",
            "image_url": null,
            "stock_quantity": 7,
            "price": "499.00",
            "currency": "INR",
            "in_stock": true,
            "updated_at": "2026-03-02T10:15:00Z"
        }"#;

        let item: InventoryItem = serde_json::from_str(json).expect("deserialize");
        assert_eq!(item.stock_quantity, 7);
        assert_eq!(item.sku.as_deref(), Some("HNY-500"));
    }

    #[test]
    fn test_update_status_serializes_screaming_snake() {
        let body = UpdateOrderStatusRequest {
            status: OrderStatus::Shipped,
        };
        let json = serde_json::to_string(&body).expect("serialize");
        assert_eq!(json, r#"{"status":"SHIPPED"}"#);
    }
}
