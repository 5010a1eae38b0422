//! Wire types for the Azlok backend REST API.
//!
//! Field names match the backend's JSON exactly; prices arrive as decimal
//! strings and are parsed into `rust_decimal::Decimal` (the `serde-with-str`
//! feature handles the string form).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use azlok_core::{
    CategoryId, CurrencyCode, InvoiceId, InvoiceStatus, OrderId, OrderItemId, OrderStatus,
    PaymentStatus, ProductId, Slug,
};

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

    /// Whether a page after `self.page` exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// A marketplace product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: Slug,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub compare_at_price: Option<Decimal>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub category: Option<CategoryRef>,
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: i64,
    pub updated_at: DateTime<Utc>,
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub alt: Option<String>,
}

/// Category summary embedded in a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub slug: Slug,
    pub name: String,
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: Slug,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub product_count: i64,
    pub updated_at: DateTime<Utc>,
}

/// A shopping cart held by the backend.
///
/// Cart IDs are opaque strings minted by the backend; the storefront keeps
/// the current one in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    #[serde(default)]
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub total_quantity: i64,
}

/// One line in a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    pub product_id: ProductId,
    pub slug: Slug,
    pub title: String,
    pub image_url: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Cart totals as computed by the backend (shipping and tax included).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSummary {
    pub cart_id: String,
    pub item_count: i64,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
}

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order reference (e.g., "AZ-2026-001234").
    pub reference: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub razorpay_order_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line in an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub title: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// A customer invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Sequential invoice number (e.g., "INV-2026-04567").
    pub number: String,
    pub order_id: OrderId,
    pub status: InvoiceStatus,
    pub total: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub issued_at: Option<DateTime<Utc>>,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a backend order at checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub cart_id: String,
    pub customer_email: String,
    pub razorpay_order_id: String,
}

/// Request body for confirming a verified payment.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
}

/// Request body for recording a failed payment.
#[derive(Debug, Clone, Serialize)]
pub struct FailPaymentRequest {
    pub razorpay_order_id: String,
    pub reason: Option<String>,
}

/// Sort orders accepted by the product listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    TitleAsc,
}

impl ProductSort {
    /// Query-string value understood by the backend.
    #[must_use]
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::TitleAsc => "title_asc",
        }
    }

    /// Parse a user-supplied sort parameter, defaulting to newest.
    #[must_use]
    pub fn from_query_value(s: &str) -> Self {
        match s {
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            "title_asc" => Self::TitleAsc,
            _ => Self::Newest,
        }
    }
}

/// Filters for the search passthrough endpoint.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub query: String,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock_only: bool,
    pub page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_total_pages() {
        let page = Page::<Product> {
            items: Vec::new(),
            page: 1,
            per_page: 24,
            total: 100,
        };
        assert_eq!(page.total_pages(), 5);
        assert!(page.has_next());
    }

    #[test]
    fn test_page_empty_listing_has_one_page() {
        let page = Page::<Product> {
            items: Vec::new(),
            page: 1,
            per_page: 24,
            total: 0,
        };
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_product_deserializes_backend_json() {
        let json = r#"{
            "id": 41,
            "slug": "organic-wild-honey-500g",
            "title": "Organic Wild Honey 500g",
            "description": "Raw honey from the Nilgiris.",
            "price": "499.00",
            "currency": "INR",
            "compare_at_price": "599.00",
            "image_url": "https://cdn.azlok.com/p/41/main.jpg",
            "images": [{"url": "https://cdn.azlok.com/p/41/main.jpg", "alt": "Jar of honey"}],
            "category": {"id": 3, "slug": "pantry", "name": "Pantry"},
            "in_stock": true,
            "stock_quantity": 112,
            "updated_at": "2026-03-02T10:15:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).expect("deserialize product");
        assert_eq!(product.slug.as_str(), "organic-wild-honey-500g");
        assert_eq!(product.price, Decimal::new(49_900, 2));
        assert_eq!(product.currency, CurrencyCode::INR);
        assert_eq!(
            product.category.as_ref().map(|c| c.slug.as_str()),
            Some("pantry")
        );
    }

    #[test]
    fn test_product_sort_roundtrip() {
        assert_eq!(ProductSort::from_query_value("price_desc"), ProductSort::PriceDesc);
        assert_eq!(ProductSort::from_query_value("garbage"), ProductSort::Newest);
        assert_eq!(ProductSort::PriceAsc.as_query_value(), "price_asc");
    }
}
