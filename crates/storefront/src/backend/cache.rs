//! Cache types for backend API responses.

use super::types::{Category, Page, Product};

/// Cached value types.
///
/// Carts, orders, and invoices are never cached; they are per-customer and
/// mutate under the shopper's feet.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Page<Product>),
    Categories(Vec<Category>),
    Category(Box<Category>),
    /// Pre-rendered sitemap XML (1 hour TTL, refreshed lazily).
    Sitemap(String),
}
