//! HTTP client for the Azlok backend REST API.
//!
//! Read-mostly catalog endpoints are cached for 5 minutes; cart, order, and
//! invoice calls always go to the backend.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use azlok_core::Slug;

use crate::config::BackendApiConfig;

use super::BackendError;
use super::cache::CacheValue;
use super::types::{
    Cart, CartSummary, Category, ConfirmPaymentRequest, CreateOrderRequest, FailPaymentRequest,
    Invoice, Order, Page, Product, ProductSort, SearchFilters,
};

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Page size used when walking the full catalog for the sitemap.
const SITEMAP_PAGE_SIZE: u32 = 200;

/// Client for the Azlok backend REST API.
///
/// Cheaply cloneable; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    cache: Cache<String, CacheValue>,
    sitemap_cache: Cache<String, CacheValue>,
}

impl BackendClient {
    /// Create a new backend API client.
    #[must_use]
    pub fn new(config: &BackendApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let sitemap_cache = Cache::builder()
            .max_capacity(4)
            .time_to_live(Duration::from_secs(3600)) // 1 hour
            .build();

        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config.api_token.expose_secret().to_string(),
                cache,
                sitemap_cache,
            }),
        }
    }

    /// Execute a request and parse the JSON response.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T, BackendError> {
        let url = format!("{}{path}", self.inner.base_url);

        let mut request = self
            .inner
            .client
            .request(method, &url)
            .bearer_auth(&self.inner.api_token)
            .header("Accept", "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting before consuming the body
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(BackendError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path = %path,
                body = %response_text.chars().take(500).collect::<String>(),
                "Backend API returned non-success status"
            );
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %path,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse backend API response"
                );
                Err(BackendError::Parse(e))
            }
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        self.execute(Method::GET, path, query, None).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, BackendError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, &[], Some(&body)).await
    }

    async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, BackendError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PATCH, path, &[], Some(&body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        self.execute(Method::DELETE, path, &[], None).await
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(&self, slug: &Slug) -> Result<Product, BackendError> {
        let cache_key = format!("product:{slug}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self
            .get(&format!("/v1/products/slug/{slug}"), &[])
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// List products, newest first by default.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u32,
        category: Option<&Slug>,
        sort: ProductSort,
    ) -> Result<Page<Product>, BackendError> {
        let cache_key = format!(
            "products:{page}:{}:{}",
            category.map_or("", Slug::as_str),
            sort.as_query_value()
        );

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product listing");
            return Ok(products);
        }

        let mut query = vec![
            ("page", page.to_string()),
            ("per_page", DEFAULT_PAGE_SIZE.to_string()),
            ("sort", sort.as_query_value().to_string()),
        ];
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }

        let products: Page<Product> = self.get("/v1/products", &query).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Featured products for the home page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> Result<Vec<Product>, BackendError> {
        let cache_key = "products:featured".to_string();

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for featured products");
            return Ok(products.items);
        }

        let items: Vec<Product> = self.get("/v1/products/featured", &[]).await?;

        let total = items.len() as u64;
        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Products(Page {
                    items: items.clone(),
                    page: 1,
                    per_page: DEFAULT_PAGE_SIZE,
                    total,
                }),
            )
            .await;

        Ok(items)
    }

    /// Walk the whole catalog, page by page, for sitemap generation.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn all_products(&self) -> Result<Vec<Product>, BackendError> {
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let query = vec![
                ("page", page.to_string()),
                ("per_page", SITEMAP_PAGE_SIZE.to_string()),
            ];
            let batch: Page<Product> = self.get("/v1/products", &query).await?;
            let has_next = batch.has_next();
            all.extend(batch.items);

            if !has_next {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get("/v1/categories", &[]).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get a category by its slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found or the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_category_by_slug(&self, slug: &Slug) -> Result<Category, BackendError> {
        let cache_key = format!("category:{slug}");

        if let Some(CacheValue::Category(category)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(*category);
        }

        let category: Category = self
            .get(&format!("/v1/categories/slug/{slug}"), &[])
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Category(Box::new(category.clone())))
            .await;

        Ok(category)
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Search products via the backend search endpoint.
    ///
    /// Not cached: queries are long-tail and results change with stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(query = %filters.query))]
    pub async fn search_products(
        &self,
        filters: &SearchFilters,
    ) -> Result<Page<Product>, BackendError> {
        let mut query = vec![
            ("q", filters.query.clone()),
            ("page", filters.page.max(1).to_string()),
            ("per_page", DEFAULT_PAGE_SIZE.to_string()),
        ];
        if let Some(min) = filters.min_price {
            query.push(("min_price", min.to_string()));
        }
        if let Some(max) = filters.max_price {
            query.push(("max_price", max.to_string()));
        }
        if filters.in_stock_only {
            query.push(("in_stock", "1".to_string()));
        }

        self.get("/v1/search", &query).await
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Create a new, empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<Cart, BackendError> {
        self.post("/v1/carts", &serde_json::json!({})).await
    }

    /// Get a cart by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found or the API request fails.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, cart_id: &str) -> Result<Cart, BackendError> {
        self.get(&format!("/v1/carts/{cart_id}"), &[]).await
    }

    /// Add a product to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        cart_id: &str,
        product_id: azlok_core::ProductId,
        quantity: i64,
    ) -> Result<Cart, BackendError> {
        self.post(
            &format!("/v1/carts/{cart_id}/items"),
            &serde_json::json!({ "product_id": product_id, "quantity": quantity }),
        )
        .await
    }

    /// Update the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn update_cart_line(
        &self,
        cart_id: &str,
        line_id: &str,
        quantity: i64,
    ) -> Result<Cart, BackendError> {
        self.patch(
            &format!("/v1/carts/{cart_id}/items/{line_id}"),
            &serde_json::json!({ "quantity": quantity }),
        )
        .await
    }

    /// Remove a line from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn remove_cart_line(&self, cart_id: &str, line_id: &str) -> Result<Cart, BackendError> {
        self.delete(&format!("/v1/carts/{cart_id}/items/{line_id}"))
            .await
    }

    /// Cart totals (shipping and tax included) for checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn cart_summary(&self, cart_id: &str) -> Result<CartSummary, BackendError> {
        self.get(&format!("/v1/carts/{cart_id}/summary"), &[]).await
    }

    // =========================================================================
    // Order & Invoice Methods
    // =========================================================================

    /// Create a backend order from a cart at checkout time.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, request), fields(cart_id = %request.cart_id))]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, BackendError> {
        self.post("/v1/orders", request).await
    }

    /// Mark an order paid after signature verification succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, request), fields(razorpay_order_id = %request.razorpay_order_id))]
    pub async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
    ) -> Result<Order, BackendError> {
        self.post("/v1/payments/confirm", request).await
    }

    /// Record a failed payment against an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, request), fields(razorpay_order_id = %request.razorpay_order_id))]
    pub async fn fail_payment(&self, request: &FailPaymentRequest) -> Result<Order, BackendError> {
        self.post("/v1/payments/fail", request).await
    }

    /// List a customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        customer_email: &str,
        page: u32,
    ) -> Result<Page<Order>, BackendError> {
        let query = vec![
            ("customer_email", customer_email.to_string()),
            ("page", page.max(1).to_string()),
        ];
        self.get("/v1/orders", &query).await
    }

    /// Get one order by ID, scoped to a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the API request fails.
    #[instrument(skip(self))]
    pub async fn get_order(
        &self,
        order_id: azlok_core::OrderId,
        customer_email: &str,
    ) -> Result<Order, BackendError> {
        let query = vec![("customer_email", customer_email.to_string())];
        self.get(&format!("/v1/orders/{order_id}"), &query).await
    }

    /// List a customer's invoices, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_invoices(
        &self,
        customer_email: &str,
        page: u32,
    ) -> Result<Page<Invoice>, BackendError> {
        let query = vec![
            ("customer_email", customer_email.to_string()),
            ("page", page.max(1).to_string()),
        ];
        self.get("/v1/invoices", &query).await
    }

    /// Get one invoice by ID, scoped to a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is not found or the API request fails.
    #[instrument(skip(self))]
    pub async fn get_invoice(
        &self,
        invoice_id: azlok_core::InvoiceId,
        customer_email: &str,
    ) -> Result<Invoice, BackendError> {
        let query = vec![("customer_email", customer_email.to_string())];
        self.get(&format!("/v1/invoices/{invoice_id}"), &query)
            .await
    }

    // =========================================================================
    // Sitemap Cache
    // =========================================================================

    /// Get the cached sitemap XML, if still fresh.
    pub async fn cached_sitemap(&self) -> Option<String> {
        match self.inner.sitemap_cache.get("sitemap").await {
            Some(CacheValue::Sitemap(xml)) => Some(xml),
            _ => None,
        }
    }

    /// Store freshly rendered sitemap XML (1 hour TTL).
    pub async fn store_sitemap(&self, xml: String) {
        self.inner
            .sitemap_cache
            .insert("sitemap".to_string(), CacheValue::Sitemap(xml))
            .await;
    }
}
