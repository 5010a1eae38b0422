//! Client for the backend API's seller surface.
//!
//! Separate from the storefront's client on purpose: it authenticates with
//! a wider-scoped token and talks to `/v1/seller/*` endpoints, and this
//! binary never gains the storefront's cache-heavy read paths.

pub mod types;

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use azlok_core::{OrderId, OrderStatus, ProductId};

use crate::config::SellerApiConfig;

use types::{
    AdjustStockRequest, InventoryItem, Page, SellerOrder, SetStockRequest,
    UpdateOrderStatusRequest,
};

/// Page size for dashboard listings.
pub const PAGE_SIZE: u32 = 50;

/// Errors from the seller backend client.
#[derive(Debug, Error)]
pub enum SellerApiError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("backend returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Body excerpt from the backend response.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected a state transition (e.g., shipping a cancelled order).
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Filters for the inventory listing.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub query: Option<String>,
    pub low_stock_only: bool,
    pub page: u32,
}

/// Client for the seller surface of the backend API.
#[derive(Clone)]
pub struct SellerApiClient {
    inner: Arc<SellerApiClientInner>,
}

struct SellerApiClientInner {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl SellerApiClient {
    /// Create a new seller API client.
    #[must_use]
    pub fn new(config: &SellerApiConfig) -> Self {
        Self {
            inner: Arc::new(SellerApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config.api_token.expose_secret().to_string(),
            }),
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T, SellerApiError> {
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
        let response_text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(SellerApiError::NotFound(path.to_string()));
        }

        // Invalid transitions come back as 409 and are user-visible
        if status == StatusCode::CONFLICT {
            return Err(SellerApiError::Conflict(
                response_text.chars().take(200).collect(),
            ));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path = %path,
                body = %response_text.chars().take(500).collect::<String>(),
                "Seller API returned non-success status"
            );
            return Err(SellerApiError::Api {
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
                    "Failed to parse seller API response"
                );
                Err(SellerApiError::Parse(e))
            }
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SellerApiError> {
        self.execute(Method::GET, path, query, None).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, SellerApiError> {
        let body = serde_json::to_value(body)?;
        self.execute(method, path, &[], Some(&body)).await
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// List inventory rows, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_inventory(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Page<InventoryItem>, SellerApiError> {
        let mut query = vec![
            ("page", filter.page.max(1).to_string()),
            ("per_page", PAGE_SIZE.to_string()),
        ];
        if let Some(q) = &filter.query {
            query.push(("q", q.clone()));
        }
        if filter.low_stock_only {
            query.push(("low_stock", "1".to_string()));
        }

        self.get("/v1/seller/inventory", &query).await
    }

    /// Apply a relative stock adjustment.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn adjust_stock(
        &self,
        product_id: ProductId,
        delta: i64,
        reason: Option<String>,
    ) -> Result<InventoryItem, SellerApiError> {
        self.send(
            Method::POST,
            &format!("/v1/seller/inventory/{product_id}/adjust"),
            &AdjustStockRequest { delta, reason },
        )
        .await
    }

    /// Set an absolute stock level.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn set_stock(
        &self,
        product_id: ProductId,
        quantity: i64,
        reason: Option<String>,
    ) -> Result<InventoryItem, SellerApiError> {
        self.send(
            Method::PUT,
            &format!("/v1/seller/inventory/{product_id}"),
            &SetStockRequest { quantity, reason },
        )
        .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List seller orders, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        page: u32,
    ) -> Result<Page<SellerOrder>, SellerApiError> {
        let mut query = vec![
            ("page", page.max(1).to_string()),
            ("per_page", PAGE_SIZE.to_string()),
        ];
        if let Some(status) = status {
            // Query values use the same SCREAMING_SNAKE_CASE as the JSON
            let value = serde_json::to_value(status)?;
            if let Some(s) = value.as_str() {
                query.push(("status", s.to_string()));
            }
        }

        self.get("/v1/seller/orders", &query).await
    }

    /// Get one order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the API request fails.
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<SellerOrder, SellerApiError> {
        self.get(&format!("/v1/seller/orders/{order_id}"), &[])
            .await
    }

    /// Transition an order to a new status.
    ///
    /// The backend enforces transition validity; an invalid transition
    /// surfaces as [`SellerApiError::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the transition is
    /// rejected.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<SellerOrder, SellerApiError> {
        self.send(
            Method::POST,
            &format!("/v1/seller/orders/{order_id}/status"),
            &UpdateOrderStatusRequest { status },
        )
        .await
    }
}
