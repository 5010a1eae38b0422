//! Azlok backend REST API client.
//!
//! # Architecture
//!
//! - The backend API is the source of truth - NO local sync, direct calls
//! - Plain JSON over HTTP via `reqwest`, bearer-token service auth
//! - In-memory caching via `moka` for read-mostly responses (5 minute TTL,
//!   1 hour for sitemap source data)
//!
//! # Example
//!
//! ```rust,ignore
//! use azlok_storefront::backend::BackendClient;
//!
//! let client = BackendClient::new(&config.backend);
//!
//! // Get a product
//! let product = client.get_product_by_slug(&slug).await?;
//!
//! // Create a cart and add an item
//! let cart = client.create_cart().await?;
//! let cart = client.add_to_cart(&cart.id, product.id, 1).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::BackendClient;

use thiserror::Error;

/// Errors that can occur when calling the Azlok backend API.
#[derive(Debug, Error)]
pub enum BackendError {
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

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl BackendError {
    /// Whether this error means the entity simply does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::NotFound("product organic-honey".to_string());
        assert_eq!(err.to_string(), "Not found: product organic-honey");

        let err = BackendError::Api {
            status: 502,
            message: "upstream unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "backend returned 502: upstream unavailable");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = BackendError::RateLimited(30);
        assert_eq!(err.to_string(), "Rate limited, retry after 30 seconds");
        assert!(!err.is_not_found());
    }
}
