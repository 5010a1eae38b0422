//! Unified error handling for the seller dashboard.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::SellerApiError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the seller dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Backend seller API operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] SellerApiError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Seller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Conflicting state (e.g., resolving a resolved request).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_) | Self::Backend(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Backend(err) => match err {
                SellerApiError::NotFound(_) => StatusCode::NOT_FOUND,
                SellerApiError::Conflict(_) => StatusCode::CONFLICT,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
        };

        // Internal details stay in the logs
        let message = match &self {
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(_)
            | Self::Internal(_)
            | Self::Auth(AuthError::Hash(_) | AuthError::Repository(_)) => {
                "Internal server error".to_string()
            }
            Self::Backend(SellerApiError::Conflict(msg)) => msg.clone(),
            Self::Backend(SellerApiError::NotFound(_)) => "Not found".to_string(),
            Self::Backend(_) => "External service error".to_string(),
            Self::Auth(_) => "Invalid credentials".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_409() {
        let err = AppError::Database(RepositoryError::Conflict(
            "request already resolved (APPROVED)".to_string(),
        ));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_backend_conflict_passes_through_as_409() {
        let err = AppError::Backend(SellerApiError::Conflict(
            "cannot ship a cancelled order".to_string(),
        ));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_repository_not_found_maps_to_404() {
        let err = AppError::Database(RepositoryError::NotFound);
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
