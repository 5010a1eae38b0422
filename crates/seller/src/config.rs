//! Seller dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SELLER_DATABASE_URL` - `PostgreSQL` connection string (same database
//!   as the storefront; the schema has a single owner)
//! - `SELLER_SESSION_SECRET` - Session signing secret (min 32 chars)
//! - `AZLOK_API_BASE_URL` - Base URL of the Azlok backend REST API
//! - `AZLOK_SELLER_API_TOKEN` - Service token for the backend's seller surface
//!
//! ## Optional
//! - `SELLER_HOST` - Bind address (default: 127.0.0.1)
//! - `SELLER_PORT` - Listen port (default: 3001)
//! - `SELLER_BASE_URL` - Public URL (default: <http://127.0.0.1:3001>)
//! - `SENTRY_DSN` / `SENTRY_ENVIRONMENT` - Error tracking

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Seller dashboard application configuration.
#[derive(Debug, Clone)]
pub struct SellerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL (used for the secure-cookie check)
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Azlok backend API configuration (seller surface)
    pub backend: SellerApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Backend API configuration for the seller surface.
///
/// Implements `Debug` manually to redact the service token.
#[derive(Clone)]
pub struct SellerApiConfig {
    /// Base URL of the backend API
    pub base_url: String,
    /// Bearer token for the seller surface (wider scope than the storefront
    /// token; this binary stays on the internal network)
    pub api_token: SecretString,
}

impl std::fmt::Debug for SellerApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SellerApiConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl SellerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SELLER_DATABASE_URL")?;
        let host = get_env_or_default("SELLER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SELLER_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SELLER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SELLER_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("SELLER_BASE_URL", "http://127.0.0.1:3001");

        let session_secret = SecretString::from(get_required_env("SELLER_SESSION_SECRET")?);
        validate_session_secret(&session_secret, "SELLER_SESSION_SECRET")?;

        let backend = SellerApiConfig {
            base_url: get_required_env("AZLOK_API_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            api_token: SecretString::from(get_required_env("AZLOK_SELLER_API_TOKEN")?),
        };

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            backend,
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            sentry_environment: std::env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "TEST").is_err());
    }

    #[test]
    fn test_validate_session_secret_ok() {
        let secret = SecretString::from("b".repeat(40));
        assert!(validate_session_secret(&secret, "TEST").is_ok());
    }

    #[test]
    fn test_api_config_debug_redacts_token() {
        let config = SellerApiConfig {
            base_url: "https://api.azlok.com".to_string(),
            api_token: SecretString::from("seller_tok_a1b2c3"),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("seller_tok_a1b2c3"));
    }
}
