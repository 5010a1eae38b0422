//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `STOREFRONT_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//! - `AZLOK_API_BASE_URL` - Base URL of the Azlok backend REST API
//! - `AZLOK_API_TOKEN` - Service token for the backend API
//! - `RAZORPAY_KEY_ID` - Razorpay API key ID (safe to expose in checkout)
//! - `RAZORPAY_KEY_SECRET` - Razorpay API key secret (server-side only)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `RAZORPAY_WEBHOOK_SECRET` - Webhook signature secret (webhook route is
//!   disabled without it)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., production)
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Tracing sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

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

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront (used for canonical URLs and sitemaps)
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Azlok backend API configuration
    pub backend: BackendApiConfig,
    /// Razorpay payment configuration
    pub razorpay: RazorpayConfig,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Azlok backend REST API configuration.
///
/// Implements `Debug` manually to redact the service token.
#[derive(Clone)]
pub struct BackendApiConfig {
    /// Base URL of the backend API (e.g., <https://api.azlok.com>)
    pub base_url: String,
    /// Bearer token identifying this frontend to the backend
    pub api_token: SecretString,
}

impl std::fmt::Debug for BackendApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendApiConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

/// Razorpay API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Key ID (public; embedded in the checkout page)
    pub key_id: String,
    /// Key secret (server-side only; signs and verifies payments)
    pub key_secret: SecretString,
    /// Webhook signing secret, if webhooks are configured
    pub webhook_secret: Option<SecretString>,
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    /// Sentry DSN (tracking disabled when unset)
    pub dsn: Option<String>,
    /// Environment name reported to Sentry
    pub environment: Option<String>,
    /// Error event sample rate (0.0 - 1.0)
    pub sample_rate: f32,
    /// Performance tracing sample rate (0.0 - 1.0)
    pub traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOREFRONT_DATABASE_URL")?;
        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        let session_secret = get_validated_secret("STOREFRONT_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "STOREFRONT_SESSION_SECRET")?;

        let backend = BackendApiConfig::from_env()?;
        let razorpay = RazorpayConfig::from_env()?;
        let sentry = SentryConfig::from_env()?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            backend,
            razorpay,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BackendApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("AZLOK_API_BASE_URL")?;
        // A trailing slash would produce double slashes in endpoint paths
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            base_url,
            api_token: get_validated_secret("AZLOK_API_TOKEN")?,
        })
    }
}

impl RazorpayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            key_id: get_required_env("RAZORPAY_KEY_ID")?,
            key_secret: get_validated_secret("RAZORPAY_KEY_SECRET")?,
            webhook_secret: get_optional_secret("RAZORPAY_WEBHOOK_SECRET"),
        })
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let sample_rate = get_env_or_default("SENTRY_SAMPLE_RATE", "1.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), e.to_string())
            })?;
        let traces_sample_rate = get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_TRACES_SAMPLE_RATE".to_string(), e.to_string())
            })?;

        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate,
            traces_sample_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    // Try primary key first (e.g., STOREFRONT_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL (set by managed postgres attach)
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an optional environment variable as a secret.
fn get_optional_secret(key: &str) -> Option<SecretString> {
    std::env::var(key).ok().map(SecretString::from)
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
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

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        // Random-looking string should have high entropy
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        let result = validate_session_secret(&secret, "TEST_SESSION");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_session_secret_valid_length() {
        let secret = SecretString::from("a".repeat(32));
        let result = validate_session_secret(&secret, "TEST_SESSION");
        assert!(result.is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            backend: BackendApiConfig {
                base_url: "http://localhost:8000".to_string(),
                api_token: SecretString::from("token"),
            },
            razorpay: RazorpayConfig {
                key_id: "rzp_test_1DP5mmOlF5G5ag".to_string(),
                key_secret: SecretString::from("rzp_secret"),
                webhook_secret: None,
            },
            sentry: SentryConfig::default(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_backend_config_debug_redacts_token() {
        let config = BackendApiConfig {
            base_url: "https://api.azlok.com".to_string(),
            api_token: SecretString::from("svc_tok_9f8e7d6c"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("https://api.azlok.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("svc_tok_9f8e7d6c"));
    }

    #[test]
    fn test_razorpay_config_debug_redacts_secrets() {
        let config = RazorpayConfig {
            key_id: "rzp_test_1DP5mmOlF5G5ag".to_string(),
            key_secret: SecretString::from("very_private_value"),
            webhook_secret: Some(SecretString::from("hook_private_value")),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("rzp_test_1DP5mmOlF5G5ag"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very_private_value"));
        assert!(!debug_output.contains("hook_private_value"));
    }
}
