//! HTTP middleware for the seller dashboard.
//!
//! The dashboard runs on the internal network; the stack is sessions plus
//! an auth extractor. Public-internet hardening (rate limits, CSP) lives in
//! the storefront.

pub mod auth;
pub mod session;

pub use auth::{RequireSellerAuth, clear_current_seller, set_current_seller};
pub use session::{create_session_layer, create_session_store};
