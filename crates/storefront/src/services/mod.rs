//! Business logic services for storefront.

pub mod auth;
