//! Business logic services for the seller dashboard.

pub mod auth;
