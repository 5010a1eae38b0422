//! Status enums for orders, payments, invoices, and deletion requests.
//!
//! All serialize as `SCREAMING_SNAKE_CASE` to match the backend API's JSON.
//! Local Postgres stores them as TEXT via `as_str`/`FromStr`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Order lifecycle status, as reported by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Returned => "Returned",
        }
    }
}

/// Payment lifecycle status, mirroring Razorpay's order/payment states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Created,
    Authorized,
    Captured,
    Failed,
    Refunded,
}

/// Invoice status, as reported by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Issued,
    Paid,
    Cancelled,
}

/// Status of an account-deletion request.
///
/// The only transition is a single admin action moving a `Pending` request
/// to `Approved` or `Rejected`. Approved and rejected requests are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeletionRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl DeletionRequestStatus {
    /// TEXT representation stored in Postgres.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Whether an admin can still act on the request.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for DeletionRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`DeletionRequestStatus`] from its TEXT form.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown deletion request status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for DeletionRequestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serde() {
        let json = serde_json::to_string(&OrderStatus::Shipped).expect("serialize");
        assert_eq!(json, "\"SHIPPED\"");
        let back: OrderStatus = serde_json::from_str("\"DELIVERED\"").expect("deserialize");
        assert_eq!(back, OrderStatus::Delivered);
    }

    #[test]
    fn test_deletion_status_text_roundtrip() {
        for status in [
            DeletionRequestStatus::Pending,
            DeletionRequestStatus::Approved,
            DeletionRequestStatus::Rejected,
        ] {
            let parsed: DeletionRequestStatus =
                status.as_str().parse().expect("roundtrip");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_deletion_status_unknown() {
        let err = "CLOSED".parse::<DeletionRequestStatus>();
        assert!(err.is_err());
    }

    #[test]
    fn test_deletion_status_is_pending() {
        assert!(DeletionRequestStatus::Pending.is_pending());
        assert!(!DeletionRequestStatus::Approved.is_pending());
        assert!(!DeletionRequestStatus::Rejected.is_pending());
    }

    #[test]
    fn test_payment_status_serde() {
        let back: PaymentStatus = serde_json::from_str("\"CAPTURED\"").expect("deserialize");
        assert_eq!(back, PaymentStatus::Captured);
    }
}
