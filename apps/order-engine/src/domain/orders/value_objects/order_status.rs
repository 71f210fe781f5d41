//! Order status in the fulfillment lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order fulfillment status.
///
/// The happy path is strictly forward: `Pending` → `Confirmed` →
/// `Shipped` → `Delivered`. `Cancelled` is reachable from any
/// non-terminal state. `Delivered` and `Cancelled` are terminal; there
/// is no transition back to an earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order committed, awaiting seller confirmation.
    Pending,
    /// Seller has acknowledged the order.
    Confirmed,
    /// Order handed to the carrier.
    Shipped,
    /// Order received by the customer.
    Delivered,
    /// Order cancelled before delivery.
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Returns true if the order is still moving through fulfillment.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Shipped)
    }

    /// Returns true if the order can still be cancelled.
    #[must_use]
    pub const fn is_cancelable(&self) -> bool {
        self.is_active()
    }

    /// Parse from the storage representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "SHIPPED" => Some(Self::Shipped),
            "DELIVERED" => Some(Self::Delivered),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Storage representation, matching the serde rename.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
