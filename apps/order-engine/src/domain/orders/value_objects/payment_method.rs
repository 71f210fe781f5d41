//! Payment method selected at checkout.
//!
//! Recorded on the order only; the engine never contacts a payment
//! gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the buyer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Unified Payments Interface transfer.
    Upi,
    /// Credit or debit card.
    Card,
    /// Cash on delivery.
    Cod,
}

impl PaymentMethod {
    /// Parse from the storage representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "UPI" => Some(Self::Upi),
            "CARD" => Some(Self::Card),
            "COD" => Some(Self::Cod),
            _ => None,
        }
    }

    /// Storage representation, matching the serde rename.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Card => "CARD",
            Self::Cod => "COD",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
