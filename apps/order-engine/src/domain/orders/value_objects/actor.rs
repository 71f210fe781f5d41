//! Authenticated actor identity.
//!
//! Identity and role arrive from the session provider; the engine
//! trusts them for ownership and authorization checks but performs no
//! authentication itself.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::UserId;

/// Role a user acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    /// Buys products; owns carts and reads own orders.
    Customer,
    /// Lists products; may advance order status.
    Seller,
    /// Platform operator; may advance any order and sees all orders.
    Admin,
}

impl ActorRole {
    /// Returns true if this role may advance an order's status.
    #[must_use]
    pub const fn can_advance_orders(&self) -> bool {
        matches!(self, Self::Seller | Self::Admin)
    }

    /// Parse from the header/storage representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CUSTOMER" => Some(Self::Customer),
            "SELLER" => Some(Self::Seller),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Header/storage representation, matching the serde rename.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Seller => "SELLER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated user plus the role they act under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user's identity.
    pub user_id: UserId,
    /// The role granted by the session provider.
    pub role: ActorRole,
}

impl Actor {
    /// Create an actor.
    #[must_use]
    pub const fn new(user_id: UserId, role: ActorRole) -> Self {
        Self { user_id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_seller_and_admin_advance_orders() {
        assert!(!ActorRole::Customer.can_advance_orders());
        assert!(ActorRole::Seller.can_advance_orders());
        assert!(ActorRole::Admin.can_advance_orders());
    }

    #[test]
    fn parse_round_trips_as_str() {
        for role in [ActorRole::Customer, ActorRole::Seller, ActorRole::Admin] {
            assert_eq!(ActorRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(ActorRole::parse("ROOT"), None);
    }
}
