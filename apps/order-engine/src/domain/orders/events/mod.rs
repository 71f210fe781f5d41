//! Order Domain Events
//!
//! Raised by the aggregate and drained by the application layer for
//! fan-out and realtime broadcast.

use serde::{Deserialize, Serialize};

use crate::domain::orders::value_objects::OrderStatus;
use crate::domain::shared::{Money, OrderId, Timestamp, UserId};

/// Something that happened to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    /// A new order was committed.
    OrderPlaced {
        /// The order.
        order_id: OrderId,
        /// The buyer.
        customer_id: UserId,
        /// Distinct sellers with at least one line item in the order.
        seller_ids: Vec<UserId>,
        /// Grand total including delivery fee.
        total: Money,
        /// Commit time.
        placed_at: Timestamp,
    },
    /// An order moved to a new fulfillment status.
    OrderStatusChanged {
        /// The order.
        order_id: OrderId,
        /// The buyer who owns the order.
        customer_id: UserId,
        /// Previous status.
        from: OrderStatus,
        /// New status.
        to: OrderStatus,
        /// Transition time.
        changed_at: Timestamp,
    },
}

impl OrderEvent {
    /// The order this event concerns.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        match self {
            Self::OrderPlaced { order_id, .. } | Self::OrderStatusChanged { order_id, .. } => {
                order_id
            }
        }
    }

    /// The buyer who owns the order this event concerns.
    #[must_use]
    pub const fn customer_id(&self) -> &UserId {
        match self {
            Self::OrderPlaced { customer_id, .. }
            | Self::OrderStatusChanged { customer_id, .. } => customer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_accessor_covers_variants() {
        let placed = OrderEvent::OrderPlaced {
            order_id: OrderId::new("o-1"),
            customer_id: UserId::new("u-1"),
            seller_ids: vec![UserId::new("s-1")],
            total: Money::from_units(230),
            placed_at: Timestamp::now(),
        };
        assert_eq!(placed.order_id().as_str(), "o-1");

        let changed = OrderEvent::OrderStatusChanged {
            order_id: OrderId::new("o-2"),
            customer_id: UserId::new("u-1"),
            from: OrderStatus::Pending,
            to: OrderStatus::Confirmed,
            changed_at: Timestamp::now(),
        };
        assert_eq!(changed.order_id().as_str(), "o-2");
    }
}
