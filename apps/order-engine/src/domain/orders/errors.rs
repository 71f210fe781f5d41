//! Orders domain errors

use std::fmt;

use crate::domain::orders::value_objects::{ActorRole, OrderStatus};
use crate::domain::shared::OrderId;

/// Errors raised by order aggregate operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Requested status transition is not allowed by the state machine.
    InvalidStateTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
        /// Human-readable reason.
        reason: String,
    },
    /// Order is in a terminal state and can never change again.
    TerminalOrder {
        /// The terminal status.
        status: OrderStatus,
    },
    /// Actor is not allowed to perform this operation.
    Unauthorized {
        /// Role the actor holds.
        role: ActorRole,
        /// What was attempted.
        action: String,
    },
    /// An order must contain at least one line item.
    EmptyOrder,
    /// Command carried invalid parameters.
    InvalidParameters {
        /// What was wrong.
        reason: String,
    },
    /// Order does not exist.
    NotFound {
        /// The missing order.
        order_id: OrderId,
    },
    /// Persistence failure below the repository port.
    Storage {
        /// Storage-level detail.
        message: String,
    },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStateTransition { from, to, reason } => {
                write!(f, "invalid transition from {from} to {to}: {reason}")
            }
            Self::TerminalOrder { status } => {
                write!(f, "order is {status} and cannot change further")
            }
            Self::Unauthorized { role, action } => {
                write!(f, "{role} is not permitted to {action}")
            }
            Self::EmptyOrder => write!(f, "an order must contain at least one line item"),
            Self::InvalidParameters { reason } => write!(f, "invalid order parameters: {reason}"),
            Self::NotFound { order_id } => write!(f, "order {order_id} not found"),
            Self::Storage { message } => write!(f, "order storage failure: {message}"),
        }
    }
}

impl std::error::Error for OrderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_both_states() {
        let err = OrderError::InvalidStateTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
            reason: "order already delivered".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("DELIVERED"));
        assert!(text.contains("PENDING"));
    }

    #[test]
    fn unauthorized_names_role() {
        let err = OrderError::Unauthorized {
            role: ActorRole::Customer,
            action: "advance order status".to_string(),
        };
        assert!(err.to_string().contains("CUSTOMER"));
    }
}
