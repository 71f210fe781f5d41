//! Order State Machine Service
//!
//! Validates fulfillment status transitions. Transitions are strictly
//! forward along the happy path; cancellation is reachable from any
//! non-terminal state and absorbing once reached.

use crate::domain::orders::errors::OrderError;
use crate::domain::orders::value_objects::OrderStatus;

/// Order state machine for validating transitions.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Check if a state transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            // From Pending
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                // From Confirmed
                | (OrderStatus::Confirmed, OrderStatus::Shipped)
                | (OrderStatus::Confirmed, OrderStatus::Cancelled)
                // From Shipped
                | (OrderStatus::Shipped, OrderStatus::Delivered)
                | (OrderStatus::Shipped, OrderStatus::Cancelled)
        )
    }

    /// Validate a state transition.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidStateTransition`] if the transition
    /// is not allowed.
    pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(OrderError::InvalidStateTransition {
                from,
                to,
                reason: Self::transition_error_reason(from, to),
            })
        }
    }

    /// Get a human-readable reason for an invalid transition.
    #[must_use]
    pub fn transition_error_reason(from: OrderStatus, to: OrderStatus) -> String {
        match from {
            OrderStatus::Delivered => {
                format!("Order is already delivered, cannot transition to {to}")
            }
            OrderStatus::Cancelled => {
                format!("Order is cancelled, cannot transition to {to}")
            }
            _ => format!("Invalid transition from {from} to {to}"),
        }
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(from: OrderStatus) -> Vec<OrderStatus> {
        match from {
            OrderStatus::Pending => vec![OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => vec![OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => vec![OrderStatus::Delivered, OrderStatus::Cancelled],
            // Terminal states
            OrderStatus::Delivered | OrderStatus::Cancelled => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(OrderStatus::Pending, OrderStatus::Confirmed, true; "pending to confirmed")]
    #[test_case(OrderStatus::Pending, OrderStatus::Cancelled, true; "pending to cancelled")]
    #[test_case(OrderStatus::Confirmed, OrderStatus::Shipped, true; "confirmed to shipped")]
    #[test_case(OrderStatus::Confirmed, OrderStatus::Cancelled, true; "confirmed to cancelled")]
    #[test_case(OrderStatus::Shipped, OrderStatus::Delivered, true; "shipped to delivered")]
    #[test_case(OrderStatus::Shipped, OrderStatus::Cancelled, true; "shipped to cancelled")]
    #[test_case(OrderStatus::Pending, OrderStatus::Shipped, false; "no skipping confirmation")]
    #[test_case(OrderStatus::Pending, OrderStatus::Delivered, false; "no skipping to delivered")]
    #[test_case(OrderStatus::Confirmed, OrderStatus::Pending, false; "no moving backward")]
    #[test_case(OrderStatus::Shipped, OrderStatus::Confirmed, false; "no unshipping")]
    #[test_case(OrderStatus::Delivered, OrderStatus::Cancelled, false; "delivered is terminal")]
    #[test_case(OrderStatus::Cancelled, OrderStatus::Pending, false; "cancelled is absorbing")]
    #[test_case(OrderStatus::Cancelled, OrderStatus::Confirmed, false; "no reviving cancelled")]
    #[test_case(OrderStatus::Pending, OrderStatus::Pending, false; "no self transition")]
    fn transition_matrix(from: OrderStatus, to: OrderStatus, valid: bool) {
        assert_eq!(OrderStateMachine::is_valid_transition(from, to), valid);
    }

    #[test]
    fn validate_transition_reports_reason() {
        let err = OrderStateMachine::validate_transition(
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        )
        .unwrap_err();
        match err {
            OrderError::InvalidStateTransition { reason, .. } => {
                assert!(reason.contains("already delivered"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn terminal_states_have_no_next_states() {
        assert!(OrderStateMachine::valid_next_states(OrderStatus::Delivered).is_empty());
        assert!(OrderStateMachine::valid_next_states(OrderStatus::Cancelled).is_empty());
    }

    #[test]
    fn every_non_terminal_state_can_cancel() {
        for from in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
        ] {
            assert!(
                OrderStateMachine::valid_next_states(from).contains(&OrderStatus::Cancelled),
                "{from} should allow cancellation"
            );
        }
    }
}
