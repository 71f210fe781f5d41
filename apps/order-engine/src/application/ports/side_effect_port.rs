//! Side Effect Port (Driven Port)
//!
//! Fire-and-forget hook the checkout path invokes after a successful
//! commit. In production this fronts the notification fan-out; its
//! failure is logged and never surfaces to the buyer.

use async_trait::async_trait;

use crate::domain::orders::Order;

/// Side effect dispatch error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SideEffectError {
    /// The handler could not be reached or failed downstream.
    #[error("side effect dispatch failed: {message}")]
    DispatchFailed {
        /// Detail.
        message: String,
    },
}

/// Port for out-of-band work triggered by a committed order.
#[async_trait]
pub trait SideEffectPort: Send + Sync {
    /// Run post-commit side work for a freshly placed order.
    ///
    /// # Errors
    ///
    /// Returns error if dispatch fails; callers log and move on.
    async fn order_placed(&self, order: &Order) -> Result<(), SideEffectError>;
}

/// No-op side effect handler for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpSideEffects;

#[async_trait]
impl SideEffectPort for NoOpSideEffects {
    async fn order_placed(&self, _order: &Order) -> Result<(), SideEffectError> {
        Ok(())
    }
}
