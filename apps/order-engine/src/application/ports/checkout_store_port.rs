//! Checkout Store Port (Driven Port)
//!
//! The multi-step commit behind checkout: order header, line items,
//! stock decrements. Adapters that can wrap the steps in a storage
//! transaction should; adapters that cannot must report exactly how far
//! the commit got, because an order header that landed is real for the
//! buyer even when later steps failed.

use async_trait::async_trait;

use crate::domain::inventory::StockDelta;
use crate::domain::orders::Order;

/// What a successful (or partially successful) commit produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// Stock changes applied by the commit, one per decremented product.
    pub stock_deltas: Vec<StockDelta>,
}

/// Checkout commit error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckoutStoreError {
    /// The order header insert failed; nothing was written.
    #[error("order header insert failed: {message}")]
    HeaderInsert {
        /// Storage-level detail.
        message: String,
    },

    /// The header landed but a later step failed. The order exists in
    /// `PENDING` status; reconciliation is a separate maintenance
    /// concern, not an inline retry.
    #[error("partial commit after order header: {message}")]
    PartialCommit {
        /// Storage-level detail.
        message: String,
        /// Stock changes that did apply before the failure.
        stock_deltas: Vec<StockDelta>,
    },
}

/// Port for the transactional part of checkout.
#[async_trait]
pub trait CheckoutStorePort: Send + Sync {
    /// Commit an order: insert the header, insert one row per line item,
    /// and decrement each product's stock floor-clamped at zero.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutStoreError::HeaderInsert`] when nothing was
    /// written, and [`CheckoutStoreError::PartialCommit`] when the order
    /// header landed but line items or decrements did not.
    async fn commit_order(&self, order: &Order) -> Result<CheckoutReceipt, CheckoutStoreError>;
}
