//! Inventory Bounded Context
//!
//! Per-product stock levels and the decrement contract the checkout
//! path relies on. There is no reservation ahead of commit; overselling
//! by a small margin under racing checkouts is an accepted, documented
//! limitation. What the contract does guarantee is that a stock level
//! never goes below zero and that each decrement is atomic per product.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::{ProductId, Quantity};

/// A committed change to one product's stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDelta {
    /// The product whose stock changed.
    pub product_id: ProductId,
    /// Stock level after the change.
    pub new_stock: u32,
}

/// Errors raised by stock operations.
#[derive(Debug, Error)]
pub enum StockError {
    /// Product does not exist in the ledger.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Storage-level failure.
    #[error("stock storage failure: {0}")]
    Storage(String),
}

/// Port for the per-product stock ledger.
///
/// Decrements must be pushed down to the storage layer's atomic update
/// primitive; adapters must never read-modify-write across a round trip.
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Decrement a product's stock by the ordered quantity, floor-clamped
    /// at zero. Returns the stock level after the decrement.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::ProductNotFound`] for an unknown product and
    /// [`StockError::Storage`] on storage failure.
    async fn decrement(&self, product_id: &ProductId, qty: Quantity) -> Result<u32, StockError>;

    /// Current stock level for a product.
    ///
    /// # Errors
    ///
    /// Returns error if the product is unknown or the query fails.
    async fn stock_of(&self, product_id: &ProductId) -> Result<u32, StockError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_error_display() {
        let err = StockError::ProductNotFound(ProductId::new("p-1"));
        assert_eq!(err.to_string(), "product p-1 not found");
    }
}
