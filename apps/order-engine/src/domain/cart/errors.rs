//! Cart domain errors

use std::fmt;

use crate::domain::shared::ProductId;

/// Errors raised by cart operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A line item quantity must be at least one.
    InvalidQuantity {
        /// The product whose quantity was invalid.
        product_id: ProductId,
    },
}

impl fmt::Display for CartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuantity { product_id } => {
                write!(f, "quantity for product {product_id} must be at least 1")
            }
        }
    }
}

impl std::error::Error for CartError {}
