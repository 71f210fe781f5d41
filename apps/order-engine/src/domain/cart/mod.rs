//! Cart Aggregate
//!
//! The buyer's working set of selected products and quantities for the
//! active session. Every operation is synchronous and side-effect-free
//! outside the aggregate itself; nothing here touches the network. A cart
//! only becomes durable state at checkout, when its lines are snapshotted
//! into an order.

mod errors;

pub use errors::CartError;

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, ProductId, Quantity, UserId};

/// Catalog data captured into a cart line at add time.
///
/// A snapshot, not a live reference: later catalog edits do not rewrite
/// carts. Stock is carried for display only; the authoritative stock check
/// happens at commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Product identifier.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price at snapshot time.
    pub unit_price: Money,
    /// Product image URL.
    pub image_url: Option<String>,
    /// Available stock at snapshot time.
    pub stock: u32,
    /// Seller who listed the product.
    pub seller_id: UserId,
    /// Whether the seller offers free delivery.
    pub seller_free_delivery: bool,
}

/// One product/quantity pair within a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// The captured product data.
    pub product: ProductSnapshot,
    /// Number of units selected (always ≥ 1 inside a cart).
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Line subtotal (unit price × quantity).
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.product.unit_price * self.quantity.count()
    }
}

/// The cart aggregate, exclusively owned by one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a product to the cart.
    ///
    /// Adding a product that is already present accumulates its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for a zero initial quantity.
    pub fn add(&mut self, product: ProductSnapshot, quantity: Quantity) -> Result<(), CartError> {
        if quantity.is_zero() {
            return Err(CartError::InvalidQuantity {
                product_id: product.product_id.clone(),
            });
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product.product_id == product.product_id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLineItem { product, quantity });
        }
        Ok(())
    }

    /// Set the quantity for a product already in the cart.
    ///
    /// A zero quantity removes the line. Unknown products are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: Quantity) {
        if quantity.is_zero() {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| &l.product.product_id == product_id)
        {
            line.quantity = quantity;
        }
    }

    /// Remove a product from the cart.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|l| &l.product.product_id != product_id);
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    /// Total unit count across all line items.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity.count()))
    }

    /// Returns true if the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The current line items.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Returns true if every line's seller offers free delivery.
    ///
    /// Vacuously false for an empty cart; an empty cart never reaches fee
    /// computation anyway.
    #[must_use]
    pub fn all_sellers_free_delivery(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(|l| l.product.seller_free_delivery)
    }
}
