//! Order line items.
//!
//! Immutable snapshots taken from the cart at commit time. Catalog
//! edits after the order is placed do not touch these rows.

use serde::{Deserialize, Serialize};

use crate::domain::cart::CartLineItem;
use crate::domain::shared::{Money, ProductId, Quantity, UserId};

/// One product/quantity pair frozen into a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    /// Product identifier at commit time.
    pub product_id: ProductId,
    /// Product name at commit time.
    pub product_name: String,
    /// Units ordered.
    pub quantity: Quantity,
    /// Unit price at commit time.
    pub unit_price: Money,
    /// Seller who listed the product.
    pub seller_id: UserId,
}

impl OrderLineItem {
    /// Line subtotal (unit price × quantity).
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity.count()
    }
}

impl From<&CartLineItem> for OrderLineItem {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product_id: line.product.product_id.clone(),
            product_name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.product.unit_price,
            seller_id: line.product.seller_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::ProductSnapshot;

    #[test]
    fn from_cart_line_snapshots_fields() {
        let cart_line = CartLineItem {
            product: ProductSnapshot {
                product_id: ProductId::new("p-1"),
                name: "Clay Pot".to_string(),
                unit_price: Money::from_units(75),
                image_url: Some("https://example.test/pot.jpg".to_string()),
                stock: 8,
                seller_id: UserId::new("s-1"),
                seller_free_delivery: false,
            },
            quantity: Quantity::new(3),
        };

        let line = OrderLineItem::from(&cart_line);
        assert_eq!(line.product_name, "Clay Pot");
        assert_eq!(line.line_total(), Money::from_units(225));
        assert_eq!(line.seller_id.as_str(), "s-1");
    }
}
