//! Application DTOs
//!
//! Wire-facing shapes for requests and responses. Conversion into the
//! domain happens here so handlers stay thin.

use serde::{Deserialize, Serialize};

use crate::domain::cart::{Cart, CartError, ProductSnapshot};
use crate::domain::notifications::{Notification, NotificationKind};
use crate::domain::orders::{Order, OrderLineItem, OrderStatus, PaymentMethod, ShippingAddress};
use crate::domain::shared::{Money, NotificationId, OrderId, ProductId, Quantity, UserId};

/// One cart line as carried by checkout and fee-preview requests.
///
/// The session owns its cart; requests carry the full snapshot rather
/// than referencing server-side cart state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineDto {
    /// Product identifier.
    pub product_id: ProductId,
    /// Product name at selection time.
    pub name: String,
    /// Unit price at selection time.
    pub unit_price: Money,
    /// Product image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Stock level shown to the buyer.
    #[serde(default)]
    pub stock: u32,
    /// Seller who listed the product.
    pub seller_id: UserId,
    /// Whether the seller offers free delivery.
    #[serde(default)]
    pub seller_free_delivery: bool,
    /// Units selected.
    pub quantity: u32,
}

impl CartLineDto {
    fn into_snapshot(self) -> (ProductSnapshot, Quantity) {
        let quantity = Quantity::new(self.quantity);
        let snapshot = ProductSnapshot {
            product_id: self.product_id,
            name: self.name,
            unit_price: self.unit_price,
            image_url: self.image_url,
            stock: self.stock,
            seller_id: self.seller_id,
            seller_free_delivery: self.seller_free_delivery,
        };
        (snapshot, quantity)
    }
}

/// Rebuild a cart aggregate from request lines.
///
/// # Errors
///
/// Returns [`CartError::InvalidQuantity`] for any zero-quantity line.
pub fn build_cart(lines: Vec<CartLineDto>) -> Result<Cart, CartError> {
    let mut cart = Cart::new();
    for line in lines {
        let (snapshot, quantity) = line.into_snapshot();
        cart.add(snapshot, quantity)?;
    }
    Ok(cart)
}

/// Delivery fee preview request.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryFeeRequestDto {
    /// Cart lines to price.
    pub items: Vec<CartLineDto>,
}

/// Delivery fee preview response.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryFeeResponseDto {
    /// Computed fee.
    pub delivery_fee: Money,
    /// Cart subtotal the fee was computed against.
    pub subtotal: Money,
}

/// Checkout request.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequestDto {
    /// Cart lines to commit.
    pub items: Vec<CartLineDto>,
    /// Destination address.
    pub shipping_address: ShippingAddress,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
}

/// Checkout response returned to the buyer.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponseDto {
    /// The new order's id.
    pub order_id: OrderId,
    /// Grand total charged.
    pub total: Money,
    /// Delivery fee component of the total.
    pub delivery_fee: Money,
    /// Initial status, always `PENDING`.
    pub status: OrderStatus,
}

/// One order line in an order view.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLineItemDto {
    /// Product identifier at commit time.
    pub product_id: ProductId,
    /// Product name at commit time.
    pub product_name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price at commit time.
    pub unit_price: Money,
    /// Seller who listed the product.
    pub seller_id: UserId,
}

impl OrderLineItemDto {
    fn from_line(line: &OrderLineItem) -> Self {
        Self {
            product_id: line.product_id.clone(),
            product_name: line.product_name.clone(),
            quantity: line.quantity.count(),
            unit_price: line.unit_price,
            seller_id: line.seller_id.clone(),
        }
    }
}

/// Full order view for customer, seller, and admin dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDto {
    /// Order identifier.
    pub id: OrderId,
    /// The buyer.
    pub customer_id: UserId,
    /// Snapshotted line items.
    pub line_items: Vec<OrderLineItemDto>,
    /// Shipping destination.
    pub shipping_address: ShippingAddress,
    /// Recorded payment method.
    pub payment_method: PaymentMethod,
    /// Delivery fee charged.
    pub delivery_fee: Money,
    /// Grand total.
    pub total: Money,
    /// Current fulfillment status.
    pub status: OrderStatus,
    /// Commit time, RFC 3339.
    pub created_at: String,
    /// Last update time, RFC 3339.
    pub updated_at: String,
}

impl OrderDto {
    /// Build from a domain order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().clone(),
            customer_id: order.customer_id().clone(),
            line_items: order
                .line_items()
                .iter()
                .map(OrderLineItemDto::from_line)
                .collect(),
            shipping_address: order.shipping_address().clone(),
            payment_method: order.payment_method(),
            delivery_fee: order.delivery_fee(),
            total: order.total(),
            status: order.status(),
            created_at: order.created_at().to_rfc3339(),
            updated_at: order.updated_at().to_rfc3339(),
        }
    }
}

/// Status transition request.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvanceOrderRequestDto {
    /// Requested new status.
    pub status: OrderStatus,
}

/// Notification view.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationDto {
    /// Record identifier.
    pub id: NotificationId,
    /// Category.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// The order this notification refers to, if any.
    pub related_order_id: Option<OrderId>,
    /// Whether the recipient has seen it.
    pub is_read: bool,
    /// Creation time, RFC 3339.
    pub created_at: String,
}

impl NotificationDto {
    /// Build from a domain notification.
    #[must_use]
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            id: notification.id.clone(),
            kind: notification.kind,
            title: notification.title.clone(),
            message: notification.message.clone(),
            related_order_id: notification.related_order_id.clone(),
            is_read: notification.is_read,
            created_at: notification.created_at.to_rfc3339(),
        }
    }
}
