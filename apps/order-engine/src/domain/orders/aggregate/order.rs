//! Order Aggregate Root
//!
//! The durable record of a placed order. Created once, atomically from
//! the buyer's perspective, at checkout; mutated afterwards only through
//! status transitions governed by the state machine and role rules.

use serde::{Deserialize, Serialize};

use super::OrderLineItem;
use crate::domain::orders::errors::OrderError;
use crate::domain::orders::events::OrderEvent;
use crate::domain::orders::services::OrderStateMachine;
use crate::domain::orders::value_objects::{Actor, OrderStatus, PaymentMethod, ShippingAddress};
use crate::domain::shared::{Money, OrderId, Timestamp, UserId};

/// Parameters for reconstituting an Order from storage.
///
/// Used by repositories to rebuild aggregates from persisted state.
/// No domain events are generated during reconstitution.
#[derive(Debug, Clone)]
pub struct ReconstitutedOrderParams {
    /// Order identifier.
    pub id: OrderId,
    /// The buyer.
    pub customer_id: UserId,
    /// Snapshotted line items.
    pub line_items: Vec<OrderLineItem>,
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
    /// Commit timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

/// Command to place a new order from a cart snapshot.
#[derive(Debug, Clone)]
pub struct PlaceOrderCommand {
    /// The buyer placing the order.
    pub customer_id: UserId,
    /// Line items snapshotted from the cart.
    pub line_items: Vec<OrderLineItem>,
    /// Destination address, already structured but not yet validated.
    pub shipping_address: ShippingAddress,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
    /// Delivery fee computed by the pricing service.
    pub delivery_fee: Money,
}

impl PlaceOrderCommand {
    /// Validate the command parameters.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyOrder`] for an empty line item list,
    /// and [`OrderError::InvalidParameters`] for malformed fields.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.line_items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        self.shipping_address
            .validate()
            .map_err(|e| OrderError::InvalidParameters {
                reason: e.to_string(),
            })?;

        for line in &self.line_items {
            line.quantity
                .validate_for_order()
                .map_err(|e| OrderError::InvalidParameters {
                    reason: format!("line item {}: {e}", line.product_id),
                })?;
            line.unit_price
                .validate_for_order()
                .map_err(|e| OrderError::InvalidParameters {
                    reason: format!("line item {}: {e}", line.product_id),
                })?;
        }

        if self.delivery_fee.is_negative() {
            return Err(OrderError::InvalidParameters {
                reason: "Delivery fee cannot be negative".to_string(),
            });
        }

        Ok(())
    }

    /// Sum of line totals, before delivery fee.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.line_items.iter().map(OrderLineItem::line_total).sum()
    }
}

/// Order Aggregate Root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: UserId,
    line_items: Vec<OrderLineItem>,
    shipping_address: ShippingAddress,
    payment_method: PaymentMethod,
    delivery_fee: Money,
    total: Money,
    status: OrderStatus,
    #[serde(skip)]
    events: Vec<OrderEvent>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Place a new order from a command.
    ///
    /// The total is derived here as subtotal plus delivery fee; callers
    /// never declare it. Generates an `OrderPlaced` event.
    ///
    /// # Errors
    ///
    /// Returns error if command validation fails.
    pub fn place(cmd: PlaceOrderCommand) -> Result<Self, OrderError> {
        cmd.validate()?;

        let id = OrderId::generate();
        let now = Timestamp::now();
        let total = cmd.subtotal() + cmd.delivery_fee;

        let mut order = Self {
            id: id.clone(),
            customer_id: cmd.customer_id.clone(),
            line_items: cmd.line_items,
            shipping_address: cmd.shipping_address,
            payment_method: cmd.payment_method,
            delivery_fee: cmd.delivery_fee,
            total,
            status: OrderStatus::Pending,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        order.events.push(OrderEvent::OrderPlaced {
            order_id: id,
            customer_id: cmd.customer_id,
            seller_ids: order.distinct_seller_ids(),
            total,
            placed_at: now,
        });

        Ok(order)
    }

    /// Reconstitute an order from stored state (no events generated).
    ///
    /// Bypasses placement validation; the aggregate is being restored to
    /// a known valid state.
    #[must_use]
    pub fn reconstitute(params: ReconstitutedOrderParams) -> Self {
        Self {
            id: params.id,
            customer_id: params.customer_id,
            line_items: params.line_items,
            shipping_address: params.shipping_address,
            payment_method: params.payment_method,
            delivery_fee: params.delivery_fee,
            total: params.total,
            status: params.status,
            events: Vec::new(),
            created_at: params.created_at,
            updated_at: params.updated_at,
        }
    }

    /// Advance the order to a new fulfillment status.
    ///
    /// Only seller or admin actors may advance an order; customers only
    /// observe. Terminal orders reject every transition. Generates an
    /// `OrderStatusChanged` event on success.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Unauthorized`] for a customer actor,
    /// [`OrderError::TerminalOrder`] when the order is delivered or
    /// cancelled, and [`OrderError::InvalidStateTransition`] for any
    /// other disallowed move.
    pub fn advance(&mut self, actor: &Actor, to: OrderStatus) -> Result<(), OrderError> {
        if !actor.role.can_advance_orders() {
            return Err(OrderError::Unauthorized {
                role: actor.role,
                action: "advance order status".to_string(),
            });
        }
        if self.status.is_terminal() {
            return Err(OrderError::TerminalOrder {
                status: self.status,
            });
        }
        OrderStateMachine::validate_transition(self.status, to)?;

        let from = self.status;
        let now = Timestamp::now();
        self.status = to;
        self.updated_at = now;

        self.events.push(OrderEvent::OrderStatusChanged {
            order_id: self.id.clone(),
            customer_id: self.customer_id.clone(),
            from,
            to,
            changed_at: now,
        });

        Ok(())
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the buyer's user ID.
    #[must_use]
    pub const fn customer_id(&self) -> &UserId {
        &self.customer_id
    }

    /// Get the snapshotted line items.
    #[must_use]
    pub fn line_items(&self) -> &[OrderLineItem] {
        &self.line_items
    }

    /// Get the shipping address.
    #[must_use]
    pub const fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    /// Get the payment method.
    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Get the delivery fee.
    #[must_use]
    pub const fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    /// Get the grand total (subtotal plus delivery fee).
    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the commit timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Sum of line totals, before delivery fee.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.line_items.iter().map(OrderLineItem::line_total).sum()
    }

    /// Distinct sellers with at least one line item in this order.
    ///
    /// Order of first appearance is preserved; used by the notification
    /// fan-out to address one notification per seller.
    #[must_use]
    pub fn distinct_seller_ids(&self) -> Vec<UserId> {
        let mut sellers: Vec<UserId> = Vec::new();
        for line in &self.line_items {
            if !sellers.contains(&line.seller_id) {
                sellers.push(line.seller_id.clone());
            }
        }
        sellers
    }

    /// Drain accumulated domain events.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get pending events without draining.
    #[must_use]
    pub fn pending_events(&self) -> &[OrderEvent] {
        &self.events
    }
}
