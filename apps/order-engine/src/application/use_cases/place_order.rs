//! Place Order Use Case
//!
//! The checkout orchestrator. Validates shipping input, derives the
//! delivery fee and total, drives the multi-step commit, then fires the
//! non-blocking side effects: notification fan-out and realtime
//! broadcast. An order whose header landed is real for the buyer even
//! if later steps failed; that anomaly is logged and counted, never
//! surfaced as a checkout failure.

use std::sync::Arc;

use crate::application::ports::{
    CheckoutStoreError, CheckoutStorePort, EventPublisherPort, SideEffectPort,
};
use crate::domain::cart::Cart;
use crate::domain::orders::{
    Order, OrderError, OrderLineItem, PaymentMethod, PlaceOrderCommand, ShippingAddress,
};
use crate::domain::pricing::compute_delivery_fee;
use crate::domain::shared::UserId;

/// Checkout failure as surfaced to the buyer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckoutError {
    /// Shipping input or line items failed validation; no write occurred.
    #[error("{message}")]
    Validation {
        /// The first violated field's message.
        message: String,
    },

    /// An empty cart cannot produce an order; no write occurred.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    /// The order header insert failed; the cart is preserved for retry.
    #[error("failed to place order, please try again")]
    Commit {
        /// Storage-level detail, logged but not shown to the buyer.
        detail: String,
    },
}

/// Use case for turning a cart into a committed order.
pub struct PlaceOrderUseCase<S, F, E>
where
    S: CheckoutStorePort,
    F: SideEffectPort,
    E: EventPublisherPort,
{
    store: Arc<S>,
    side_effects: Arc<F>,
    event_publisher: Arc<E>,
}

impl<S, F, E> PlaceOrderUseCase<S, F, E>
where
    S: CheckoutStorePort,
    F: SideEffectPort,
    E: EventPublisherPort,
{
    /// Create a new `PlaceOrderUseCase`.
    pub const fn new(store: Arc<S>, side_effects: Arc<F>, event_publisher: Arc<E>) -> Self {
        Self {
            store,
            side_effects,
            event_publisher,
        }
    }

    /// Execute the checkout sequence for one buyer's cart.
    ///
    /// On success the caller should clear the session's cart; on any
    /// error the cart is untouched and safe to retry.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`], [`CheckoutError::Validation`],
    /// or [`CheckoutError::Commit`]. A partial commit is not an error
    /// from the buyer's perspective; the order id is still returned.
    pub async fn execute(
        &self,
        customer_id: UserId,
        cart: &Cart,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let delivery_fee = compute_delivery_fee(cart);
        let command = PlaceOrderCommand {
            customer_id,
            line_items: cart.lines().iter().map(OrderLineItem::from).collect(),
            shipping_address,
            payment_method,
            delivery_fee,
        };

        let mut order = Order::place(command).map_err(|e| match e {
            OrderError::EmptyOrder => CheckoutError::EmptyCart,
            other => CheckoutError::Validation {
                message: other.to_string(),
            },
        })?;

        // Drained before the commit so adapters never persist a copy
        // with pending events; stale events re-surface on the next
        // load-advance cycle otherwise.
        let events = order.drain_events();

        let receipt = match self.store.commit_order(&order).await {
            Ok(receipt) => receipt,
            Err(CheckoutStoreError::HeaderInsert { message }) => {
                tracing::warn!(error = %message, "order header insert failed, cart preserved");
                metrics::counter!("checkout_commit_failures_total").increment(1);
                return Err(CheckoutError::Commit { detail: message });
            }
            Err(CheckoutStoreError::PartialCommit {
                message,
                stock_deltas,
            }) => {
                // Operational anomaly: the order exists but is missing
                // line items or decrements. Reconciliation is a separate
                // maintenance concern.
                tracing::error!(
                    order_id = %order.id(),
                    error = %message,
                    "partial checkout commit, order requires reconciliation"
                );
                metrics::counter!("checkout_partial_commits_total").increment(1);
                crate::application::ports::CheckoutReceipt { stock_deltas }
            }
        };

        metrics::counter!("orders_placed_total").increment(1);

        // Fire-and-forget: failures are logged, never propagated.
        if let Err(e) = self.side_effects.order_placed(&order).await {
            tracing::warn!(order_id = %order.id(), error = %e, "order side effects failed");
            metrics::counter!("notification_dispatch_failures_total").increment(1);
        }

        if let Err(e) = self.event_publisher.publish_order_events(events).await {
            tracing::warn!(order_id = %order.id(), error = %e, "failed to publish order events");
        }
        if !receipt.stock_deltas.is_empty() {
            if let Err(e) = self
                .event_publisher
                .publish_stock_deltas(receipt.stock_deltas)
                .await
            {
                tracing::warn!(order_id = %order.id(), error = %e, "failed to publish stock deltas");
            }
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CheckoutReceipt, NoOpEventPublisher, NoOpSideEffects};
    use crate::domain::cart::ProductSnapshot;
    use crate::domain::inventory::StockDelta;
    use crate::domain::orders::OrderStatus;
    use crate::domain::shared::{Money, ProductId, Quantity};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct RecordingStore {
        committed: Mutex<Vec<crate::domain::shared::OrderId>>,
        fail_with: Mutex<Option<CheckoutStoreError>>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                committed: Mutex::new(Vec::new()),
                fail_with: Mutex::new(None),
            }
        }

        fn failing_with(error: CheckoutStoreError) -> Self {
            let store = Self::new();
            *store.fail_with.lock() = Some(error);
            store
        }
    }

    #[async_trait]
    impl CheckoutStorePort for RecordingStore {
        async fn commit_order(
            &self,
            order: &Order,
        ) -> Result<CheckoutReceipt, CheckoutStoreError> {
            if let Some(error) = self.fail_with.lock().clone() {
                return Err(error);
            }
            self.committed.lock().push(order.id().clone());
            Ok(CheckoutReceipt {
                stock_deltas: order
                    .line_items()
                    .iter()
                    .map(|l| StockDelta {
                        product_id: l.product_id.clone(),
                        new_stock: 1,
                    })
                    .collect(),
            })
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            ProductSnapshot {
                product_id: ProductId::new("p-1"),
                name: "Clay Pot".to_string(),
                unit_price: Money::from_units(200),
                image_url: None,
                stock: 5,
                seller_id: UserId::new("s-1"),
                seller_free_delivery: false,
            },
            Quantity::new(1),
        )
        .unwrap();
        cart
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Asha Verma".to_string(),
            phone: "9876543210".to_string(),
            address: "14 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: None,
            pincode: "560001".to_string(),
        }
    }

    fn use_case(
        store: RecordingStore,
    ) -> PlaceOrderUseCase<RecordingStore, NoOpSideEffects, NoOpEventPublisher> {
        PlaceOrderUseCase::new(
            Arc::new(store),
            Arc::new(NoOpSideEffects),
            Arc::new(NoOpEventPublisher),
        )
    }

    #[tokio::test]
    async fn successful_checkout_returns_pending_order() {
        let use_case = use_case(RecordingStore::new());
        let order = use_case
            .execute(
                UserId::new("c-1"),
                &cart(),
                address(),
                PaymentMethod::Card,
            )
            .await
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        // Scenario: subtotal 200 plus proportional fee 30.
        assert_eq!(order.total(), Money::from_units(230));
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_before_any_write() {
        let store = RecordingStore::new();
        let use_case = use_case(store);
        let err = use_case
            .execute(
                UserId::new("c-1"),
                &Cart::new(),
                address(),
                PaymentMethod::Cod,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::EmptyCart));
        assert!(use_case.store.committed.lock().is_empty());
    }

    #[tokio::test]
    async fn invalid_address_short_circuits() {
        let store = RecordingStore::new();
        let use_case = use_case(store);
        let mut bad = address();
        bad.pincode = "xy".to_string();

        let err = use_case
            .execute(UserId::new("c-1"), &cart(), bad, PaymentMethod::Upi)
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Validation { .. }));
        assert!(use_case.store.committed.lock().is_empty());
    }

    #[tokio::test]
    async fn header_failure_aborts_checkout() {
        let use_case = use_case(RecordingStore::failing_with(
            CheckoutStoreError::HeaderInsert {
                message: "connection reset".to_string(),
            },
        ));

        let err = use_case
            .execute(UserId::new("c-1"), &cart(), address(), PaymentMethod::Cod)
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Commit { .. }));
    }

    #[tokio::test]
    async fn partial_commit_still_returns_the_order() {
        let use_case = use_case(RecordingStore::failing_with(
            CheckoutStoreError::PartialCommit {
                message: "stock decrement timed out".to_string(),
                stock_deltas: vec![],
            },
        ));

        let order = use_case
            .execute(UserId::new("c-1"), &cart(), address(), PaymentMethod::Cod)
            .await
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
    }
}
