//! Advance Order Status Use Case
//!
//! Loads the order, lets the aggregate enforce role and state machine
//! rules, persists the result, and rebroadcasts the change.

use std::sync::Arc;

use crate::application::ports::EventPublisherPort;
use crate::domain::orders::repository::OrderRepository;
use crate::domain::orders::{Actor, Order, OrderError, OrderStatus};
use crate::domain::shared::OrderId;

/// Use case for moving an order through its fulfillment lifecycle.
pub struct AdvanceOrderStatusUseCase<O, E>
where
    O: OrderRepository,
    E: EventPublisherPort,
{
    order_repo: Arc<O>,
    event_publisher: Arc<E>,
}

impl<O, E> AdvanceOrderStatusUseCase<O, E>
where
    O: OrderRepository,
    E: EventPublisherPort,
{
    /// Create a new `AdvanceOrderStatusUseCase`.
    pub const fn new(order_repo: Arc<O>, event_publisher: Arc<E>) -> Self {
        Self {
            order_repo,
            event_publisher,
        }
    }

    /// Execute the transition.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for an unknown order, plus any
    /// authorization or state machine rejection from the aggregate. On
    /// rejection no state changes.
    pub async fn execute(
        &self,
        actor: &Actor,
        order_id: &OrderId,
        new_status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let mut order =
            self.order_repo
                .find_by_id(order_id)
                .await?
                .ok_or_else(|| OrderError::NotFound {
                    order_id: order_id.clone(),
                })?;

        // A stored copy may still carry already-published events;
        // discard them so only this transition gets broadcast.
        let _ = order.drain_events();

        order.advance(actor, new_status)?;
        // Drain before the save so the stored copy carries no pending
        // events; a later load-advance cycle must not re-publish them.
        let events = order.drain_events();
        self.order_repo.save(&order).await?;

        if let Err(e) = self.event_publisher.publish_order_events(events).await {
            tracing::warn!(order_id = %order.id(), error = %e, "failed to publish status change");
        }

        tracing::info!(
            order_id = %order.id(),
            status = %new_status,
            actor = %actor.user_id,
            "order status advanced"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{EventPublishError, NoOpEventPublisher};
    use crate::domain::inventory::StockDelta;
    use crate::domain::notifications::Notification;
    use crate::domain::orders::events::OrderEvent;
    use crate::domain::orders::value_objects::ActorRole;
    use crate::domain::orders::{OrderLineItem, PaymentMethod, PlaceOrderCommand, ShippingAddress};
    use crate::domain::shared::{Money, ProductId, Quantity, UserId};
    use async_trait::async_trait;
    use parking_lot::{Mutex, RwLock};
    use std::collections::HashMap;

    #[derive(Default)]
    struct RecordingPublisher {
        order_events: Mutex<Vec<OrderEvent>>,
    }

    #[async_trait]
    impl EventPublisherPort for RecordingPublisher {
        async fn publish_order_events(
            &self,
            events: Vec<OrderEvent>,
        ) -> Result<(), EventPublishError> {
            self.order_events.lock().extend(events);
            Ok(())
        }

        async fn publish_stock_deltas(
            &self,
            _deltas: Vec<StockDelta>,
        ) -> Result<(), EventPublishError> {
            Ok(())
        }

        async fn publish_notification(
            &self,
            _notification: Notification,
        ) -> Result<(), EventPublishError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct InMemoryOrderRepo {
        orders: RwLock<HashMap<OrderId, Order>>,
    }

    #[async_trait]
    impl OrderRepository for InMemoryOrderRepo {
        async fn save(&self, order: &Order) -> Result<(), OrderError> {
            self.orders
                .write()
                .insert(order.id().clone(), order.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
            Ok(self.orders.read().get(id).cloned())
        }

        async fn find_by_customer(
            &self,
            customer_id: &UserId,
        ) -> Result<Vec<Order>, OrderError> {
            Ok(self
                .orders
                .read()
                .values()
                .filter(|o| o.customer_id() == customer_id)
                .cloned()
                .collect())
        }

        async fn find_by_seller(&self, seller_id: &UserId) -> Result<Vec<Order>, OrderError> {
            Ok(self
                .orders
                .read()
                .values()
                .filter(|o| o.distinct_seller_ids().contains(seller_id))
                .cloned()
                .collect())
        }

        async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
            Ok(self.orders.read().values().cloned().collect())
        }
    }

    fn placed_order() -> Order {
        Order::place(PlaceOrderCommand {
            customer_id: UserId::new("c-1"),
            line_items: vec![OrderLineItem {
                product_id: ProductId::new("p-1"),
                product_name: "Clay Pot".to_string(),
                quantity: Quantity::new(1),
                unit_price: Money::from_units(200),
                seller_id: UserId::new("s-1"),
            }],
            shipping_address: ShippingAddress {
                full_name: "Asha Verma".to_string(),
                phone: "9876543210".to_string(),
                address: "14 MG Road".to_string(),
                city: "Bengaluru".to_string(),
                state: None,
                pincode: "560001".to_string(),
            },
            payment_method: PaymentMethod::Cod,
            delivery_fee: Money::from_units(30),
        })
        .unwrap()
    }

    fn use_case_with(
        order: &Order,
    ) -> AdvanceOrderStatusUseCase<InMemoryOrderRepo, NoOpEventPublisher> {
        let repo = InMemoryOrderRepo::default();
        repo.orders.write().insert(order.id().clone(), order.clone());
        AdvanceOrderStatusUseCase::new(Arc::new(repo), Arc::new(NoOpEventPublisher))
    }

    #[tokio::test]
    async fn advancing_publishes_only_the_status_change() {
        // The stored copy still carries the placement event here; a
        // transition must not re-broadcast it to the dashboards.
        let order = placed_order();
        let repo = InMemoryOrderRepo::default();
        repo.orders.write().insert(order.id().clone(), order.clone());
        let publisher = Arc::new(RecordingPublisher::default());
        let use_case = AdvanceOrderStatusUseCase::new(Arc::new(repo), Arc::clone(&publisher));

        let actor = Actor::new(UserId::new("s-1"), ActorRole::Seller);
        use_case
            .execute(&actor, order.id(), OrderStatus::Confirmed)
            .await
            .unwrap();

        let published = publisher.order_events.lock();
        assert!(
            published
                .iter()
                .all(|e| matches!(e, OrderEvent::OrderStatusChanged { .. })),
            "placement event re-broadcast: {published:?}"
        );
        assert_eq!(published.len(), 1);
    }

    #[tokio::test]
    async fn seller_advances_pending_to_confirmed() {
        let order = placed_order();
        let use_case = use_case_with(&order);
        let actor = Actor::new(UserId::new("s-1"), ActorRole::Seller);

        let updated = use_case
            .execute(&actor, order.id(), OrderStatus::Confirmed)
            .await
            .unwrap();

        assert_eq!(updated.status(), OrderStatus::Confirmed);
        let stored = use_case
            .order_repo
            .find_by_id(order.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn customer_is_rejected_without_state_change() {
        let order = placed_order();
        let use_case = use_case_with(&order);
        let actor = Actor::new(UserId::new("c-1"), ActorRole::Customer);

        let err = use_case
            .execute(&actor, order.id(), OrderStatus::Confirmed)
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Unauthorized { .. }));
        let stored = use_case
            .order_repo
            .find_by_id(order.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), OrderStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_order_reports_not_found() {
        let use_case = AdvanceOrderStatusUseCase::new(
            Arc::new(InMemoryOrderRepo::default()),
            Arc::new(NoOpEventPublisher),
        );
        let actor = Actor::new(UserId::new("admin-1"), ActorRole::Admin);

        let err = use_case
            .execute(&actor, &OrderId::new("missing"), OrderStatus::Confirmed)
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::NotFound { .. }));
    }
}
