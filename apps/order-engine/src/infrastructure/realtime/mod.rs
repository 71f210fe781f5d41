//! Realtime Change Feed
//!
//! Implements the publish/subscribe layer using tokio broadcast
//! channels, one per logical stream: order mutations, stock mutations,
//! and notification insertions. Subscribers get a filtered typed stream;
//! delivery is at-most-once with no replay, so a late subscriber sees
//! its cold-load snapshot plus events from the moment of subscription
//! onward. A receiver that lags far enough to be overrun simply loses
//! the overwritten events.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::application::ports::{EventPublishError, EventPublisherPort};
use crate::domain::inventory::StockDelta;
use crate::domain::notifications::Notification;
use crate::domain::orders::events::OrderEvent;
use crate::domain::shared::UserId;

/// Configuration for change feed channel capacities.
#[derive(Debug, Clone, Copy)]
pub struct ChangeFeedConfig {
    /// Capacity for the order event channel.
    pub order_events_capacity: usize,
    /// Capacity for the stock delta channel.
    pub stock_deltas_capacity: usize,
    /// Capacity for the notification channel.
    pub notifications_capacity: usize,
}

impl Default for ChangeFeedConfig {
    fn default() -> Self {
        Self {
            order_events_capacity: 1_000,
            stock_deltas_capacity: 1_000,
            notifications_capacity: 1_000,
        }
    }
}

/// Central hub for all change-event streams.
#[derive(Debug)]
pub struct ChangeFeed {
    order_events_tx: broadcast::Sender<OrderEvent>,
    stock_deltas_tx: broadcast::Sender<StockDelta>,
    notifications_tx: broadcast::Sender<Notification>,
}

impl ChangeFeed {
    /// Create a new change feed with the given configuration.
    #[must_use]
    pub fn new(config: ChangeFeedConfig) -> Self {
        Self {
            order_events_tx: broadcast::channel(config.order_events_capacity).0,
            stock_deltas_tx: broadcast::channel(config.stock_deltas_capacity).0,
            notifications_tx: broadcast::channel(config.notifications_capacity).0,
        }
    }

    /// Create a new change feed with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ChangeFeedConfig::default())
    }

    // =========================================================================
    // Publishing
    // =========================================================================

    /// Send an order event to all subscribers.
    ///
    /// Returns the number of receivers, or `None` if nobody is listening.
    #[must_use]
    pub fn send_order_event(&self, event: OrderEvent) -> Option<usize> {
        self.order_events_tx.send(event).ok()
    }

    /// Send a stock delta to all subscribers.
    #[must_use]
    pub fn send_stock_delta(&self, delta: StockDelta) -> Option<usize> {
        self.stock_deltas_tx.send(delta).ok()
    }

    /// Send a notification to its recipient's subscribers.
    #[must_use]
    pub fn send_notification(&self, notification: Notification) -> Option<usize> {
        self.notifications_tx.send(notification).ok()
    }

    // =========================================================================
    // Subscribing
    // =========================================================================

    /// Stream of order events, optionally filtered to one customer.
    ///
    /// `None` yields the unfiltered stream for the admin dashboard.
    pub fn order_changes(&self, customer: Option<UserId>) -> impl Stream<Item = OrderEvent> + use<> {
        BroadcastStream::new(self.order_events_tx.subscribe()).filter_map(move |item| {
            match item {
                Ok(event) => match &customer {
                    Some(id) if event.customer_id() != id => None,
                    _ => Some(event),
                },
                // Lagged receiver: overwritten events are gone, at-most-once.
                Err(_) => None,
            }
        })
    }

    /// Unfiltered stream of stock deltas for browsing buyers.
    pub fn stock_changes(&self) -> impl Stream<Item = StockDelta> + use<> {
        BroadcastStream::new(self.stock_deltas_tx.subscribe()).filter_map(Result::ok)
    }

    /// Stream of notifications addressed to one recipient.
    pub fn notifications(&self, recipient: UserId) -> impl Stream<Item = Notification> + use<> {
        BroadcastStream::new(self.notifications_tx.subscribe()).filter_map(move |item| match item
        {
            Ok(notification) if notification.recipient_user_id == recipient => Some(notification),
            _ => None,
        })
    }

    /// Number of active order event subscribers.
    #[must_use]
    pub fn order_subscriber_count(&self) -> usize {
        self.order_events_tx.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl EventPublisherPort for ChangeFeed {
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        for event in events {
            if self.send_order_event(event).is_none() {
                tracing::trace!("no order event subscribers, event dropped");
            }
            metrics::counter!("realtime_order_events_total").increment(1);
        }
        Ok(())
    }

    async fn publish_stock_deltas(
        &self,
        deltas: Vec<StockDelta>,
    ) -> Result<(), EventPublishError> {
        for delta in deltas {
            let _ = self.send_stock_delta(delta);
            metrics::counter!("realtime_stock_deltas_total").increment(1);
        }
        Ok(())
    }

    async fn publish_notification(
        &self,
        notification: Notification,
    ) -> Result<(), EventPublishError> {
        let _ = self.send_notification(notification);
        metrics::counter!("realtime_notifications_total").increment(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::orders::value_objects::OrderStatus;
    use crate::domain::shared::{Money, OrderId, ProductId, Timestamp};

    fn placed_event(order: &str, customer: &str) -> OrderEvent {
        OrderEvent::OrderPlaced {
            order_id: OrderId::new(order),
            customer_id: UserId::new(customer),
            seller_ids: vec![UserId::new("s-1")],
            total: Money::from_units(230),
            placed_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn customer_filter_drops_other_buyers_events() {
        let feed = ChangeFeed::with_defaults();
        let mut stream = Box::pin(feed.order_changes(Some(UserId::new("c-1"))));

        assert!(feed.send_order_event(placed_event("o-1", "c-2")).is_some());
        assert!(feed.send_order_event(placed_event("o-2", "c-1")).is_some());

        let received = stream.next().await.unwrap();
        assert_eq!(received.order_id().as_str(), "o-2");
    }

    #[tokio::test]
    async fn unfiltered_stream_sees_every_event() {
        let feed = ChangeFeed::with_defaults();
        let mut stream = Box::pin(feed.order_changes(None));

        let _ = feed.send_order_event(placed_event("o-1", "c-1"));
        let _ = feed.send_order_event(placed_event("o-2", "c-2"));

        assert_eq!(stream.next().await.unwrap().order_id().as_str(), "o-1");
        assert_eq!(stream.next().await.unwrap().order_id().as_str(), "o-2");
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let feed = ChangeFeed::with_defaults();

        // Nobody is listening yet; send reports no receivers.
        assert!(feed.send_order_event(placed_event("o-1", "c-1")).is_none());

        let mut stream = Box::pin(feed.order_changes(None));
        let _ = feed.send_order_event(placed_event("o-2", "c-1"));

        assert_eq!(stream.next().await.unwrap().order_id().as_str(), "o-2");
    }

    #[tokio::test]
    async fn notification_stream_is_recipient_scoped() {
        let feed = ChangeFeed::with_defaults();
        let mut stream = Box::pin(feed.notifications(UserId::new("s-1")));

        let for_other = Notification::order_placed(
            UserId::new("s-2"),
            &OrderId::new("o-1"),
            "Asha",
            Money::from_units(100),
        );
        let for_me = Notification::order_placed(
            UserId::new("s-1"),
            &OrderId::new("o-1"),
            "Asha",
            Money::from_units(100),
        );
        let _ = feed.send_notification(for_other);
        let _ = feed.send_notification(for_me);

        let received = stream.next().await.unwrap();
        assert_eq!(received.recipient_user_id.as_str(), "s-1");
    }

    #[tokio::test]
    async fn status_change_deltas_carry_both_states() {
        let feed = ChangeFeed::with_defaults();
        let mut stream = Box::pin(feed.order_changes(Some(UserId::new("c-1"))));

        let _ = feed.send_order_event(OrderEvent::OrderStatusChanged {
            order_id: OrderId::new("o-1"),
            customer_id: UserId::new("c-1"),
            from: OrderStatus::Pending,
            to: OrderStatus::Confirmed,
            changed_at: Timestamp::now(),
        });

        match stream.next().await.unwrap() {
            OrderEvent::OrderStatusChanged { from, to, .. } => {
                assert_eq!(from, OrderStatus::Pending);
                assert_eq!(to, OrderStatus::Confirmed);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn subscription_does_not_borrow_the_feed() {
        // SSE handlers return these streams while their reference to the
        // feed dies with the handler frame, so the stream must own its
        // receiver outright.
        let feed = ChangeFeed::with_defaults();
        let mut stream = Box::pin(feed.order_changes(None));
        let _ = feed.send_order_event(placed_event("o-1", "c-1"));
        drop(feed);

        assert_eq!(stream.next().await.unwrap().order_id().as_str(), "o-1");
    }

    #[tokio::test]
    async fn stock_stream_is_unfiltered() {
        let feed = ChangeFeed::with_defaults();
        let mut stream = Box::pin(feed.stock_changes());

        let _ = feed.send_stock_delta(StockDelta {
            product_id: ProductId::new("p-1"),
            new_stock: 4,
        });

        let delta = stream.next().await.unwrap();
        assert_eq!(delta.new_stock, 4);
    }
}
