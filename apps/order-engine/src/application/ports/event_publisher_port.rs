//! Event Publisher Port (Driven Port)
//!
//! Interface for pushing committed changes onto the realtime streams
//! dashboards subscribe to. Publishing is at-most-once; a failure here
//! never rolls back the write that produced the event.

use async_trait::async_trait;

use crate::domain::inventory::StockDelta;
use crate::domain::notifications::Notification;
use crate::domain::orders::events::OrderEvent;

/// Event publishing error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventPublishError {
    /// No subscriber channel was available.
    #[error("event publish channel closed: {message}")]
    ChannelClosed {
        /// Detail.
        message: String,
    },
}

/// Port for publishing committed changes to the realtime layer.
#[async_trait]
pub trait EventPublisherPort: Send + Sync {
    /// Publish order lifecycle events.
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError>;

    /// Publish stock level changes.
    async fn publish_stock_deltas(&self, deltas: Vec<StockDelta>)
    -> Result<(), EventPublishError>;

    /// Publish a freshly inserted notification to its recipient.
    async fn publish_notification(
        &self,
        notification: Notification,
    ) -> Result<(), EventPublishError>;
}

/// No-op event publisher for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisherPort for NoOpEventPublisher {
    async fn publish_order_events(
        &self,
        _events: Vec<OrderEvent>,
    ) -> Result<(), EventPublishError> {
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
