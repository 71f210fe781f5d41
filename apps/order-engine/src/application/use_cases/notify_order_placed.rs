//! Notify Order Placed Use Case
//!
//! The notification fan-out: one record per distinct seller with a line
//! item in the order, plus one per admin. Recipients are deduplicated
//! so an admin who also sold something gets a single record. Each
//! insert is followed by a realtime push so open dashboards update
//! without polling; the durable record covers offline recipients.

use std::sync::Arc;

use crate::application::ports::{DirectoryPort, EventPublisherPort, SideEffectError};
use crate::domain::notifications::{Notification, NotificationRepository};
use crate::domain::orders::Order;
use crate::domain::shared::UserId;

/// Use case for fanning an order out into notification records.
pub struct NotifyOrderPlacedUseCase<N, D, E>
where
    N: NotificationRepository,
    D: DirectoryPort,
    E: EventPublisherPort,
{
    notification_repo: Arc<N>,
    directory: Arc<D>,
    event_publisher: Arc<E>,
}

impl<N, D, E> NotifyOrderPlacedUseCase<N, D, E>
where
    N: NotificationRepository,
    D: DirectoryPort,
    E: EventPublisherPort,
{
    /// Create a new `NotifyOrderPlacedUseCase`.
    pub const fn new(
        notification_repo: Arc<N>,
        directory: Arc<D>,
        event_publisher: Arc<E>,
    ) -> Self {
        Self {
            notification_repo,
            directory,
            event_publisher,
        }
    }

    /// Fan the order out. Returns the number of notifications created.
    ///
    /// # Errors
    ///
    /// Returns error if the directory lookup or any insert fails; the
    /// checkout path treats that as a logged side-effect failure.
    pub async fn execute(&self, order: &Order) -> Result<usize, SideEffectError> {
        let customer_name = self
            .directory
            .display_name(order.customer_id())
            .await
            .map_err(|e| SideEffectError::DispatchFailed {
                message: e.to_string(),
            })?;

        let mut recipients: Vec<UserId> = order.distinct_seller_ids();
        let admins = self
            .directory
            .admin_user_ids()
            .await
            .map_err(|e| SideEffectError::DispatchFailed {
                message: e.to_string(),
            })?;
        for admin in admins {
            if !recipients.contains(&admin) {
                recipients.push(admin);
            }
        }

        let mut created = 0;
        for recipient in recipients {
            let notification =
                Notification::order_placed(recipient, order.id(), &customer_name, order.total());
            self.notification_repo
                .insert(&notification)
                .await
                .map_err(|e| SideEffectError::DispatchFailed {
                    message: e.to_string(),
                })?;
            created += 1;

            if let Err(e) = self.event_publisher.publish_notification(notification).await {
                tracing::warn!(order_id = %order.id(), error = %e, "notification push failed");
            }
        }

        metrics::counter!("notifications_fanned_out_total").increment(created as u64);
        tracing::debug!(order_id = %order.id(), count = created, "order fan-out complete");
        Ok(created)
    }
}

/// `SideEffectPort` adapter that runs the fan-out in-process.
///
/// Stands in for the out-of-process side-effect handler in single-node
/// deployments and tests. The fan-out is spawned onto the runtime so
/// checkout latency never includes directory lookups or inserts; its
/// failures are logged from the task.
pub struct InProcessSideEffects<N, D, E>
where
    N: NotificationRepository,
    D: DirectoryPort,
    E: EventPublisherPort,
{
    fan_out: Arc<NotifyOrderPlacedUseCase<N, D, E>>,
}

impl<N, D, E> InProcessSideEffects<N, D, E>
where
    N: NotificationRepository,
    D: DirectoryPort,
    E: EventPublisherPort,
{
    /// Create the adapter around a fan-out use case.
    pub fn new(fan_out: NotifyOrderPlacedUseCase<N, D, E>) -> Self {
        Self {
            fan_out: Arc::new(fan_out),
        }
    }
}

#[async_trait::async_trait]
impl<N, D, E> crate::application::ports::SideEffectPort for InProcessSideEffects<N, D, E>
where
    N: NotificationRepository + 'static,
    D: DirectoryPort + 'static,
    E: EventPublisherPort + 'static,
{
    async fn order_placed(&self, order: &Order) -> Result<(), SideEffectError> {
        let fan_out = Arc::clone(&self.fan_out);
        let order = order.clone();
        tokio::spawn(async move {
            if let Err(e) = fan_out.execute(&order).await {
                tracing::warn!(order_id = %order.id(), error = %e, "order fan-out failed");
                metrics::counter!("notification_dispatch_failures_total").increment(1);
            }
        });
        Ok(())
    }
}
