//! Notification Inbox Use Case
//!
//! Cold-load access to a recipient's notifications plus the read
//! toggles. Both mark operations are idempotent.

use std::sync::Arc;

use crate::domain::notifications::{Notification, NotificationError, NotificationRepository};
use crate::domain::shared::{NotificationId, UserId};

/// Use case for a recipient's notification inbox.
pub struct NotificationInboxUseCase<N>
where
    N: NotificationRepository,
{
    notification_repo: Arc<N>,
}

impl<N> NotificationInboxUseCase<N>
where
    N: NotificationRepository,
{
    /// Create a new `NotificationInboxUseCase`.
    pub const fn new(notification_repo: Arc<N>) -> Self {
        Self { notification_repo }
    }

    /// All notifications for the recipient, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list(&self, recipient: &UserId) -> Result<Vec<Notification>, NotificationError> {
        self.notification_repo.find_for_recipient(recipient).await
    }

    /// Unread count for badge display.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn unread_count(&self, recipient: &UserId) -> Result<u64, NotificationError> {
        self.notification_repo.unread_count(recipient).await
    }

    /// Mark one notification read.
    ///
    /// # Errors
    ///
    /// Returns error if the notification is unknown or the write fails.
    pub async fn mark_read(
        &self,
        recipient: &UserId,
        id: &NotificationId,
    ) -> Result<(), NotificationError> {
        self.notification_repo.mark_read(recipient, id).await
    }

    /// Mark every notification for the recipient read.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn mark_all_read(&self, recipient: &UserId) -> Result<(), NotificationError> {
        self.notification_repo.mark_all_read(recipient).await
    }
}
