//! Notifications Bounded Context
//!
//! Durable notification records produced by the order fan-out, plus the
//! persistence port for the recipient's inbox. Live delivery to open
//! dashboards happens separately through the realtime layer; the record
//! here is what an offline recipient sees on next visit.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::shared::{Money, NotificationId, OrderId, Timestamp, UserId};

/// Category of a notification, driving its dashboard presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// A new order concerns the recipient.
    Order,
    /// Something completed successfully.
    Success,
    /// Something needs attention.
    Warning,
    /// Informational only.
    Info,
}

impl NotificationKind {
    /// Parse from the storage representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ORDER" => Some(Self::Order),
            "SUCCESS" => Some(Self::Success),
            "WARNING" => Some(Self::Warning),
            "INFO" => Some(Self::Info),
            _ => None,
        }
    }

    /// Storage representation, matching the serde rename.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "ORDER",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification record addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Record identifier.
    pub id: NotificationId,
    /// The user this notification is addressed to.
    pub recipient_user_id: UserId,
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
    /// Creation time.
    pub created_at: Timestamp,
}

impl Notification {
    /// Build the order-placed notification for one recipient.
    #[must_use]
    pub fn order_placed(
        recipient: UserId,
        order_id: &OrderId,
        customer_name: &str,
        total: Money,
    ) -> Self {
        Self {
            id: NotificationId::generate(),
            recipient_user_id: recipient,
            kind: NotificationKind::Order,
            title: "New order received".to_string(),
            message: format!("{customer_name} placed an order totalling {total}"),
            related_order_id: Some(order_id.clone()),
            is_read: false,
            created_at: Timestamp::now(),
        }
    }
}

/// Errors raised by the notification store.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Notification does not exist.
    #[error("notification {0} not found")]
    NotFound(NotificationId),

    /// Storage-level failure.
    #[error("notification storage failure: {0}")]
    Storage(String),
}

/// Port for the notification inbox.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a new notification.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationError>;

    /// All notifications addressed to a recipient, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_for_recipient(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<Notification>, NotificationError>;

    /// Mark one notification read. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns error if the notification is unknown or the write fails.
    async fn mark_read(
        &self,
        recipient: &UserId,
        id: &NotificationId,
    ) -> Result<(), NotificationError>;

    /// Mark every notification for a recipient read. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    async fn mark_all_read(&self, recipient: &UserId) -> Result<(), NotificationError>;

    /// Count of unread notifications for a recipient.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn unread_count(&self, recipient: &UserId) -> Result<u64, NotificationError>;
}
