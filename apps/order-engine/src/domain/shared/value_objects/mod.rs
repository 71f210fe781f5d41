//! Shared value objects.

pub mod identifiers;
pub mod money;
pub mod quantity;
pub mod timestamp;

pub use identifiers::{NotificationId, OrderId, ProductId, UserId};
pub use money::Money;
pub use quantity::Quantity;
pub use timestamp::Timestamp;
