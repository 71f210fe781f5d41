//! Shared Kernel
//!
//! Value objects and errors used across all bounded contexts.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{Money, NotificationId, OrderId, ProductId, Quantity, Timestamp, UserId};
