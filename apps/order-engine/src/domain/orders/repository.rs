//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::Order;
use super::errors::OrderError;
use crate::domain::shared::{OrderId, UserId};

/// Repository trait for Order persistence.
///
/// This is a domain interface (port) that is implemented by
/// infrastructure adapters (turso, in-memory, etc.).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save an order (insert or update), line items included.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, order: &Order) -> Result<(), OrderError>;

    /// Find an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Find all orders belonging to a customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_customer(&self, customer_id: &UserId) -> Result<Vec<Order>, OrderError>;

    /// Find all orders containing at least one line item from a seller,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_seller(&self, seller_id: &UserId) -> Result<Vec<Order>, OrderError>;

    /// Find every order, newest first. Admin view.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;
}
