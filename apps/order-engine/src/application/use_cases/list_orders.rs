//! List Orders Use Case
//!
//! Role-scoped order views: customers see their own orders, sellers see
//! orders containing their products, admins see everything.

use std::sync::Arc;

use crate::domain::orders::repository::OrderRepository;
use crate::domain::orders::{Actor, ActorRole, Order, OrderError};

/// Use case for the three dashboard order lists.
pub struct ListOrdersUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> ListOrdersUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new `ListOrdersUseCase`.
    pub const fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Orders visible to the actor, scoped by role.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying query fails.
    pub async fn execute(&self, actor: &Actor) -> Result<Vec<Order>, OrderError> {
        match actor.role {
            ActorRole::Customer => self.order_repo.find_by_customer(&actor.user_id).await,
            ActorRole::Seller => self.order_repo.find_by_seller(&actor.user_id).await,
            ActorRole::Admin => self.order_repo.find_all().await,
        }
    }
}
