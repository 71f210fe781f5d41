//! In-memory store for testing.
//!
//! Implements every persistence port over `parking_lot` maps. Unlike
//! the turso adapter it commits checkout steps one by one, which makes
//! the partial-commit failure mode reachable: tests arm a failure point
//! and observe an order header without line items or decrements.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::application::ports::{CheckoutReceipt, CheckoutStoreError, CheckoutStorePort};
use crate::domain::inventory::{StockDelta, StockError, StockRepository};
use crate::domain::notifications::{Notification, NotificationError, NotificationRepository};
use crate::domain::orders::aggregate::Order;
use crate::domain::orders::errors::OrderError;
use crate::domain::orders::repository::OrderRepository;
use crate::domain::shared::{NotificationId, OrderId, ProductId, Quantity, UserId};

/// Where an armed in-memory commit fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    /// Fail the order header insert; nothing is written.
    HeaderInsert,
    /// Fail after the header landed, before line items are written.
    BeforeLineItems,
    /// Fail after line items, mid-way through stock decrements.
    DuringStockDecrement,
}

/// In-memory implementation of the persistence ports.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    orders: RwLock<HashMap<OrderId, Order>>,
    stock: RwLock<HashMap<ProductId, u32>>,
    notifications: RwLock<Vec<Notification>>,
    fail_at: Mutex<Option<FailurePoint>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product's stock level (for test setup).
    pub fn seed_product(&self, product_id: ProductId, stock: u32) {
        self.stock.write().insert(product_id, stock);
    }

    /// Arm a one-shot commit failure at the given point.
    pub fn fail_next_commit_at(&self, point: FailurePoint) {
        *self.fail_at.lock() = Some(point);
    }

    /// Number of stored orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.read().len()
    }

    fn decrement_clamped(&self, product_id: &ProductId, qty: Quantity) -> Result<u32, StockError> {
        let mut stock = self.stock.write();
        let level = stock
            .get_mut(product_id)
            .ok_or_else(|| StockError::ProductNotFound(product_id.clone()))?;
        *level = level.saturating_sub(qty.count());
        Ok(*level)
    }
}

#[async_trait]
impl CheckoutStorePort for InMemoryStore {
    async fn commit_order(&self, order: &Order) -> Result<CheckoutReceipt, CheckoutStoreError> {
        let armed = self.fail_at.lock().take();

        if armed == Some(FailurePoint::HeaderInsert) {
            return Err(CheckoutStoreError::HeaderInsert {
                message: "injected header insert failure".to_string(),
            });
        }

        // Step 1: header. The in-memory order carries its line items, so
        // a post-header failure is simulated by storing a line-item-free
        // copy of the aggregate.
        if armed == Some(FailurePoint::BeforeLineItems) {
            let headless = Order::reconstitute(crate::domain::orders::ReconstitutedOrderParams {
                id: order.id().clone(),
                customer_id: order.customer_id().clone(),
                line_items: Vec::new(),
                shipping_address: order.shipping_address().clone(),
                payment_method: order.payment_method(),
                delivery_fee: order.delivery_fee(),
                total: order.total(),
                status: order.status(),
                created_at: order.created_at(),
                updated_at: order.updated_at(),
            });
            self.orders.write().insert(order.id().clone(), headless);
            return Err(CheckoutStoreError::PartialCommit {
                message: "injected failure before line items".to_string(),
                stock_deltas: Vec::new(),
            });
        }

        // Steps 1-2 together.
        self.orders
            .write()
            .insert(order.id().clone(), order.clone());

        // Step 3: decrements, one product at a time.
        let mut deltas = Vec::new();
        for (index, line) in order.line_items().iter().enumerate() {
            if index > 0 && armed == Some(FailurePoint::DuringStockDecrement) {
                return Err(CheckoutStoreError::PartialCommit {
                    message: "injected failure during stock decrement".to_string(),
                    stock_deltas: deltas,
                });
            }
            match self.decrement_clamped(&line.product_id, line.quantity) {
                Ok(new_stock) => deltas.push(StockDelta {
                    product_id: line.product_id.clone(),
                    new_stock,
                }),
                Err(e) => {
                    return Err(CheckoutStoreError::PartialCommit {
                        message: e.to_string(),
                        stock_deltas: deltas,
                    });
                }
            }
        }

        Ok(CheckoutReceipt {
            stock_deltas: deltas,
        })
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        self.orders
            .write()
            .insert(order.id().clone(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self.orders.read().get(id).cloned())
    }

    async fn find_by_customer(&self, customer_id: &UserId) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .values()
            .filter(|o| o.customer_id() == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(orders)
    }

    async fn find_by_seller(&self, seller_id: &UserId) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .values()
            .filter(|o| o.distinct_seller_ids().contains(seller_id))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(orders)
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self.orders.read().values().cloned().collect();
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(orders)
    }
}

#[async_trait]
impl StockRepository for InMemoryStore {
    async fn decrement(&self, product_id: &ProductId, qty: Quantity) -> Result<u32, StockError> {
        self.decrement_clamped(product_id, qty)
    }

    async fn stock_of(&self, product_id: &ProductId) -> Result<u32, StockError> {
        self.stock
            .read()
            .get(product_id)
            .copied()
            .ok_or_else(|| StockError::ProductNotFound(product_id.clone()))
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.notifications.write().push(notification.clone());
        Ok(())
    }

    async fn find_for_recipient(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<Notification>, NotificationError> {
        let mut records: Vec<Notification> = self
            .notifications
            .read()
            .iter()
            .filter(|n| &n.recipient_user_id == recipient)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn mark_read(
        &self,
        recipient: &UserId,
        id: &NotificationId,
    ) -> Result<(), NotificationError> {
        let mut records = self.notifications.write();
        let record = records
            .iter_mut()
            .find(|n| &n.id == id && &n.recipient_user_id == recipient)
            .ok_or_else(|| NotificationError::NotFound(id.clone()))?;
        record.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<(), NotificationError> {
        for record in self.notifications.write().iter_mut() {
            if &record.recipient_user_id == recipient {
                record.is_read = true;
            }
        }
        Ok(())
    }

    async fn unread_count(&self, recipient: &UserId) -> Result<u64, NotificationError> {
        Ok(self
            .notifications
            .read()
            .iter()
            .filter(|n| &n.recipient_user_id == recipient && !n.is_read)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::orders::{
        OrderLineItem, PaymentMethod, PlaceOrderCommand, ShippingAddress,
    };
    use crate::domain::shared::Money;

    fn order(products: &[(&str, u32)]) -> Order {
        Order::place(PlaceOrderCommand {
            customer_id: UserId::new("c-1"),
            line_items: products
                .iter()
                .map(|(id, qty)| OrderLineItem {
                    product_id: ProductId::new(*id),
                    product_name: format!("Product {id}"),
                    quantity: Quantity::new(*qty),
                    unit_price: Money::from_units(100),
                    seller_id: UserId::new("s-1"),
                })
                .collect(),
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

    #[tokio::test]
    async fn commit_decrements_stock_and_stores_order() {
        let store = InMemoryStore::new();
        store.seed_product(ProductId::new("p-1"), 10);

        let order = order(&[("p-1", 3)]);
        let receipt = store.commit_order(&order).await.unwrap();

        assert_eq!(receipt.stock_deltas.len(), 1);
        assert_eq!(receipt.stock_deltas[0].new_stock, 7);
        assert_eq!(store.stock_of(&ProductId::new("p-1")).await.unwrap(), 7);
        assert!(store.find_by_id(order.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn decrement_clamps_at_zero() {
        let store = InMemoryStore::new();
        store.seed_product(ProductId::new("p-1"), 2);

        let new_stock = store
            .decrement(&ProductId::new("p-1"), Quantity::new(5))
            .await
            .unwrap();
        assert_eq!(new_stock, 0);
    }

    #[tokio::test]
    async fn header_failure_writes_nothing() {
        let store = InMemoryStore::new();
        store.seed_product(ProductId::new("p-1"), 10);
        store.fail_next_commit_at(FailurePoint::HeaderInsert);

        let order = order(&[("p-1", 3)]);
        let err = store.commit_order(&order).await.unwrap_err();

        assert!(matches!(err, CheckoutStoreError::HeaderInsert { .. }));
        assert_eq!(store.order_count(), 0);
        assert_eq!(store.stock_of(&ProductId::new("p-1")).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn partial_commit_leaves_pending_header() {
        let store = InMemoryStore::new();
        store.seed_product(ProductId::new("p-1"), 10);
        store.fail_next_commit_at(FailurePoint::BeforeLineItems);

        let order = order(&[("p-1", 3)]);
        let err = store.commit_order(&order).await.unwrap_err();

        assert!(matches!(err, CheckoutStoreError::PartialCommit { .. }));
        let stored = store.find_by_id(order.id()).await.unwrap().unwrap();
        assert!(stored.line_items().is_empty());
        assert_eq!(store.stock_of(&ProductId::new("p-1")).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn mid_decrement_failure_reports_applied_deltas() {
        let store = InMemoryStore::new();
        store.seed_product(ProductId::new("p-1"), 10);
        store.seed_product(ProductId::new("p-2"), 10);
        store.fail_next_commit_at(FailurePoint::DuringStockDecrement);

        let order = order(&[("p-1", 2), ("p-2", 2)]);
        match store.commit_order(&order).await.unwrap_err() {
            CheckoutStoreError::PartialCommit { stock_deltas, .. } => {
                assert_eq!(stock_deltas.len(), 1);
                assert_eq!(stock_deltas[0].new_stock, 8);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The second product was never touched.
        assert_eq!(store.stock_of(&ProductId::new("p-2")).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn failure_points_are_one_shot() {
        let store = InMemoryStore::new();
        store.seed_product(ProductId::new("p-1"), 10);
        store.fail_next_commit_at(FailurePoint::HeaderInsert);

        let order = order(&[("p-1", 1)]);
        assert!(store.commit_order(&order).await.is_err());
        assert!(store.commit_order(&order).await.is_ok());
    }

    #[tokio::test]
    async fn mark_read_is_idempotent_and_scoped() {
        let store = InMemoryStore::new();
        let notification = Notification::order_placed(
            UserId::new("s-1"),
            &OrderId::new("o-1"),
            "Asha",
            Money::from_units(100),
        );
        store.insert(&notification).await.unwrap();

        store
            .mark_read(&UserId::new("s-1"), &notification.id)
            .await
            .unwrap();
        store
            .mark_read(&UserId::new("s-1"), &notification.id)
            .await
            .unwrap();
        assert_eq!(store.unread_count(&UserId::new("s-1")).await.unwrap(), 0);

        // Another user cannot mark someone else's notification.
        let err = store
            .mark_read(&UserId::new("s-2"), &notification.id)
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::NotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_decrements_never_go_negative() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryStore::new());
        store.seed_product(ProductId::new("p-1"), 10);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .decrement(&ProductId::new("p-1"), Quantity::new(3))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            let remaining = handle.await.unwrap();
            assert!(remaining <= 10);
        }
        assert_eq!(store.stock_of(&ProductId::new("p-1")).await.unwrap(), 0);
    }
}
