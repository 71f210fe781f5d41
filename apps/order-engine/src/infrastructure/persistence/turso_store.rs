//! Turso-backed store.
//!
//! Implements the persistence ports over a local turso database. The
//! checkout commit runs inside a single `BEGIN IMMEDIATE` transaction,
//! so the partial-commit failure mode cannot arise here: either the
//! whole order lands or nothing does. Stock decrements are pushed down
//! as one `UPDATE ... SET stock = MAX(0, stock - ?)` statement per
//! product, so clamping happens atomically in the storage engine rather
//! than via read-modify-write in application code.

use async_trait::async_trait;
use rust_decimal::Decimal;
use turso::{Builder, Connection, Database, Value};

use crate::application::ports::{CheckoutReceipt, CheckoutStoreError, CheckoutStorePort};
use crate::domain::inventory::{StockDelta, StockError, StockRepository};
use crate::domain::notifications::{
    Notification, NotificationError, NotificationKind, NotificationRepository,
};
use crate::domain::orders::aggregate::{Order, OrderLineItem, ReconstitutedOrderParams};
use crate::domain::orders::errors::OrderError;
use crate::domain::orders::repository::OrderRepository;
use crate::domain::orders::value_objects::{OrderStatus, PaymentMethod, ShippingAddress};
use crate::domain::shared::{
    Money, NotificationId, OrderId, ProductId, Quantity, Timestamp, UserId,
};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS orders (
    id TEXT PRIMARY KEY,
    customer_id TEXT NOT NULL,
    shipping_address TEXT NOT NULL,
    payment_method TEXT NOT NULL,
    delivery_fee TEXT NOT NULL,
    total TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS order_line_items (
    order_id TEXT NOT NULL,
    product_id TEXT NOT NULL,
    product_name TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    unit_price TEXT NOT NULL,
    seller_id TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_line_items_order ON order_line_items(order_id);
CREATE INDEX IF NOT EXISTS idx_line_items_seller ON order_line_items(seller_id);
CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    stock INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS notifications (
    id TEXT PRIMARY KEY,
    recipient_user_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    title TEXT NOT NULL,
    message TEXT NOT NULL,
    related_order_id TEXT,
    is_read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_notifications_recipient ON notifications(recipient_user_id);
";

/// Turso implementation of the persistence ports.
pub struct TursoStore {
    db: Database,
}

impl TursoStore {
    /// Open (or create) a local database at `path` and run migrations.
    ///
    /// `:memory:` is accepted for ephemeral databases.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or migrated.
    pub async fn open(path: &str) -> anyhow::Result<Self> {
        let db = Builder::new_local(path).build().await?;
        let store = Self { db };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        let conn = self.db.connect()?;
        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            conn.execute(statement, ()).await?;
        }
        Ok(())
    }

    fn conn(&self) -> Result<Connection, String> {
        self.db.connect().map_err(|e| e.to_string())
    }

    /// Insert or replace a product's stock level.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn upsert_product(&self, product_id: &ProductId, stock: u32) -> Result<(), StockError> {
        let conn = self.conn().map_err(StockError::Storage)?;
        conn.execute(
            "INSERT INTO products (id, stock) VALUES (?, ?)
             ON CONFLICT (id) DO UPDATE SET stock = excluded.stock",
            (product_id.as_str(), i64::from(stock)),
        )
        .await
        .map_err(|e| StockError::Storage(e.to_string()))?;
        Ok(())
    }
}

// =============================================================================
// Row mapping helpers
// =============================================================================

fn column_text(row: &turso::Row, index: usize) -> Result<String, String> {
    match row.get_value(index).map_err(|e| e.to_string())? {
        Value::Text(text) => Ok(text),
        other => Err(format!("expected text in column {index}, got {other:?}")),
    }
}

fn column_opt_text(row: &turso::Row, index: usize) -> Result<Option<String>, String> {
    match row.get_value(index).map_err(|e| e.to_string())? {
        Value::Text(text) => Ok(Some(text)),
        Value::Null => Ok(None),
        other => Err(format!("expected text in column {index}, got {other:?}")),
    }
}

fn column_integer(row: &turso::Row, index: usize) -> Result<i64, String> {
    match row.get_value(index).map_err(|e| e.to_string())? {
        Value::Integer(value) => Ok(value),
        other => Err(format!("expected integer in column {index}, got {other:?}")),
    }
}

fn parse_money(text: &str) -> Result<Money, String> {
    text.parse::<Decimal>()
        .map(Money::new)
        .map_err(|e| format!("bad money value {text:?}: {e}"))
}

fn parse_timestamp(text: &str) -> Result<Timestamp, String> {
    Timestamp::parse(text).map_err(|e| format!("bad timestamp {text:?}: {e}"))
}

fn order_from_rows(
    header: &turso::Row,
    line_items: Vec<OrderLineItem>,
) -> Result<Order, String> {
    let status_text = column_text(header, 6)?;
    let status = OrderStatus::parse(&status_text)
        .ok_or_else(|| format!("bad order status {status_text:?}"))?;
    let payment_text = column_text(header, 3)?;
    let payment_method = PaymentMethod::parse(&payment_text)
        .ok_or_else(|| format!("bad payment method {payment_text:?}"))?;
    let shipping_address: ShippingAddress =
        serde_json::from_str(&column_text(header, 2)?).map_err(|e| e.to_string())?;

    Ok(Order::reconstitute(ReconstitutedOrderParams {
        id: OrderId::new(column_text(header, 0)?),
        customer_id: UserId::new(column_text(header, 1)?),
        line_items,
        shipping_address,
        payment_method,
        delivery_fee: parse_money(&column_text(header, 4)?)?,
        total: parse_money(&column_text(header, 5)?)?,
        status,
        created_at: parse_timestamp(&column_text(header, 7)?)?,
        updated_at: parse_timestamp(&column_text(header, 8)?)?,
    }))
}

fn line_item_from_row(row: &turso::Row) -> Result<OrderLineItem, String> {
    let quantity = u32::try_from(column_integer(row, 1)?).map_err(|e| e.to_string())?;
    Ok(OrderLineItem {
        product_id: ProductId::new(column_text(row, 0)?),
        quantity: Quantity::new(quantity),
        unit_price: parse_money(&column_text(row, 2)?)?,
        product_name: column_text(row, 3)?,
        seller_id: UserId::new(column_text(row, 4)?),
    })
}

async fn load_line_items(conn: &Connection, order_id: &OrderId) -> Result<Vec<OrderLineItem>, String> {
    let mut rows = conn
        .query(
            "SELECT product_id, quantity, unit_price, product_name, seller_id
             FROM order_line_items WHERE order_id = ?",
            (order_id.as_str(),),
        )
        .await
        .map_err(|e| e.to_string())?;

    let mut line_items = Vec::new();
    while let Some(row) = rows.next().await.map_err(|e| e.to_string())? {
        line_items.push(line_item_from_row(&row)?);
    }
    Ok(line_items)
}

const ORDER_COLUMNS: &str = "id, customer_id, shipping_address, payment_method, \
                             delivery_fee, total, status, created_at, updated_at";

async fn load_orders(conn: &Connection, mut rows: turso::Rows) -> Result<Vec<Order>, String> {
    let mut orders = Vec::new();
    while let Some(row) = rows.next().await.map_err(|e| e.to_string())? {
        let order_id = OrderId::new(column_text(&row, 0)?);
        let line_items = load_line_items(conn, &order_id).await?;
        orders.push(order_from_rows(&row, line_items)?);
    }
    Ok(orders)
}

async fn insert_header(conn: &Connection, order: &Order) -> Result<(), String> {
    let shipping_address =
        serde_json::to_string(order.shipping_address()).map_err(|e| e.to_string())?;
    conn.execute(
        "INSERT INTO orders (id, customer_id, shipping_address, payment_method,
                             delivery_fee, total, status, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        (
            order.id().as_str(),
            order.customer_id().as_str(),
            shipping_address,
            order.payment_method().as_str(),
            order.delivery_fee().to_string(),
            order.total().to_string(),
            order.status().as_str(),
            order.created_at().to_rfc3339(),
            order.updated_at().to_rfc3339(),
        ),
    )
    .await
    .map_err(|e| e.to_string())?;
    Ok(())
}

async fn insert_line_items(conn: &Connection, order: &Order) -> Result<(), String> {
    for line in order.line_items() {
        conn.execute(
            "INSERT INTO order_line_items
                 (order_id, product_id, product_name, quantity, unit_price, seller_id)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                order.id().as_str(),
                line.product_id.as_str(),
                line.product_name.as_str(),
                i64::from(line.quantity.count()),
                line.unit_price.to_string(),
                line.seller_id.as_str(),
            ),
        )
        .await
        .map_err(|e| e.to_string())?;
    }
    Ok(())
}

async fn decrement_stock(
    conn: &Connection,
    product_id: &ProductId,
    qty: Quantity,
) -> Result<Option<u32>, String> {
    let mut rows = conn
        .query(
            "UPDATE products SET stock = MAX(0, stock - ?) WHERE id = ? RETURNING stock",
            (i64::from(qty.count()), product_id.as_str()),
        )
        .await
        .map_err(|e| e.to_string())?;

    match rows.next().await.map_err(|e| e.to_string())? {
        Some(row) => {
            let stock = u32::try_from(column_integer(&row, 0)?).map_err(|e| e.to_string())?;
            Ok(Some(stock))
        }
        None => Ok(None),
    }
}

// =============================================================================
// Port implementations
// =============================================================================

#[async_trait]
impl CheckoutStorePort for TursoStore {
    async fn commit_order(&self, order: &Order) -> Result<CheckoutReceipt, CheckoutStoreError> {
        let header_error = |message: String| CheckoutStoreError::HeaderInsert { message };

        let conn = self.conn().map_err(header_error)?;
        conn.execute("BEGIN IMMEDIATE", ())
            .await
            .map_err(|e| header_error(e.to_string()))?;

        let commit = async {
            insert_header(&conn, order).await?;
            insert_line_items(&conn, order).await?;

            let mut deltas = Vec::new();
            for line in order.line_items() {
                if let Some(new_stock) =
                    decrement_stock(&conn, &line.product_id, line.quantity).await?
                {
                    deltas.push(StockDelta {
                        product_id: line.product_id.clone(),
                        new_stock,
                    });
                }
                // A product missing from the ledger does not block the
                // commit; its stock simply cannot be tracked.
            }
            Ok::<_, String>(deltas)
        }
        .await;

        match commit {
            Ok(deltas) => {
                conn.execute("COMMIT", ())
                    .await
                    .map_err(|e| header_error(e.to_string()))?;
                Ok(CheckoutReceipt {
                    stock_deltas: deltas,
                })
            }
            Err(message) => {
                // Rolled back in full, so the buyer can safely retry.
                if let Err(e) = conn.execute("ROLLBACK", ()).await {
                    tracing::error!(error = %e, "checkout rollback failed");
                }
                Err(header_error(message))
            }
        }
    }
}

#[async_trait]
impl OrderRepository for TursoStore {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        let storage = |message: String| OrderError::Storage { message };

        let conn = self.conn().map_err(storage)?;
        let shipping_address = serde_json::to_string(order.shipping_address())
            .map_err(|e| storage(e.to_string()))?;
        conn.execute(
            "INSERT INTO orders (id, customer_id, shipping_address, payment_method,
                                 delivery_fee, total, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET status = excluded.status,
                                            updated_at = excluded.updated_at",
            (
                order.id().as_str(),
                order.customer_id().as_str(),
                shipping_address,
                order.payment_method().as_str(),
                order.delivery_fee().to_string(),
                order.total().to_string(),
                order.status().as_str(),
                order.created_at().to_rfc3339(),
                order.updated_at().to_rfc3339(),
            ),
        )
        .await
        .map_err(|e| storage(e.to_string()))?;

        // Line items are immutable; only write them on first save.
        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM order_line_items WHERE order_id = ?",
                (order.id().as_str(),),
            )
            .await
            .map_err(|e| storage(e.to_string()))?;
        let existing = match rows.next().await.map_err(|e| storage(e.to_string()))? {
            Some(row) => column_integer(&row, 0).map_err(storage)?,
            None => 0,
        };
        if existing == 0 {
            insert_line_items(&conn, order).await.map_err(storage)?;
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let storage = |message: String| OrderError::Storage { message };

        let conn = self.conn().map_err(storage)?;
        let mut rows = conn
            .query(
                &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"),
                (id.as_str(),),
            )
            .await
            .map_err(|e| storage(e.to_string()))?;

        match rows.next().await.map_err(|e| storage(e.to_string()))? {
            Some(row) => {
                let line_items = load_line_items(&conn, id).await.map_err(storage)?;
                Ok(Some(order_from_rows(&row, line_items).map_err(storage)?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_customer(&self, customer_id: &UserId) -> Result<Vec<Order>, OrderError> {
        let storage = |message: String| OrderError::Storage { message };

        let conn = self.conn().map_err(storage)?;
        let rows = conn
            .query(
                &format!(
                    "SELECT {ORDER_COLUMNS} FROM orders
                     WHERE customer_id = ? ORDER BY created_at DESC"
                ),
                (customer_id.as_str(),),
            )
            .await
            .map_err(|e| storage(e.to_string()))?;
        load_orders(&conn, rows).await.map_err(storage)
    }

    async fn find_by_seller(&self, seller_id: &UserId) -> Result<Vec<Order>, OrderError> {
        let storage = |message: String| OrderError::Storage { message };

        let conn = self.conn().map_err(storage)?;
        let rows = conn
            .query(
                &format!(
                    "SELECT {ORDER_COLUMNS} FROM orders
                     WHERE id IN (SELECT DISTINCT order_id FROM order_line_items
                                  WHERE seller_id = ?)
                     ORDER BY created_at DESC"
                ),
                (seller_id.as_str(),),
            )
            .await
            .map_err(|e| storage(e.to_string()))?;
        load_orders(&conn, rows).await.map_err(storage)
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let storage = |message: String| OrderError::Storage { message };

        let conn = self.conn().map_err(storage)?;
        let rows = conn
            .query(
                &format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"),
                (),
            )
            .await
            .map_err(|e| storage(e.to_string()))?;
        load_orders(&conn, rows).await.map_err(storage)
    }
}

#[async_trait]
impl StockRepository for TursoStore {
    async fn decrement(&self, product_id: &ProductId, qty: Quantity) -> Result<u32, StockError> {
        let conn = self.conn().map_err(StockError::Storage)?;
        decrement_stock(&conn, product_id, qty)
            .await
            .map_err(StockError::Storage)?
            .ok_or_else(|| StockError::ProductNotFound(product_id.clone()))
    }

    async fn stock_of(&self, product_id: &ProductId) -> Result<u32, StockError> {
        let conn = self.conn().map_err(StockError::Storage)?;
        let mut rows = conn
            .query(
                "SELECT stock FROM products WHERE id = ?",
                (product_id.as_str(),),
            )
            .await
            .map_err(|e| StockError::Storage(e.to_string()))?;

        match rows
            .next()
            .await
            .map_err(|e| StockError::Storage(e.to_string()))?
        {
            Some(row) => {
                let stock = column_integer(&row, 0).map_err(StockError::Storage)?;
                u32::try_from(stock).map_err(|e| StockError::Storage(e.to_string()))
            }
            None => Err(StockError::ProductNotFound(product_id.clone())),
        }
    }
}

#[async_trait]
impl NotificationRepository for TursoStore {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationError> {
        let storage = |message: String| NotificationError::Storage(message);

        let conn = self.conn().map_err(storage)?;
        conn.execute(
            "INSERT INTO notifications
                 (id, recipient_user_id, kind, title, message, related_order_id,
                  is_read, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            (
                notification.id.as_str(),
                notification.recipient_user_id.as_str(),
                notification.kind.as_str(),
                notification.title.as_str(),
                notification.message.as_str(),
                notification
                    .related_order_id
                    .as_ref()
                    .map(|id| id.as_str().to_string()),
                i64::from(notification.is_read),
                notification.created_at.to_rfc3339(),
            ),
        )
        .await
        .map_err(|e| storage(e.to_string()))?;
        Ok(())
    }

    async fn find_for_recipient(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<Notification>, NotificationError> {
        let storage = |message: String| NotificationError::Storage(message);

        let conn = self.conn().map_err(storage)?;
        let mut rows = conn
            .query(
                "SELECT id, recipient_user_id, kind, title, message, related_order_id,
                        is_read, created_at
                 FROM notifications WHERE recipient_user_id = ?
                 ORDER BY created_at DESC",
                (recipient.as_str(),),
            )
            .await
            .map_err(|e| storage(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await.map_err(|e| storage(e.to_string()))? {
            let kind_text = column_text(&row, 2).map_err(storage)?;
            let kind = NotificationKind::parse(&kind_text)
                .ok_or_else(|| storage(format!("bad notification kind {kind_text:?}")))?;
            records.push(Notification {
                id: NotificationId::new(column_text(&row, 0).map_err(storage)?),
                recipient_user_id: UserId::new(column_text(&row, 1).map_err(storage)?),
                kind,
                title: column_text(&row, 3).map_err(storage)?,
                message: column_text(&row, 4).map_err(storage)?,
                related_order_id: column_opt_text(&row, 5).map_err(storage)?.map(OrderId::new),
                is_read: column_integer(&row, 6).map_err(storage)? != 0,
                created_at: parse_timestamp(&column_text(&row, 7).map_err(storage)?)
                    .map_err(storage)?,
            });
        }
        Ok(records)
    }

    async fn mark_read(
        &self,
        recipient: &UserId,
        id: &NotificationId,
    ) -> Result<(), NotificationError> {
        let storage = |message: String| NotificationError::Storage(message);

        let conn = self.conn().map_err(storage)?;
        let mut rows = conn
            .query(
                "UPDATE notifications SET is_read = 1
                 WHERE id = ? AND recipient_user_id = ? RETURNING id",
                (id.as_str(), recipient.as_str()),
            )
            .await
            .map_err(|e| storage(e.to_string()))?;

        match rows.next().await.map_err(|e| storage(e.to_string()))? {
            Some(_) => Ok(()),
            None => Err(NotificationError::NotFound(id.clone())),
        }
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<(), NotificationError> {
        let storage = |message: String| NotificationError::Storage(message);

        let conn = self.conn().map_err(storage)?;
        conn.execute(
            "UPDATE notifications SET is_read = 1 WHERE recipient_user_id = ?",
            (recipient.as_str(),),
        )
        .await
        .map_err(|e| storage(e.to_string()))?;
        Ok(())
    }

    async fn unread_count(&self, recipient: &UserId) -> Result<u64, NotificationError> {
        let storage = |message: String| NotificationError::Storage(message);

        let conn = self.conn().map_err(storage)?;
        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM notifications
                 WHERE recipient_user_id = ? AND is_read = 0",
                (recipient.as_str(),),
            )
            .await
            .map_err(|e| storage(e.to_string()))?;

        match rows.next().await.map_err(|e| storage(e.to_string()))? {
            Some(row) => {
                let count = column_integer(&row, 0).map_err(storage)?;
                u64::try_from(count).map_err(|e| storage(e.to_string()))
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::orders::{PaymentMethod, PlaceOrderCommand};
    use crate::domain::shared::Money;

    async fn store() -> TursoStore {
        TursoStore::open(":memory:").await.unwrap()
    }

    fn order(products: &[(&str, &str, u32)]) -> Order {
        Order::place(PlaceOrderCommand {
            customer_id: UserId::new("c-1"),
            line_items: products
                .iter()
                .map(|(id, seller, qty)| OrderLineItem {
                    product_id: ProductId::new(*id),
                    product_name: format!("Product {id}"),
                    quantity: Quantity::new(*qty),
                    unit_price: Money::from_units(100),
                    seller_id: UserId::new(*seller),
                })
                .collect(),
            shipping_address: ShippingAddress {
                full_name: "Asha Verma".to_string(),
                phone: "9876543210".to_string(),
                address: "14 MG Road".to_string(),
                city: "Bengaluru".to_string(),
                state: Some("Karnataka".to_string()),
                pincode: "560001".to_string(),
            },
            payment_method: PaymentMethod::Upi,
            delivery_fee: Money::from_units(60),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn commit_then_reload_round_trips_the_order() {
        let store = store().await;
        store.upsert_product(&ProductId::new("p-1"), 10).await.unwrap();

        let placed = order(&[("p-1", "s-1", 2)]);
        let receipt = store.commit_order(&placed).await.unwrap();
        assert_eq!(receipt.stock_deltas, vec![StockDelta {
            product_id: ProductId::new("p-1"),
            new_stock: 8,
        }]);

        let loaded = store.find_by_id(placed.id()).await.unwrap().unwrap();
        assert_eq!(loaded.total(), placed.total());
        assert_eq!(loaded.line_items().len(), 1);
        assert_eq!(loaded.status(), OrderStatus::Pending);
        assert_eq!(loaded.shipping_address().city, "Bengaluru");
    }

    #[tokio::test]
    async fn orders_survive_a_reopen_of_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.db");
        let path = path.to_str().unwrap();

        let placed = order(&[("p-1", "s-1", 2)]);
        {
            let store = TursoStore::open(path).await.unwrap();
            store.upsert_product(&ProductId::new("p-1"), 10).await.unwrap();
            store.commit_order(&placed).await.unwrap();
        }

        // Migration is idempotent and the committed rows are still there.
        let reopened = TursoStore::open(path).await.unwrap();
        let loaded = reopened.find_by_id(placed.id()).await.unwrap().unwrap();
        assert_eq!(loaded.total(), placed.total());
        assert_eq!(reopened.stock_of(&ProductId::new("p-1")).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn duplicate_commit_rolls_back_cleanly() {
        let store = store().await;
        store.upsert_product(&ProductId::new("p-1"), 10).await.unwrap();

        let placed = order(&[("p-1", "s-1", 2)]);
        store.commit_order(&placed).await.unwrap();

        // Same primary key again: header insert fails, transaction rolls
        // back, stock is untouched.
        let err = store.commit_order(&placed).await.unwrap_err();
        assert!(matches!(err, CheckoutStoreError::HeaderInsert { .. }));
        assert_eq!(store.stock_of(&ProductId::new("p-1")).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn stock_decrement_clamps_at_zero() {
        let store = store().await;
        store.upsert_product(&ProductId::new("p-1"), 3).await.unwrap();

        let remaining = store
            .decrement(&ProductId::new("p-1"), Quantity::new(9))
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn unknown_product_decrement_reports_not_found() {
        let store = store().await;
        let err = store
            .decrement(&ProductId::new("ghost"), Quantity::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn seller_view_finds_orders_with_their_line_items() {
        let store = store().await;
        store.upsert_product(&ProductId::new("p-1"), 10).await.unwrap();
        store.upsert_product(&ProductId::new("p-2"), 10).await.unwrap();

        let placed = order(&[("p-1", "s-1", 1), ("p-2", "s-2", 1)]);
        store.commit_order(&placed).await.unwrap();

        let seller_orders = store.find_by_seller(&UserId::new("s-2")).await.unwrap();
        assert_eq!(seller_orders.len(), 1);

        let stranger_orders = store.find_by_seller(&UserId::new("s-9")).await.unwrap();
        assert!(stranger_orders.is_empty());
    }

    #[tokio::test]
    async fn status_update_persists_without_duplicating_lines() {
        use crate::domain::orders::value_objects::{Actor, ActorRole};

        let store = store().await;
        store.upsert_product(&ProductId::new("p-1"), 10).await.unwrap();

        let mut placed = order(&[("p-1", "s-1", 1)]);
        store.commit_order(&placed).await.unwrap();

        let actor = Actor::new(UserId::new("s-1"), ActorRole::Seller);
        placed.advance(&actor, OrderStatus::Confirmed).unwrap();
        store.save(&placed).await.unwrap();

        let loaded = store.find_by_id(placed.id()).await.unwrap().unwrap();
        assert_eq!(loaded.status(), OrderStatus::Confirmed);
        assert_eq!(loaded.line_items().len(), 1);
    }

    #[tokio::test]
    async fn notification_inbox_round_trip() {
        let store = store().await;
        let recipient = UserId::new("s-1");
        let notification = Notification::order_placed(
            recipient.clone(),
            &OrderId::new("o-1"),
            "Asha Verma",
            Money::from_units(230),
        );
        store.insert(&notification).await.unwrap();

        assert_eq!(store.unread_count(&recipient).await.unwrap(), 1);

        let inbox = store.find_for_recipient(&recipient).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::Order);

        store.mark_all_read(&recipient).await.unwrap();
        assert_eq!(store.unread_count(&recipient).await.unwrap(), 0);
    }
}
