use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::schema::{ensure_schema, SchemaGuard};
use super::store::{OrderStore, StoreError};
use crate::domain::order::{NewOrder, Order, OrderPatch};

// NUMERIC is read back as FLOAT8 so it maps onto `Option<f64>`
const SELECT_ORDER_COLUMNS: &str = "SELECT id, user_id, book_id, quantity, status, order_date, \
     total_price::FLOAT8 AS total_price FROM orders";

/// `OrderStore` backed by a PostgreSQL pool. Every call checks a connection
/// out of the pool and returns it when the statement finishes, on success and
/// on error alike.
///
/// The orders table is created at most once per process: at startup via
/// `ensure_schema`, or, if that did not succeed, before the first statement
/// that reaches the database.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
    schema: Arc<SchemaGuard>,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: Arc::new(SchemaGuard::default()),
        }
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.schema.ensure_with(|| ensure_schema(&self.pool)).await?;
        Ok(())
    }

    pub fn schema_ready(&self) -> bool {
        self.schema.is_ready()
    }

    /// Pool handle for a statement, creating the schema first if needed
    async fn pool(&self) -> Result<&PgPool, StoreError> {
        self.ensure_schema().await?;
        Ok(&self.pool)
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let orders = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER_COLUMNS} ORDER BY id"))
            .fetch_all(self.pool().await?)
            .await?;

        tracing::debug!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, StoreError> {
        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool().await?)
            .await?;
        Ok(order)
    }

    async fn create(&self, order: NewOrder) -> Result<i64, StoreError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO orders (user_id, book_id, quantity, status, total_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(order.user_id)
        .bind(order.book_id)
        .bind(order.quantity)
        .bind(&order.status)
        .bind(order.total_price)
        .fetch_one(self.pool().await?)
        .await?;

        tracing::info!(order_id = id, user_id = order.user_id, book_id = order.book_id, "Order created");
        Ok(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool().await?)
            .await?;
        Ok(row.is_some())
    }

    async fn update(&self, id: i64, patch: &OrderPatch) -> Result<u64, StoreError> {
        let Some(mut builder) = update_statement(id, patch) else {
            return Ok(0);
        };

        let result = builder.build().execute(self.pool().await?).await?;

        tracing::info!(order_id = id, rows = result.rows_affected(), "Order updated");
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool().await?)
            .await?;

        tracing::info!(order_id = id, rows = result.rows_affected(), "Order deleted");
        Ok(result.rows_affected())
    }
}

/// `UPDATE orders SET ... WHERE id = $n` with one bound assignment per
/// present field, or None when the patch is empty.
fn update_statement(id: i64, patch: &OrderPatch) -> Option<QueryBuilder<'_, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::new("UPDATE orders SET ");
    let mut set = builder.separated(", ");

    if let Some(user_id) = patch.user_id {
        set.push("user_id = ").push_bind_unseparated(user_id);
    }
    if let Some(book_id) = patch.book_id {
        set.push("book_id = ").push_bind_unseparated(book_id);
    }
    if let Some(quantity) = patch.quantity {
        set.push("quantity = ").push_bind_unseparated(quantity);
    }
    if let Some(status) = &patch.status {
        set.push("status = ").push_bind_unseparated(status);
    }
    if let Some(total_price) = patch.total_price {
        set.push("total_price = ").push_bind_unseparated(total_price);
    }

    builder.push(" WHERE id = ").push_bind(id);
    Some(builder)
}
