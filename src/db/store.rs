use async_trait::async_trait;

use crate::domain::order::{NewOrder, Order, OrderPatch};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for orders. Each call is independent; concurrent writers to
/// the same row are serialized by the backing store (last writer wins).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders, ordered by id
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Order>, StoreError>;

    /// Insert and return the id assigned by the store
    async fn create(&self, order: NewOrder) -> Result<i64, StoreError>;

    async fn exists(&self, id: i64) -> Result<bool, StoreError>;

    /// Apply a non-empty patch; returns the number of rows touched
    async fn update(&self, id: i64, patch: &OrderPatch) -> Result<u64, StoreError>;

    /// Hard delete; returns the number of rows removed
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;
}
