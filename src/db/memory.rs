use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::store::{OrderStore, StoreError};
use crate::domain::order::{NewOrder, Order, OrderPatch};

/// In-process `OrderStore` for handler tests
#[derive(Default)]
pub struct MemoryOrderStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Order>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, StoreError> {
        Ok(self.inner.lock().unwrap().rows.get(&id).cloned())
    }

    async fn create(&self, order: NewOrder) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(
            id,
            Order {
                id,
                user_id: order.user_id,
                book_id: order.book_id,
                quantity: order.quantity,
                status: order.status,
                order_date: Utc::now(),
                total_price: order.total_price,
            },
        );
        Ok(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.inner.lock().unwrap().rows.contains_key(&id))
    }

    async fn update(&self, id: i64, patch: &OrderPatch) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.get_mut(&id) {
            Some(order) => {
                order.apply(patch);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        Ok(self.inner.lock().unwrap().rows.remove(&id).map_or(0, |_| 1))
    }
}

/// Store whose every call fails, standing in for an unreachable database
pub struct UnavailableOrderStore;

impl UnavailableOrderStore {
    fn fail<T>() -> Result<T, StoreError> {
        Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl OrderStore for UnavailableOrderStore {
    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        Self::fail()
    }

    async fn get(&self, _id: i64) -> Result<Option<Order>, StoreError> {
        Self::fail()
    }

    async fn create(&self, _order: NewOrder) -> Result<i64, StoreError> {
        Self::fail()
    }

    async fn exists(&self, _id: i64) -> Result<bool, StoreError> {
        Self::fail()
    }

    async fn update(&self, _id: i64, _patch: &OrderPatch) -> Result<u64, StoreError> {
        Self::fail()
    }

    async fn delete(&self, _id: i64) -> Result<u64, StoreError> {
        Self::fail()
    }
}
