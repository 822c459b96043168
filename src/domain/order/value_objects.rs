use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Order Value Objects
// ============================================================================

pub const DEFAULT_QUANTITY: i32 = 1;
pub const DEFAULT_STATUS: &str = "pending";

/// A persisted order row. `id` and `order_date` are assigned by the store.
#[derive(Serialize, Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i32,
    pub book_id: i32,
    pub quantity: i32,
    pub status: String,
    pub order_date: DateTime<Utc>,
    pub total_price: Option<f64>,
}

impl Order {
    /// Overwrite only the fields present in the patch
    pub fn apply(&mut self, patch: &super::OrderPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(book_id) = patch.book_id {
            self.book_id = book_id;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(status) = &patch.status {
            self.status = status.clone();
        }
        if let Some(total_price) = patch.total_price {
            self.total_price = Some(total_price);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
