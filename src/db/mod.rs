// ============================================================================
// Database Layer
// ============================================================================
//
// - Connection manager: pooled PostgreSQL handle with a bounded startup retry
// - Schema initializer: idempotent CREATE TABLE IF NOT EXISTS, retried on
//   first use until it succeeds once
// - Store: the `OrderStore` seam handlers talk to, plus its sqlx implementation
//
// ============================================================================

mod pool;
mod postgres;
mod schema;
mod store;

#[cfg(test)]
pub mod memory;

pub use pool::{connect_lazy, connect_with_retry};
pub use postgres::PgOrderStore;
pub use store::{OrderStore, StoreError};
