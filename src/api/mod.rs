// ============================================================================
// HTTP API
// ============================================================================
//
// | Method | Path          | Handler        |
// |--------|---------------|----------------|
// | GET    | /orders       | list_orders    |
// | POST   | /orders       | create_order   |
// | GET    | /orders/{id}  | get_order      |
// | PUT    | /orders/{id}  | update_order   |
// | DELETE | /orders/{id}  | delete_order   |
// | any    | /health       | health         |
//
// ============================================================================

mod error;
mod handlers;
mod router;
mod server;

pub use server::{configure, start_server};
