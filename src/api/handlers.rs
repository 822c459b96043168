use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::error::ApiError;
use super::router::{route, Action};
use crate::db::OrderStore;
use crate::domain::order::{NewOrder, Order, OrderError, OrderPatch};

pub const SERVICE_NAME: &str = "order-service";

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    service: &'static str,
}

#[derive(Serialize)]
struct OrderList {
    orders: Vec<Order>,
}

#[derive(Serialize)]
struct Created {
    message: &'static str,
    id: i64,
}

#[derive(Serialize)]
struct Message {
    message: &'static str,
}

/// Single entry point for every request: resolve the route, then run the
/// matching handler against the store.
pub async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    store: web::Data<dyn OrderStore>,
) -> Result<HttpResponse, ApiError> {
    let action = route(req.method(), req.path())?;
    tracing::debug!(method = %req.method(), path = req.path(), ?action, "Dispatching request");

    let store = store.get_ref();
    let result = match action {
        Action::Health => Ok(health()),
        Action::ListOrders => list_orders(store).await,
        Action::CreateOrder => create_order(store, &body).await,
        Action::GetOrder(id) => get_order(store, id).await,
        Action::UpdateOrder(id) => update_order(store, id, &body).await,
        Action::DeleteOrder(id) => delete_order(store, id).await,
    };

    if let Err(ApiError::Database(e)) = &result {
        tracing::error!(?action, error = %e, "Database error");
    }
    result
}

pub fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthBody {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

pub async fn list_orders(store: &dyn OrderStore) -> Result<HttpResponse, ApiError> {
    let orders = store.list().await?;
    Ok(HttpResponse::Ok().json(OrderList { orders }))
}

pub async fn get_order(store: &dyn OrderStore, id: Option<i64>) -> Result<HttpResponse, ApiError> {
    let id = id.ok_or(ApiError::OrderNotFound)?;
    let order = store.get(id).await?.ok_or(ApiError::OrderNotFound)?;
    Ok(HttpResponse::Ok().json(order))
}

pub async fn create_order(store: &dyn OrderStore, body: &[u8]) -> Result<HttpResponse, ApiError> {
    let order = NewOrder::from_body(body)?;
    let id = store.create(order).await?;

    Ok(HttpResponse::Created().json(Created {
        message: "Order created successfully",
        id,
    }))
}

pub async fn update_order(
    store: &dyn OrderStore,
    id: Option<i64>,
    body: &[u8],
) -> Result<HttpResponse, ApiError> {
    let patch = OrderPatch::from_body(body)?;

    let id = id.ok_or(ApiError::OrderNotFound)?;
    if !store.exists(id).await? {
        return Err(ApiError::OrderNotFound);
    }
    if patch.is_empty() {
        return Err(OrderError::NoValidFields.into());
    }

    store.update(id, &patch).await?;
    Ok(HttpResponse::Ok().json(Message {
        message: "Order updated successfully",
    }))
}

pub async fn delete_order(store: &dyn OrderStore, id: Option<i64>) -> Result<HttpResponse, ApiError> {
    let id = id.ok_or(ApiError::OrderNotFound)?;
    if store.delete(id).await? == 0 {
        return Err(ApiError::OrderNotFound);
    }

    Ok(HttpResponse::Ok().json(Message {
        message: "Order deleted successfully",
    }))
}
