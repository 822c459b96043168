use actix_web::http::Method;

use super::error::ApiError;

/// What a request resolved to, before any handler runs.
///
/// Item actions carry `None` when the path is all digits but the id does not
/// fit in an i64; no such order can exist, so handlers answer "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListOrders,
    CreateOrder,
    GetOrder(Option<i64>),
    UpdateOrder(Option<i64>),
    DeleteOrder(Option<i64>),
    Health,
}

/// Map a method and raw URL path onto an action.
///
/// One trailing slash is stripped first, so `/orders/` and `/orders` are the
/// same resource and `/` (which becomes empty) lists orders. `/health`
/// answers every method; known paths with an unsupported method give
/// `MethodNotAllowed`, everything else `NotFound`.
pub fn route(method: &Method, path: &str) -> Result<Action, ApiError> {
    let path = path.strip_suffix('/').unwrap_or(path);

    if path == "/orders" || path.is_empty() {
        return match *method {
            Method::GET => Ok(Action::ListOrders),
            Method::POST => Ok(Action::CreateOrder),
            _ => Err(ApiError::MethodNotAllowed),
        };
    }

    if let Some(id) = order_id(path) {
        return match *method {
            Method::GET => Ok(Action::GetOrder(id)),
            Method::PUT => Ok(Action::UpdateOrder(id)),
            Method::DELETE => Ok(Action::DeleteOrder(id)),
            _ => Err(ApiError::MethodNotAllowed),
        };
    }

    if path == "/health" {
        return Ok(Action::Health);
    }

    Err(ApiError::NotFound)
}

/// `/orders/<digits>`; the inner value is None when the digits overflow i64
fn order_id(path: &str) -> Option<Option<i64>> {
    let digits = path.strip_prefix("/orders/")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_routes() {
        assert_eq!(route(&Method::GET, "/orders").unwrap(), Action::ListOrders);
        assert_eq!(route(&Method::POST, "/orders").unwrap(), Action::CreateOrder);
        assert_eq!(route(&Method::GET, "/orders/").unwrap(), Action::ListOrders);
        assert_eq!(route(&Method::GET, "").unwrap(), Action::ListOrders);
        assert_eq!(route(&Method::POST, "/").unwrap(), Action::CreateOrder);
    }

    #[test]
    fn test_item_routes() {
        assert_eq!(route(&Method::GET, "/orders/12").unwrap(), Action::GetOrder(Some(12)));
        assert_eq!(route(&Method::PUT, "/orders/12").unwrap(), Action::UpdateOrder(Some(12)));
        assert_eq!(
            route(&Method::DELETE, "/orders/12/").unwrap(),
            Action::DeleteOrder(Some(12))
        );
    }

    #[test]
    fn test_overflowing_id_still_routes_to_item() {
        let path = "/orders/99999999999999999999";
        assert_eq!(route(&Method::GET, path).unwrap(), Action::GetOrder(None));
        assert_eq!(route(&Method::PUT, path).unwrap(), Action::UpdateOrder(None));
        assert_eq!(route(&Method::DELETE, path).unwrap(), Action::DeleteOrder(None));
        assert_eq!(
            route(&Method::GET, "/orders/9223372036854775807").unwrap(),
            Action::GetOrder(Some(i64::MAX))
        );
        assert!(matches!(
            route(&Method::PATCH, path),
            Err(ApiError::MethodNotAllowed)
        ));
    }

    #[test]
    fn test_unsupported_methods() {
        assert!(matches!(
            route(&Method::DELETE, "/orders"),
            Err(ApiError::MethodNotAllowed)
        ));
        assert!(matches!(
            route(&Method::PATCH, "/orders/3"),
            Err(ApiError::MethodNotAllowed)
        ));
        assert!(matches!(
            route(&Method::POST, "/orders/3"),
            Err(ApiError::MethodNotAllowed)
        ));
    }

    #[test]
    fn test_health_accepts_any_method() {
        for method in [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS] {
            assert_eq!(route(&method, "/health").unwrap(), Action::Health);
        }
        assert_eq!(route(&Method::GET, "/health/").unwrap(), Action::Health);
    }

    #[test]
    fn test_unknown_paths() {
        for path in [
            "/foo",
            "/orders/abc",
            "/orders/-1",
            "/orders/1/items",
            "/orders//",
        ] {
            assert!(
                matches!(route(&Method::GET, path), Err(ApiError::NotFound)),
                "path {path}"
            );
        }
    }
}
