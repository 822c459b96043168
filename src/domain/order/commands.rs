use serde::Deserialize;
use serde_json::{Map, Value};

use super::coerce;
use super::errors::OrderError;
use super::value_objects::{DEFAULT_QUANTITY, DEFAULT_STATUS};

// ============================================================================
// Order Commands - Typed request bodies
// ============================================================================
//
// JSON `null` counts as absent, so `{"status": null}` behaves exactly like a
// body without `status`. Scalars of the "wrong" JSON type are coerced to the
// column type (see `coerce`); only values with no sensible reading fail.
//
// ============================================================================

/// Raw create body; every field optional until validated
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default, deserialize_with = "coerce::int")]
    pub user_id: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub book_id: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub quantity: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "coerce::decimal")]
    pub total_price: Option<f64>,
}

/// A validated insert with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i32,
    pub book_id: i32,
    pub quantity: i32,
    pub status: String,
    pub total_price: Option<f64>,
}

/// Partial update; only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderPatch {
    #[serde(default, deserialize_with = "coerce::int")]
    pub user_id: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub book_id: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub quantity: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "coerce::decimal")]
    pub total_price: Option<f64>,
}

/// Non-empty JSON object, or None for anything else (missing, malformed,
/// scalar, array, `{}`)
fn json_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(map),
        _ => None,
    }
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = OrderError;

    fn try_from(req: CreateOrderRequest) -> Result<Self, Self::Error> {
        let (Some(user_id), Some(book_id)) = (req.user_id, req.book_id) else {
            return Err(OrderError::MissingRequiredFields);
        };

        Ok(NewOrder {
            user_id,
            book_id,
            quantity: req.quantity.unwrap_or(DEFAULT_QUANTITY),
            status: req.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            total_price: req.total_price,
        })
    }
}

impl NewOrder {
    pub fn from_body(body: &[u8]) -> Result<Self, OrderError> {
        let map = json_object(body).ok_or(OrderError::MissingRequiredFields)?;
        let req: CreateOrderRequest = serde_json::from_value(Value::Object(map))
            .map_err(|e| OrderError::InvalidField(e.to_string()))?;
        req.try_into()
    }
}

impl OrderPatch {
    /// Parse an update body. An empty object is reported as `NoData`; an
    /// object without any known field parses to an empty patch.
    pub fn from_body(body: &[u8]) -> Result<Self, OrderError> {
        let map = json_object(body).ok_or(OrderError::NoData)?;
        serde_json::from_value(Value::Object(map))
            .map_err(|e| OrderError::InvalidField(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.book_id.is_none()
            && self.quantity.is_none()
            && self.status.is_none()
            && self.total_price.is_none()
    }
}
