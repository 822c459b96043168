use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use serde_json::{Number, Value};

// ============================================================================
// Lenient field decoding for request bodies
// ============================================================================
//
// Clients send numbers as strings and integers as floats; the column type
// decides what the value becomes. Integral values round to nearest,
// booleans map to 1/0. `null` stays absent.
//
// ============================================================================

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

fn number_as_f64(n: &Number) -> Option<f64> {
    n.as_f64().filter(|f| f.is_finite())
}

fn to_i32(value: &Value) -> Option<i32> {
    let float = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i).ok();
            }
            number_as_f64(n)?
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return i32::try_from(i).ok();
            }
            s.parse::<f64>().ok().filter(|f| f.is_finite())?
        }
        Value::Bool(b) => return Some(i32::from(*b)),
        _ => return None,
    };

    let rounded = float.round();
    if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
        return None;
    }
    Some(rounded as i32)
}

fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => number_as_f64(n),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        _ => None,
    }
}

pub fn int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => to_i32(&value)
            .map(Some)
            .ok_or_else(|| de::Error::invalid_value(unexpected(&value), &"an integer")),
    }
}

pub fn decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => to_f64(&value)
            .map(Some)
            .ok_or_else(|| de::Error::invalid_value(unexpected(&value), &"a number")),
    }
}

pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => to_text(&value)
            .map(Some)
            .ok_or_else(|| de::Error::invalid_value(unexpected(&value), &"a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integers_from_numbers_and_strings() {
        assert_eq!(to_i32(&json!(5)), Some(5));
        assert_eq!(to_i32(&json!("5")), Some(5));
        assert_eq!(to_i32(&json!(" 12 ")), Some(12));
        assert_eq!(to_i32(&json!(2.0)), Some(2));
        assert_eq!(to_i32(&json!("2.0")), Some(2));
        assert_eq!(to_i32(&json!(2.6)), Some(3));
        assert_eq!(to_i32(&json!(true)), Some(1));
    }

    #[test]
    fn test_integers_that_cannot_be_coerced() {
        assert_eq!(to_i32(&json!("many")), None);
        assert_eq!(to_i32(&json!("")), None);
        assert_eq!(to_i32(&json!([1])), None);
        assert_eq!(to_i32(&json!({"n": 1})), None);
        assert_eq!(to_i32(&json!(9_999_999_999i64)), None);
    }

    #[test]
    fn test_decimals() {
        assert_eq!(to_f64(&json!(19.99)), Some(19.99));
        assert_eq!(to_f64(&json!("19.99")), Some(19.99));
        assert_eq!(to_f64(&json!(20)), Some(20.0));
        assert_eq!(to_f64(&json!("free")), None);
        assert_eq!(to_f64(&json!("NaN")), None);
    }

    #[test]
    fn test_text_from_scalars() {
        assert_eq!(to_text(&json!("shipped")), Some("shipped".to_string()));
        assert_eq!(to_text(&json!(3)), Some("3".to_string()));
        assert_eq!(to_text(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(to_text(&json!(true)), Some("1".to_string()));
        assert_eq!(to_text(&json!(["a"])), None);
    }
}
