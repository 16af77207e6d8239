//! JSON rendering for target documents.
//!
//! Documents are converted to [`serde_json::Value`] (with key order kept, via
//! the `preserve_order` feature) and printed from there.
//!
//! # Examples
//!
//! ```
//! use mongosql::Value;
//! use mongosql::output::{to_json, to_json_pretty};
//!
//! let value = Value::single("field", Value::from("value"));
//!
//! assert_eq!(to_json(&value), r#"{"field":"value"}"#);
//! assert_eq!(to_json_pretty(&value), "{\n  \"field\": \"value\"\n}");
//! ```

use crate::value::Value;

/// Convert a document value to `serde_json::Value`.
///
/// Non-finite floats have no JSON representation and become `null`.
pub fn to_serde_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(to_serde_json).collect()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), to_serde_json(v)))
                .collect(),
        ),
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        to_serde_json(&value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Compact JSON, keys in document order.
pub fn to_json(value: &Value) -> String {
    to_serde_json(value).to_string()
}

/// Pretty-printed JSON with 2-space indentation, keys in document order.
pub fn to_json_pretty(value: &Value) -> String {
    format!("{:#}", to_serde_json(value))
}
