//! JSON serialization and deserialization for attribute stores.
//!
//! # Value to JSON Mapping
//!
//! | Value   | JSON                      |
//! |---------|---------------------------|
//! | `Null`  | null                      |
//! | `Bool`  | true/false                |
//! | `Int`   | integer                   |
//! | `Float` | number (must be finite)   |
//! | `Str`   | string                    |
//! | `Array` | array                     |
//! | `Map`   | object (keys sorted)      |
//!
//! JSON integers that do not fit an `i64` decode as `Float`.
//!
//! # Example
//!
//! ```
//! use stew::Map;
//!
//! let m = Map::from_json(r#"{"name": "tyler"}"#).unwrap();
//! assert_eq!(m.get_str("name"), Ok("tyler"));
//! assert_eq!(m.to_json().unwrap(), r#"{"name":"tyler"}"#);
//! ```

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::map::Map;
use crate::value::Value;

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Convert a parsed JSON value into a [`Value`].
#[must_use]
pub fn value_from_json(value: JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Float(0.0)
            }
        }
        JsonValue::String(s) => Value::Str(s),
        JsonValue::Array(items) => Value::Array(items.into_iter().map(value_from_json).collect()),
        JsonValue::Object(obj) => Value::Map(map_from_json(obj)),
    }
}

fn map_from_json(obj: serde_json::Map<String, JsonValue>) -> Map {
    obj.into_iter()
        .map(|(k, v)| (k, value_from_json(v)))
        .collect()
}

/// Convert a [`Value`] into a JSON value.
///
/// # Errors
///
/// Returns `Error::NonFiniteFloat` if a float anywhere in `value` is NaN or
/// Infinity.
pub fn value_to_json(value: &Value) -> Result<JsonValue> {
    match value {
        Value::Null => Ok(JsonValue::Null),

        Value::Bool(b) => Ok(JsonValue::Bool(*b)),

        Value::Int(n) => Ok(JsonValue::Number((*n).into())),

        Value::Float(f) => {
            let num = serde_json::Number::from_f64(*f).ok_or(Error::NonFiniteFloat(*f))?;
            Ok(JsonValue::Number(num))
        }

        Value::Str(s) => Ok(JsonValue::String(s.clone())),

        Value::Array(items) => items
            .iter()
            .map(value_to_json)
            .collect::<Result<Vec<_>>>()
            .map(JsonValue::Array),

        Value::Map(map) => map_to_json(map),
    }
}

fn map_to_json(map: &Map) -> Result<JsonValue> {
    let mut obj = serde_json::Map::new();
    for (key, value) in map {
        obj.insert(key.clone(), value_to_json(value)?);
    }
    Ok(JsonValue::Object(obj))
}

impl Map {
    /// Parse a JSON object into a map.
    ///
    /// # Errors
    ///
    /// Returns `Error::JsonParse` if the JSON is invalid, or
    /// `Error::NotAnObject` if the document root is not an object.
    pub fn from_json(json: &str) -> Result<Map> {
        let json_value: JsonValue = serde_json::from_str(json).map_err(|e| {
            log::debug!("JSON decode failed: {e}");
            Error::JsonParse(e.to_string())
        })?;

        match json_value {
            JsonValue::Object(obj) => Ok(map_from_json(obj)),
            other => Err(Error::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Encode this map as compact JSON text with keys in sorted order.
    ///
    /// # Errors
    ///
    /// Returns `Error::NonFiniteFloat` if a stored float is NaN or Infinity.
    /// Returns `Error::JsonSerialize` if JSON serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let json_value = map_to_json(self)?;
        serde_json::to_string(&json_value).map_err(|e| Error::JsonSerialize(e.to_string()))
    }
}

impl From<serde_json::Map<String, JsonValue>> for Map {
    fn from(obj: serde_json::Map<String, JsonValue>) -> Self {
        map_from_json(obj)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        value_from_json(value)
    }
}
