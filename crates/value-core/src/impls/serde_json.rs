//! Lossless bridge between [`JsonValue`] and `serde_json::Value`.
//!
//! `serde_json` is the external text codec; these impls let the text layer
//! parse into, and print from, the crate's own tree.

use crate::{JsonValue, Number, ObjectMap};
use serde_json::Value;

impl From<&serde_json::Number> for Number {
    fn from(num: &serde_json::Number) -> Self {
        if let Some(u) = num.as_u64() {
            Number::PosInt(u)
        } else if let Some(i) = num.as_i64() {
            Number::NegInt(i)
        } else {
            // Without `arbitrary_precision` every serde_json number is a finite
            // u64, i64 or f64, so this branch always holds a float.
            Number::Float(num.as_f64().unwrap_or_default())
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Number(n) => JsonValue::Number(Number::from(&n)),
            Value::String(s) => JsonValue::String(s),
            Value::Array(arr) => JsonValue::Array(arr.into_iter().map(JsonValue::from).collect()),
            Value::Object(obj) => JsonValue::Object(
                obj.into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect::<ObjectMap>(),
            ),
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(Number::PosInt(u)) => Value::from(*u),
            JsonValue::Number(Number::NegInt(i)) => Value::from(*i),
            // `Number` only ever holds finite floats.
            JsonValue::Number(Number::Float(f)) => {
                serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number)
            }
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Array(arr) => Value::Array(arr.iter().map(Value::from).collect()),
            JsonValue::Object(obj) => Value::Object(
                obj.iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        Value::from(&value)
    }
}
