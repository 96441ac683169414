//! Forward conversion: native value → JsonValue.
//!
//! [`ToJson`] is the "can serialize" capability. This module implements it for
//! the built-in scalar and composite categories; caller records implement it
//! themselves, usually through [`ObjectBuilder`].
//!
//! Composite serializers wrap the first failing element in a positional
//! error (`OptionalValueNotSerializable`, `ArrayItemNotSerializable`,
//! `MapValueNotSerializable`) and stop there.

use crate::error::{SerializeError, SerializeResult};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use value_core::{JsonValue, Number, ObjectMap};

/// A type that can convert itself into a [`JsonValue`].
pub trait ToJson {
    /// Build a fresh JSON tree for this value.
    fn to_json(&self) -> SerializeResult<JsonValue>;
}

/// Serialize any value with the [`ToJson`] capability.
pub fn serialize<T: ToJson + ?Sized>(value: &T) -> SerializeResult<JsonValue> {
    value.to_json()
}

/// Assembles a record's fields into a [`JsonValue::Object`].
///
/// # Example
///
/// ```
/// use json_types::{ObjectBuilder, SerializeResult, ToJson, JsonValue};
///
/// struct Roller {
///     brand: Option<String>,
///     speed: f32,
/// }
///
/// impl ToJson for Roller {
///     fn to_json(&self) -> SerializeResult<JsonValue> {
///         Ok(ObjectBuilder::new()
///             .field("brand", &self.brand)?
///             .field("speed", &self.speed)?
///             .finish())
///     }
/// }
///
/// let json = Roller { brand: None, speed: 37.0 }.to_json().unwrap();
/// assert!(json.get("brand").unwrap().is_null());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    fields: ObjectMap,
}

impl ObjectBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `value` and store it under `key`.
    pub fn field<T: ToJson + ?Sized>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> SerializeResult<Self> {
        let json = value.to_json()?;
        self.fields.insert(key.into(), json);
        Ok(self)
    }

    /// Store an already-built JSON value under `key`.
    pub fn raw(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Finish the record.
    pub fn finish(self) -> JsonValue {
        JsonValue::Object(self.fields)
    }
}

// Scalars

impl ToJson for bool {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        Ok(JsonValue::Bool(*self))
    }
}

macro_rules! impl_to_json_integer {
    ($($ty:ty),*) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> SerializeResult<JsonValue> {
                    Ok(JsonValue::Number(Number::from(*self)))
                }
            }
        )*
    };
}

impl_to_json_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

fn float_to_json(value: f64) -> SerializeResult<JsonValue> {
    Number::from_f64(value)
        .map(JsonValue::Number)
        .ok_or(SerializeError::NonFiniteFloat { value })
}

impl ToJson for f32 {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        float_to_json(f64::from(*self))
    }
}

impl ToJson for f64 {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        float_to_json(*self)
    }
}

impl ToJson for str {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        Ok(JsonValue::String(self.to_string()))
    }
}

impl ToJson for String {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        Ok(JsonValue::String(self.clone()))
    }
}

impl ToJson for Cow<'_, str> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        Ok(JsonValue::String(self.to_string()))
    }
}

impl ToJson for () {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        Ok(JsonValue::Null)
    }
}

fn check_number(number: &Number) -> SerializeResult<()> {
    match *number {
        Number::Float(value) if !value.is_finite() => {
            Err(SerializeError::NonFiniteFloat { value })
        }
        _ => Ok(()),
    }
}

/// Reject hand-built trees holding a non-finite `Number::Float`.
fn check_tree(value: &JsonValue) -> SerializeResult<()> {
    match value {
        JsonValue::Number(number) => check_number(number),
        JsonValue::Array(items) => items.iter().try_for_each(check_tree),
        JsonValue::Object(map) => map.values().try_for_each(check_tree),
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::String(_) => Ok(()),
    }
}

impl ToJson for Number {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        check_number(self)?;
        Ok(JsonValue::Number(*self))
    }
}

impl ToJson for JsonValue {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        check_tree(self)?;
        Ok(self.clone())
    }
}

// Optional

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        match self {
            Some(value) => value.to_json().map_err(|e| {
                SerializeError::OptionalValueNotSerializable {
                    source: Box::new(e),
                }
            }),
            None => Ok(JsonValue::Null),
        }
    }
}

// Sequences and sets

/// Serialize items in iteration order into a [`JsonValue::Array`].
pub fn serialize_items<'a, T, I>(items: I) -> SerializeResult<JsonValue>
where
    T: ToJson + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let elements = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            item.to_json()
                .map_err(|e| SerializeError::ArrayItemNotSerializable {
                    index,
                    source: Box::new(e),
                })
        })
        .collect::<SerializeResult<Vec<_>>>()?;
    Ok(JsonValue::Array(elements))
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        serialize_items(self)
    }
}

impl<T: ToJson, const N: usize> ToJson for [T; N] {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        serialize_items(self)
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        serialize_items(self)
    }
}

impl<T: ToJson> ToJson for VecDeque<T> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        serialize_items(self)
    }
}

impl<T: ToJson, S> ToJson for HashSet<T, S> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        serialize_items(self)
    }
}

impl<T: ToJson> ToJson for BTreeSet<T> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        serialize_items(self)
    }
}

// Mappings

/// Serialize key/value pairs into a [`JsonValue::Object`].
///
/// Keys go through the dispatcher and must come out as a JSON string; they
/// are never stringified from other kinds.
pub fn serialize_entries<'a, K, V, I>(entries: I) -> SerializeResult<JsonValue>
where
    K: ToJson + ?Sized + 'a,
    V: ToJson + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut obj = ObjectMap::new();
    for (key, value) in entries {
        let key = match key.to_json()? {
            JsonValue::String(s) => s,
            other => {
                return Err(SerializeError::MapKeyNotString {
                    found: other.kind(),
                })
            }
        };
        let value = value
            .to_json()
            .map_err(|e| SerializeError::MapValueNotSerializable {
                key: key.clone(),
                source: Box::new(e),
            })?;
        obj.insert(key, value);
    }
    Ok(JsonValue::Object(obj))
}

impl<K: ToJson, V: ToJson, S> ToJson for HashMap<K, V, S> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        serialize_entries(self)
    }
}

impl<K: ToJson, V: ToJson> ToJson for BTreeMap<K, V> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        serialize_entries(self)
    }
}

impl<K: ToJson, V: ToJson, S> ToJson for IndexMap<K, V, S> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        serialize_entries(self)
    }
}

// Pointers

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        (**self).to_json()
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        (**self).to_json()
    }
}

impl<T: ToJson + ?Sized> ToJson for Rc<T> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        (**self).to_json()
    }
}

impl<T: ToJson + ?Sized> ToJson for Arc<T> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        (**self).to_json()
    }
}
