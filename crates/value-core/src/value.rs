//! Dynamic JSON value tree.
//!
//! [`JsonValue`] is a closed enum with no business logic: constructors,
//! structural equality and read-only accessors. Trees are built fresh by each
//! conversion and never mutated in place afterwards.

use crate::number::Number;
use indexmap::IndexMap;
use std::fmt;

/// String-keyed object map.
///
/// Keeps insertion order so serialized objects are deterministic; equality
/// ignores order.
pub type ObjectMap = IndexMap<String, JsonValue>;

/// Any value representable in a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JsonValue {
    /// `null`
    #[default]
    Null,

    /// `true` / `false`
    Bool(bool),

    /// Integer or finite float
    Number(Number),

    /// UTF-8 text
    String(String),

    /// Ordered sequence; order is significant for equality and decoding
    Array(Vec<JsonValue>),

    /// Text-keyed mapping; key order is not significant for equality
    Object(ObjectMap),
}

/// Variant tag of a [`JsonValue`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Lowercase JSON name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "bool",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonValue {
    /// Create an empty object.
    pub fn object() -> Self {
        Self::Object(ObjectMap::new())
    }

    /// Variant tag of this value.
    pub fn kind(&self) -> JsonKind {
        match self {
            Self::Null => JsonKind::Null,
            Self::Bool(_) => JsonKind::Bool,
            Self::Number(_) => JsonKind::Number,
            Self::String(_) => JsonKind::String,
            Self::Array(_) => JsonKind::Array,
            Self::Object(_) => JsonKind::Object,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as a number.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an array.
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get this value as an object.
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Look up `key` if this value is an object.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|obj| obj.get(key))
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Number> for JsonValue {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsonValue {
                fn from(i: $ty) -> Self {
                    JsonValue::Number(Number::from(i))
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(arr: Vec<JsonValue>) -> Self {
        Self::Array(arr)
    }
}

impl From<ObjectMap> for JsonValue {
    fn from(obj: ObjectMap) -> Self {
        Self::Object(obj)
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, JsonValue)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().collect())
    }
}
