//! Reverse conversion: JsonValue → native value.
//!
//! [`FromJson`] is the "can deserialize" capability. The target type is always
//! chosen statically by the caller; the shape of the JSON never picks it.
//!
//! ## Error Handling
//!
//! Every rule is fail-fast: the first mismatch anywhere in a nested tree is
//! returned unchanged to the top-level caller, and nothing is defaulted.
//!
//! ## Numeric narrowing
//!
//! Numbers are narrowed to the requested width with Rust's `as` semantics:
//! integers wrap, floats truncate toward zero and saturate at the target's
//! bounds. No range check is performed.

use crate::error::{DeserializeError, DeserializeResult};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;
use value_core::{JsonKind, JsonValue, Number, ObjectMap};

/// A type that can be built from a [`JsonValue`].
pub trait FromJson: Sized {
    /// Decode a value of this type from `json`.
    fn from_json(json: &JsonValue) -> DeserializeResult<Self>;

    /// Value to use when a record field is absent.
    ///
    /// Only optional types produce a value; everything else reports the
    /// missing field.
    fn from_missing_field(field: &str) -> DeserializeResult<Self> {
        Err(DeserializeError::MissingField {
            field: field.to_string(),
        })
    }
}

/// Deserialize `json` into the statically requested type.
pub fn deserialize<T: FromJson>(json: &JsonValue) -> DeserializeResult<T> {
    T::from_json(json)
}

/// Require `json` to be an object, as every record does.
pub fn expect_object(json: &JsonValue) -> DeserializeResult<&ObjectMap> {
    match json {
        JsonValue::Object(obj) => Ok(obj),
        other => Err(DeserializeError::RecordExpectedObject {
            found: other.kind(),
        }),
    }
}

/// Pull one field out of a record and convert it.
///
/// A missing key behaves like an explicit `null` for optional targets and
/// fails with `MissingField` for everything else.
pub fn deserialize_field<T: FromJson>(container: &JsonValue, key: &str) -> DeserializeResult<T> {
    let obj = expect_object(container)?;
    match obj.get(key) {
        Some(value) => T::from_json(value),
        None => {
            tracing::trace!(field = key, "Field absent from object");
            T::from_missing_field(key)
        }
    }
}

// Scalars

impl FromJson for bool {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        match json {
            JsonValue::Bool(b) => Ok(*b),
            other => Err(DeserializeError::type_mismatch(JsonKind::Bool, other)),
        }
    }
}

macro_rules! impl_from_json_number {
    ($($ty:ty),*) => {
        $(
            impl FromJson for $ty {
                #[allow(clippy::unnecessary_cast, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
                    match json {
                        JsonValue::Number(Number::PosInt(u)) => Ok(*u as $ty),
                        JsonValue::Number(Number::NegInt(i)) => Ok(*i as $ty),
                        JsonValue::Number(Number::Float(f)) => Ok(*f as $ty),
                        other => Err(DeserializeError::type_mismatch(JsonKind::Number, other)),
                    }
                }
            }
        )*
    };
}

impl_from_json_number!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl FromJson for String {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        match json {
            JsonValue::String(s) => Ok(s.clone()),
            other => Err(DeserializeError::type_mismatch(JsonKind::String, other)),
        }
    }
}

impl FromJson for () {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        match json {
            JsonValue::Null => Ok(()),
            other => Err(DeserializeError::type_mismatch(JsonKind::Null, other)),
        }
    }
}

impl FromJson for Number {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        match json {
            JsonValue::Number(n) => Ok(*n),
            other => Err(DeserializeError::type_mismatch(JsonKind::Number, other)),
        }
    }
}

impl FromJson for JsonValue {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        Ok(json.clone())
    }
}

// Optional

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        match json {
            JsonValue::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }

    fn from_missing_field(_field: &str) -> DeserializeResult<Self> {
        Ok(None)
    }
}

// Sequences and sets

fn expect_array(json: &JsonValue) -> DeserializeResult<&[JsonValue]> {
    match json {
        JsonValue::Array(arr) => Ok(arr),
        other => Err(DeserializeError::type_mismatch(JsonKind::Array, other)),
    }
}

/// Decode every element of an array in order into any collection.
pub fn deserialize_items<T, C>(json: &JsonValue) -> DeserializeResult<C>
where
    T: FromJson,
    C: FromIterator<T>,
{
    expect_array(json)?.iter().map(T::from_json).collect()
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        deserialize_items(json)
    }
}

impl<T: FromJson> FromJson for VecDeque<T> {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        deserialize_items(json)
    }
}

impl<T, S> FromJson for HashSet<T, S>
where
    T: FromJson + Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        deserialize_items(json)
    }
}

impl<T: FromJson + Ord> FromJson for BTreeSet<T> {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        deserialize_items(json)
    }
}

// Mappings

/// Decode every entry of an object into any key/value collection.
///
/// Keys are decoded by handing their text to `K` as a JSON string.
pub fn deserialize_entries<K, V, C>(json: &JsonValue) -> DeserializeResult<C>
where
    K: FromJson,
    V: FromJson,
    C: FromIterator<(K, V)>,
{
    let obj = match json {
        JsonValue::Object(obj) => obj,
        other => return Err(DeserializeError::type_mismatch(JsonKind::Object, other)),
    };
    obj.iter()
        .map(|(key, value)| {
            let key = K::from_json(&JsonValue::String(key.clone()))?;
            Ok((key, V::from_json(value)?))
        })
        .collect()
}

impl<K, V, S> FromJson for HashMap<K, V, S>
where
    K: FromJson + Eq + Hash,
    V: FromJson,
    S: BuildHasher + Default,
{
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        deserialize_entries(json)
    }
}

impl<K: FromJson + Ord, V: FromJson> FromJson for BTreeMap<K, V> {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        deserialize_entries(json)
    }
}

impl<K, V, S> FromJson for IndexMap<K, V, S>
where
    K: FromJson + Eq + Hash,
    V: FromJson,
    S: BuildHasher + Default,
{
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        deserialize_entries(json)
    }
}

// Pointers

impl<T: FromJson> FromJson for Box<T> {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        T::from_json(json).map(Box::new)
    }

    fn from_missing_field(field: &str) -> DeserializeResult<Self> {
        T::from_missing_field(field).map(Box::new)
    }
}

impl<T: FromJson> FromJson for Rc<T> {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        T::from_json(json).map(Rc::new)
    }

    fn from_missing_field(field: &str) -> DeserializeResult<Self> {
        T::from_missing_field(field).map(Rc::new)
    }
}

impl<T: FromJson> FromJson for Arc<T> {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        T::from_json(json).map(Arc::new)
    }

    fn from_missing_field(field: &str) -> DeserializeResult<Self> {
        T::from_missing_field(field).map(Arc::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::serialize;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> JsonValue {
        JsonValue::from(value)
    }

    #[test]
    fn test_bool_round_trip() {
        for b in [true, false] {
            assert_eq!(deserialize::<bool>(&serialize(&b).unwrap()).unwrap(), b);
        }
        assert_eq!(
            deserialize::<bool>(&tree(json!(1))),
            Err(DeserializeError::TypeMismatch {
                expected: JsonKind::Bool,
                found: JsonKind::Number
            })
        );
    }

    #[test]
    fn test_integer_round_trip_all_widths() {
        assert_eq!(deserialize::<i8>(&serialize(&i8::MIN).unwrap()), Ok(i8::MIN));
        assert_eq!(deserialize::<i16>(&serialize(&i16::MAX).unwrap()), Ok(i16::MAX));
        assert_eq!(deserialize::<i32>(&serialize(&-4224i32).unwrap()), Ok(-4224));
        assert_eq!(deserialize::<i64>(&serialize(&i64::MIN).unwrap()), Ok(i64::MIN));
        assert_eq!(deserialize::<isize>(&serialize(&-1isize).unwrap()), Ok(-1));
        assert_eq!(deserialize::<u8>(&serialize(&u8::MAX).unwrap()), Ok(u8::MAX));
        assert_eq!(deserialize::<u16>(&serialize(&u16::MAX).unwrap()), Ok(u16::MAX));
        assert_eq!(deserialize::<u32>(&serialize(&u32::MAX).unwrap()), Ok(u32::MAX));
        assert_eq!(deserialize::<u64>(&serialize(&u64::MAX).unwrap()), Ok(u64::MAX));
        assert_eq!(deserialize::<usize>(&serialize(&7usize).unwrap()), Ok(7));
    }

    #[test]
    fn test_float_round_trip() {
        for f in [0.0f64, -1.5, 1.23456, f64::MAX, f64::MIN_POSITIVE] {
            assert_eq!(deserialize::<f64>(&serialize(&f).unwrap()), Ok(f));
        }
        for f in [13.0f32, 0.1, -37.25] {
            assert_eq!(deserialize::<f32>(&serialize(&f).unwrap()), Ok(f));
        }
    }

    #[test]
    fn test_integer_json_into_float() {
        assert_eq!(deserialize::<f32>(&tree(json!(13))), Ok(13.0));
        assert_eq!(deserialize::<f64>(&tree(json!(-2))), Ok(-2.0));
    }

    #[test]
    fn test_narrowing_wraps_and_truncates() {
        assert_eq!(deserialize::<u8>(&tree(json!(300))), Ok(44));
        assert_eq!(deserialize::<i8>(&tree(json!(-129))), Ok(127));
        assert_eq!(deserialize::<u32>(&tree(json!(-1))), Ok(u32::MAX));
        assert_eq!(deserialize::<i32>(&tree(json!(12.9))), Ok(12));
        assert_eq!(deserialize::<u8>(&tree(json!(-3.5))), Ok(0));
    }

    #[test]
    fn test_number_rejects_other_kinds() {
        assert_eq!(
            deserialize::<f32>(&tree(json!("13"))),
            Err(DeserializeError::TypeMismatch {
                expected: JsonKind::Number,
                found: JsonKind::String
            })
        );
        assert!(deserialize::<i64>(&JsonValue::Null).is_err());
    }

    #[test]
    fn test_string_requires_string() {
        assert_eq!(
            deserialize::<String>(&tree(json!("Lolly"))),
            Ok("Lolly".to_string())
        );
        assert_eq!(
            deserialize::<String>(&tree(json!(42))),
            Err(DeserializeError::TypeMismatch {
                expected: JsonKind::String,
                found: JsonKind::Number
            })
        );
    }

    #[test]
    fn test_unit_requires_null() {
        assert_eq!(deserialize::<()>(&JsonValue::Null), Ok(()));
        assert!(deserialize::<()>(&tree(json!(false))).is_err());
    }

    #[test]
    fn test_option_round_trip() {
        assert_eq!(serialize(&None::<i32>).unwrap(), JsonValue::Null);
        assert_eq!(deserialize::<Option<i32>>(&JsonValue::Null), Ok(None));
        assert_eq!(deserialize::<Option<i32>>(&tree(json!(5))), Ok(Some(5)));
        assert!(deserialize::<Option<i32>>(&tree(json!("5"))).is_err());
    }

    #[test]
    fn test_sequence_order_preserved() {
        let values = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let json = serialize(&values).unwrap();
        assert_eq!(deserialize::<Vec<String>>(&json), Ok(values));
        assert_eq!(
            deserialize::<VecDeque<u8>>(&tree(json!([3, 2, 1]))),
            Ok(VecDeque::from(vec![3, 2, 1]))
        );
    }

    #[test]
    fn test_sequence_first_error_unchanged() {
        assert_eq!(
            deserialize::<Vec<i32>>(&tree(json!([1, "two", null]))),
            Err(DeserializeError::TypeMismatch {
                expected: JsonKind::Number,
                found: JsonKind::String
            })
        );
        assert_eq!(
            deserialize::<Vec<i32>>(&tree(json!({"a": 1}))),
            Err(DeserializeError::TypeMismatch {
                expected: JsonKind::Array,
                found: JsonKind::Object
            })
        );
    }

    #[test]
    fn test_set_deduplicates() {
        let set: HashSet<i32> = deserialize(&tree(json!([1, 2, 2, 1, 3]))).unwrap();
        assert_eq!(set.len(), 3);
        let ordered: BTreeSet<String> = deserialize(&tree(json!(["b", "a", "b"]))).unwrap();
        assert_eq!(
            ordered.into_iter().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_map_conversion() {
        let map: HashMap<String, Vec<u16>> =
            deserialize(&tree(json!({"values": [1, 2], "empty": []}))).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["values"], vec![1, 2]);
        assert!(map["empty"].is_empty());

        let ordered: IndexMap<String, bool> =
            deserialize(&tree(json!({"z": true, "a": false}))).unwrap();
        assert_eq!(ordered.keys().collect::<Vec<_>>(), vec!["z", "a"]);
    }

    #[test]
    fn test_map_key_decoded_through_dispatcher() {
        // Keys arrive as JSON strings, so numeric key types cannot decode them.
        assert_eq!(
            deserialize::<BTreeMap<i32, bool>>(&tree(json!({"1": true}))),
            Err(DeserializeError::TypeMismatch {
                expected: JsonKind::Number,
                found: JsonKind::String
            })
        );
    }

    #[test]
    fn test_map_requires_object() {
        assert_eq!(
            deserialize::<HashMap<String, i32>>(&tree(json!([1]))),
            Err(DeserializeError::TypeMismatch {
                expected: JsonKind::Object,
                found: JsonKind::Array
            })
        );
    }

    #[test]
    fn test_deserialize_field_missing_vs_null() {
        let with_null = tree(json!({"brand": null, "speed": 37}));
        let missing = tree(json!({"speed": 37}));
        assert_eq!(
            deserialize_field::<Option<String>>(&with_null, "brand"),
            Ok(None)
        );
        assert_eq!(deserialize_field::<Option<String>>(&missing, "brand"), Ok(None));
        assert_eq!(
            deserialize_field::<Box<Option<String>>>(&missing, "brand"),
            Ok(Box::new(None))
        );
    }

    #[test]
    fn test_deserialize_field_required_missing() {
        let missing = tree(json!({"brand": "Lolly"}));
        assert_eq!(
            deserialize_field::<f32>(&missing, "speed"),
            Err(DeserializeError::MissingField {
                field: "speed".to_string()
            })
        );
    }

    #[test]
    fn test_deserialize_field_requires_object() {
        assert_eq!(
            deserialize_field::<Option<String>>(&tree(json!("not-an-object")), "brand"),
            Err(DeserializeError::RecordExpectedObject {
                found: JsonKind::String
            })
        );
    }

    #[test]
    fn test_pointers_delegate() {
        assert_eq!(deserialize::<Box<i32>>(&tree(json!(4))), Ok(Box::new(4)));
        assert_eq!(
            deserialize::<Arc<String>>(&tree(json!("x"))),
            Ok(Arc::new("x".to_string()))
        );
        assert_eq!(deserialize::<Rc<bool>>(&tree(json!(true))), Ok(Rc::new(true)));
    }

    #[test]
    fn test_passthrough_types() {
        let value = tree(json!({"a": [1, null]}));
        assert_eq!(deserialize::<JsonValue>(&value), Ok(value.clone()));
        assert_eq!(deserialize::<Number>(&tree(json!(-7))), Ok(Number::NegInt(-7)));
        assert!(deserialize::<Number>(&value).is_err());
    }
}
