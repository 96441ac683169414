//! Explicit-target deserialization.
//!
//! Static dispatch through [`FromJson`] covers callers that know the target
//! type at compile time. A [`Registry`] covers the other case: the target is
//! named at run time (by `TypeId` or by a registered name), and a type that was
//! never registered fails with `NotDeserializable` instead of being guessed
//! from the JSON shape.
//!
//! A registry is built once and then only read, so it can be shared between
//! threads without locking.

use crate::error::{DeserializeError, DeserializeResult};
use crate::reverse::FromJson;
use chrono::{DateTime, Utc};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use uuid::Uuid;
use value_core::{JsonValue, Number};

/// A decoded value whose concrete type is known only to the registry entry.
pub type AnyValue = Box<dyn Any + Send + Sync>;

type DecodeFn = fn(&JsonValue) -> DeserializeResult<AnyValue>;

#[derive(Clone, Copy)]
struct Entry {
    name: &'static str,
    decode: DecodeFn,
}

fn decode<T: FromJson + Send + Sync + 'static>(json: &JsonValue) -> DeserializeResult<AnyValue> {
    T::from_json(json).map(|value| Box::new(value) as AnyValue)
}

/// Table of deserializable target types.
#[derive(Clone, Default)]
pub struct Registry {
    by_type: HashMap<TypeId, Entry>,
    by_name: HashMap<&'static str, TypeId>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.by_name.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("types", &names).finish()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in scalar, temporal and identifier types.
    pub fn with_builtins() -> Self {
        Self::new()
            .register_as::<bool>("bool")
            .register_as::<i8>("i8")
            .register_as::<i16>("i16")
            .register_as::<i32>("i32")
            .register_as::<i64>("i64")
            .register_as::<u8>("u8")
            .register_as::<u16>("u16")
            .register_as::<u32>("u32")
            .register_as::<u64>("u64")
            .register_as::<f32>("f32")
            .register_as::<f64>("f64")
            .register_as::<String>("string")
            .register_as::<Number>("number")
            .register_as::<DateTime<Utc>>("datetime")
            .register_as::<Uuid>("uuid")
            .register_as::<JsonValue>("json")
    }

    /// Register `T` under its Rust type name.
    pub fn register<T: FromJson + Send + Sync + 'static>(self) -> Self {
        self.register_as::<T>(type_name::<T>())
    }

    /// Register `T` under `name`. Re-registering a type or name replaces the
    /// previous entry.
    pub fn register_as<T: FromJson + Send + Sync + 'static>(mut self, name: &'static str) -> Self {
        let id = TypeId::of::<T>();
        if let Some(old) = self.by_type.insert(
            id,
            Entry {
                name,
                decode: decode::<T>,
            },
        ) {
            self.by_name.remove(old.name);
        }
        if let Some(old_id) = self.by_name.insert(name, id) {
            if old_id != id {
                self.by_type.remove(&old_id);
            }
        }
        self
    }

    /// Check if `T` has a decoding rule.
    pub fn contains<T: 'static>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<T>())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.by_name.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Deserialize `json` into `T` if `T` was registered.
    ///
    /// `T` does not need to implement [`FromJson`]; unregistered types fail
    /// with `NotDeserializable`.
    pub fn deserialize_as<T: 'static>(&self, json: &JsonValue) -> DeserializeResult<T> {
        let not_deserializable = || DeserializeError::NotDeserializable {
            type_name: type_name::<T>().to_string(),
        };
        let Some(entry) = self.by_type.get(&TypeId::of::<T>()) else {
            tracing::debug!(type_name = type_name::<T>(), "No decoding rule registered");
            return Err(not_deserializable());
        };
        let value = (entry.decode)(json)?;
        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| not_deserializable())
    }

    /// Deserialize `json` into the type registered under `name`.
    pub fn deserialize_named(&self, name: &str, json: &JsonValue) -> DeserializeResult<AnyValue> {
        let entry = self
            .by_name
            .get(name)
            .and_then(|id| self.by_type.get(id))
            .ok_or_else(|| {
                tracing::debug!(type_name = name, "No decoding rule registered");
                DeserializeError::NotDeserializable {
                    type_name: name.to_string(),
                }
            })?;
        (entry.decode)(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reverse::deserialize_field;
    use value_core::JsonKind;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl FromJson for Point {
        fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
            Ok(Point {
                x: deserialize_field(json, "x")?,
                y: deserialize_field(json, "y")?,
            })
        }
    }

    /// Type that was never given a decoding rule.
    #[allow(dead_code)]
    struct Opaque;

    fn point_json() -> JsonValue {
        JsonValue::from(serde_json::json!({"x": 1, "y": -2}))
    }

    #[test]
    fn test_registered_type() {
        let registry = Registry::new().register::<Point>();
        assert!(registry.contains::<Point>());
        assert_eq!(
            registry.deserialize_as::<Point>(&point_json()),
            Ok(Point { x: 1, y: -2 })
        );
    }

    #[test]
    fn test_unregistered_type_not_deserializable() {
        let registry = Registry::with_builtins();
        assert!(!registry.contains::<Opaque>());
        match registry.deserialize_as::<Opaque>(&JsonValue::Null) {
            Err(DeserializeError::NotDeserializable { type_name }) => {
                assert!(type_name.ends_with("Opaque"));
            }
            _ => panic!("expected NotDeserializable"),
        }
        assert!(matches!(
            registry.deserialize_as::<Point>(&point_json()),
            Err(DeserializeError::NotDeserializable { .. })
        ));
    }

    #[test]
    fn test_named_lookup() {
        let registry = Registry::with_builtins().register_as::<Point>("point");
        let value = registry.deserialize_named("point", &point_json()).unwrap();
        assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 1, y: -2 }));

        let speed = registry
            .deserialize_named("f32", &JsonValue::from(13))
            .unwrap();
        assert_eq!(speed.downcast_ref::<f32>(), Some(&13.0));

        assert_eq!(
            registry.deserialize_named("roller", &point_json()).unwrap_err(),
            DeserializeError::NotDeserializable {
                type_name: "roller".to_string()
            }
        );
    }

    #[test]
    fn test_decoder_errors_propagate() {
        let registry = Registry::with_builtins();
        assert_eq!(
            registry.deserialize_as::<String>(&JsonValue::from(1)),
            Err(DeserializeError::TypeMismatch {
                expected: JsonKind::String,
                found: JsonKind::Number
            })
        );
    }

    #[test]
    fn test_reregistering_replaces_name() {
        let registry = Registry::new()
            .register_as::<Point>("point")
            .register_as::<Point>("coords");
        assert_eq!(registry.names(), vec!["coords"]);
        assert!(registry.deserialize_named("point", &point_json()).is_err());
        assert!(registry.deserialize_named("coords", &point_json()).is_ok());
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}
