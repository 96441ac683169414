//! Core value types for the sleuth conversion framework.
//!
//! This crate provides the dynamic tree every conversion targets or
//! originates from:
//!
//! - [`JsonValue`] - The closed JSON value enum
//! - [`Number`] - Canonical numeric slot (non-negative integer, negative integer or finite float)
//! - [`ObjectMap`] - Insertion-ordered string-keyed map used by [`JsonValue::Object`]
//! - [`JsonKind`] - Variant tag used in diagnostics
//!
//! `From` conversions to and from `serde_json::Value` bridge the tree to the
//! external text codec.
//!
//! # Architecture
//!
//! ```text
//! value-core (this crate)
//!    │
//!    └─── json-types   (ToJson / FromJson capabilities, codecs, text adapter)
//!            │
//!            └─── sleuth  (configuration, logging, re-exports)
//! ```
//!
//! # Example
//!
//! ```rust
//! use value_core::{JsonValue, Number, ObjectMap};
//!
//! let mut obj = ObjectMap::new();
//! obj.insert("speed".to_string(), JsonValue::from(13));
//! let value = JsonValue::Object(obj);
//!
//! assert_eq!(value.get("speed"), Some(&JsonValue::Number(Number::from(13u8))));
//! ```

mod impls;
pub mod number;
pub mod value;

pub use number::Number;
pub use value::{JsonKind, JsonValue, ObjectMap};
