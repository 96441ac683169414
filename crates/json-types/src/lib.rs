//! Capability-based JSON conversions for native types.
//!
//! This crate converts between strongly-typed Rust values and the dynamic
//! [`JsonValue`] tree from `value-core`, in both directions, without
//! reflection: a type either implements the capability or the conversion
//! does not exist.
//!
//! # Modules
//!
//! - [`forward`] - [`ToJson`] capability, native value → JSON value
//! - [`reverse`] - [`FromJson`] capability, JSON value → native value, and the
//!   keyed-field accessor used by records
//! - [`temporal`] - Canonical RFC 3339 timestamps and hyphenated UUIDs
//! - [`enums`] - String-tag enums and the [`string_enum!`] macro
//! - [`registry`] - Run-time named targets for explicit-type deserialization
//! - [`text`] - Adapter over the external JSON text codec
//! - [`error`] - Error types for conversion failures
//!
//! # Key Design Principles
//!
//! 1. **No silent fallbacks** - Every mismatch is an explicit error
//! 2. **Fail-fast** - The first error aborts the whole conversion, no partial trees
//! 3. **Static dispatch** - The target type is chosen by the caller, never by the JSON shape
//!
//! # Example
//!
//! ```
//! use json_types::{deserialize, deserialize_field, parse_text, DeserializeResult, FromJson, JsonValue};
//!
//! #[derive(Debug, PartialEq)]
//! struct Roller {
//!     brand: Option<String>,
//!     speed: f32,
//! }
//!
//! impl FromJson for Roller {
//!     fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
//!         Ok(Roller {
//!             brand: deserialize_field(json, "brand")?,
//!             speed: deserialize_field(json, "speed")?,
//!         })
//!     }
//! }
//!
//! let json = parse_text(br#"{"speed": 37}"#).unwrap();
//! let roller: Roller = deserialize(&json).unwrap();
//! assert_eq!(roller, Roller { brand: None, speed: 37.0 });
//! ```

pub mod enums;
pub mod error;
pub mod forward;
pub mod registry;
pub mod reverse;
pub mod temporal;
pub mod text;

pub use enums::StringEnum;
pub use error::{DeserializeError, DeserializeResult, SerializeError, SerializeResult};
pub use forward::{serialize, ObjectBuilder, ToJson};
pub use registry::{AnyValue, Registry};
pub use reverse::{deserialize, deserialize_field, expect_object, FromJson};
pub use text::{parse_text, print_text, TextCodec, TextError};
pub use value_core::{JsonKind, JsonValue, Number, ObjectMap};
