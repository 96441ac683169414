//! Sleuth Library
//!
//! Converts between strongly-typed Rust values and a dynamic JSON value tree,
//! in both directions, through explicit capabilities instead of reflection.
//!
//! # Features
//!
//! - Static dispatch: `ToJson` / `FromJson` capabilities for scalars, optionals,
//!   sequences, sets, maps, string-tag enums, timestamps and UUIDs
//! - Records: `ObjectBuilder` for serialization, `deserialize_field` for
//!   field-by-field decoding with missing-vs-null handling for optionals
//! - Explicit targets: `Registry` for types named at run time
//! - Text: `serde_json`-backed parsing and printing, configured from TOML
//!
//! # Crates
//!
//! - `value_core` - The `JsonValue` tree
//! - `json_types` - Capabilities, codecs and the dispatcher
//!
//! # Usage
//!
//! ```
//! use sleuth::{decode_text, encode_text, TextCodec};
//! use std::collections::HashMap;
//!
//! let codec = TextCodec::new();
//! let speeds: HashMap<String, Vec<f64>> = decode_text(&codec, br#"{"rollers": [13, 37.5]}"#).unwrap();
//! assert_eq!(speeds["rollers"], vec![13.0, 37.5]);
//! assert_eq!(encode_text(&codec, &speeds).unwrap(), br#"{"rollers":[13.0,37.5]}"#.to_vec());
//! ```

pub mod codec;
pub mod config;
pub mod logging;

pub use codec::{decode_text, encode_text};
pub use config::{LoggingConfig, SleuthConfig};
pub use json_types::{
    deserialize, deserialize_field, expect_object, parse_text, print_text, serialize,
    string_enum, DeserializeError, DeserializeResult, FromJson, JsonKind, JsonValue, Number,
    ObjectBuilder, ObjectMap, Registry, SerializeError, SerializeResult, StringEnum, TextCodec,
    TextError, ToJson,
};
pub use logging::init_logging;
