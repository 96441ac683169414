//! Error types for JSON conversions.
//!
//! Serialization and deserialization each have their own closed error enum so
//! callers can match every failure exhaustively. There is no catch-all beyond
//! the `Custom` escape hatch used by text-based codecs (dates, UUIDs) and by
//! caller-defined types.

use std::fmt::Display;
use thiserror::Error;
use value_core::{JsonKind, JsonValue};

/// Errors that can occur while converting a native value into a [`JsonValue`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SerializeError {
    /// The present payload of an `Option` failed to serialize.
    #[error("Wrapped value of Option is not serializable: {source}")]
    OptionalValueNotSerializable { source: Box<SerializeError> },

    /// An element of a sequence or set failed to serialize.
    #[error("Array item at index {index} is not serializable: {source}")]
    ArrayItemNotSerializable {
        index: usize,
        source: Box<SerializeError>,
    },

    /// A map value failed to serialize.
    #[error("Map value for key '{key}' is not serializable: {source}")]
    MapValueNotSerializable {
        key: String,
        source: Box<SerializeError>,
    },

    /// A map key did not serialize to a JSON string.
    #[error("Map key is not a string (serialized as {found})")]
    MapKeyNotString { found: JsonKind },

    /// NaN and infinities have no JSON number representation.
    #[error("Non-finite float {value} cannot be represented as a JSON number")]
    NonFiniteFloat { value: f64 },

    /// Free-form failure raised by a codec or a caller-defined type.
    #[error("Serialization error: {0}")]
    Custom(String),
}

impl SerializeError {
    /// Create a custom serialization error.
    pub fn custom(message: impl Display) -> Self {
        Self::Custom(message.to_string())
    }
}

/// Errors that can occur while converting a [`JsonValue`] into a native value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeserializeError {
    /// The JSON variant present does not match what the target type requires.
    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch { expected: JsonKind, found: JsonKind },

    /// No decoding rule exists for the requested target type.
    #[error("Type '{type_name}' is not deserializable")]
    NotDeserializable { type_name: String },

    /// A record was requested but the input is not an object.
    #[error("Tried to deserialize a record from a non-object representation ({found})")]
    RecordExpectedObject { found: JsonKind },

    /// An enum was requested but the input is not a string tag.
    #[error("Enum '{enum_name}' expects a string tag, got {found}")]
    EnumExpectedString {
        enum_name: &'static str,
        found: JsonKind,
    },

    /// The string tag does not name any case of the enum.
    #[error("Unknown variant '{variant}' for enum '{enum_name}'")]
    UnknownVariant {
        enum_name: &'static str,
        variant: String,
    },

    /// A non-optional record field is absent from the object.
    #[error("Required field '{field}' is missing")]
    MissingField { field: String },

    /// Free-form failure raised by a codec or a caller-defined type.
    #[error("Deserialization error: {0}")]
    Custom(String),
}

impl DeserializeError {
    /// Create a custom deserialization error.
    pub fn custom(message: impl Display) -> Self {
        Self::Custom(message.to_string())
    }

    /// Type mismatch between the `expected` kind and the value actually present.
    pub fn type_mismatch(expected: JsonKind, found: &JsonValue) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.kind(),
        }
    }
}

/// Result type for serialization.
pub type SerializeResult<T> = std::result::Result<T, SerializeError>;

/// Result type for deserialization.
pub type DeserializeResult<T> = std::result::Result<T, DeserializeError>;
