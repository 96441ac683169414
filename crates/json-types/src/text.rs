//! Text codec adapter.
//!
//! JSON text parsing and printing is delegated to `serde_json`; this module
//! only moves trees across the boundary. Objects keep their key order in both
//! directions.

use serde::Deserialize;
use thiserror::Error;
use value_core::JsonValue;

/// Errors raised by the external text codec.
#[derive(Debug, Error)]
pub enum TextError {
    /// The input is not valid JSON text.
    #[error("Failed to parse JSON text: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse JSON text into a tree.
pub fn parse_text(bytes: &[u8]) -> Result<JsonValue, TextError> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!(error = %e, len = bytes.len(), "Failed to parse JSON text");
        e
    })?;
    Ok(JsonValue::from(value))
}

/// Print a tree as compact JSON text.
pub fn print_text(value: &JsonValue) -> Vec<u8> {
    // Writing a `serde_json::Value` into memory cannot fail.
    serde_json::to_vec(&serde_json::Value::from(value)).unwrap_or_default()
}

/// Print a tree as compact JSON text into a `String`.
pub fn to_compact_string(value: &JsonValue) -> String {
    serde_json::to_string(&serde_json::Value::from(value)).unwrap_or_default()
}

/// Configurable text codec.
///
/// # Example
///
/// ```
/// use json_types::TextCodec;
///
/// let codec = TextCodec::new().with_pretty(false);
/// let tree = codec.parse(br#"{"speed": 13}"#).unwrap();
/// assert_eq!(codec.print(&tree), br#"{"speed":13}"#.to_vec());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextCodec {
    /// Indent printed output.
    pub pretty: bool,
}

impl TextCodec {
    /// Create a compact codec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable pretty printing.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Parse JSON text into a tree.
    pub fn parse(&self, bytes: &[u8]) -> Result<JsonValue, TextError> {
        parse_text(bytes)
    }

    /// Print a tree as JSON text.
    pub fn print(&self, value: &JsonValue) -> Vec<u8> {
        if self.pretty {
            serde_json::to_vec_pretty(&serde_json::Value::from(value)).unwrap_or_default()
        } else {
            print_text(value)
        }
    }
}
