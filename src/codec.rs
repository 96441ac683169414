//! Text-to-native helpers.
//!
//! These glue the external text codec to the dispatcher for callers that
//! start from bytes rather than a tree.

use anyhow::Context;
use json_types::{deserialize, serialize, FromJson, TextCodec, ToJson};

/// Parse JSON text and deserialize it into `T`.
pub fn decode_text<T: FromJson>(codec: &TextCodec, bytes: &[u8]) -> anyhow::Result<T> {
    let tree = codec.parse(bytes)?;
    deserialize(&tree)
        .with_context(|| format!("Failed to deserialize {}", std::any::type_name::<T>()))
}

/// Serialize `value` and print it as JSON text.
pub fn encode_text<T: ToJson + ?Sized>(codec: &TextCodec, value: &T) -> anyhow::Result<Vec<u8>> {
    let tree = serialize(value)
        .with_context(|| format!("Failed to serialize {}", std::any::type_name::<T>()))?;
    Ok(codec.print(&tree))
}
