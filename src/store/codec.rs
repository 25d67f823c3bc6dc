//! Value Codec Module
//!
//! Converts structured values to and from the bytes held by the store.

use serde_json::Value;

use crate::error::Result;

/// Serialization capability injected into the facade.
pub trait ValueCodec: Send + Sync + 'static {
    /// Encodes a structured value into store bytes.
    fn encode(&self, value: &Value) -> Result<Vec<u8>>;

    /// Decodes store bytes back into a structured value.
    fn decode(&self, bytes: &[u8]) -> Result<Value>;
}

// == JSON Codec ==
/// Self-describing JSON encoding.
///
/// Bytes that are not valid JSON, such as plain strings written by another
/// Redis client, decode as a JSON string of their text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl ValueCodec for JsonCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value> {
        match serde_json::from_slice(bytes) {
            Ok(value) => Ok(value),
            Err(_) => Ok(Value::String(String::from_utf8_lossy(bytes).into_owned())),
        }
    }
}
