//! JSON codec using `serde_json`.
//!
//! All request bodies and response envelopes pass through here. Bodies may
//! legitimately be empty; [`JsonCodec::decode_body`] maps an empty (or
//! whitespace-only) body to `None` so callers can substitute a zero value
//! instead of treating it as malformed input.

use serde_json::Value;

/// JSON codec for structured data.
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a value to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized.
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(value)
    }

    /// Decode JSON bytes to a value.
    ///
    /// # Errors
    ///
    /// Returns error if the bytes cannot be deserialized to type T.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Decode a request body into a dynamic [`Value`].
    ///
    /// An empty or whitespace-only body yields `Ok(None)`; anything else
    /// must be valid JSON.
    pub fn decode_body(bytes: &[u8]) -> Result<Option<Value>, serde_json::Error> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }
        serde_json::from_slice(bytes).map(Some)
    }
}
