//! Codec module - JSON (de)serialization at the binder's edges.
//!
//! The binder treats the serializer as a black box: bytes in, a target shape
//! out, and back. [`JsonCodec`] is that box, built on `serde_json`.
//!
//! # Design
//!
//! The codec is a marker struct with static methods rather than a trait
//! object. Codec selection happens at compile time; nothing in the dispatch
//! path carries a serializer around.
//!
//! # Example
//!
//! ```
//! use routebind::codec::JsonCodec;
//!
//! let encoded = JsonCodec::encode(&"hello").unwrap();
//! let decoded: String = JsonCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, "hello");
//! ```

mod json;

pub use json::JsonCodec;
