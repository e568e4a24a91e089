//! Response module - null-filling and the success/error envelope.
//!
//! Provides:
//! - [`Envelope`] - the `{"code":..}` wire envelope
//! - [`Response`] - serialized envelope plus transport status
//! - [`fill_null`] - recursive null-normalization of successful results
//!
//! # Example
//!
//! ```
//! use routebind::response::Response;
//!
//! let response = Response::success(serde_json::json!({"id": 1}));
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body(), br#"{"code":0,"data":{"id":1}}"#);
//! ```

mod fill;

pub use fill::{fill_null, DEFAULT_FILL_DEPTH};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::JsonCodec;
use crate::error::RequestError;

/// The wire envelope. `code` 0 is success; any other value mirrors the
/// transport status of a failure.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

/// One serialized response: transport status plus envelope bytes.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    body: Bytes,
}

impl Response {
    /// Success without a result: `{"code":0}`.
    pub fn ok() -> Self {
        Self::from_envelope(
            200,
            Envelope {
                code: 0,
                data: None,
                msg: None,
            },
        )
    }

    /// Success with a (normalized) result: `{"code":0,"data":..}`.
    pub fn success(data: Value) -> Self {
        Self::from_envelope(
            200,
            Envelope {
                code: 0,
                data: Some(data),
                msg: None,
            },
        )
    }

    /// Failure envelope: `{"code":<status>,"msg":..}`.
    pub fn failure(err: &RequestError) -> Self {
        Self::from_envelope(
            err.status,
            Envelope {
                code: err.status,
                data: None,
                msg: Some(err.message.clone()),
            },
        )
    }

    fn from_envelope(status: u16, envelope: Envelope) -> Self {
        match JsonCodec::encode(&envelope) {
            Ok(body) => Self {
                status,
                body: Bytes::from(body),
            },
            // An envelope of a status, an optional Value and an optional
            // String cannot fail to serialize; keep a hard fallback anyway.
            Err(_) => Self {
                status: 500,
                body: Bytes::from_static(br#"{"code":500,"msg":"encode response"}"#),
            },
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decode the body back into an [`Envelope`] (test helper).
    pub fn envelope(&self) -> Result<Envelope, serde_json::Error> {
        JsonCodec::decode(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope() {
        let response = Response::ok();
        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), br#"{"code":0}"#);
    }

    #[test]
    fn test_success_envelope() {
        let response = Response::success(json!({"name": "a"}));
        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), br#"{"code":0,"data":{"name":"a"}}"#);
    }

    #[test]
    fn test_failure_envelope() {
        let response = Response::failure(&RequestError::bad_request("requires id"));
        assert_eq!(response.status(), 400);
        assert_eq!(response.body(), br#"{"code":400,"msg":"requires id"}"#);

        let envelope = response.envelope().unwrap();
        assert_eq!(envelope.code, 400);
        assert_eq!(envelope.msg.as_deref(), Some("requires id"));
        assert_eq!(envelope.data, None);
    }
}
