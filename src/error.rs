//! Error types for routebind.
//!
//! Two deliberately separate classes:
//!
//! - [`SetupError`] - programming mistakes in how the binder is wired up
//!   (bad session-key registry, bad handler signature). Returned from
//!   builders and `bind()` so callers can abort startup; never produced
//!   while serving traffic.
//! - [`RequestError`] - per-request failures (malformed body, coercion
//!   failure, missing id, session lookup failure). Always recoverable;
//!   each one becomes exactly one response envelope.

use thiserror::Error;

/// Setup-time error. Signals a wiring mistake, not a runtime condition.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A session key was declared with an empty name.
    #[error("session key cannot be empty")]
    EmptyKeyName,

    /// Two session keys share a name.
    #[error("duplicate session key: {0}")]
    DuplicateKeyName(String),

    /// Two session keys share a type.
    #[error("duplicate session key type: {0}")]
    DuplicateKeyType(&'static str),

    /// A session key was declared with a primitive type. Primitive keys
    /// cannot be matched against a handler parameter without risking
    /// false session-binding of an ordinary scalar argument.
    #[error("session key must be a named type, got primitive type: {0}")]
    PrimitiveKeyType(&'static str),

    /// A context parameter appeared after the first position.
    #[error("context parameter must come first, found at params[{index}]")]
    ContextNotFirst { index: usize },

    /// More than one non-context, non-session parameter.
    #[error(
        "only the last arg can be arbitrary type, got multiple non-binding args at: params[{index}]={type_name}"
    )]
    MultipleFreeForm {
        index: usize,
        type_name: &'static str,
    },

    /// The handler's success value is a tuple of two or more elements.
    #[error("handler must return at most one result value and optionally an error, got {count} result values")]
    TooManyResults { count: usize },
}

/// Request-time error carrying the response status it maps to.
///
/// `status` doubles as the `code` field of the error envelope and the
/// transport status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub status: u16,
    pub message: String,
}

impl RequestError {
    /// 400 - parsing or coercion failure.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            message: message.into(),
        }
    }

    /// 401 - session/auth absence or failure.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: 401,
            message: message.into(),
        }
    }

    /// 500 - handler-returned or internal failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            message: message.into(),
        }
    }
}

/// Error reported by a [`Session`](crate::session::Session) lookup.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct SessionError(pub String);

impl SessionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
