//! # routebind
//!
//! Handler-binding and dispatch engine: plain functions become routes.
//!
//! A handler is an ordinary function whose signature declares what it
//! needs - an optional leading context, any number of session-bound
//! values, at most one free-form request value - and whose `Result`
//! declares what it produces. The binder classifies the signature once
//! at startup; per request it materializes the arguments from path
//! parameters, query string, session and body, invokes the handler, and
//! writes exactly one `{"code":..}` response envelope.
//!
//! ## Architecture
//!
//! - **Setup plane**: [`Binder::bind`] analyzes a signature against the
//!   validated session-key registry and produces an immutable [`Route`]
//! - **Request plane**: [`Route::handle`] assembles arguments in
//!   declaration order and maps every failure to a status envelope
//!   (400 parse, 401 session, 500 handler/internal)
//!
//! ## Example
//!
//! ```
//! use routebind::{schema_record, Binder, Request};
//! use routebind::error::RequestError;
//!
//! #[derive(serde::Deserialize, serde::Serialize)]
//! struct Greet {
//!     name: String,
//! }
//! schema_record!(Greet { name: String => "name" });
//!
//! let binder = Binder::builder().build().unwrap();
//! let route = binder
//!     .bind(|req: Greet| -> Result<Greet, RequestError> { Ok(req) })
//!     .unwrap();
//!
//! let response = route.handle(
//!     Request::new("POST", "/greet").with_body(br#"{"name":"ada"}"#.as_ref()),
//! );
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body(), br#"{"code":0,"data":{"name":"ada"}}"#);
//! ```

pub mod codec;
pub mod error;
pub mod handler;
pub mod response;
pub mod schema;
pub mod session;

mod binder;
mod request;

pub use binder::{Binder, BinderBuilder};
pub use error::{RequestError, SessionError, SetupError};
pub use handler::{BindArg, Route};
pub use request::{Request, RequestContext, TaskContext};
pub use response::{Envelope, Response};
pub use schema::{Schema, Shape};
pub use session::{Session, SessionKey, SessionProvider, StaticSessionProvider};
