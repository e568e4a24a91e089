//! Handler module - signature analysis, argument materialization and
//! dispatch.
//!
//! Provides:
//! - [`BindArg`] / [`ParamSpec`] - the type-tag a bindable parameter exposes
//! - [`HandlerFn`] / [`IntoReply`] - the handler function abstraction
//! - [`Descriptor`] - the immutable, per-handler classification built once
//!   at bind time
//! - [`Route`] - the per-route callable that dispatches one request
//!
//! # Example
//!
//! ```ignore
//! use routebind::{Binder, RequestContext};
//!
//! let binder = Binder::builder().build()?;
//! let route = binder.bind(|ctx: RequestContext, req: UpdateReq| -> Result<UserView, Error> {
//!     // ...
//! })?;
//! ```

mod analyze;
mod dispatch;
mod func;
mod materialize;
mod param;

pub use analyze::Descriptor;
pub use dispatch::Route;
pub use func::{HandlerFn, IntoReply, Reply};
pub use param::{ArgValue, BindArg, ContextKind, ParamRole, ParamSpec};

pub(crate) use analyze::{analyze, ArgBinding, FreeFormBinding, ReplyInfo};
