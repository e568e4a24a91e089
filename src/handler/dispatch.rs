//! Per-request dispatch.
//!
//! A [`Route`] pairs an immutable [`Descriptor`] with the type-erased
//! handler and, per request, assembles the argument list in declaration
//! order (context, session values, the materialized free-form value),
//! invokes the handler, and writes exactly one response envelope.
//!
//! # Thread safety
//!
//! `Route` is `Clone + Send + Sync`; the descriptor and handler sit behind
//! `Arc` and all per-request state is request-scoped, so any number of
//! requests may dispatch concurrently without coordination.

use std::sync::Arc;

use tracing::{debug, error};

use crate::error::RequestError;
use crate::request::{Request, RequestContext};
use crate::response::{fill_null, Response};
use crate::session::SessionProvider;

use super::analyze::{ArgBinding, Descriptor};
use super::func::Reply;
use super::materialize::materialize;
use super::param::{ArgValue, ContextKind};

pub(crate) type ErasedHandler = dyn Fn(Vec<ArgValue>) -> Option<Reply> + Send + Sync;

/// One bound route: descriptor + handler + session wiring.
#[derive(Clone)]
pub struct Route {
    descriptor: Arc<Descriptor>,
    handler: Arc<ErasedHandler>,
    provider: Option<Arc<dyn SessionProvider>>,
    fill_depth: usize,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route").finish_non_exhaustive()
    }
}

impl Route {
    pub(crate) fn new(
        descriptor: Arc<Descriptor>,
        handler: Arc<ErasedHandler>,
        provider: Option<Arc<dyn SessionProvider>>,
        fill_depth: usize,
    ) -> Self {
        Self {
            descriptor,
            handler,
            provider,
            fill_depth,
        }
    }

    /// The handler's precomputed classification.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Dispatch one request, producing exactly one response envelope.
    pub fn handle(&self, request: Request) -> Response {
        match self.dispatch(request) {
            Ok(response) => response,
            Err(err) => {
                debug!(status = err.status, msg = %err.message, "request failed");
                Response::failure(&err)
            }
        }
    }

    /// Consume the route into a plain closure for registration with an
    /// external router.
    pub fn into_fn(self) -> impl Fn(Request) -> Response + Send + Sync + 'static {
        move |request| self.handle(request)
    }

    fn dispatch(&self, request: Request) -> Result<Response, RequestError> {
        let request = Arc::new(request);
        let descriptor = &self.descriptor;

        let session = self
            .provider
            .as_ref()
            .and_then(|provider| provider.session(&request));

        let mut args: Vec<ArgValue> = Vec::with_capacity(descriptor.bindings.len());
        for binding in &descriptor.bindings {
            match binding {
                ArgBinding::Context(ContextKind::Request) => {
                    args.push(Box::new(RequestContext::new(request.clone())));
                }
                ArgBinding::Context(ContextKind::Task) => {
                    args.push(Box::new(RequestContext::new(request.clone()).task_context()));
                }
                ArgBinding::Session(key) => {
                    let session = session.as_ref().ok_or_else(|| {
                        RequestError::unauthorized(format!(
                            "need to bind {} session keys, but session is nil",
                            descriptor.session_count()
                        ))
                    })?;
                    let value = session
                        .get(&key.name)
                        .map_err(|err| {
                            RequestError::unauthorized(format!(
                                "binding session {}: {}",
                                key.name, err
                            ))
                        })?
                        .ok_or_else(|| {
                            RequestError::unauthorized(format!(
                                "binding session {}: not found",
                                key.name
                            ))
                        })?;
                    if value.as_ref().type_id() != key.type_id {
                        return Err(RequestError::internal(format!(
                            "binding session {}: value is not {}",
                            key.name, key.type_name
                        )));
                    }
                    args.push(value);
                }
                ArgBinding::FreeForm => {
                    let free_form = descriptor.free_form.as_ref().ok_or_else(|| {
                        RequestError::internal("free-form binding missing from descriptor")
                    })?;
                    args.push(materialize(&request, free_form)?);
                }
            }
        }

        let reply = (self.handler)(args)
            .ok_or_else(|| RequestError::internal("handler argument mismatch"))?;

        match reply {
            Reply::Failure(err) => {
                error!(msg = %err.message, "handler error");
                Err(err)
            }
            Reply::Success(None) => Ok(Response::ok()),
            Reply::Success(Some(value)) => {
                let shape = (descriptor.result_shape)();
                let data = fill_null(value, &shape, self.fill_depth);
                Ok(Response::success(data))
            }
        }
    }
}
