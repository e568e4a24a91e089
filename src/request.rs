//! Request view and context arguments.
//!
//! [`Request`] is the read-only, per-request input the external router
//! delivers: path parameters, query parameters (first value wins), and raw
//! body bytes. [`RequestContext`] and [`TaskContext`] are the two context
//! flavors a handler may take as its first parameter.
//!
//! # Example
//!
//! ```
//! use routebind::Request;
//!
//! let req = Request::new("GET", "/user/123")
//!     .with_path_param("id", "123")
//!     .with_query("verbose", "true");
//!
//! assert_eq!(req.path_param("id"), Some("123"));
//! assert_eq!(req.query_first("verbose"), Some("true"));
//! assert!(req.body().is_empty());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;

/// One incoming request, as seen by the binder.
///
/// Lifetime is a single dispatch; the dispatcher wraps it in an [`Arc`] so
/// the context argument can share it without copying the body.
#[derive(Debug, Clone, Default)]
pub struct Request {
    method: String,
    path: String,
    path_params: HashMap<String, String>,
    query: HashMap<String, Vec<String>>,
    body: Bytes,
}

impl Request {
    /// Create a request for the given method and route path.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add a path parameter (as resolved by the external router).
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter value. Repeated names accumulate; lookups
    /// return the first value.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Set the raw body bytes.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a path parameter by name.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// Look up the first query value for a name.
    pub fn query_first(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Raw body bytes. May be empty.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// The binder's own request-context type.
///
/// When a handler's first parameter is `RequestContext`, the dispatcher
/// supplies a clone sharing the current [`Request`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request: Arc<Request>,
}

impl RequestContext {
    pub(crate) fn new(request: Arc<Request>) -> Self {
        Self { request }
    }

    pub fn method(&self) -> &str {
        self.request.method()
    }

    pub fn path(&self) -> &str {
        self.request.path()
    }

    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.request.path_param(name)
    }

    pub fn query_first(&self, name: &str) -> Option<&str> {
        self.request.query_first(name)
    }

    pub fn body(&self) -> &[u8] {
        self.request.body()
    }

    /// Derive the generic context flavor from this request.
    pub fn task_context(&self) -> TaskContext {
        TaskContext {
            method: self.request.method().to_string(),
            path: self.request.path().to_string(),
        }
    }
}

/// Generic context flavor: route identity only, no request access.
#[derive(Debug, Clone)]
pub struct TaskContext {
    method: String,
    path: String,
}

impl TaskContext {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_first_value_wins() {
        let req = Request::new("GET", "/items")
            .with_query("tag", "a")
            .with_query("tag", "b");
        assert_eq!(req.query_first("tag"), Some("a"));
        assert_eq!(req.query_first("missing"), None);
    }

    #[test]
    fn test_path_param_lookup() {
        let req = Request::new("GET", "/user/:id").with_path_param("id", "42");
        assert_eq!(req.path_param("id"), Some("42"));
        assert_eq!(req.path_param("name"), None);
    }

    #[test]
    fn test_request_context_shares_request() {
        let req = Arc::new(
            Request::new("POST", "/user")
                .with_body(&b"{\"name\":\"a\"}"[..])
                .with_path_param("id", "7"),
        );
        let ctx = RequestContext::new(req);
        let ctx2 = ctx.clone();

        assert_eq!(ctx.method(), "POST");
        assert_eq!(ctx2.path_param("id"), Some("7"));
        assert_eq!(ctx.body(), b"{\"name\":\"a\"}");

        let task = ctx.task_context();
        assert_eq!(task.method(), "POST");
        assert_eq!(task.path(), "/user");
    }
}
