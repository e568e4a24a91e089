//! Binder configuration and handler binding.
//!
//! [`BinderBuilder`] provides a fluent API for configuring the session
//! provider, the binder-wide identifier type, and the null-fill depth;
//! [`Binder::bind`] turns a handler function into a [`Route`].
//!
//! Setup order matters only in that everything here runs before the host
//! server accepts traffic: `build()` validates the session-key registry
//! once, and each `bind()` analyzes one handler once. Both return
//! [`SetupError`] on a wiring mistake so the caller can abort startup.
//!
//! # Example
//!
//! ```
//! use routebind::{Binder, Request};
//! use routebind::error::SessionError;
//!
//! let binder = Binder::builder().build().unwrap();
//! let route = binder
//!     .bind(|| -> Result<(), SessionError> { Ok(()) })
//!     .unwrap();
//!
//! let response = route.handle(Request::new("GET", "/ping"));
//! assert_eq!(response.status(), 200);
//! ```

use std::any::TypeId;
use std::sync::Arc;

use tracing::debug;

use crate::error::SetupError;
use crate::handler::{analyze, HandlerFn, IntoReply, ReplyInfo, Route};
use crate::response::DEFAULT_FILL_DEPTH;
use crate::session::{KeyRegistry, SessionProvider};

/// Configured binding engine. Immutable once built; `bind` may be called
/// any number of times, each producing an independent [`Route`].
pub struct Binder {
    registry: KeyRegistry,
    provider: Option<Arc<dyn SessionProvider>>,
    id_type: Option<TypeId>,
    fill_depth: usize,
}

impl std::fmt::Debug for Binder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binder").finish_non_exhaustive()
    }
}

impl Binder {
    /// Create a new builder.
    pub fn builder() -> BinderBuilder {
        BinderBuilder::new()
    }

    /// The validated session-key registry.
    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Analyze a handler and produce its route.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] for an invalid signature: a context parameter
    /// after the first position, more than one free-form parameter, or a
    /// tuple result. Treat a failure here as fatal at startup.
    pub fn bind<F, Args>(&self, handler: F) -> Result<Route, SetupError>
    where
        F: HandlerFn<Args>,
    {
        let params = F::params();
        let reply = ReplyInfo {
            returns_error: F::Reply::RETURNS_ERROR,
            result_shape: F::Reply::result_shape,
        };

        let descriptor = analyze(&params, &self.registry, self.id_type, reply)?;
        debug!(
            params = params.len(),
            sessions = descriptor.session_count(),
            free_form = descriptor.has_free_form(),
            "bound handler"
        );

        let erased = Arc::new(move |args| handler.invoke(args).map(IntoReply::into_reply));
        Ok(Route::new(
            Arc::new(descriptor),
            erased,
            self.provider.clone(),
            self.fill_depth,
        ))
    }
}

/// Builder for configuring a [`Binder`].
pub struct BinderBuilder {
    provider: Option<Arc<dyn SessionProvider>>,
    id_type: Option<TypeId>,
    fill_depth: usize,
}

impl BinderBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            id_type: None,
            fill_depth: DEFAULT_FILL_DEPTH,
        }
    }

    /// Install the session provider. Its declared keys are validated by
    /// `build()`.
    pub fn session_provider(mut self, provider: impl SessionProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Set the binder-wide identifier type. A free-form parameter of this
    /// exact type resolves via the identifier path instead of structured
    /// field binding.
    pub fn id_type<T: 'static>(mut self) -> Self {
        self.id_type = Some(TypeId::of::<T>());
        self
    }

    /// Override the null-fill recursion depth (default 8).
    pub fn fill_depth(mut self, depth: usize) -> Self {
        self.fill_depth = depth;
        self
    }

    /// Validate the session-key registry and produce the binder.
    pub fn build(self) -> Result<Binder, SetupError> {
        let registry = match &self.provider {
            Some(provider) => KeyRegistry::validate(&provider.keys())?,
            None => KeyRegistry::empty(),
        };
        Ok(Binder {
            registry,
            provider: self.provider,
            id_type: self.id_type,
            fill_depth: self.fill_depth,
        })
    }
}

impl Default for BinderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::session::StaticSessionProvider;

    #[derive(Clone)]
    struct UserId(#[allow(dead_code)] i64);

    #[test]
    fn test_build_validates_keys() {
        let provider = StaticSessionProvider::new().with("userID", UserId(1));
        let binder = Binder::builder().session_provider(provider).build().unwrap();
        assert_eq!(binder.registry().len(), 1);
    }

    #[test]
    fn test_build_rejects_primitive_keys() {
        let provider = StaticSessionProvider::new().with("count", 3i64);
        let err = Binder::builder()
            .session_provider(provider)
            .build()
            .unwrap_err();
        assert!(matches!(err, SetupError::PrimitiveKeyType(_)));
    }

    #[test]
    fn test_bind_rejects_two_free_form_params() {
        let binder = Binder::builder().build().unwrap();
        let err = binder
            .bind(|_a: i64, _b: String| -> Result<(), SessionError> { Ok(()) })
            .unwrap_err();
        assert!(matches!(err, SetupError::MultipleFreeForm { index: 1, .. }));
    }

    #[test]
    fn test_bind_rejects_tuple_result() {
        let binder = Binder::builder().build().unwrap();
        let err = binder
            .bind(|| -> Result<(i64, i64), SessionError> { Ok((1, 2)) })
            .unwrap_err();
        assert!(matches!(err, SetupError::TooManyResults { count: 2 }));
    }
}
