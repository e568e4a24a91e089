//! The session capability and providers.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::SessionError;
use crate::request::Request;

use super::SessionKey;

/// A session-stored value, type-erased. The dispatcher checks the concrete
/// type against the declared key before handing it to the handler.
pub type SessionValue = Box<dyn Any + Send>;

/// The active session for one request's caller.
///
/// Answers lookups with the success / not-found / error trichotomy:
/// `Ok(Some(value))`, `Ok(None)`, or `Err(..)`.
pub trait Session {
    fn get(&self, key: &str) -> Result<Option<SessionValue>, SessionError>;
}

/// Supplies the declared key set at setup time and a per-request session
/// during dispatch. Returning `None` means no session is available for this
/// request; dispatch fails if the handler declared session parameters.
pub trait SessionProvider: Send + Sync {
    fn keys(&self) -> Vec<SessionKey>;
    fn session(&self, request: &Request) -> Option<Box<dyn Session>>;
}

type ValueFactory = Arc<dyn Fn() -> SessionValue + Send + Sync>;

/// Map-backed provider serving the same values to every request.
///
/// # Example
///
/// ```
/// use routebind::session::{SessionProvider, StaticSessionProvider};
/// use routebind::Request;
///
/// #[derive(Clone)]
/// struct UserId(i64);
///
/// let provider = StaticSessionProvider::new().with("userID", UserId(7));
/// let session = provider.session(&Request::new("GET", "/")).unwrap();
/// let value = session.get("userID").unwrap().unwrap();
/// assert!(value.downcast::<UserId>().is_ok());
/// ```
#[derive(Default, Clone)]
pub struct StaticSessionProvider {
    keys: Vec<SessionKey>,
    entries: HashMap<String, ValueFactory>,
}

impl StaticSessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key and its value. The value is cloned into every lookup.
    pub fn with<T>(mut self, name: &str, value: T) -> Self
    where
        T: Any + Clone + Send + Sync,
    {
        self.keys.push(SessionKey::of::<T>(name));
        self.entries.insert(
            name.to_string(),
            Arc::new(move || Box::new(value.clone()) as SessionValue),
        );
        self
    }
}

impl SessionProvider for StaticSessionProvider {
    fn keys(&self) -> Vec<SessionKey> {
        self.keys.clone()
    }

    fn session(&self, _request: &Request) -> Option<Box<dyn Session>> {
        Some(Box::new(StaticSession {
            entries: self.entries.clone(),
        }))
    }
}

struct StaticSession {
    entries: HashMap<String, ValueFactory>,
}

impl Session for StaticSession {
    fn get(&self, key: &str) -> Result<Option<SessionValue>, SessionError> {
        Ok(self.entries.get(key).map(|factory| factory()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct Role(String);

    #[test]
    fn test_static_provider_lookup() {
        let provider = StaticSessionProvider::new().with("role", Role("admin".to_string()));

        assert_eq!(provider.keys().len(), 1);

        let session = provider.session(&Request::new("GET", "/")).unwrap();
        let value = session.get("role").unwrap().unwrap();
        assert_eq!(*value.downcast::<Role>().unwrap(), Role("admin".to_string()));
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let provider = StaticSessionProvider::new();
        let session = provider.session(&Request::new("GET", "/")).unwrap();
        assert!(session.get("absent").unwrap().is_none());
    }
}
