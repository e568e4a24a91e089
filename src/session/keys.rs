//! Session key declarations and setup-time validation.
//!
//! Keys bind by type: a handler parameter whose `TypeId` matches a declared
//! key receives that key's session value. Types must therefore be unique
//! across the registry, names must be unique, and primitive types are
//! rejected outright - a primitive key would silently capture ordinary
//! scalar parameters that were meant to come from the request.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use crate::error::SetupError;

/// One declared session binding: a key name and the parameter type it
/// resolves to.
#[derive(Debug, Clone)]
pub struct SessionKey {
    pub name: String,
    pub type_id: TypeId,
    pub type_name: &'static str,
}

impl SessionKey {
    /// Declare a key resolving to values of type `T`.
    pub fn of<T: Any>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }
}

/// Build a `Vec<SessionKey>` from `name: Type` pairs.
///
/// ```
/// use routebind::session_keys;
///
/// #[derive(Clone)]
/// struct UserId(i64);
///
/// let keys = session_keys! { userID: UserId };
/// assert_eq!(keys[0].name, "userID");
/// ```
#[macro_export]
macro_rules! session_keys {
    ($($name:ident : $ty:ty),* $(,)?) => {
        vec![$($crate::session::SessionKey::of::<$ty>(stringify!($name))),*]
    };
}

/// Validated session-key lookup, by name and by type.
///
/// Built once at startup; never consulted mutably during request handling.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    by_type: HashMap<TypeId, SessionKey>,
    by_name: HashMap<String, SessionKey>,
}

impl KeyRegistry {
    /// Registry with no keys (no session binding available).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate a declared key list.
    ///
    /// Fails on the first empty name, duplicate name, primitive type, or
    /// duplicate type. Any permutation of the same list yields the same
    /// pass/fail outcome.
    pub fn validate(keys: &[SessionKey]) -> Result<Self, SetupError> {
        let mut registry = Self::default();
        for key in keys {
            if key.name.is_empty() {
                return Err(SetupError::EmptyKeyName);
            }
            if registry.by_name.contains_key(&key.name) {
                return Err(SetupError::DuplicateKeyName(key.name.clone()));
            }
            if is_primitive(key.type_id) {
                return Err(SetupError::PrimitiveKeyType(key.type_name));
            }
            if registry.by_type.contains_key(&key.type_id) {
                return Err(SetupError::DuplicateKeyType(key.type_name));
            }
            registry.by_type.insert(key.type_id, key.clone());
            registry.by_name.insert(key.name.clone(), key.clone());
        }
        Ok(registry)
    }

    pub fn by_type(&self, type_id: TypeId) -> Option<&SessionKey> {
        self.by_type.get(&type_id)
    }

    pub fn by_name(&self, name: &str) -> Option<&SessionKey> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn is_primitive(type_id: TypeId) -> bool {
    [
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<i128>(),
        TypeId::of::<isize>(),
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<u128>(),
        TypeId::of::<usize>(),
        TypeId::of::<f32>(),
        TypeId::of::<f64>(),
        TypeId::of::<bool>(),
        TypeId::of::<char>(),
        TypeId::of::<String>(),
        TypeId::of::<&'static str>(),
    ]
    .contains(&type_id)
}
