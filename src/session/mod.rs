//! Session module - typed session keys and the session capability.
//!
//! Provides:
//! - [`SessionKey`] / [`KeyRegistry`] - declared `(name, type)` bindings,
//!   validated once at startup
//! - [`Session`] / [`SessionProvider`] - the external capability answering
//!   "does this key exist, and what is its value"
//! - [`StaticSessionProvider`] - a map-backed provider for tests and simple
//!   deployments
//!
//! # Example
//!
//! ```
//! use routebind::session::{KeyRegistry, SessionKey};
//!
//! #[derive(Clone)]
//! struct UserId(i64);
//! #[derive(Clone)]
//! struct Role(String);
//!
//! let registry = KeyRegistry::validate(&[
//!     SessionKey::of::<UserId>("userID"),
//!     SessionKey::of::<Role>("role"),
//! ])
//! .unwrap();
//! assert_eq!(registry.len(), 2);
//! ```

mod keys;
mod store;

pub use keys::{KeyRegistry, SessionKey};
pub use store::{Session, SessionProvider, SessionValue, StaticSessionProvider};
