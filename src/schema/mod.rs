//! Schema module - explicit structural type-tags.
//!
//! The binder never inspects types at runtime the way a reflection-capable
//! runtime would. Instead every wire-visible type carries a [`Shape`]: an
//! explicit tag describing its structure (scalar, optional, list, map,
//! record with named fields, raw passthrough). The materializer uses shapes
//! to iterate record fields and coerce path/query strings; the response
//! formatter uses them to null-fill results.
//!
//! Provides:
//! - [`Shape`] / [`FieldShape`] - the structural tag itself
//! - [`Schema`] - trait supplying a type's shape
//! - [`schema_record!`](crate::schema_record) / [`schema_newtype!`](crate::schema_newtype) -
//!   macros implementing [`Schema`] (and `BindArg`) for application types
//!
//! # Example
//!
//! ```
//! use routebind::schema::{Schema, Shape};
//!
//! assert!(matches!(<Vec<i64>>::shape(), Shape::List(_)));
//! assert!(matches!(<Option<String>>::shape(), Shape::Optional(_)));
//! ```

mod impls;
mod macros;
mod shape;

pub use shape::{FieldShape, Schema, Shape};
