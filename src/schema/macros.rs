//! Macros implementing [`Schema`](crate::schema::Schema) and
//! [`BindArg`](crate::handler::BindArg) for application types.
//!
//! Types bound with these macros must derive `serde::Serialize` and
//! `serde::Deserialize`; the wire names given here must match the serde
//! field names. A wire name of `"-"` excludes the field from path/query
//! binding and null-filling (pair it with `#[serde(skip)]`).
//!
//! # Example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use routebind::schema_record;
//!
//! #[derive(Serialize, Deserialize, Default)]
//! struct UpdateReq {
//!     name: String,
//!     age: i64,
//! }
//!
//! schema_record!(UpdateReq {
//!     name: String => "name",
//!     age: i64 => "age",
//! });
//! ```

/// Implement [`Schema`](crate::schema::Schema) and
/// [`BindArg`](crate::handler::BindArg) for a record (struct) type.
#[macro_export]
macro_rules! schema_record {
    ($ty:ty { $($field:ident : $fty:ty => $wire:literal),* $(,)? }) => {
        impl $crate::schema::Schema for $ty {
            fn shape() -> $crate::schema::Shape {
                $crate::schema::Shape::Record(vec![
                    $(
                        $crate::schema::FieldShape::new(
                            $wire,
                            $crate::schema::Shape::of::<$fty>(),
                        ),
                    )*
                ])
            }
        }

        impl $crate::handler::BindArg for $ty {
            fn spec() -> $crate::handler::ParamSpec {
                $crate::handler::ParamSpec::value::<$ty>()
            }
        }
    };
}

/// Implement [`Schema`](crate::schema::Schema) and
/// [`BindArg`](crate::handler::BindArg) for a newtype wrapping a scalar,
/// e.g. `struct UserId(i64)`.
///
/// The newtype keeps its own `TypeId`, which is what session-key matching
/// and identifier detection key on; the shape names the inner scalar.
#[macro_export]
macro_rules! schema_newtype {
    ($ty:ty => $shape:ident) => {
        impl $crate::schema::Schema for $ty {
            fn shape() -> $crate::schema::Shape {
                $crate::schema::Shape::$shape
            }
        }

        impl $crate::handler::BindArg for $ty {
            fn spec() -> $crate::handler::ParamSpec {
                $crate::handler::ParamSpec::value::<$ty>()
            }
        }
    };
}
