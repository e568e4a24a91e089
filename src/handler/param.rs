//! Parameter type-tags.
//!
//! Every type that can appear in a handler's parameter list implements
//! [`BindArg`], exposing a [`ParamSpec`]: its `TypeId` (what session-key
//! matching and identifier detection key on), its [`Shape`], its role, and a
//! monomorphized decoder from a JSON value to the boxed concrete argument.
//! The crate implements it for the two context flavors, for scalars, and
//! for `serde_json::Value` (raw body passthrough); application types get
//! their impls from the schema macros.

use std::any::{type_name, Any, TypeId};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::request::{RequestContext, TaskContext};
use crate::schema::{Schema, Shape};

/// A boxed, type-erased handler argument.
pub type ArgValue = Box<dyn Any + Send>;

/// Which context flavor a leading context parameter is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    /// The binder's own request-context type ([`RequestContext`]).
    Request,
    /// The generic flavor ([`TaskContext`]).
    Task,
}

/// How the analyzer should treat a parameter before looking at its type id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRole {
    Context(ContextKind),
    Value,
}

/// The type-tag of one handler parameter.
#[derive(Clone)]
pub struct ParamSpec {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub role: ParamRole,
    pub shape: fn() -> Shape,
    pub decode: fn(Value) -> Result<ArgValue, serde_json::Error>,
}

impl ParamSpec {
    /// Spec for a value parameter (session-bound or free-form, decided by
    /// the analyzer).
    pub fn value<T>() -> Self
    where
        T: DeserializeOwned + Schema + Send + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            role: ParamRole::Value,
            shape: T::shape,
            decode: decode_arg::<T>,
        }
    }

    fn context<T: Any>(kind: ContextKind) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            role: ParamRole::Context(kind),
            shape: unit_shape,
            decode: decode_unsupported,
        }
    }
}

fn unit_shape() -> Shape {
    Shape::Unit
}

fn decode_arg<T>(value: Value) -> Result<ArgValue, serde_json::Error>
where
    T: DeserializeOwned + Send + 'static,
{
    serde_json::from_value::<T>(value).map(|decoded| Box::new(decoded) as ArgValue)
}

// Context parameters are constructed by the dispatcher, never decoded.
fn decode_unsupported(_value: Value) -> Result<ArgValue, serde_json::Error> {
    Err(serde::de::Error::custom(
        "context parameters cannot be decoded from the request",
    ))
}

/// A type usable as a handler parameter.
pub trait BindArg: Send + Sized + 'static {
    fn spec() -> ParamSpec;
}

impl BindArg for RequestContext {
    fn spec() -> ParamSpec {
        ParamSpec::context::<RequestContext>(ContextKind::Request)
    }
}

impl BindArg for TaskContext {
    fn spec() -> ParamSpec {
        ParamSpec::context::<TaskContext>(ContextKind::Task)
    }
}

impl BindArg for Value {
    fn spec() -> ParamSpec {
        ParamSpec::value::<Value>()
    }
}

// Scalars are always free-form: the registry rejects primitive session-key
// types, so a scalar parameter can never capture a session value.
macro_rules! scalar_bind_arg {
    ($($ty:ty),+) => {
        $(
            impl BindArg for $ty {
                fn spec() -> ParamSpec {
                    ParamSpec::value::<$ty>()
                }
            }
        )+
    };
}

scalar_bind_arg!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, String);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_spec_decodes() {
        let spec = ParamSpec::value::<i64>();
        assert_eq!(spec.type_id, TypeId::of::<i64>());
        assert_eq!(spec.role, ParamRole::Value);

        let boxed = (spec.decode)(json!(42)).unwrap();
        assert_eq!(*boxed.downcast::<i64>().unwrap(), 42);
    }

    #[test]
    fn test_value_spec_decode_failure() {
        let spec = ParamSpec::value::<i64>();
        assert!((spec.decode)(json!("not a number")).is_err());
    }

    #[test]
    fn test_context_specs() {
        let spec = RequestContext::spec();
        assert_eq!(spec.role, ParamRole::Context(ContextKind::Request));
        assert!((spec.decode)(json!(null)).is_err());

        let spec = TaskContext::spec();
        assert_eq!(spec.role, ParamRole::Context(ContextKind::Task));
    }

    #[test]
    fn test_raw_value_is_a_value_param() {
        let spec = <Value as BindArg>::spec();
        assert_eq!(spec.role, ParamRole::Value);
        assert!(matches!((spec.shape)(), Shape::Raw));
    }
}
