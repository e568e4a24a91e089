//! The handler function abstraction.
//!
//! Handlers are plain closures `Fn(A1, .., An) -> Result<R, E>` where every
//! parameter implements [`BindArg`] and the success value implements
//! `Serialize + Schema`. [`HandlerFn`] (implemented for arities 0 through 6)
//! surfaces the ordered parameter specs for the analyzer and a type-erased
//! invoker for the dispatcher. [`IntoReply`] interprets the return value:
//! `Ok(())` is success without a result, any other `Ok` carries the single
//! result, `Err` becomes a 500-class failure with the error's message.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::error::RequestError;
use crate::schema::{Schema, Shape};

use super::param::{ArgValue, BindArg, ParamSpec};

/// Interpreted handler return value.
#[derive(Debug)]
pub enum Reply {
    /// Success, with the serialized result when the handler produces one.
    Success(Option<Value>),
    /// The handler (or result serialization) failed; any would-be result is
    /// discarded.
    Failure(RequestError),
}

/// Conversion from a handler's concrete return type to a [`Reply`].
pub trait IntoReply {
    /// Whether the return carries the error capability in last position.
    const RETURNS_ERROR: bool;

    /// Shape of the success value; [`Shape::Unit`] means "no result".
    fn result_shape() -> Shape;

    fn into_reply(self) -> Reply;
}

impl<T, E> IntoReply for Result<T, E>
where
    T: Serialize + Schema,
    E: Display,
{
    const RETURNS_ERROR: bool = true;

    fn result_shape() -> Shape {
        T::shape()
    }

    fn into_reply(self) -> Reply {
        match self {
            Ok(result) => {
                if matches!(T::shape().resolved(), Shape::Unit) {
                    return Reply::Success(None);
                }
                match serde_json::to_value(result) {
                    Ok(value) => Reply::Success(Some(value)),
                    Err(err) => Reply::Failure(RequestError::internal(format!(
                        "encode result: {err}"
                    ))),
                }
            }
            Err(err) => Reply::Failure(RequestError::internal(err.to_string())),
        }
    }
}

/// A handler function over the argument tuple `Args`.
pub trait HandlerFn<Args>: Send + Sync + 'static {
    type Reply: IntoReply;

    /// The ordered parameter specs, one per argument.
    fn params() -> Vec<ParamSpec>;

    /// Invoke with type-erased arguments, in declaration order.
    ///
    /// Returns `None` on an arity or type mismatch between the assembled
    /// arguments and the handler's signature; the analyzer makes that
    /// unreachable for descriptor-driven dispatch.
    fn invoke(&self, args: Vec<ArgValue>) -> Option<Self::Reply>;
}

macro_rules! impl_handler_fn {
    ($($arg:ident),*) => {
        impl<Fun, Rep, $($arg,)*> HandlerFn<($($arg,)*)> for Fun
        where
            Fun: Fn($($arg),*) -> Rep + Send + Sync + 'static,
            Rep: IntoReply,
            $($arg: BindArg,)*
        {
            type Reply = Rep;

            fn params() -> Vec<ParamSpec> {
                vec![$(<$arg as BindArg>::spec()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn invoke(&self, args: Vec<ArgValue>) -> Option<Rep> {
                let mut iter = args.into_iter();
                $(
                    let $arg = *iter.next()?.downcast::<$arg>().ok()?;
                )*
                if iter.next().is_some() {
                    return None;
                }
                Some((self)($($arg),*))
            }
        }
    };
}

impl_handler_fn!();
impl_handler_fn!(A1);
impl_handler_fn!(A1, A2);
impl_handler_fn!(A1, A2, A3);
impl_handler_fn!(A1, A2, A3, A4);
impl_handler_fn!(A1, A2, A3, A4, A5);
impl_handler_fn!(A1, A2, A3, A4, A5, A6);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use serde_json::json;

    fn specs_of<F, Args>(_f: &F) -> Vec<ParamSpec>
    where
        F: HandlerFn<Args>,
    {
        F::params()
    }

    #[test]
    fn test_params_in_declaration_order() {
        let handler = |_a: i64, _b: String| -> Result<(), SessionError> { Ok(()) };
        let specs = specs_of(&handler);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].type_id, std::any::TypeId::of::<i64>());
        assert_eq!(specs[1].type_id, std::any::TypeId::of::<String>());
    }

    #[test]
    fn test_invoke_downcasts_in_order() {
        let handler = |a: i64, b: String| -> Result<String, SessionError> { Ok(format!("{a}-{b}")) };
        let args: Vec<ArgValue> = vec![Box::new(3i64), Box::new("x".to_string())];
        let reply = handler.invoke(args).unwrap().into_reply();
        match reply {
            Reply::Success(Some(value)) => assert_eq!(value, json!("3-x")),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn test_invoke_type_mismatch_is_none() {
        let handler = |_a: i64| -> Result<(), SessionError> { Ok(()) };
        let args: Vec<ArgValue> = vec![Box::new("wrong".to_string())];
        assert!(handler.invoke(args).is_none());
    }

    #[test]
    fn test_invoke_arity_mismatch_is_none() {
        let handler = |_a: i64| -> Result<(), SessionError> { Ok(()) };
        let args: Vec<ArgValue> = vec![Box::new(1i64), Box::new(2i64)];
        assert!(handler.invoke(args).is_none());
        let handler = |_a: i64| -> Result<(), SessionError> { Ok(()) };
        assert!(handler.invoke(Vec::new()).is_none());
    }

    #[test]
    fn test_unit_reply_has_no_result() {
        let reply = (Ok(()) as Result<(), SessionError>).into_reply();
        assert!(matches!(reply, Reply::Success(None)));
    }

    #[test]
    fn test_error_reply_is_internal_failure() {
        let reply = (Err(SessionError::new("boom")) as Result<i64, SessionError>).into_reply();
        match reply {
            Reply::Failure(err) => {
                assert_eq!(err.status, 500);
                assert_eq!(err.message, "boom");
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }
}
