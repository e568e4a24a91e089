//! Signature analysis.
//!
//! Runs once per handler, at bind time, and produces the immutable
//! [`Descriptor`] the dispatcher reads on every request. Parameters are
//! classified left to right: an optional leading context, session
//! parameters matched by `TypeId` against the validated key registry, and
//! at most one free-form parameter whose value is materialized from the
//! request. Any failure here is a wiring mistake and aborts setup.

use std::any::TypeId;

use serde_json::Value;

use crate::error::SetupError;
use crate::schema::Shape;
use crate::session::{KeyRegistry, SessionKey};

use super::param::{ArgValue, ContextKind, ParamRole, ParamSpec};

/// How the dispatcher fills one argument position.
#[derive(Clone)]
pub(crate) enum ArgBinding {
    Context(ContextKind),
    Session(SessionKey),
    FreeForm,
}

/// The resolved free-form parameter.
#[derive(Clone)]
pub(crate) struct FreeFormBinding {
    pub type_name: &'static str,
    pub shape: fn() -> Shape,
    pub decode: fn(Value) -> Result<ArgValue, serde_json::Error>,
    /// Matches the binder-wide identifier type; materialization resolves a
    /// single numeric `id` instead of structured field binding.
    pub is_identifier: bool,
}

/// Reply classification inputs, taken from the handler's `IntoReply` impl.
pub(crate) struct ReplyInfo {
    pub returns_error: bool,
    pub result_shape: fn() -> Shape,
}

/// Immutable, precomputed classification of one handler.
///
/// Built once at bind time, shared read-only (behind `Arc`) across every
/// concurrent invocation of the route. All per-request state lives in
/// request-scoped values.
pub struct Descriptor {
    pub(crate) bindings: Vec<ArgBinding>,
    pub(crate) free_form: Option<FreeFormBinding>,
    pub(crate) result_shape: fn() -> Shape,
    session_count: usize,
    context: Option<ContextKind>,
    returns_error: bool,
    returns_result: bool,
}

impl std::fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descriptor").finish_non_exhaustive()
    }
}

impl Descriptor {
    /// The leading context parameter, if any.
    pub fn context(&self) -> Option<ContextKind> {
        self.context
    }

    /// Number of session-bound parameters.
    pub fn session_count(&self) -> usize {
        self.session_count
    }

    /// Whether a free-form parameter is present.
    pub fn has_free_form(&self) -> bool {
        self.free_form.is_some()
    }

    /// Whether the free-form parameter resolves via the identifier path.
    pub fn free_form_is_identifier(&self) -> bool {
        self.free_form
            .as_ref()
            .map(|ff| ff.is_identifier)
            .unwrap_or(false)
    }

    /// Whether the handler's return carries the error capability.
    pub fn returns_error(&self) -> bool {
        self.returns_error
    }

    /// Whether the handler produces a result value on success.
    pub fn returns_result(&self) -> bool {
        self.returns_result
    }
}

/// Classify a handler's parameter specs and reply into a [`Descriptor`].
pub(crate) fn analyze(
    params: &[ParamSpec],
    registry: &KeyRegistry,
    id_type: Option<TypeId>,
    reply: ReplyInfo,
) -> Result<Descriptor, SetupError> {
    let returns_result = match (reply.result_shape)().resolved() {
        Shape::Tuple(count) if count > 1 => {
            return Err(SetupError::TooManyResults { count });
        }
        Shape::Unit => false,
        _ => true,
    };

    let mut bindings = Vec::with_capacity(params.len());
    let mut context = None;
    let mut free_form: Option<FreeFormBinding> = None;
    let mut session_count = 0;

    for (index, spec) in params.iter().enumerate() {
        match spec.role {
            ParamRole::Context(kind) => {
                if index != 0 {
                    return Err(SetupError::ContextNotFirst { index });
                }
                context = Some(kind);
                bindings.push(ArgBinding::Context(kind));
            }
            ParamRole::Value => {
                if let Some(key) = registry.by_type(spec.type_id) {
                    session_count += 1;
                    bindings.push(ArgBinding::Session(key.clone()));
                    continue;
                }
                if free_form.is_some() {
                    return Err(SetupError::MultipleFreeForm {
                        index,
                        type_name: spec.type_name,
                    });
                }
                free_form = Some(FreeFormBinding {
                    type_name: spec.type_name,
                    shape: spec.shape,
                    decode: spec.decode,
                    is_identifier: id_type == Some(spec.type_id),
                });
                bindings.push(ArgBinding::FreeForm);
            }
        }
    }

    Ok(Descriptor {
        bindings,
        free_form,
        result_shape: reply.result_shape,
        session_count,
        context,
        returns_error: reply.returns_error,
        returns_result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::param::BindArg;
    use crate::request::{RequestContext, TaskContext};
    use crate::session::SessionKey;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Clone, Copy)]
    struct UserId(i64);

    impl crate::schema::Schema for UserId {
        fn shape() -> Shape {
            Shape::Int
        }
    }

    #[derive(Serialize, Deserialize, Default)]
    struct Req {
        name: String,
    }

    impl crate::schema::Schema for Req {
        fn shape() -> Shape {
            Shape::Record(vec![crate::schema::FieldShape::new(
                "name",
                Shape::String,
            )])
        }
    }

    fn registry_with_user_id() -> KeyRegistry {
        KeyRegistry::validate(&[SessionKey::of::<UserId>("userID")]).unwrap()
    }

    fn unit_reply() -> ReplyInfo {
        ReplyInfo {
            returns_error: true,
            result_shape: <() as crate::schema::Schema>::shape,
        }
    }

    #[test]
    fn test_leading_context_classified() {
        let params = vec![RequestContext::spec(), ParamSpec::value::<Req>()];
        let desc = analyze(&params, &KeyRegistry::empty(), None, unit_reply()).unwrap();
        assert_eq!(desc.context(), Some(ContextKind::Request));
        assert!(desc.has_free_form());
        assert!(!desc.free_form_is_identifier());
    }

    #[test]
    fn test_task_context_classified() {
        let params = vec![TaskContext::spec()];
        let desc = analyze(&params, &KeyRegistry::empty(), None, unit_reply()).unwrap();
        assert_eq!(desc.context(), Some(ContextKind::Task));
    }

    #[test]
    fn test_context_after_first_position_fails() {
        let params = vec![ParamSpec::value::<Req>(), RequestContext::spec()];
        let err = analyze(&params, &KeyRegistry::empty(), None, unit_reply()).unwrap_err();
        assert!(matches!(err, SetupError::ContextNotFirst { index: 1 }));
    }

    #[test]
    fn test_session_param_matched_by_type() {
        let params = vec![ParamSpec::value::<UserId>(), ParamSpec::value::<Req>()];
        let desc = analyze(&params, &registry_with_user_id(), None, unit_reply()).unwrap();
        assert_eq!(desc.session_count(), 1);
        assert!(desc.has_free_form());
        assert!(matches!(desc.bindings[0], ArgBinding::Session(_)));
        assert!(matches!(desc.bindings[1], ArgBinding::FreeForm));
    }

    #[test]
    fn test_multiple_free_form_fails() {
        let params = vec![ParamSpec::value::<Req>(), ParamSpec::value::<i64>()];
        let err = analyze(&params, &KeyRegistry::empty(), None, unit_reply()).unwrap_err();
        assert!(matches!(
            err,
            SetupError::MultipleFreeForm { index: 1, .. }
        ));
    }

    #[test]
    fn test_identifier_detection() {
        let params = vec![ParamSpec::value::<UserId>()];
        let desc = analyze(
            &params,
            &KeyRegistry::empty(),
            Some(std::any::TypeId::of::<UserId>()),
            unit_reply(),
        )
        .unwrap();
        assert!(desc.free_form_is_identifier());
    }

    #[test]
    fn test_tuple_reply_fails() {
        let reply = ReplyInfo {
            returns_error: true,
            result_shape: <(i64, String) as crate::schema::Schema>::shape,
        };
        let err = analyze(&[], &KeyRegistry::empty(), None, reply).unwrap_err();
        assert!(matches!(err, SetupError::TooManyResults { count: 2 }));
    }

    #[test]
    fn test_returns_result_flags() {
        let desc = analyze(&[], &KeyRegistry::empty(), None, unit_reply()).unwrap();
        assert!(!desc.returns_result());
        assert!(desc.returns_error());

        let reply = ReplyInfo {
            returns_error: true,
            result_shape: <Req as crate::schema::Schema>::shape,
        };
        let desc = analyze(&[], &KeyRegistry::empty(), None, reply).unwrap();
        assert!(desc.returns_result());
    }
}
