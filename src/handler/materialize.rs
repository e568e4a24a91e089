//! Request value materialization for the free-form parameter.
//!
//! Two distinct paths:
//!
//! - **Identifier path**: resolve a single numeric id with strict source
//!   priority path `id` > query `id` > body top-level `id`. The first
//!   *present* source wins; a present-but-malformed value is a hard
//!   failure, never a fallback to the next source.
//! - **Structured path**: body JSON deep-merged over the target shape's
//!   zero value, then per record field a path parameter (first) or query
//!   parameter (second) coerced by the field's shape overwrites whatever
//!   the body held. Tie-break per field: path > query > body.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::codec::JsonCodec;
use crate::error::RequestError;
use crate::request::Request;
use crate::schema::Shape;

use super::analyze::FreeFormBinding;
use super::param::ArgValue;

/// Depth budget for zero-value expansion of the target shape.
///
/// Deliberately fixed rather than wired to the builder's `fill_depth`: that
/// knob tunes response normalization, while this budget only has to cover
/// the nesting of request types, whose absent fields decode to their own
/// defaults anyway once the merge base runs out.
const ZERO_DEPTH: usize = 8;

/// Produce the concrete free-form argument for one request.
pub(crate) fn materialize(
    request: &Request,
    binding: &FreeFormBinding,
) -> Result<ArgValue, RequestError> {
    if binding.is_identifier {
        resolve_identifier(request, binding)
    } else {
        resolve_structured(request, binding)
    }
}

fn resolve_identifier(
    request: &Request,
    binding: &FreeFormBinding,
) -> Result<ArgValue, RequestError> {
    let raw = if let Some(value) = request.path_param("id") {
        if value.is_empty() {
            return Err(RequestError::bad_request("requires id"));
        }
        value.to_string()
    } else if let Some(value) = request.query_first("id") {
        if value.is_empty() {
            return Err(RequestError::bad_request("requires id"));
        }
        value.to_string()
    } else {
        #[derive(Deserialize)]
        struct IdBody {
            id: Option<Number>,
        }
        let body: IdBody = JsonCodec::decode(request.body())
            .map_err(|err| RequestError::bad_request(format!("unmarshal body: {err}")))?;
        match body.id {
            Some(number) => number.to_string(),
            None => return Err(RequestError::bad_request("requires id")),
        }
    };

    let id: i64 = raw
        .parse()
        .map_err(|err| RequestError::bad_request(format!("parse id: {err}")))?;

    (binding.decode)(Value::from(id))
        .map_err(|err| RequestError::bad_request(format!("bind id: {err}")))
}

fn resolve_structured(
    request: &Request,
    binding: &FreeFormBinding,
) -> Result<ArgValue, RequestError> {
    let shape = (binding.shape)().resolved();

    let body = JsonCodec::decode_body(request.body())
        .map_err(|err| RequestError::bad_request(format!("unmarshal body: {err}")))?;

    let mut base = shape.zero_value(ZERO_DEPTH);
    if let Some(body_value) = body {
        base = merge_over(base, body_value);
    }

    // Path and query values always win over body values, field by field.
    if let Shape::Record(fields) = &shape {
        if let Value::Object(map) = &mut base {
            for field in fields {
                if field.is_excluded() {
                    continue;
                }
                let found = request
                    .path_param(field.name)
                    .or_else(|| request.query_first(field.name));
                let Some(raw) = found else {
                    continue;
                };
                let coerced = coerce(raw, &field.shape.resolved()).map_err(|msg| {
                    RequestError::bad_request(format!("parse query: {}: {}", field.name, msg))
                })?;
                map.insert(field.name.to_string(), coerced);
            }
        }
    }

    (binding.decode)(base)
        .map_err(|err| RequestError::bad_request(format!("parse request: {err}")))
}

/// Deep-merge `overlay` over `base`. Objects merge key by key; an explicit
/// `null` in the overlay keeps a non-null base (matching decode-into-zero
/// semantics, where null is a no-op for non-nullable targets).
fn merge_over(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                let existing = base_map.remove(&key).unwrap_or(Value::Null);
                base_map.insert(key, merge_over(existing, value));
            }
            Value::Object(base_map)
        }
        (base, Value::Null) if !base.is_null() => base,
        (_, overlay) => overlay,
    }
}

/// Coerce a path/query string into a field value. Supported kinds:
/// integer family, string, boolean.
fn coerce(raw: &str, shape: &Shape) -> Result<Value, String> {
    match shape {
        Shape::Int => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|err| err.to_string()),
        Shape::Uint => raw
            .parse::<u64>()
            .map(Value::from)
            .map_err(|err| err.to_string()),
        Shape::String => Ok(Value::String(raw.to_string())),
        Shape::Bool => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| format!("invalid bool: {raw}")),
        other => Err(format!("unsupported field kind: {}", other.kind_name())),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
