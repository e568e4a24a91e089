//! Deep null-normalization of successful results.
//!
//! Some clients cannot gracefully handle `null` where they expect an empty
//! container or a zero-valued object. Before serialization, a successful
//! result is walked depth-first against its [`Shape`]: null optionals become
//! the zero value of their inner shape (then recursed into), null lists
//! become `[]`, null maps become `{}`, records are walked field by field.
//! Recursion is bounded by a fixed depth budget instead of cycle detection;
//! a subtree deeper than the budget is returned as-is. Callers depend on
//! that truncation behavior, so it stays.

use serde_json::Value;

use crate::schema::Shape;

/// Default recursion depth for [`fill_null`].
pub const DEFAULT_FILL_DEPTH: usize = 8;

/// Normalize `value` against `shape`, descending at most `depth` levels.
pub fn fill_null(value: Value, shape: &Shape, depth: usize) -> Value {
    if depth == 0 {
        return value;
    }
    match shape {
        // deferred shapes unfold for free; only structure spends budget
        Shape::Lazy(build) => fill_null(value, &build(), depth),
        Shape::Optional(inner) => {
            if value.is_null() {
                let zero = inner.zero_value(depth - 1);
                fill_null(zero, inner, depth - 1)
            } else {
                fill_null(value, inner, depth - 1)
            }
        }
        Shape::List(_) => {
            if value.is_null() {
                Value::Array(Vec::new())
            } else {
                // element values are not normalized
                value
            }
        }
        Shape::Map(_) => {
            if value.is_null() {
                Value::Object(serde_json::Map::new())
            } else {
                value
            }
        }
        Shape::Record(fields) => {
            let Value::Object(mut map) = value else {
                return value;
            };
            for field in fields {
                if field.is_excluded() {
                    continue;
                }
                let entry = map.remove(field.name).unwrap_or(Value::Null);
                map.insert(
                    field.name.to_string(),
                    fill_null(entry, &field.shape, depth - 1),
                );
            }
            Value::Object(map)
        }
        Shape::Int | Shape::Uint => {
            if value.is_null() {
                Value::from(0)
            } else {
                value
            }
        }
        Shape::Float => {
            if value.is_null() {
                Value::from(0.0)
            } else {
                value
            }
        }
        Shape::Bool => {
            if value.is_null() {
                Value::Bool(false)
            } else {
                value
            }
        }
        Shape::String => {
            if value.is_null() {
                Value::String(String::new())
            } else {
                value
            }
        }
        Shape::Tuple(_) | Shape::Raw | Shape::Unit => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldShape;
    use serde_json::json;

    fn user_shape() -> Shape {
        Shape::Record(vec![
            FieldShape::new("name", Shape::String),
            FieldShape::new(
                "tags",
                Shape::Optional(Box::new(Shape::List(Box::new(Shape::String)))),
            ),
            FieldShape::new(
                "profile",
                Shape::Optional(Box::new(Shape::Record(vec![
                    FieldShape::new("bio", Shape::String),
                    FieldShape::new("age", Shape::Int),
                ]))),
            ),
        ])
    }

    #[test]
    fn test_null_slice_becomes_empty_array() {
        let filled = fill_null(
            json!({"name": "a", "tags": null, "profile": null}),
            &user_shape(),
            DEFAULT_FILL_DEPTH,
        );
        assert_eq!(filled["tags"], json!([]));
    }

    #[test]
    fn test_null_pointer_becomes_zero_object() {
        let filled = fill_null(
            json!({"name": "a", "tags": null, "profile": null}),
            &user_shape(),
            DEFAULT_FILL_DEPTH,
        );
        assert_eq!(filled["profile"], json!({"bio": "", "age": 0}));
    }

    #[test]
    fn test_present_values_unchanged() {
        let filled = fill_null(
            json!({"name": "a", "tags": ["x"], "profile": {"bio": "b", "age": 3}}),
            &user_shape(),
            DEFAULT_FILL_DEPTH,
        );
        assert_eq!(
            filled,
            json!({"name": "a", "tags": ["x"], "profile": {"bio": "b", "age": 3}})
        );
    }

    #[test]
    fn test_absent_field_materializes_as_zero() {
        let filled = fill_null(json!({"name": "a"}), &user_shape(), DEFAULT_FILL_DEPTH);
        assert_eq!(filled["tags"], json!([]));
        assert_eq!(filled["profile"], json!({"bio": "", "age": 0}));
    }

    #[test]
    fn test_null_map_becomes_empty_object() {
        let shape = Shape::Map(Box::new(Shape::Int));
        assert_eq!(fill_null(Value::Null, &shape, 8), json!({}));
    }

    #[test]
    fn test_list_elements_not_recursed() {
        let shape = Shape::List(Box::new(Shape::Optional(Box::new(Shape::Int))));
        let value = json!([null, 1]);
        assert_eq!(fill_null(value.clone(), &shape, 8), value);
    }

    #[test]
    fn test_depth_budget_truncates() {
        fn node_shape() -> Shape {
            Shape::Record(vec![
                FieldShape::new("value", Shape::Int),
                FieldShape::new("next", Shape::Optional(Box::new(Shape::Lazy(node_shape)))),
            ])
        }

        let filled = fill_null(json!({"value": 1, "next": null}), &node_shape(), 4);
        // outer record (4) -> next optional (3) -> substituted zero record
        // (2) -> its own next exhausts the budget and stays null
        assert_eq!(filled["next"]["value"], json!(0));
        assert_eq!(filled["next"]["next"], Value::Null);

        // zero budget: untouched
        let untouched = fill_null(json!({"value": 1, "next": null}), &node_shape(), 0);
        assert_eq!(untouched["next"], Value::Null);
    }

    #[test]
    fn test_lazy_shape_spends_no_budget() {
        fn list_shape() -> Shape {
            Shape::Optional(Box::new(Shape::List(Box::new(Shape::Int))))
        }
        let lazy = Shape::Lazy(list_shape);
        // unfolding the indirection costs nothing: with a budget of 2 the
        // optional and the list both still get their turn
        assert_eq!(fill_null(Value::Null, &lazy, 2), json!([]));
    }

    #[test]
    fn test_scalars_unchanged() {
        assert_eq!(fill_null(json!(5), &Shape::Int, 8), json!(5));
        assert_eq!(fill_null(json!("x"), &Shape::String, 8), json!("x"));
        assert_eq!(fill_null(Value::Null, &Shape::Raw, 8), Value::Null);
    }

    #[test]
    fn test_excluded_fields_left_alone() {
        let shape = Shape::Record(vec![
            FieldShape::new("name", Shape::String),
            FieldShape::new("-", Shape::String),
        ]);
        let filled = fill_null(json!({"name": null}), &shape, 8);
        assert_eq!(filled, json!({"name": ""}));
    }
}
