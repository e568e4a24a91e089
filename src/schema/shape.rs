//! The [`Shape`] tag and its zero-value construction.

use serde_json::{Map, Value};

/// Trait supplying a type's structural shape.
///
/// Implemented by the crate for primitives, `Option`, `Vec`, string-keyed
/// maps, `serde_json::Value`, `()`, and small tuples. Application types use
/// the [`schema_record!`](crate::schema_record) and
/// [`schema_newtype!`](crate::schema_newtype) macros.
pub trait Schema {
    fn shape() -> Shape;
}

/// Structural tag for a wire-visible type.
///
/// `Lazy` defers shape construction behind a function pointer so that
/// self-referential type graphs (`struct Node { next: Option<Box<Node>> }`)
/// expand only as deep as a walker's depth budget, never eagerly.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Signed integer family.
    Int,
    /// Unsigned integer family.
    Uint,
    /// Floating point.
    Float,
    Bool,
    String,
    /// Nullable position wrapping an inner shape (`Option<T>`).
    Optional(Box<Shape>),
    /// Sequence of one element shape (`Vec<T>`).
    List(Box<Shape>),
    /// String-keyed map of one value shape.
    Map(Box<Shape>),
    /// Data record with named, ordered fields.
    Record(Vec<FieldShape>),
    /// Tuple of the given arity. Only ever used to reject handler replies
    /// carrying more than one result value.
    Tuple(usize),
    /// Raw JSON passthrough (`serde_json::Value`).
    Raw,
    /// No wire representation (`()`); a handler reply of this shape carries
    /// no result.
    Unit,
    /// Deferred shape, resolved on demand.
    Lazy(fn() -> Shape),
}

/// One named field of a [`Shape::Record`].
#[derive(Debug, Clone)]
pub struct FieldShape {
    /// Wire-visible name. `"-"` or empty marks the field excluded from
    /// path/query binding and null-filling.
    pub name: &'static str,
    pub shape: Shape,
}

impl FieldShape {
    pub fn new(name: &'static str, shape: Shape) -> Self {
        Self { name, shape }
    }

    /// Whether the field is excluded from wire binding.
    pub fn is_excluded(&self) -> bool {
        self.name.is_empty() || self.name == "-"
    }
}

impl Shape {
    /// Deferred shape of `T`, for use inside composite shapes.
    pub fn of<T: Schema>() -> Shape {
        Shape::Lazy(T::shape)
    }

    /// Resolve one or more layers of [`Shape::Lazy`] indirection.
    pub fn resolved(&self) -> Shape {
        let mut shape = self.clone();
        while let Shape::Lazy(build) = shape {
            shape = build();
        }
        shape
    }

    /// Short kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Int => "int",
            Shape::Uint => "uint",
            Shape::Float => "float",
            Shape::Bool => "bool",
            Shape::String => "string",
            Shape::Optional(_) => "optional",
            Shape::List(_) => "list",
            Shape::Map(_) => "map",
            Shape::Record(_) => "record",
            Shape::Tuple(_) => "tuple",
            Shape::Raw => "raw",
            Shape::Unit => "unit",
            Shape::Lazy(_) => "lazy",
        }
    }

    /// The JSON zero value of this shape, expanded at most `depth` levels.
    ///
    /// Optional positions are zero at `null` (the substitution with the
    /// inner shape's zero happens during null-filling, not here), records
    /// expand field by field, and an exhausted budget yields `null`.
    pub fn zero_value(&self, depth: usize) -> Value {
        if depth == 0 {
            return Value::Null;
        }
        match self {
            // deferred shapes unfold for free; only structure spends budget
            Shape::Lazy(build) => build().zero_value(depth),
            Shape::Int | Shape::Uint => Value::from(0),
            Shape::Float => Value::from(0.0),
            Shape::Bool => Value::Bool(false),
            Shape::String => Value::String(String::new()),
            Shape::Optional(_) => Value::Null,
            Shape::List(_) => Value::Array(Vec::new()),
            Shape::Map(_) => Value::Object(Map::new()),
            Shape::Record(fields) => {
                let mut map = Map::new();
                for field in fields {
                    if field.is_excluded() {
                        continue;
                    }
                    map.insert(field.name.to_string(), field.shape.zero_value(depth - 1));
                }
                Value::Object(map)
            }
            Shape::Tuple(_) | Shape::Raw | Shape::Unit => Value::Null,
        }
    }
}
