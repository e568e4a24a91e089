//! [`Schema`] implementations for standard types.

use std::collections::{BTreeMap, HashMap};

use super::{Schema, Shape};

macro_rules! scalar_schema {
    ($shape:expr => $($ty:ty),+) => {
        $(
            impl Schema for $ty {
                fn shape() -> Shape {
                    $shape
                }
            }
        )+
    };
}

scalar_schema!(Shape::Int => i8, i16, i32, i64, isize);
scalar_schema!(Shape::Uint => u8, u16, u32, u64, usize);
scalar_schema!(Shape::Float => f32, f64);
scalar_schema!(Shape::Bool => bool);
scalar_schema!(Shape::String => String);

impl Schema for () {
    fn shape() -> Shape {
        Shape::Unit
    }
}

impl Schema for serde_json::Value {
    fn shape() -> Shape {
        Shape::Raw
    }
}

impl<T: Schema> Schema for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(Box::new(Shape::of::<T>()))
    }
}

impl<T: Schema> Schema for Vec<T> {
    fn shape() -> Shape {
        Shape::List(Box::new(Shape::of::<T>()))
    }
}

impl<T: Schema> Schema for Box<T> {
    fn shape() -> Shape {
        Shape::of::<T>()
    }
}

impl<T: Schema> Schema for HashMap<String, T> {
    fn shape() -> Shape {
        Shape::Map(Box::new(Shape::of::<T>()))
    }
}

impl<T: Schema> Schema for BTreeMap<String, T> {
    fn shape() -> Shape {
        Shape::Map(Box::new(Shape::of::<T>()))
    }
}

// Tuples exist only so the analyzer can reject handlers returning more than
// one result value.
macro_rules! tuple_schema {
    ($count:expr => $($ty:ident),+) => {
        impl<$($ty),+> Schema for ($($ty,)+) {
            fn shape() -> Shape {
                Shape::Tuple($count)
            }
        }
    };
}

tuple_schema!(2 => T1, T2);
tuple_schema!(3 => T1, T2, T3);
tuple_schema!(4 => T1, T2, T3, T4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_shapes() {
        assert!(matches!(i64::shape(), Shape::Int));
        assert!(matches!(u32::shape(), Shape::Uint));
        assert!(matches!(f64::shape(), Shape::Float));
        assert!(matches!(bool::shape(), Shape::Bool));
        assert!(matches!(String::shape(), Shape::String));
        assert!(matches!(<()>::shape(), Shape::Unit));
        assert!(matches!(serde_json::Value::shape(), Shape::Raw));
    }

    #[test]
    fn test_composite_shapes() {
        assert!(matches!(<Option<Vec<i64>>>::shape(), Shape::Optional(_)));
        assert!(matches!(
            <HashMap<String, String>>::shape(),
            Shape::Map(_)
        ));
        assert!(matches!(<Box<i64>>::shape().resolved(), Shape::Int));
    }

    #[test]
    fn test_tuple_arity() {
        assert!(matches!(<(i64, String)>::shape(), Shape::Tuple(2)));
        assert!(matches!(<(i64, i64, i64)>::shape(), Shape::Tuple(3)));
    }
}
