//! Human-readable descriptions of a value's runtime shape.
//!
//! Grammar of a shape string:
//!
//! ```text
//! Integer | Float | Text | Character | Bytes | Boolean | None
//! Sequence<T>      Set<T>      Tuple[T1,T2,...]      Mapping<K,V>
//! Union[T1,T2,...] Unknown     Sequence<...> (depth exhausted)
//! ```
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::model::Value;

/// Depth used when none is given
pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Sequence,
    Set,
    Tuple,
    Mapping,
}

impl Container {
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::List(_) => Some(Container::Sequence),
            Value::Set(_) => Some(Container::Set),
            Value::Tuple(_) => Some(Container::Tuple),
            Value::Map(_) => Some(Container::Mapping),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar(&'static str),
    Sequence(Box<Shape>),
    Set(Box<Shape>),
    Tuple(Vec<Shape>),
    Mapping(Box<Shape>, Box<Shape>),
    Union(Vec<Shape>),
    /// Element shape of an empty container
    Unknown,
    /// A container below the depth budget; not descended into
    Elided(Container),
}

impl Shape {
    /// Describe `value`, descending at most `max_depth` container levels.
    ///
    /// Each container entered costs one unit of depth. Self-referential
    /// values terminate because every cycle runs through a container.
    pub fn of(value: &Value, max_depth: usize) -> Shape {
        if let (Some(container), 0) = (Container::of(value), max_depth) {
            return Shape::Elided(container);
        }
        let depth = max_depth.saturating_sub(1);

        match value {
            Value::List(items) => {
                let items = items.borrow();
                Shape::Sequence(Box::new(union_of(
                    items.iter().map(|v| Shape::of(v, depth)),
                )))
            },
            Value::Set(items) => {
                // sets have no meaningful order, so impose one
                let items = items.borrow();
                let shapes = items
                    .iter()
                    .map(|v| Shape::of(v, depth))
                    .unique()
                    .sorted_by_cached_key(Shape::to_string);
                Shape::Set(Box::new(union_of(shapes)))
            },
            Value::Tuple(items) => {
                Shape::Tuple(
                    items
                        .iter()
                        .map(|v| Shape::of(v, depth))
                        .collect(),
                )
            },
            Value::Map(mapping) => {
                let mapping = mapping.borrow();
                Shape::Mapping(
                    Box::new(union_of(
                        mapping.keys().map(|k| Shape::of(k, depth)),
                    )),
                    Box::new(union_of(
                        mapping.values().map(|v| Shape::of(v, depth)),
                    )),
                )
            },
            scalar => Shape::Scalar(scalar.category()),
        }
    }
}

/// Collapse element shapes: nothing is `Unknown`, a single distinct shape is
/// itself, anything else is a `Union` in first-seen order.
fn union_of(shapes: impl Iterator<Item = Shape>) -> Shape {
    let mut distinct: Vec<Shape> = shapes.unique().collect();
    match distinct.len() {
        0 => Shape::Unknown,
        1 => distinct.swap_remove(0),
        _ => Shape::Union(distinct),
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Scalar(name) => f.write_str(name),
            Shape::Sequence(inner) => write!(f, "Sequence<{inner}>"),
            Shape::Set(inner) => write!(f, "Set<{inner}>"),
            Shape::Tuple(items) => write!(f, "Tuple[{}]", items.iter().join(",")),
            Shape::Mapping(keys, values) => write!(f, "Mapping<{keys},{values}>"),
            Shape::Union(members) => {
                write!(f, "Union[{}]", members.iter().join(","))
            },
            Shape::Unknown => f.write_str("Unknown"),
            Shape::Elided(Container::Sequence) => f.write_str("Sequence<...>"),
            Shape::Elided(Container::Set) => f.write_str("Set<...>"),
            Shape::Elided(Container::Tuple) => f.write_str("Tuple[...]"),
            Shape::Elided(Container::Mapping) => f.write_str("Mapping<...>"),
        }
    }
}

/// Shape string of `value`, see [`Shape::of`]
pub fn describe_shape(value: &Value, max_depth: usize) -> String {
    Shape::of(value, max_depth).to_string()
}
