use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use super::{Mapping, ValueSet};

/// Containers with reference semantics: cloning the `Value` aliases the
/// same storage, and a container may end up holding itself.
pub type Shared<T> = Rc<RefCell<T>>;

/// A dynamically typed value.
///
/// NOTE: the derived `Debug` and `PartialEq` recurse into containers, so they
/// must not be used on self-referential values. `Display` is guarded.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(isize),
    Float(f64),
    Str(String),
    Char(char),
    Bytes(Vec<u8>),
    Bool(bool),
    Nil,
    List(Shared<Vec<Value>>),
    Set(Shared<ValueSet>),
    Tuple(Rc<[Value]>),
    Map(Shared<Mapping>),
}

impl Value {
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Rc::from(items))
    }

    pub fn set(items: ValueSet) -> Self {
        Value::Set(Rc::new(RefCell::new(items)))
    }

    pub fn map(mapping: Mapping) -> Self {
        Value::Map(Rc::new(RefCell::new(mapping)))
    }

    /// Name of the value's runtime category
    pub fn category(&self) -> &'static str {
        match self {
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "Text",
            Value::Char(_) => "Character",
            Value::Bytes(_) => "Bytes",
            Value::Bool(_) => "Boolean",
            Value::Nil => "None",
            Value::List(_) => "Sequence",
            Value::Set(_) => "Set",
            Value::Tuple(_) => "Tuple",
            Value::Map(_) => "Mapping",
        }
    }

    /// Scalars, and tuples made only of immutable values.
    /// Only these may be used as mapping keys or set elements.
    pub fn is_immutable(&self) -> bool {
        match self {
            Value::List(_) | Value::Set(_) | Value::Map(_) => false,
            Value::Tuple(items) => items.iter().all(Value::is_immutable),
            _ => true,
        }
    }

    /// Identity of the shared storage behind a mutable container
    fn storage_id(&self) -> Option<*const ()> {
        match self {
            Value::List(rc) => Some(Rc::as_ptr(rc) as *const ()),
            Value::Set(rc) => Some(Rc::as_ptr(rc) as *const ()),
            Value::Map(rc) => Some(Rc::as_ptr(rc) as *const ()),
            _ => None,
        }
    }
}

/***********\
|* Display *|
\***********/
// Values print in the same literal notation the parser reads. A container
// that is already being printed further up shows as `[...]` / `{...}`.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_value(self, f, &mut Vec::new())
    }
}

fn write_value(
    value: &Value,
    f: &mut Formatter<'_>,
    open: &mut Vec<*const ()>,
) -> std::fmt::Result {
    let id = value.storage_id();
    if let Some(id) = id {
        if open.contains(&id) {
            return match value {
                Value::List(_) => write!(f, "[...]"),
                _ => write!(f, "{{...}}"),
            };
        }
        open.push(id);
    }

    let result = match value {
        Value::Int(x) => write!(f, "{x}"),
        Value::Float(x) => write!(f, "{x:?}"),
        Value::Str(x) => write!(f, "{x:?}"),
        Value::Char(x) => write!(f, "c{x:?}"),
        Value::Bytes(bytes) => {
            write!(f, "b\"")?;
            for byte in bytes {
                write!(f, "{}", std::ascii::escape_default(*byte))?;
            }
            write!(f, "\"")
        },
        Value::Bool(x) => write!(f, "{x}"),
        Value::Nil => write!(f, "nil"),
        Value::List(items) => {
            write!(f, "[")?;
            write_items(items.borrow().iter(), f, open)?;
            write!(f, "]")
        },
        Value::Set(items) => {
            let items = items.borrow();
            if items.is_empty() {
                write!(f, "set()")
            } else {
                write!(f, "{{")?;
                write_items(items.iter(), f, open)?;
                write!(f, "}}")
            }
        },
        Value::Tuple(items) => {
            write!(f, "(")?;
            write_items(items.iter(), f, open)?;
            if items.len() == 1 {
                write!(f, ",")?;
            }
            write!(f, ")")
        },
        Value::Map(mapping) => {
            write!(f, "{{")?;
            for (i, (key, val)) in mapping.borrow().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_value(key, f, open)?;
                write!(f, ": ")?;
                write_value(val, f, open)?;
            }
            write!(f, "}}")
        },
    };

    if id.is_some() {
        open.pop();
    }
    result
}

fn write_items<'a>(
    items: impl Iterator<Item = &'a Value>,
    f: &mut Formatter<'_>,
    open: &mut Vec<*const ()>,
) -> std::fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_value(item, f, open)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(Value::Int(1).category(), "Integer");
        assert_eq!(Value::Str("x".to_string()).category(), "Text");
        assert_eq!(Value::Nil.category(), "None");
        assert_eq!(Value::list(vec![]).category(), "Sequence");
        assert_eq!(Value::tuple(vec![]).category(), "Tuple");
        assert_eq!(Value::map(Mapping::new()).category(), "Mapping");
    }

    #[test]
    fn test_immutability() {
        assert!(Value::Float(1.5).is_immutable());
        assert!(Value::tuple(vec![Value::Int(1), Value::Nil]).is_immutable());
        assert!(!Value::list(vec![]).is_immutable());
        assert!(
            !Value::tuple(vec![Value::Int(1), Value::list(vec![])])
                .is_immutable()
        );
    }

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Str("hi \"you\"".to_string()).to_string(), r#""hi \"you\"""#);
        assert_eq!(Value::Char('x').to_string(), "c'x'");
        assert_eq!(Value::Bytes(vec![b'a', 0xff]).to_string(), r#"b"a\xff""#);
        assert_eq!(Value::Nil.to_string(), "nil");
    }

    #[test]
    fn test_display_containers() {
        let single = Value::tuple(vec![Value::Int(1)]);
        assert_eq!(single.to_string(), "(1,)");
        assert_eq!(Value::tuple(vec![]).to_string(), "()");
        assert_eq!(Value::set(ValueSet::new()).to_string(), "set()");

        let list = Value::list(vec![Value::Bool(true), single]);
        assert_eq!(list.to_string(), "[true, (1,)]");
    }

    #[test]
    fn test_display_self_reference() {
        let storage = Rc::new(RefCell::new(vec![Value::Int(1)]));
        let list = Value::List(storage.clone());
        storage.borrow_mut().push(list.clone());

        assert_eq!(list.to_string(), "[1, [...]]");
    }
}
