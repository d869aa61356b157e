use std::cell::RefCell;
use std::mem::size_of;

use crate::model::{Mapping, Value, ValueSet};

/// Strong and weak counts in front of every `Rc` allocation
const RC_HEADER: usize = 2 * size_of::<usize>();

/// Approximate bytes owned directly by `value`, *excluding* anything it
/// references.
///
/// Counts the value's own slot, the buffer of text and bytes, and for
/// containers their allocation header plus the allocated element slots.
/// The elements' own heap data is not counted, nor is allocator overhead.
pub fn shallow_size(value: &Value) -> usize {
    let slot = size_of::<Value>();
    let owned = match value {
        Value::Str(s) => s.capacity(),
        Value::Bytes(bytes) => bytes.capacity(),
        Value::List(items) => {
            shared_header::<Vec<Value>>() + items.borrow().capacity() * slot
        },
        Value::Set(items) => {
            shared_header::<ValueSet>() + items.borrow().capacity() * slot
        },
        Value::Map(mapping) => {
            shared_header::<Mapping>()
                + mapping.borrow().capacity() * size_of::<(Value, Value)>()
        },
        Value::Tuple(items) => RC_HEADER + items.len() * slot,
        Value::Int(_)
        | Value::Float(_)
        | Value::Char(_)
        | Value::Bool(_)
        | Value::Nil => 0,
    };
    slot + owned
}

fn shared_header<T>() -> usize {
    RC_HEADER + size_of::<RefCell<T>>()
}
