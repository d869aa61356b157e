use super::{Mapping, Value, ValueSet};

/******************************\
|* Rust types <-> Value types *|
\******************************/
// Each of these rust types maps onto exactly one `Value` variant, so the
// conversion into a `Value` is infallible.
macro_rules! impl_value_from {
    ($($t:ty, $v:ident);* $(;)?) => {
        $(
            impl From<$t> for Value {
                fn from(val: $t) -> Self {
                    Value::$v(val)
                }
            }
        )*
    };
}

// The mappings.
// The first element is the rust type, the second is the Value variant.
impl_value_from! {
    String, Str;
    char, Char;
    f64, Float;
    Vec<u8>, Bytes;
    isize, Int;
    bool, Bool;
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<ValueSet> for Value {
    fn from(set: ValueSet) -> Self {
        Value::set(set)
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Value::map(mapping)
    }
}
