use super::{SResult, SummaryError, Value};

/// Rejects anything that could change out from under a key or element
fn check_immutable(value: &Value) -> SResult<()> {
    if value.is_immutable() {
        Ok(())
    } else {
        Err(SummaryError::MutableKey {
            category: value.category().to_string(),
        })
    }
}

/***********\
|* Mapping *|
\***********/

/// Association of immutable keys to values, kept in insertion order.
///
/// Lookups are linear: keys are compared with `==`, since values such as
/// floats have no total order or hash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(Value, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    /// Returns the previous value, if there was one.
    pub fn insert(&mut self, key: Value, value: Value) -> SResult<Option<Value>> {
        check_immutable(&key)?;
        match self.position(&key) {
            Some(i) => Ok(Some(std::mem::replace(&mut self.entries[i].1, value))),
            None => {
                self.entries.push((key, value));
                Ok(None)
            },
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.position(key)
            .map(|i| &self.entries[i].1)
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.position(key)
            .map(|i| self.entries.remove(i).1)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Number of entry slots allocated
    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k == key)
    }
}

impl TryFrom<Vec<(Value, Value)>> for Mapping {
    type Error = SummaryError;

    fn try_from(entries: Vec<(Value, Value)>) -> SResult<Self> {
        let mut mapping = Mapping::new();
        for (key, value) in entries {
            mapping.insert(key, value)?;
        }
        Ok(mapping)
    }
}

/************\
|* ValueSet *|
\************/

/// Set of immutable values. Insertion order is kept but carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueSet {
    items: Vec<Value>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the value was newly added
    pub fn insert(&mut self, value: Value) -> SResult<bool> {
        check_immutable(&value)?;
        if self.contains(&value) {
            Ok(false)
        } else {
            self.items.push(value);
            Ok(true)
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.items.iter()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.items.capacity()
    }
}

impl TryFrom<Vec<Value>> for ValueSet {
    type Error = SummaryError;

    fn try_from(items: Vec<Value>) -> SResult<Self> {
        let mut set = ValueSet::new();
        for item in items {
            set.insert(item)?;
        }
        Ok(set)
    }
}
