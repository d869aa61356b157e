mod render;

pub use render::render;

use crate::model::{Mapping, SResult, SummaryError, Value};
use crate::shape::{describe_shape, DEFAULT_MAX_DEPTH};
use crate::size::shallow_size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Container levels each shape descends into
    pub max_depth: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        SummaryOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Immutable summary of a mapping at the moment it was taken.
///
/// Every entry carries its key, shape and shallow size together, so the
/// shape and size views always cover the same keys. Keys are immutable
/// values and everything else is owned, so later changes to the source
/// mapping never show up here.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    key: Value,
    shape: String,
    size: usize,
}

impl Snapshot {
    fn of(mapping: &Mapping, options: &SummaryOptions) -> Self {
        tracing::debug!(
            entries = mapping.len(),
            max_depth = options.max_depth,
            "summarizing mapping"
        );
        let entries = mapping
            .iter()
            .map(|(key, value)| {
                Entry {
                    key: key.clone(),
                    shape: describe_shape(value, options.max_depth),
                    size: shallow_size(value),
                }
            })
            .collect();

        Snapshot { entries }
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    pub fn shape_of(&self, key: &Value) -> Option<&str> {
        self.entry(key)
            .map(|e| e.shape.as_str())
    }

    /// Shallow size in bytes, see [`shallow_size`]
    pub fn size_of(&self, key: &Value) -> Option<usize> {
        self.entry(key).map(|e| e.size)
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn shapes(&self) -> impl ExactSizeIterator<Item = (&Value, &str)> {
        self.entries
            .iter()
            .map(|e| (&e.key, e.shape.as_str()))
    }

    pub fn sizes(&self) -> impl ExactSizeIterator<Item = (&Value, usize)> {
        self.entries
            .iter()
            .map(|e| (&e.key, e.size))
    }

    pub fn render(&self) -> String {
        render(self)
    }

    fn entry(&self, key: &Value) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| &e.key == key)
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render(self))
    }
}

impl Mapping {
    pub fn summary(&self) -> Snapshot {
        Snapshot::of(self, &SummaryOptions::default())
    }

    pub fn summary_with(&self, options: &SummaryOptions) -> Snapshot {
        Snapshot::of(self, options)
    }
}

/// Summarize a mapping value using the default depth
pub fn summarize(container: &Value) -> SResult<Snapshot> {
    summarize_with(container, &SummaryOptions::default())
}

/// Summarize a mapping value.
///
/// Fails with [`SummaryError::InvalidInput`] for anything but a mapping.
/// The mapping is only borrowed immutably for the duration of the call,
/// so this panics if the caller holds a mutable borrow of it.
#[tracing::instrument(level = "debug", skip_all, fields(category = container.category()))]
pub fn summarize_with(
    container: &Value,
    options: &SummaryOptions,
) -> SResult<Snapshot> {
    let Value::Map(mapping) = container else {
        return Err(SummaryError::InvalidInput {
            actual: container.category().to_string(),
        });
    };

    Ok(Snapshot::of(&mapping.borrow(), options))
}
