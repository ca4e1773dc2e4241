//! Mock base query for testing purposes.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{QueryParameters, QueryUri};

/// A base query that contributes a fixed answer.
///
/// Either addresses a fixed entry, or appends a fixed list of parameters.
/// Counts how often it was asked to contribute.
#[derive(Debug, Default)]
pub struct MockQuery {
    entry_id: Option<String>,
    params: Vec<(String, String)>,
    calls: AtomicUsize,
}

impl MockQuery {
    /// Create a new mock that contributes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Address a single entry instead of the collection.
    pub fn with_entry_id(mut self, entry_id: impl Into<String>) -> Self {
        self.entry_id = Some(entry_id.into());
        self
    }

    /// Contribute `name=value` (value escaped) on every composition.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Number of times `append_parameters` has run.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl QueryParameters for MockQuery {
    fn entry_id(&self) -> Option<&str> {
        self.entry_id.as_deref()
    }

    fn append_parameters(&self, uri: &mut QueryUri) {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if let Some(entry_id) = &self.entry_id {
            uri.push('/');
            uri.push_escaped_with(entry_id, "", false);
            return;
        }

        for (name, value) in &self.params {
            uri.append_param(name, value);
        }
    }
}
