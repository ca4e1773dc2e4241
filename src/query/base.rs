//! Generic feed query parameters shared by every service.

use serde::{Deserialize, Serialize};

use super::{QueryParameters, QueryUri};

/// Generic feed query: free-text search, categories, author and paging.
///
/// `start_index` is one-based; `0` for either limit means "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    q: Option<String>,
    categories: Option<String>,
    author: Option<String>,
    start_index: Option<u32>,
    max_results: Option<u32>,
    entry_id: Option<String>,
}

impl Query {
    /// Create a new query with its free-text search term set to `q`
    pub fn new(q: Option<&str>) -> Self {
        Self {
            q: q.map(str::to_string),
            ..Default::default()
        }
    }

    /// Create a new query with a search term and paging limits applied
    pub fn with_limits(q: Option<&str>, start_index: u32, max_results: u32) -> Self {
        let mut query = Self::new(q);
        query.set_start_index(start_index);
        query.set_max_results(max_results);
        query
    }

    pub fn q(&self) -> Option<&str> {
        self.q.as_deref()
    }

    /// Set the free-text search term, or `None` to unset it
    pub fn set_q(&mut self, q: Option<&str>) {
        self.q = q.map(str::to_string);
    }

    pub fn categories(&self) -> Option<&str> {
        self.categories.as_deref()
    }

    /// Set the category path (e.g. `document/starred`), or `None` to unset it
    pub fn set_categories(&mut self, categories: Option<&str>) {
        self.categories = categories.map(str::to_string);
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn set_author(&mut self, author: Option<&str>) {
        self.author = author.map(str::to_string);
    }

    pub fn start_index(&self) -> Option<u32> {
        self.start_index
    }

    /// Set the one-based index of the first result; `0` unsets it
    pub fn set_start_index(&mut self, start_index: u32) {
        self.start_index = (start_index > 0).then_some(start_index);
    }

    pub fn max_results(&self) -> Option<u32> {
        self.max_results
    }

    /// Set the maximum number of results; `0` unsets it
    pub fn set_max_results(&mut self, max_results: u32) {
        self.max_results = (max_results > 0).then_some(max_results);
    }

    /// Target a single entry, or `None` to query the whole collection
    pub fn set_entry_id(&mut self, entry_id: Option<&str>) {
        self.entry_id = entry_id.map(str::to_string);
    }
}

impl QueryParameters for Query {
    fn entry_id(&self) -> Option<&str> {
        self.entry_id.as_deref()
    }

    fn append_parameters(&self, uri: &mut QueryUri) {
        // A single entry is addressed by path alone
        if let Some(entry_id) = &self.entry_id {
            uri.push('/');
            uri.push_escaped_with(entry_id, "", false);
            return;
        }

        if let Some(categories) = &self.categories {
            uri.push_str("/-/");
            uri.push_escaped_with(categories, "/", false);
        }

        if let Some(q) = &self.q {
            uri.append_param("q", q);
        }

        if let Some(author) = &self.author {
            uri.append_param("author", author);
        }

        if let Some(start_index) = self.start_index {
            uri.append_param("start-index", &start_index.to_string());
        }

        if let Some(max_results) = self.max_results {
            uri.append_param("max-results", &max_results.to_string());
        }
    }
}
