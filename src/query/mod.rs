//! Query URI composition.
//!
//! A query URI is built by threading one [`QueryUri`] context through an
//! ordered chain of parameter contributors. The generic contributor
//! ([`Query`]) always runs first; specialized queries such as
//! [`DocumentsQuery`] wrap a generic one, add their own path segment before
//! it runs and their own parameters after it.
//!
//! # Example
//!
//! ```rust
//! use docs_query::query::{DocumentsQuery, QueryParameters};
//!
//! let mut query = DocumentsQuery::new(None);
//! query.set_title(Some("Annual Report"), true);
//! query.add_reader("a@x.com").unwrap();
//!
//! let uri = query.compose_uri("https://docs.example.com/feeds/documents");
//! assert_eq!(
//!     uri,
//!     "https://docs.example.com/feeds/documents?reader=a%40x.com\
//!      &title=Annual%20Report&title-exact=true&showdeleted=false&showfolders=false"
//! );
//! ```
//!
//! # Implementing a New Base Query
//!
//! Any type implementing [`QueryParameters`] can sit underneath a
//! [`DocumentsQuery`] via [`DocumentsQuery::with_base`]. It must:
//!
//! 1. Report the single-entry id (if any) from `entry_id`
//! 2. Append its own path/parameters in `append_parameters`, using
//!    [`QueryUri::append_separator`] before every parameter
//! 3. Leave the URI complete when `entry_id` is set

mod base;
mod documents;
pub mod mock;

pub use base::Query;
pub use documents::DocumentsQuery;
pub use mock::MockQuery;

use crate::utils::{append_uri_escaped, ValidationError};

/// In-progress query URI plus the params-started flag.
///
/// The flag decides whether the next parameter is introduced with `?` or `&`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryUri {
    uri: String,
    params_started: bool,
}

impl QueryUri {
    /// Start from a feed URI. A feed URI that already carries a query string
    /// continues with `&`.
    pub fn new(feed_uri: &str) -> Self {
        Self {
            uri: feed_uri.to_string(),
            params_started: feed_uri.contains('?'),
        }
    }

    /// Whether any parameter has been written yet
    pub fn params_started(&self) -> bool {
        self.params_started
    }

    /// Append `?` or `&` and mark parameters as started.
    pub fn append_separator(&mut self) {
        self.uri.push(if self.params_started { '&' } else { '?' });
        self.params_started = true;
    }

    /// Append literal, already-encoded text.
    pub fn push_str(&mut self, s: &str) {
        self.uri.push_str(s);
    }

    pub fn push(&mut self, ch: char) {
        self.uri.push(ch);
    }

    /// Append a query component value, escaped with UTF-8 passthrough.
    pub fn push_escaped(&mut self, value: &str) {
        append_uri_escaped(&mut self.uri, value, "", true);
    }

    /// Append a value with explicit escaping rules.
    pub fn push_escaped_with(&mut self, value: &str, reserved_allowed: &str, allow_utf8: bool) {
        append_uri_escaped(&mut self.uri, value, reserved_allowed, allow_utf8);
    }

    /// Append a separator followed by `name=<escaped value>`.
    pub fn append_param(&mut self, name: &str, value: &str) {
        tracing::trace!(param = name, "appending query parameter");
        self.append_separator();
        self.uri.push_str(name);
        self.uri.push('=');
        self.push_escaped(value);
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    pub fn into_string(self) -> String {
        self.uri
    }
}

/// A contributor of query URI path segments and parameters.
///
/// This is the seam between the generic query and the specialized ones: the
/// specialized query asks its base for the entry id and calls the base's
/// `append_parameters` at the point where the generic parameters belong.
pub trait QueryParameters {
    /// Identifier of a single entry to fetch, if the query targets one.
    ///
    /// When set, collection filters must not be appended.
    fn entry_id(&self) -> Option<&str>;

    /// Append this query's path segments and parameters to `uri`.
    fn append_parameters(&self, uri: &mut QueryUri);

    /// Compose the full request URI for `feed_uri`.
    ///
    /// Pure function of the current field values; composing twice from an
    /// unchanged query yields identical strings.
    fn compose_uri(&self, feed_uri: &str) -> String {
        let mut uri = QueryUri::new(feed_uri);
        self.append_parameters(&mut uri);
        tracing::debug!(
            uri = uri.as_str(),
            entry = self.entry_id().is_some(),
            "composed query URI"
        );
        uri.into_string()
    }
}

/// Errors raised while configuring a query
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A required argument was empty or otherwise unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<ValidationError> for QueryError {
    fn from(err: ValidationError) -> Self {
        QueryError::InvalidArgument(err.to_string())
    }
}
