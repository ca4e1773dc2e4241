//! # docs-query
//!
//! Composes request URIs for document-storage feed APIs from semantic
//! filters: folder scope, title match, sharing principals and visibility
//! flags.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`query`]: URI composition (generic base query, documents query, the
//!   shared [`query::QueryUri`] context)
//! - [`models`]: Value types used as filters ([`EmailPrincipal`])
//! - [`utils`]: Percent-escaping and input validation
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod query;
pub mod utils;

// Re-export commonly used types
pub use models::EmailPrincipal;
pub use query::{DocumentsQuery, Query, QueryError, QueryParameters};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
