//! Utility modules supporting query composition.
//!
//! - [`append_uri_escaped`]: Percent-escape a value into a URI buffer
//! - [`escape_component`]: Escape a single query component value
//! - [`require_non_empty`]: Reject empty required arguments
//! - [`validate_feed_uri`]: Check a feed base URI before composing against it
//!
//! # Escaping
//!
//! ```rust
//! use docs_query::utils::escape_component;
//!
//! assert_eq!(escape_component("Annual Report"), "Annual%20Report");
//! assert_eq!(escape_component("a@x.com"), "a%40x.com");
//! ```

mod escape;
mod validate;

pub use escape::{append_uri_escaped, escape_component};
pub use validate::{require_non_empty, validate_feed_uri, ValidationError};
