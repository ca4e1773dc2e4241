//! Input validation for query arguments and feed URIs.

use thiserror::Error;

/// Validation error types
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyValue(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Reject empty strings for required arguments.
///
/// `what` names the argument in the resulting error message. No trimming or
/// normalization is applied; `" "` is accepted as-is.
pub fn require_non_empty<'a>(value: &'a str, what: &'static str) -> Result<&'a str, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyValue(what));
    }
    Ok(value)
}

/// Validate a feed base URI.
///
/// Returns `Ok(String)` if valid, or `Err(ValidationError)` if invalid.
pub fn validate_feed_uri(uri: &str) -> Result<String, ValidationError> {
    let uri = uri.trim();

    if uri.is_empty() {
        return Err(ValidationError::InvalidUrl("empty URL".to_string()));
    }

    // Check for null bytes
    if uri.contains('\0') {
        return Err(ValidationError::InvalidUrl(
            "contains null byte".to_string(),
        ));
    }

    // Parse URL to validate structure
    let parsed = url::Url::parse(uri).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    // Only allow HTTP and HTTPS schemes
    match parsed.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(ValidationError::InvalidUrl(format!(
                "invalid scheme: {}",
                parsed.scheme()
            )))
        }
    }

    if parsed.fragment().is_some() {
        return Err(ValidationError::InvalidUrl(
            "feed URI must not carry a fragment".to_string(),
        ));
    }

    // Keep the caller's spelling; the parsed form may add a trailing slash.
    Ok(uri.to_string())
}
