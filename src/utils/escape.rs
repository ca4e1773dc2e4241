//! Percent-escaping for query URI components.
//!
//! Values are escaped so that only the unreserved set (`A-Z a-z 0-9 - . _ ~`)
//! stays literal. Callers may additionally keep a small set of reserved
//! characters literal (for example `/` in category paths) and may let
//! non-ASCII text through untouched, which is what the documents feed
//! expects for titles and addresses.

/// Append `value` to `buf`, percent-escaping everything outside the unreserved set.
///
/// Characters in `reserved_allowed` are appended as-is. When `allow_utf8` is
/// true, non-ASCII characters are copied verbatim instead of being encoded
/// byte-by-byte.
pub fn append_uri_escaped(buf: &mut String, value: &str, reserved_allowed: &str, allow_utf8: bool) {
    let mut run_start = 0;

    for (idx, ch) in value.char_indices() {
        let literal = reserved_allowed.contains(ch) || (allow_utf8 && !ch.is_ascii());
        if literal {
            buf.push_str(&urlencoding::encode(&value[run_start..idx]));
            buf.push(ch);
            run_start = idx + ch.len_utf8();
        }
    }

    buf.push_str(&urlencoding::encode(&value[run_start..]));
}

/// Escape a single query component value with UTF-8 passthrough.
pub fn escape_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    append_uri_escaped(&mut out, value, "", true);
    out
}
