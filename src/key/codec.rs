//! Key codec
//!
//! Pure string transforms plus validation. A normalized key is always a
//! single filename component.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{FlatError, Result};

/// Characters left unescaped by `encode`: the unreserved set of a URI
/// component (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Validate a key for use as a filename directly under the store root.
///
/// Rejects empty keys, `.` and `..`, and anything containing a path
/// separator or a NUL byte. Dot-prefixed keys are accepted.
pub fn normalize(raw: &str) -> Result<String> {
    let reason = if raw.is_empty() {
        Some("key is empty")
    } else if raw == "." || raw == ".." {
        Some("key is a path traversal segment")
    } else if raw.contains('/') || raw.contains('\\') {
        Some("key contains a path separator")
    } else if raw.contains('\0') {
        Some("key contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(FlatError::InvalidKey {
            key: raw.to_string(),
            reason,
        }),
        None => Ok(raw.to_string()),
    }
}

/// Percent-decode a key that arrived encoded. Invalid UTF-8 sequences are
/// replaced with U+FFFD.
pub fn decode(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

/// Percent-encode a key for a listing body
pub fn encode(key: &str) -> String {
    utf8_percent_encode(key, COMPONENT).to_string()
}
