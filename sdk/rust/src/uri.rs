//! Request URI assembly for the resource clients.
//!
//! Path segments and query values are percent-encoded before the URI is
//! signed, so the signed URI is the URI sent on the wire.

use crate::error::Error;

/// Percent-encode a query value.
pub(crate) fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Percent-encode `value` as a single path segment.
///
/// Empty values and the dot segments `.` and `..` are rejected: URL
/// normalization removes dot segments after the request has been signed.
///
/// # Errors
///
/// Returns a validation error naming `name` when the value is rejected.
pub(crate) fn segment(value: &str, name: &str) -> Result<String, Error> {
    match value {
        "" => Err(Error::validation(format!("missing {name}"))),
        "." | ".." => Err(Error::validation(format!("invalid {name}: {value:?}"))),
        _ => Ok(encode(value)),
    }
}

/// Append `query` to `path`, percent-encoding the values.
pub(crate) fn with_query(path: &str, query: &[(&str, String)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let query = query
        .iter()
        .map(|(name, value)| format!("{name}={}", encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}
