//! Fixed-marker text scanning over serialized record lines.
//!
//! Records are never parsed as JSON. A field value is located by searching
//! for the literal `"key":"` and reading up to the next `"`, and query
//! matching is plain substring containment: a line matches `key=value` when
//! it contains `"key":` and `"value"` anywhere, not necessarily as a pair.
//! So `age=22` also matches a record whose `tel` happens to be `"22"`.

use std::fmt;

/// Extract the value of `key` from a JSON-shaped text line.
///
/// Returns `None` when the marker `"key":"` is absent or the value is not
/// terminated by a closing quote.
pub fn extract_field<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let marker = format!("\"{key}\":\"");
    let start = text.find(&marker)? + marker.len();
    let len = text[start..].find('"')?;
    Some(&text[start..start + len])
}

/// The literal marker identifying a record with the given id.
pub fn id_marker(id: &str) -> String {
    format!("\"id\":\"{id}\"")
}

/// Whether `line` contains the id marker for `id`.
pub fn contains_id(line: &str, id: &str) -> bool {
    line.contains(&id_marker(id))
}

/// Whether `line` contains both `"key":` and `"value"` anywhere.
pub fn matches_query(line: &str, key: &str, value: &str) -> bool {
    line.contains(&format!("\"{key}\":")) && line.contains(&format!("\"{value}\""))
}

/// Reason a `key=value` query string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// Nothing after the `?`
    Empty,
    /// No `=`, or an empty key or value
    Malformed,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Empty => write!(f, "query parameter missing"),
            QueryError::Malformed => write!(f, "malformed query parameter, expected key=value"),
        }
    }
}

impl std::error::Error for QueryError {}

/// Split a raw query string into a trimmed `(key, value)` pair.
///
/// Only the first `=` separates; the value may itself contain `=`.
pub fn parse_query(query: &str) -> Result<(&str, &str), QueryError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(QueryError::Empty);
    }
    let (key, value) = query.split_once('=').ok_or(QueryError::Malformed)?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(QueryError::Malformed);
    }
    Ok((key, value))
}
