// Handlers for `GET /users` and `GET /users?key=value` (and their HEAD twins).

use crate::scan::{matches_query, parse_query};
use crate::server::Response;
use crate::store::RecordStore;
use tracing::debug;

/// Return the whole store file.
pub fn handle_all(store: &RecordStore) -> Response {
    match store.read_raw() {
        Ok(content) => Response::ok(content),
        Err(e) => super::read_fault(&e),
    }
}

/// Return every stored line containing both `"key":` and `"value"`.
pub fn handle_query(store: &RecordStore, raw_query: &str) -> Response {
    let (key, value) = match parse_query(raw_query) {
        Ok(pair) => pair,
        Err(e) => return Response::bad_request(e.to_string()),
    };

    let lines = match store.read_all() {
        Ok(lines) => lines,
        Err(e) => return super::read_fault(&e),
    };

    let mut body = String::new();
    let mut matched = 0usize;
    for line in lines.iter().filter(|l| matches_query(l, key, value)) {
        body.push_str(line);
        body.push('\n');
        matched += 1;
    }
    debug!(key, value, matched, scanned = lines.len(), "query scan finished");

    if matched == 0 {
        Response::not_found("no matching users")
    } else {
        Response::ok(body)
    }
}
