// Handler for `PUT /users`.

use crate::scan::{contains_id, extract_field};
use crate::server::request::Request;
use crate::server::Response;
use crate::store::{LineEdit, RecordStore, StoreError};
use tracing::info;

/// Replace every stored line carrying the body's id with the body.
///
/// Duplicate ids are all replaced. When nothing matches the store is left
/// untouched and the answer is 404.
pub fn handle(store: &RecordStore, req: &Request) -> Response {
    let body = match super::require_body(req) {
        Ok(body) => body,
        Err(resp) => return resp,
    };
    let id = match extract_field(&body, "id") {
        Some(id) if !id.is_empty() => id,
        _ => return Response::bad_request("request body has no id"),
    };

    let result = store.modify(|line| {
        if contains_id(line, id) {
            LineEdit::Replace(body.clone())
        } else {
            LineEdit::Keep
        }
    });

    match result {
        Ok(0) => Response::not_found("no user with that id"),
        Ok(replaced) => {
            info!(id, replaced, "user updated");
            Response::ok("user updated")
        }
        Err(e @ StoreError::Io { .. }) => super::write_fault(&e),
        Err(e) => super::read_fault(&e),
    }
}
