// Handler for `POST /users`.

use crate::server::request::Request;
use crate::server::Response;
use crate::store::RecordStore;
use http::StatusCode;
use tracing::info;

/// Append the raw body as a new record line.
///
/// The body is stored verbatim: no JSON validation and no id uniqueness
/// check. The client is responsible for the id.
pub fn handle(store: &RecordStore, req: &Request) -> Response {
    let body = match super::require_body(req) {
        Ok(body) => body,
        Err(resp) => return resp,
    };
    match store.append(&body) {
        Ok(()) => {
            info!(bytes = body.len(), "user created");
            Response::text(StatusCode::CREATED, "user created")
        }
        Err(e) => super::write_fault(&e),
    }
}
