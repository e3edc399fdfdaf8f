// Handler for `DELETE /users/{id}`.

use crate::scan::contains_id;
use crate::server::Response;
use crate::store::{LineEdit, RecordStore, StoreError};
use tracing::info;

/// Drop every stored line carrying `id`.
pub fn handle(store: &RecordStore, id: &str) -> Response {
    let result = store.modify(|line| {
        if contains_id(line, id) {
            LineEdit::Drop
        } else {
            LineEdit::Keep
        }
    });

    match result {
        Ok(0) => Response::not_found("no user with that id"),
        Ok(removed) => {
            info!(id, removed, "user deleted");
            Response::ok("user deleted")
        }
        Err(e @ StoreError::Io { .. }) => super::write_fault(&e),
        Err(e) => super::read_fault(&e),
    }
}
