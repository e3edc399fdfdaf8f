//! # Handlers
//!
//! One module per user operation. Every handler takes the shared
//! [`RecordStore`](crate::store::RecordStore) and returns a finished
//! [`Response`](crate::server::Response); no fault escapes as an error.
//! HEAD variants reuse the GET handlers and are marked body-less by the
//! service.

pub mod create_user;
pub mod delete_user;
pub mod list_users;
pub mod update_user;

use crate::server::request::{BodyState, Request};
use crate::server::Response;
use crate::store::StoreError;
use tracing::warn;

/// Reject requests whose declared body is empty, truncated or unreadable.
///
/// Returns the body text when it arrived in full.
pub(crate) fn require_body(req: &Request) -> Result<String, Response> {
    if req.content_length <= 0 {
        return Err(Response::bad_request("request body is empty"));
    }
    match req.body_state {
        BodyState::Complete => Ok(req.body_text()),
        BodyState::Short => {
            warn!(
                declared = req.content_length,
                received = req.body.len(),
                "request body incomplete"
            );
            Err(Response::bad_request("request body could not be read completely"))
        }
        BodyState::Failed => Err(Response::internal_error("error while reading request body")),
    }
}

/// Response for a fault raised while reading the store.
pub(crate) fn read_fault(err: &StoreError) -> Response {
    let status = err.status();
    let body = match err {
        StoreError::NotFound { .. } => "users file not found",
        StoreError::PermissionDenied { .. } => "no permission to access users file",
        StoreError::Io { .. } => "error while reading users file",
    };
    if status.is_server_error() {
        warn!(error = %err, "store read fault");
    }
    Response::text(status, body)
}

/// Response for a fault raised while writing the store.
pub(crate) fn write_fault(err: &StoreError) -> Response {
    warn!(error = %err, "store write fault");
    Response::internal_error("error while saving users file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;
    use http::{Method, StatusCode};
    use std::io;
    use std::path::Path;

    fn post(content_length: i64, body: &str, body_state: BodyState) -> Request {
        Request {
            method: Method::POST,
            target: "/users".to_string(),
            path: "/users".to_string(),
            query: None,
            version: "HTTP/1.1".to_string(),
            content_length,
            body: body.as_bytes().to_vec(),
            body_state,
        }
    }

    #[test]
    fn test_require_body_states() {
        let ok = post(2, "{}", BodyState::Complete);
        assert_eq!(require_body(&ok).unwrap(), "{}");

        let empty = require_body(&post(0, "", BodyState::Complete)).unwrap_err();
        assert_eq!(empty.status, StatusCode::BAD_REQUEST);

        let negative = require_body(&post(-1, "", BodyState::Complete)).unwrap_err();
        assert_eq!(negative.status, StatusCode::BAD_REQUEST);

        let short = require_body(&post(10, "{}", BodyState::Short)).unwrap_err();
        assert_eq!(short.status, StatusCode::BAD_REQUEST);

        let failed = require_body(&post(10, "{", BodyState::Failed)).unwrap_err();
        assert_eq!(failed.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_failed_body_read_is_500_for_create_and_update() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("users.txt"));
        let req = post(10, r#"{"id":"#, BodyState::Failed);

        assert_eq!(
            create_user::handle(&store, &req).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            update_user::handle(&store, &req).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(!store.path().exists());
    }

    #[test]
    fn test_fault_responses() {
        let p = Path::new("users.txt");
        let denied = StoreError::read(p, io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(read_fault(&denied).status, StatusCode::FORBIDDEN);

        let missing = StoreError::read(p, io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(read_fault(&missing).status, StatusCode::NOT_FOUND);

        let broken = StoreError::write(p, io::Error::other("disk full"));
        assert_eq!(write_fault(&broken).status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
