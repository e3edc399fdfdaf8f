use super::request::Request;
use super::response::Response;
use crate::handlers::{create_user, delete_user, list_users, update_user};
use crate::router::{resolve, Route};
use crate::store::RecordStore;
use http::StatusCode;
use std::sync::Arc;
use tracing::debug;

/// The user-record service: route a parsed request and run its handler.
///
/// Cheap to clone; every clone shares the same [`RecordStore`], which is the
/// only state shared between connections.
#[derive(Clone)]
pub struct UserService {
    store: Arc<RecordStore>,
}

impl UserService {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Produce the response for one request.
    pub fn call(&self, req: &Request) -> Response {
        let route = resolve(&req.method, &req.target);
        let store = self.store.as_ref();

        let response = match route {
            Route::ListByQuery { query } => list_users::handle_query(store, query),
            Route::ListAll => list_users::handle_all(store),
            Route::HeadByQuery { query } => list_users::handle_query(store, query).into_head(),
            Route::HeadAll => list_users::handle_all(store).into_head(),
            Route::Create => create_user::handle(store, req),
            Route::Update => update_user::handle(store, req),
            Route::Delete { id } => delete_user::handle(store, id),
            Route::UnsupportedGet | Route::UnsupportedPost => {
                Response::bad_request("unsupported request")
            }
            Route::MethodNotAllowed => {
                Response::text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
            }
        };

        debug!(route = route.name(), status = response.status.as_u16(), "route resolved");
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::request::read_request;
    use std::io::Cursor;

    fn service() -> (tempfile::TempDir, UserService) {
        let dir = tempfile::tempdir().unwrap();
        let svc = UserService::new(RecordStore::new(dir.path().join("users.txt")));
        (dir, svc)
    }

    fn req(raw: &str) -> Request {
        read_request(&mut Cursor::new(raw.as_bytes().to_vec())).unwrap()
    }

    fn with_body(method: &str, target: &str, body: &str) -> Request {
        req(&format!(
            "{method} {target} HTTP/1.1\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ))
    }

    #[test]
    fn test_create_then_list() {
        let (_dir, svc) = service();
        let line = r#"{"id":"a1","name":"bae","address":"Seoul","tel":"1","age":"10"}"#;
        assert_eq!(svc.call(&with_body("POST", "/users", line)).status, StatusCode::CREATED);
        let all = svc.call(&req("GET /users HTTP/1.1\r\n\r\n"));
        assert_eq!(all.status, StatusCode::OK);
        assert!(all.body.lines().any(|l| l == line));
    }

    #[test]
    fn test_create_rejects_empty_and_short_bodies() {
        let (_dir, svc) = service();
        let empty = req("POST /users HTTP/1.1\r\nContent-Length: 0\r\n\r\n");
        assert_eq!(svc.call(&empty).status, StatusCode::BAD_REQUEST);
        let short = req("POST /users HTTP/1.1\r\nContent-Length: 50\r\n\r\n{\"id\":\"x\"}");
        assert_eq!(svc.call(&short).status, StatusCode::BAD_REQUEST);
        assert!(!svc.store().path().exists());
    }

    #[test]
    fn test_update_rules() {
        let (_dir, svc) = service();
        let put = |body: &str| svc.call(&with_body("PUT", "/users", body)).status;

        // no store yet
        assert_eq!(put(r#"{"id":"a","name":"n"}"#), StatusCode::NOT_FOUND);

        svc.store().append(r#"{"id":"a","name":"old"}"#).unwrap();
        svc.store().append(r#"{"id":"b","name":"keep"}"#).unwrap();
        svc.store().append(r#"{"id":"a","name":"dup"}"#).unwrap();

        assert_eq!(put(r#"{"name":"no id"}"#), StatusCode::BAD_REQUEST);
        assert_eq!(put(r#"{"id":"","name":"blank"}"#), StatusCode::BAD_REQUEST);
        assert_eq!(put(r#"{"id":"nonexistent-id","name":"x"}"#), StatusCode::NOT_FOUND);
        assert_eq!(put(r#"{"id":"a","name":"new"}"#), StatusCode::OK);
        assert_eq!(
            svc.store().read_all().unwrap(),
            vec![
                r#"{"id":"a","name":"new"}"#.to_string(),
                r#"{"id":"b","name":"keep"}"#.to_string(),
                r#"{"id":"a","name":"new"}"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_delete_rules() {
        let (_dir, svc) = service();
        let delete = |id: &str| {
            svc.call(&req(&format!("DELETE /users/{id} HTTP/1.1\r\n\r\n")))
                .status
        };
        assert_eq!(delete("a"), StatusCode::NOT_FOUND);
        svc.store().append(r#"{"id":"a"}"#).unwrap();
        svc.store().append(r#"{"id":"b"}"#).unwrap();
        assert_eq!(delete("zzz"), StatusCode::NOT_FOUND);
        assert_eq!(delete("zzz"), StatusCode::NOT_FOUND);
        assert_eq!(delete("a"), StatusCode::OK);
        assert_eq!(svc.store().read_raw().unwrap(), "{\"id\":\"b\"}\n");
    }

    #[test]
    fn test_head_mirrors_get() {
        let (_dir, svc) = service();
        svc.store().append(r#"{"id":"a","name":"kim"}"#).unwrap();
        for target in ["/users", "/users?name=kim", "/users?name=lee", "/users?"] {
            let get = svc.call(&req(&format!("GET {target} HTTP/1.1\r\n\r\n")));
            let head = svc.call(&req(&format!("HEAD {target} HTTP/1.1\r\n\r\n")));
            assert_eq!(get.status, head.status, "{target}");
            assert_eq!(get.content_length(), head.content_length(), "{target}");
            assert!(head.head_only);
        }
    }

    #[test]
    fn test_boundary_routes() {
        let (_dir, svc) = service();
        assert_eq!(
            svc.call(&req("GET /users? HTTP/1.1\r\n\r\n")).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            svc.call(&req("POST /invalid HTTP/1.1\r\n\r\n")).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            svc.call(&req("PATCH /users HTTP/1.1\r\n\r\n")).status,
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            svc.call(&req("GET /nope HTTP/1.1\r\n\r\n")).body,
            "unsupported request"
        );
    }
}
