use http::Method;

/// Collection path for user records.
pub const USERS_PATH: &str = "/users";
const USERS_QUERY_PREFIX: &str = "/users?";
const USERS_ITEM_PREFIX: &str = "/users/";

/// Outcome of matching a request against the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `GET /users?<query>`
    ListByQuery { query: &'a str },
    /// `GET /users`
    ListAll,
    /// `HEAD /users?<query>`
    HeadByQuery { query: &'a str },
    /// `HEAD /users`
    HeadAll,
    /// `POST /users`
    Create,
    /// `PUT /users`
    Update,
    /// `DELETE /users/<id>`
    Delete { id: &'a str },
    /// Any other GET target (400)
    UnsupportedGet,
    /// POST to anything but `/users` (400)
    UnsupportedPost,
    /// Everything else (405)
    MethodNotAllowed,
}

impl Route<'_> {
    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Route::ListByQuery { .. } => "list_by_query",
            Route::ListAll => "list_all",
            Route::HeadByQuery { .. } => "head_by_query",
            Route::HeadAll => "head_all",
            Route::Create => "create",
            Route::Update => "update",
            Route::Delete { .. } => "delete",
            Route::UnsupportedGet => "unsupported_get",
            Route::UnsupportedPost => "unsupported_post",
            Route::MethodNotAllowed => "method_not_allowed",
        }
    }
}

/// Resolve `(method, target)` to a route. First match wins, in this order:
///
/// | Method | Target                  | Route            |
/// |--------|-------------------------|------------------|
/// | GET    | starts with `/users?`   | list by query    |
/// | GET    | `/users`                | list all         |
/// | GET    | anything else           | 400              |
/// | HEAD   | starts with `/users?`   | head by query    |
/// | HEAD   | `/users`                | head all         |
/// | POST   | not `/users`            | 400              |
/// | POST   | `/users`                | create           |
/// | PUT    | `/users`                | update           |
/// | DELETE | starts with `/users/`   | delete           |
/// | *      | anything else           | 405              |
///
/// `target` is the raw request target, query included.
pub fn resolve<'a>(method: &Method, target: &'a str) -> Route<'a> {
    let query = target.strip_prefix(USERS_QUERY_PREFIX);
    let is_collection = target == USERS_PATH;

    match *method {
        Method::GET => match query {
            Some(query) => Route::ListByQuery { query },
            None if is_collection => Route::ListAll,
            None => Route::UnsupportedGet,
        },
        Method::HEAD => match query {
            Some(query) => Route::HeadByQuery { query },
            None if is_collection => Route::HeadAll,
            None => Route::MethodNotAllowed,
        },
        Method::POST if !is_collection => Route::UnsupportedPost,
        Method::POST => Route::Create,
        Method::PUT if is_collection => Route::Update,
        Method::DELETE => match target.strip_prefix(USERS_ITEM_PREFIX) {
            Some(id) => Route::Delete { id },
            None => Route::MethodNotAllowed,
        },
        _ => Route::MethodNotAllowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_routes() {
        assert_eq!(
            resolve(&Method::GET, "/users?name=kim"),
            Route::ListByQuery { query: "name=kim" }
        );
        assert_eq!(resolve(&Method::GET, "/users?"), Route::ListByQuery { query: "" });
        assert_eq!(resolve(&Method::GET, "/users"), Route::ListAll);
        assert_eq!(resolve(&Method::GET, "/users/1"), Route::UnsupportedGet);
        assert_eq!(resolve(&Method::GET, "/"), Route::UnsupportedGet);
    }

    #[test]
    fn test_head_routes() {
        assert_eq!(
            resolve(&Method::HEAD, "/users?age=22"),
            Route::HeadByQuery { query: "age=22" }
        );
        assert_eq!(resolve(&Method::HEAD, "/users"), Route::HeadAll);
        assert_eq!(resolve(&Method::HEAD, "/other"), Route::MethodNotAllowed);
    }

    #[test]
    fn test_post_routes() {
        assert_eq!(resolve(&Method::POST, "/users"), Route::Create);
        assert_eq!(resolve(&Method::POST, "/invalid"), Route::UnsupportedPost);
        assert_eq!(resolve(&Method::POST, "/users?x=1"), Route::UnsupportedPost);
    }

    #[test]
    fn test_put_and_delete_routes() {
        assert_eq!(resolve(&Method::PUT, "/users"), Route::Update);
        assert_eq!(resolve(&Method::PUT, "/users/1"), Route::MethodNotAllowed);
        assert_eq!(
            resolve(&Method::DELETE, "/users/abc-123"),
            Route::Delete { id: "abc-123" }
        );
        assert_eq!(resolve(&Method::DELETE, "/users/"), Route::Delete { id: "" });
        assert_eq!(resolve(&Method::DELETE, "/users"), Route::MethodNotAllowed);
    }

    #[test]
    fn test_other_methods_not_allowed() {
        assert_eq!(resolve(&Method::PATCH, "/users"), Route::MethodNotAllowed);
        assert_eq!(resolve(&Method::OPTIONS, "/users"), Route::MethodNotAllowed);
        let brew = Method::from_bytes(b"BREW").unwrap();
        assert_eq!(resolve(&brew, "/users"), Route::MethodNotAllowed);
    }
}
