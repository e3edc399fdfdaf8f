//! # Server
//!
//! Hand-written HTTP/1.1 over raw TCP.
//!
//! - [`request`] reads one request (line, headers, fixed-length body) off a stream
//! - [`response`] writes the status line, `Date` / `Content-Type` /
//!   `Content-Length` headers and the body
//! - [`service`] routes a request to its handler
//! - [`connection`] loops request → response on one persistent connection
//! - [`http_server`] binds, accepts, and starts one coroutine per connection
//!
//! No chunked encoding, no pipelining overlap, no TLS.

pub mod connection;
pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use connection::serve_connection;
pub use http_server::{HttpServer, ServerHandle, DEFAULT_STACK_SIZE};
pub use request::{read_request, BodyState, Request, RequestError};
pub use response::{status_reason, Response};
pub use service::UserService;
