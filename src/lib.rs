//! # usersvc
//!
//! **usersvc** is a minimal persistent-connection HTTP/1.1 server, and a
//! matching client, for a user-record CRUD protocol. HTTP is parsed by hand
//! over raw TCP (no framework) and records live in a flat text file, one
//! JSON-shaped record per line.
//!
//! ## Architecture
//!
//! - **[`server`]** - request parser, response writer, connection loop and listener
//! - **[`router`]** - the fixed `(method, target)` → route table
//! - **[`handlers`]** - list / create / update / delete operations
//! - **[`store`]** - the shared line-oriented record file
//! - **[`scan`]** - fixed-marker field extraction and substring matching
//! - **[`client`]** - persistent-connection client and the scripted driver
//! - **[`cli`]**, **[`runtime_config`]**, **[`logging`]** - process plumbing
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Listener as HttpServer<br/>(accept loop)
//!     participant Conn as Connection<br/>(coroutine)
//!     participant Parser as read_request
//!     participant Router as resolve
//!     participant Handler
//!     participant Store as RecordStore
//!
//!     Client->>Listener: TCP connect
//!     Listener->>Conn: spawn coroutine
//!     loop until peer closes
//!         Client->>Conn: PUT /users + body
//!         Conn->>Parser: request line, headers, Content-Length body
//!         Parser-->>Conn: Request
//!         Conn->>Router: (PUT, "/users")
//!         Router-->>Conn: Route::Update
//!         Conn->>Handler: update_user::handle
//!         Handler->>Store: modify (write lock held for read + rewrite)
//!         Store-->>Handler: lines replaced
//!         Handler-->>Conn: Response 200
//!         Conn-->>Client: status line, Date, Content-Type, Content-Length, body
//!     end
//! ```
//!
//! ## Runtime Considerations
//!
//! usersvc uses the `may` coroutine runtime, one coroutine per accepted
//! connection. Blocking reads on a connection park only that coroutine. The
//! record file is the only state shared between connections; all access to
//! it goes through one coroutine-aware lock, so concurrent updates are
//! serialized rather than lost.
//!
//! ## Quick Start
//!
//! ```no_run
//! use usersvc::server::{HttpServer, UserService};
//! use usersvc::store::RecordStore;
//!
//! let service = UserService::new(RecordStore::new("users.txt"));
//! let handle = HttpServer::new(service).start("0.0.0.0:7070").unwrap();
//! handle.join().unwrap();
//! ```
//!
//! ```bash
//! curl -X POST -d '{"id":"u1","name":"kim","address":"Seoul","tel":"010","age":"30"}' \
//!   http://localhost:7070/users
//! curl 'http://localhost:7070/users?name=kim'
//! curl -X DELETE http://localhost:7070/users/u1
//! ```

pub mod cli;
pub mod client;
pub mod handlers;
mod ids;
pub mod logging;
pub mod model;
pub mod router;
pub mod runtime_config;
pub mod scan;
pub mod server;
pub mod store;

pub use ids::ConnectionId;
pub use model::UserRecord;
pub use server::{HttpServer, ServerHandle, UserService};
pub use store::{RecordStore, StoreError};
