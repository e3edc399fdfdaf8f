//! # Router
//!
//! Maps a request's method and raw target onto a [`Route`]. The table is
//! fixed and evaluated in priority order; see [`resolve`] for the full
//! matrix. Anything that does not match falls through to 400 (for GET and
//! POST) or 405.

mod table;

pub use table::{resolve, Route, USERS_PATH};
