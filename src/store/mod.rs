//! # Record Store
//!
//! Persistence for user records: one serialized record per line in a single
//! shared text file. The file is created on the first append and survives
//! restarts.
//!
//! - [`RecordStore::append`] adds a line (POST)
//! - [`RecordStore::read_all`] / [`RecordStore::read_raw`] scan the file (GET, HEAD)
//! - [`RecordStore::modify`] runs a locked read-modify-write cycle (PUT, DELETE)
//!
//! There is no indexing and no transaction log.

mod error;
mod file;

pub use error::StoreError;
pub use file::{LineEdit, RecordStore};
