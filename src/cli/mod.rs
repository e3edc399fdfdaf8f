//! # CLI Module
//!
//! Command-line entry points for the `usersvc` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Start the server:
//!
//! ```bash
//! usersvc serve --addr 0.0.0.0:7070 --store users.txt
//! ```
//!
//! Both flags are optional; they override `USERSVC_ADDR` / `USERSVC_STORE`,
//! which in turn override the built-in defaults. SIGINT or SIGTERM stops the
//! listener.
//!
//! ### `client`
//!
//! Run the scripted request sequence against a running server and print
//! every exchange:
//!
//! ```bash
//! usersvc client --addr 127.0.0.1:7070
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
