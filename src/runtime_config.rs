//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the server. Everything has
//! a built-in default, so the server runs with no configuration at all.
//! Values are resolved once at startup and handed explicitly to the
//! listener and the record store.
//!
//! ## Environment Variables
//!
//! ### `USERSVC_ADDR`
//!
//! Address the listener binds to. Default: `0.0.0.0:7070`
//!
//! ### `USERSVC_STORE`
//!
//! Path of the record store file. Default: `users.txt` (relative to the
//! working directory). The file is created on the first POST.
//!
//! ### `USERSVC_STACK_SIZE`
//!
//! Stack size for connection coroutines. Accepts values in:
//! - Decimal: `32768`
//! - Hexadecimal: `0x8000`
//!
//! Default: `0x8000` (32 KB)
//!
//! ## Usage
//!
//! ```rust
//! use usersvc::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("listening on {}", config.addr);
//! ```

use crate::server::DEFAULT_STACK_SIZE;
use std::env;
use std::path::PathBuf;

/// Port the server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 7070;
/// Listen address unless told otherwise.
pub const DEFAULT_ADDR: &str = "0.0.0.0:7070";
/// Store file unless told otherwise.
pub const DEFAULT_STORE_PATH: &str = "users.txt";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Listen address (default: `0.0.0.0:7070`)
    pub addr: String,
    /// Record store file (default: `users.txt`)
    pub store_path: PathBuf,
    /// Stack size for connection coroutines in bytes (default: 32 KB / 0x8000)
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            addr: lookup("USERSVC_ADDR").unwrap_or(defaults.addr),
            store_path: lookup("USERSVC_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            stack_size: lookup("USERSVC_STACK_SIZE")
                .and_then(|v| parse_size(&v))
                .unwrap_or(defaults.stack_size),
        }
    }

    /// Apply command-line overrides on top of the environment.
    #[must_use]
    pub fn with_overrides(mut self, addr: Option<String>, store_path: Option<PathBuf>) -> Self {
        if let Some(addr) = addr {
            self.addr = addr;
        }
        if let Some(store_path) = store_path {
            self.store_path = store_path;
        }
        self
    }
}

fn parse_size(val: &str) -> Option<usize> {
    match val.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}
