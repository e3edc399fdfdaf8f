//! Structured logging initialization
//!
//! Sets up `tracing` with a JSON (production) or pretty (development)
//! formatter, an `EnvFilter` honouring `RUST_LOG`, and optional buffered
//! output through `tracing-appender`.
//!
//! ## Environment Variables
//!
//! - `USERSVC_LOG_LEVEL`: trace/debug/info/warn/error (default: `info`)
//! - `USERSVC_LOG_FORMAT`: `json` or `pretty` (default: `json`)
//! - `USERSVC_LOG_ASYNC`: buffered non-blocking output (default: `true`)
//! - `USERSVC_LOG_TARGET_FILTER`: extra comma-separated filter directives
//! - `USERSVC_LOG_INCLUDE_LOCATION`: include file:line (default: `false`)

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Enable async buffered logging
    pub async_logging: bool,
    /// Module filter (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location (dev only)
    pub include_location: bool,
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("USERSVC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("USERSVC_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            async_logging: env::var("USERSVC_LOG_ASYNC")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            target_filter: env::var("USERSVC_LOG_TARGET_FILTER").ok(),
            include_location: env::var("USERSVC_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Configuration for local development and tests
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            async_logging: false,
            target_filter: None,
            include_location: true,
        }
    }

    /// Configuration for production
    pub fn default_prod() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            async_logging: true,
            target_filter: None,
            include_location: false,
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let mut env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level().as_str()));

    if let Some(target_filter) = &config.target_filter {
        for filter in target_filter.split(',') {
            let filter = filter.trim();
            if filter.is_empty() {
                continue;
            }
            match filter.parse() {
                Ok(directive) => env_filter = env_filter.add_directive(directive),
                Err(_) => eprintln!("Warning: Invalid log filter directive: {}", filter),
            }
        }
    }

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
        let fmt_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_writer(non_blocking)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_writer(non_blocking)
                .boxed(),
        };
        registry
            .with(fmt_layer)
            .try_init()
            .context("Failed to initialize async logging")?;
        // Keep the writer alive for the process lifetime.
        std::mem::forget(guard);
    } else {
        let fmt_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .boxed(),
        };
        registry
            .with(fmt_layer)
            .try_init()
            .context("Failed to initialize sync logging")?;
    }

    Ok(())
}
