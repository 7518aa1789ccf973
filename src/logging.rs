//! Structured logging initialization
//!
//! The library itself only emits `tracing` events; binaries decide where
//! they go. This module installs a `tracing-subscriber` fmt subscriber
//! configured from the environment:
//!
//! - `TOGO_LOG_LEVEL` - filter directive, e.g. `debug` or `togo_router=trace` (default `info`)
//! - `TOGO_LOG_FORMAT` - `json` (default) or `pretty`
//! - `TOGO_LOG_INCLUDE_LOCATION` - include file:line in events (default `false`)
//!
//! `RUST_LOG`, when set, takes precedence over `TOGO_LOG_LEVEL`.

use anyhow::{anyhow, Context, Result};
use std::env;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

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
            _ => LogFormat::Json, // Default to JSON
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level / filter directive
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Include file:line location (dev only)
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("TOGO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("TOGO_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            include_location: env::var("TOGO_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        match env::var("RUST_LOG") {
            Ok(directive) if !directive.is_empty() => EnvFilter::try_new(&directive)
                .with_context(|| format!("invalid RUST_LOG directive '{directive}'")),
            _ => EnvFilter::try_new(&self.log_level)
                .with_context(|| format!("invalid TOGO_LOG_LEVEL '{}'", self.log_level)),
        }
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Fails if the filter directive is invalid or a global subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = config.env_filter()?;
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    }
    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
