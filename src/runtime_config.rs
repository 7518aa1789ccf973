//! # Runtime Configuration Module
//!
//! Environment-variable configuration for how the router compiles patterns.
//!
//! ## Environment Variables
//!
//! ### `TOGO_PATTERN_CACHE`
//!
//! Routes sharing a pattern string share one compiled matcher through the
//! pattern cache. Set to `off` (or `false` / `0`) to compile every route
//! independently. Matching results are identical either way.
//!
//! Default: on
//!
//! ### `TOGO_PATTERN_SIZE_LIMIT`
//!
//! Upper bound on the size of a compiled matcher, guarding against
//! pathological inline constraints. Accepts values in:
//! - Decimal: `1048576`
//! - Hexadecimal: `0x100000`
//!
//! Default: `0x100000` (1 MiB)
//!
//! ## Usage
//!
//! ```rust
//! use togo_router::runtime_config::RuntimeConfig;
//! use togo_router::router::Router;
//!
//! let config = RuntimeConfig::from_env();
//! let router = Router::with_config(config);
//! assert_eq!(router.len(), 0);
//! ```

use std::env;

use crate::router::DEFAULT_SIZE_LIMIT;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Share compiled matchers between routes with the same pattern
    pub pattern_cache: bool,
    /// Regex size limit for compiled matchers, in bytes
    pub pattern_size_limit: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            pattern_cache: true,
            pattern_size_limit: DEFAULT_SIZE_LIMIT,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pattern_cache = match lookup("TOGO_PATTERN_CACHE") {
            Some(val) => !matches!(
                val.trim().to_lowercase().as_str(),
                "off" | "false" | "0" | "no"
            ),
            None => defaults.pattern_cache,
        };
        let pattern_size_limit = lookup("TOGO_PATTERN_SIZE_LIMIT")
            .and_then(|val| {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).ok()
                } else {
                    val.parse().ok()
                }
            })
            .unwrap_or(defaults.pattern_size_limit);
        RuntimeConfig {
            pattern_cache,
            pattern_size_limit,
        }
    }
}
