//! # CLI Module
//!
//! Command-line tooling for route manifests (see [`crate::manifest`]).
//!
//! ## Commands
//!
//! ### `check`
//!
//! Compile every pattern in a manifest and print the route table:
//!
//! ```bash
//! togo-router check --routes routes.yaml
//! ```
//!
//! Every malformed pattern or method is reported; the command exits with an
//! error if there was at least one.
//!
//! ### `resolve`
//!
//! Dispatch a synthetic request through the manifest's router and print the
//! response:
//!
//! ```bash
//! togo-router resolve --routes routes.yaml --method GET /togo/415/users/9v02
//! ```
//!
//! Matched routes answer with their echo handler's JSON; unmatched requests
//! print the not-found response.
//!
//! ## Logging
//!
//! The binary logs to stderr; see [`crate::logging`] for the `TOGO_LOG_*`
//! variables.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
