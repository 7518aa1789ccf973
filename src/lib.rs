//! # togo-router
//!
//! A small HTTP request router: given a method and a path, it selects the
//! first registered handler whose method and path pattern match, and hands
//! the handler any parameters captured from the path.
//!
//! ## Overview
//!
//! - **[`router`]** - Route table, pattern compiler, matcher and dispatch
//! - **[`server`]** - Request/response types crossing the boundary with the host HTTP stack
//! - **[`manifest`]** - Route tables declared in YAML/JSON files
//! - **[`cli`]** - `togo-router` command-line tool for checking and exercising manifests
//! - **[`runtime_config`]** - Environment-based tuning of pattern compilation
//! - **[`logging`]** - `tracing` subscriber setup for binaries
//!
//! Accepting connections and writing bytes to sockets is out of scope: the
//! host stack builds an [`http::Request`], calls [`Router::serve`], and
//! flushes the resulting [`server::ResponseWriter`].
//!
//! ## Pattern Syntax
//!
//! Patterns are `/`-separated segments. Empty segments are ignored.
//!
//! - `users` - literal, matched verbatim
//! - `:id` - named, matches one or more characters other than `/`
//! - `{id}` - same as `:id`
//! - `{id:[0-9]+}` - named, matches the regular expression `[0-9]+` within the segment
//!
//! A pattern must match the whole request path. Patterns without named
//! segments match only when byte-for-byte equal to the path.
//!
//! ## Dispatch Rules
//!
//! 1. Routes are tried in registration order
//! 2. A route whose method differs is skipped, and the scan continues
//! 3. The first route whose pattern matches serves the request
//! 4. With no match, the not-found handler runs, or `404 page not found\n` is written
//!
//! Duplicate registrations are legal; the earliest one wins.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Write;
//! use http::{Method, StatusCode};
//! use togo_router::router::Router;
//! use togo_router::server::{params, Request, ResponseWriter};
//!
//! let mut router = Router::new();
//! router
//!     .register(Method::GET, "/togo/:id/users/:user_id", |res: &mut ResponseWriter, req: &Request| {
//!         let p = params(req).cloned().unwrap_or_default();
//!         let _ = write!(res, "{}:{}", p.get("id").unwrap_or("-"), p.get("user_id").unwrap_or("-"));
//!     })
//!     .expect("valid pattern");
//!
//! let req = http::Request::get("/togo/415/users/9v02").body(Vec::new()).unwrap();
//! let res = router.handle(req);
//! assert_eq!(res.status(), StatusCode::OK);
//! assert_eq!(res.body().as_slice(), b"415:9v02");
//!
//! let req = http::Request::get("/missing").body(Vec::new()).unwrap();
//! let res = router.handle(req);
//! assert_eq!(res.status(), StatusCode::NOT_FOUND);
//! assert_eq!(res.body().as_slice(), b"404 page not found\n");
//! ```
//!
//! ## Concurrency
//!
//! Captured parameters are returned per call and stored in the request's
//! own extensions; there is no shared parameter state. A populated
//! [`Router`] can be shared across threads behind an `Arc`. When routes must
//! be registered while requests are being served, use
//! [`router::SharedRouter`], which publishes immutable snapshots.

pub mod cli;
mod echo;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use echo::echo_handler;
pub use error::RouterError;
pub use router::{Params, Router, SharedRouter};
pub use server::{params, Handler, Request, ResponseWriter};
