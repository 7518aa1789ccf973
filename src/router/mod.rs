//! # Router Module
//!
//! Route table, pattern matching and dispatch.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Keeping registered `(method, pattern, handler)` routes in registration order
//! - Compiling patterns into anchored matchers at registration time
//! - Selecting the first route whose method and pattern match a request
//! - Extracting named path parameters for the selected route
//!
//! ## Architecture
//!
//! 1. **Compilation**: [`Router::register`] turns a pattern such as
//!    `/togo/:id/users/{user_id:[0-9a-z]+}` into a [`PathPattern`]. Malformed
//!    patterns are rejected here, never at request time. Compiled patterns
//!    are memoised by [`PatternCache`].
//!
//! 2. **Matching**: [`Router::resolve`] scans the table in order. A route with
//!    a different method is skipped without ending the scan; an exact string
//!    match wins immediately; otherwise the compiled pattern must match the
//!    whole path.
//!
//! 3. **Dispatch**: [`Router::serve`] attaches the captured [`Params`] to the
//!    request's extensions and calls the handler, or falls back to the
//!    not-found handler / default 404.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use togo_router::router::Router;
//! use togo_router::server::{Request, ResponseWriter};
//!
//! let mut router = Router::new();
//! router
//!     .register(Method::GET, "/togo/:id/users/:user_id", |_: &mut ResponseWriter, _: &Request| {})
//!     .unwrap();
//!
//! let m = router.resolve(&Method::GET, "/togo/415/users/9v02").unwrap();
//! assert_eq!(m.params.get("id"), Some("415"));
//! assert_eq!(m.params.get("user_id"), Some("9v02"));
//! ```
//!
//! ## Performance
//!
//! Dispatch is a linear scan: O(n) in the number of routes. Literal routes
//! cost one string comparison; parameterised routes cost one regex match.

mod cache;
mod core;
mod params;
mod pattern;
mod shared;

pub use cache::PatternCache;
pub use core::{Route, RouteMatch, Router};
pub use params::{ParamVec, Params, MAX_INLINE_PARAMS};
pub use pattern::{match_path, PathPattern, DEFAULT_PARAM_CLASS, DEFAULT_SIZE_LIMIT};
pub use shared::SharedRouter;
