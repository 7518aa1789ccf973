//! Router core module - route table and dispatch.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::cache::PatternCache;
use super::params::Params;
use super::pattern::PathPattern;
use crate::error::RouterError;
use crate::runtime_config::RuntimeConfig;
use crate::server::{attach_params, write_not_found, Handler, HandlerRef, Request, ResponseWriter};

/// A registered route: method, compiled pattern and handler.
///
/// Immutable once appended to a [`Router`]. Routes are identified by their
/// position in the table; two routes may share a pattern under different
/// methods, or even share both.
#[derive(Clone)]
pub struct Route {
    method: Method,
    pattern: Arc<PathPattern>,
    handler: HandlerRef,
}

impl Route {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The pattern string as registered
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The compiled matcher
    #[must_use]
    pub fn matcher(&self) -> &PathPattern {
        &self.pattern
    }

    #[must_use]
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Result of resolving a request against the route table
#[derive(Debug)]
pub struct RouteMatch<'a> {
    /// Position of the selected route in registration order
    pub index: usize,
    /// The selected route
    pub route: &'a Route,
    /// Parameters captured for this request (empty for literal routes)
    pub params: Params,
}

/// Ordered route table with first-match-wins dispatch.
///
/// Routes are tried strictly in registration order. For each route whose
/// method equals the request method, an exact string match of pattern and
/// path wins immediately; otherwise the compiled pattern is tried. The first
/// route that matches serves the request. When nothing matches, the
/// not-found handler runs, or a default `404 page not found` is written.
///
/// Registration takes `&mut self` and dispatch takes `&self`: populate the
/// table first, then share it (e.g. behind an `Arc`) for serving. Use
/// [`SharedRouter`](super::SharedRouter) when routes must be added while
/// requests are in flight.
#[derive(Clone)]
pub struct Router {
    routes: Vec<Route>,
    not_found: Option<HandlerRef>,
    cache: Option<Arc<PatternCache>>,
    config: RuntimeConfig,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("not_found", &self.not_found.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl Router {
    /// Create an empty router with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Create an empty router with the given configuration
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        let cache = config
            .pattern_cache
            .then(|| Arc::new(PatternCache::new(config.pattern_size_limit)));
        Self {
            routes: Vec::new(),
            not_found: None,
            cache,
            config,
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Register a handler for `method` and `pattern`.
    ///
    /// The route is appended to the end of the table. Duplicates are never
    /// rejected; the earliest registration wins at dispatch. The pattern is
    /// compiled here, so a malformed pattern fails registration instead of
    /// failing a request later.
    ///
    /// # Errors
    ///
    /// Returns a [`RouterError`] if the pattern cannot be compiled.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::io::Write;
    /// use http::Method;
    /// use togo_router::router::Router;
    /// use togo_router::server::{params, Request, ResponseWriter};
    ///
    /// let mut router = Router::new();
    /// router
    ///     .register(Method::GET, "/togo/:id", |res: &mut ResponseWriter, req: &Request| {
    ///         let id = params(req).and_then(|p| p.get("id")).unwrap_or_default();
    ///         let _ = write!(res, "togo {id}");
    ///     })
    ///     .unwrap();
    /// assert_eq!(router.len(), 1);
    /// ```
    pub fn register<H: Handler>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<(), RouterError> {
        self.register_ref(method, pattern, Arc::new(handler))
    }

    /// Register an already type-erased handler
    ///
    /// # Errors
    ///
    /// Returns a [`RouterError`] if the pattern cannot be compiled.
    pub fn register_ref(
        &mut self,
        method: Method,
        pattern: &str,
        handler: HandlerRef,
    ) -> Result<(), RouterError> {
        let route = self.build_route(method, pattern, handler)?;
        self.push_route(route);
        Ok(())
    }

    /// Replace the not-found handler; the last call wins
    pub fn set_not_found<H: Handler>(&mut self, handler: H) {
        self.set_not_found_ref(Arc::new(handler));
    }

    pub fn set_not_found_ref(&mut self, handler: HandlerRef) {
        if self.not_found.replace(handler).is_some() {
            debug!("Replaced existing not-found handler");
        }
    }

    #[must_use]
    pub fn has_not_found(&self) -> bool {
        self.not_found.is_some()
    }

    pub(crate) fn build_route(
        &self,
        method: Method,
        pattern: &str,
        handler: HandlerRef,
    ) -> Result<Route, RouterError> {
        let compiled = match &self.cache {
            Some(cache) => cache.get_or_compile(pattern)?,
            None => Arc::new(PathPattern::parse_with_limit(
                pattern,
                self.config.pattern_size_limit,
            )?),
        };
        Ok(Route {
            method,
            pattern: compiled,
            handler,
        })
    }

    pub(crate) fn push_route(&mut self, route: Route) {
        debug!(
            route_index = self.routes.len(),
            method = %route.method,
            pattern = %route.pattern(),
            param_names = ?route.matcher().param_names(),
            "Route registered"
        );
        self.routes.push(route);
    }

    /// Registered routes in match priority order
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All registered patterns, prefixed by method, in table order
    #[must_use]
    pub fn route_patterns(&self) -> Vec<String> {
        self.routes
            .iter()
            .map(|r| format!("{} {}", r.method, r.pattern()))
            .collect()
    }

    /// Print all registered routes to stdout
    ///
    /// Useful for debugging and verifying that routes are loaded correctly.
    pub fn dump_routes(&self) {
        println!(
            "[routes] count={} not_found={}",
            self.routes.len(),
            if self.not_found.is_some() { "custom" } else { "default" }
        );
        for (idx, route) in self.routes.iter().enumerate() {
            println!(
                "[route] #{idx} {} {} params={:?}",
                route.method,
                route.pattern(),
                route.matcher().param_names()
            );
        }
    }

    /// Select the route serving `method` and `path`.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - the first route, in registration order, whose
    ///   method is equal and whose pattern matches
    /// * `None` - no route matches (results in 404)
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let match_start = Instant::now();

        for (index, route) in self.routes.iter().enumerate() {
            if route.method != *method {
                continue;
            }
            let params = if route.pattern() == path {
                Params::new()
            } else {
                match route.pattern.match_path(path) {
                    Some(params) => params,
                    None => continue,
                }
            };

            let match_duration = match_start.elapsed();
            if match_duration > Duration::from_millis(1) {
                warn!(
                    method = %method,
                    path = %path,
                    route_index = index,
                    pattern = %route.pattern(),
                    duration_us = match_duration.as_micros(),
                    "Slow route matching detected"
                );
            } else {
                debug!(
                    method = %method,
                    path = %path,
                    route_index = index,
                    pattern = %route.pattern(),
                    path_params = ?params,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
            }
            return Some(RouteMatch {
                index,
                route,
                params,
            });
        }

        warn!(
            method = %method,
            path = %path,
            routes_scanned = self.routes.len(),
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        None
    }

    /// Dispatch a request.
    ///
    /// Invokes the matched handler with `res` and the request augmented with
    /// its captured [`Params`]. Without a match, invokes the not-found handler,
    /// or writes `404 page not found\n` if none is set. Every request gets a
    /// response.
    pub fn serve(&self, mut req: Request, res: &mut ResponseWriter) {
        let resolved = self.resolve(req.method(), req.uri().path());
        match resolved {
            Some(RouteMatch { route, params, .. }) => {
                attach_params(&mut req, params);
                route.handler.call(res, &req);
            }
            None => match &self.not_found {
                Some(handler) => handler.call(res, &req),
                None => {
                    info!(
                        method = %req.method(),
                        path = %req.uri().path(),
                        "Default not-found response"
                    );
                    write_not_found(res);
                }
            },
        }
    }

    /// Dispatch a request and return the finished response
    #[must_use]
    pub fn handle(&self, req: Request) -> http::Response<Vec<u8>> {
        let mut res = ResponseWriter::new();
        self.serve(req, &mut res);
        res.into_response()
    }
}
