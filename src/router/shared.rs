//! Router that can be extended while it serves.
//!
//! [`Router`] assumes an init-then-serve lifecycle. `SharedRouter` lifts that
//! restriction with an immutable snapshot swap: readers load the current
//! table without locking, and each registration publishes a new table that
//! contains the previous routes plus the new one. In-flight requests keep the
//! snapshot they started with.

use arc_swap::ArcSwap;
use http::Method;
use std::sync::Arc;
use tracing::debug;

use super::core::Router;
use crate::error::RouterError;
use crate::runtime_config::RuntimeConfig;
use crate::server::{Handler, HandlerRef, Request, ResponseWriter};

/// Route table behind an `ArcSwap`, safe for concurrent registration and dispatch
#[derive(Debug)]
pub struct SharedRouter {
    inner: ArcSwap<Router>,
}

impl Default for SharedRouter {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

impl From<Router> for SharedRouter {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}

impl SharedRouter {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            inner: ArcSwap::from_pointee(router),
        }
    }

    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self::new(Router::with_config(config))
    }

    /// Current snapshot of the route table
    #[must_use]
    pub fn snapshot(&self) -> Arc<Router> {
        self.inner.load_full()
    }

    /// Append a route and publish the new table.
    ///
    /// The pattern is compiled before anything is published, so a failed
    /// registration leaves the table untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`RouterError`] if the pattern cannot be compiled.
    pub fn register<H: Handler>(
        &self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<(), RouterError> {
        let handler: HandlerRef = Arc::new(handler);
        let route = self.inner.load().build_route(method, pattern, handler)?;
        self.inner.rcu(|current| {
            let mut next = Router::clone(current);
            next.push_route(route.clone());
            next
        });
        debug!(pattern = %pattern, "Published route table snapshot");
        Ok(())
    }

    /// Replace the not-found handler and publish the new table
    pub fn set_not_found<H: Handler>(&self, handler: H) {
        let handler: HandlerRef = Arc::new(handler);
        self.inner.rcu(|current| {
            let mut next = Router::clone(current);
            next.set_not_found_ref(Arc::clone(&handler));
            next
        });
    }

    /// Dispatch against the current snapshot
    pub fn serve(&self, req: Request, res: &mut ResponseWriter) {
        self.inner.load().serve(req, res);
    }

    #[must_use]
    pub fn handle(&self, req: Request) -> http::Response<Vec<u8>> {
        self.inner.load().handle(req)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }
}
