use std::sync::Arc;

use super::request::Request;
use super::response::ResponseWriter;

/// A request handler.
///
/// Handlers receive the response sink first and the request second. The
/// request carries the captured [`Params`](crate::router::Params) in its
/// extensions; read them with [`params`](super::params).
///
/// Any `Fn(&mut ResponseWriter, &Request) + Send + Sync + 'static` closure is
/// a handler.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, res: &mut ResponseWriter, req: &Request);
}

impl<F> Handler for F
where
    F: Fn(&mut ResponseWriter, &Request) + Send + Sync + 'static,
{
    #[inline]
    fn call(&self, res: &mut ResponseWriter, req: &Request) {
        self(res, req)
    }
}

/// Shared, type-erased handler as stored in the route table
pub type HandlerRef = Arc<dyn Handler>;
