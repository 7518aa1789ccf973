use crate::router::Params;

/// Inbound request descriptor handed to handlers.
///
/// The host HTTP stack owns connection handling and body reading; the router
/// only needs the method, the (already normalised) path and a place to hang
/// per-request data.
pub type Request = http::Request<Vec<u8>>;

/// Captured path parameters of the route that served `req`.
///
/// Returns `None` when the route had no named segments (or the request never
/// went through [`Router::serve`](crate::router::Router::serve)).
#[must_use]
pub fn params(req: &Request) -> Option<&Params> {
    req.extensions().get::<Params>()
}

/// Attach captured parameters to a request.
///
/// Parameters live in the request's own extensions, so each request carries
/// its own copy and concurrent requests can never see each other's values.
/// Empty parameter sets are not attached.
pub(crate) fn attach_params(req: &mut Request, params: Params) {
    if !params.is_empty() {
        req.extensions_mut().insert(params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn request(path: &str) -> Request {
        http::Request::builder()
            .uri(path)
            .body(Vec::new())
            .unwrap()
    }

    #[test]
    fn test_params_absent_by_default() {
        assert!(params(&request("/togo")).is_none());
    }

    #[test]
    fn test_attach_skips_empty() {
        let mut req = request("/togo");
        attach_params(&mut req, Params::new());
        assert!(params(&req).is_none());
    }

    #[test]
    fn test_attach_and_read_back() {
        let mut req = request("/togo/415");
        let mut p = Params::new();
        p.push(Arc::from("id"), "415".to_string());
        attach_params(&mut req, p);
        assert_eq!(params(&req).and_then(|p| p.get("id")), Some("415"));
    }
}
