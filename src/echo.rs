use http::StatusCode;
use serde_json::json;

use crate::server::{params, write_json, Handler, Request, ResponseWriter};

/// Handler that echoes back what the router resolved.
///
/// Used for routes declared in a manifest, where no application code is
/// attached: the response body names the route's handler and carries the
/// captured parameters, which makes it handy for checking route tables.
pub fn echo_handler(handler_name: impl Into<String>) -> impl Handler {
    let handler_name = handler_name.into();
    move |res: &mut ResponseWriter, req: &Request| {
        let body = json!({
            "handler": handler_name,
            "method": req.method().as_str(),
            "path": req.uri().path(),
            "params": params(req),
        });
        write_json(res, StatusCode::OK, &body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Router;
    use http::Method;

    #[test]
    fn test_echo_reports_params() {
        let mut router = Router::new();
        router
            .register(Method::GET, "/togo/:id", echo_handler("get_togo"))
            .unwrap();
        let req = http::Request::builder()
            .uri("/togo/415")
            .body(Vec::new())
            .unwrap();
        let res = router.handle(req);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["handler"], "get_togo");
        assert_eq!(body["params"]["id"], "415");
    }

    #[test]
    fn test_echo_literal_route_has_null_params() {
        let mut router = Router::new();
        router
            .register(Method::GET, "/togo", echo_handler("list_togo"))
            .unwrap();
        let req = http::Request::builder().uri("/togo").body(Vec::new()).unwrap();
        let body: serde_json::Value = serde_json::from_slice(router.handle(req).body()).unwrap();
        assert!(body["params"].is_null());
    }
}
