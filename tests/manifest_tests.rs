//! Route manifests loaded from disk and served end to end.

mod common;

use common::requests::request;
use common::temp_files::{create_temp_json, create_temp_yaml};
use http::{Method, StatusCode};
use serde_json::Value;
use togo_router::manifest::RouteManifest;
use togo_router::runtime_config::RuntimeConfig;
use togo_router::RouterError;

const YAML_MANIFEST: &str = r#"
routes:
  - method: GET
    path: /togo/:id/users/:user_id
    handler: get_user
  - method: GET
    path: /togo/{id:[0-9]+}/{username:[^0-9]+}/{active:[0-1]}
    handler: get_profile
  - method: POST
    path: /togo
    handler: create_togo
not_found:
  status: 410
  body: "gone fishing"
"#;

fn json_body(res: &http::Response<Vec<u8>>) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

#[test]
fn test_yaml_manifest_routes() {
    let file = create_temp_yaml(YAML_MANIFEST);
    let router = RouteManifest::load(file.path())
        .unwrap()
        .into_router(RuntimeConfig::default())
        .unwrap();
    assert_eq!(router.len(), 3);

    let res = router.handle(request(Method::GET, "/togo/415/users/9v02"));
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(&res);
    assert_eq!(body["handler"], "get_user");
    assert_eq!(body["params"]["id"], "415");
    assert_eq!(body["params"]["user_id"], "9v02");

    let res = router.handle(request(Method::GET, "/togo/415/johndoe/0"));
    let body = json_body(&res);
    assert_eq!(body["handler"], "get_profile");
    assert_eq!(body["params"]["username"], "johndoe");
    assert_eq!(body["params"]["active"], "0");

    let res = router.handle(request(Method::POST, "/togo"));
    assert_eq!(json_body(&res)["handler"], "create_togo");
}

#[test]
fn test_manifest_custom_not_found() {
    let file = create_temp_yaml(YAML_MANIFEST);
    let router = RouteManifest::load(file.path())
        .unwrap()
        .into_router(RuntimeConfig::default())
        .unwrap();

    let res = router.handle(request(Method::DELETE, "/togo"));
    assert_eq!(res.status(), StatusCode::GONE);
    assert_eq!(res.body().as_slice(), b"gone fishing");
}

#[test]
fn test_json_manifest() {
    let file = create_temp_json(
        r#"{"routes": [{"method": "put", "path": "/items/{id}", "handler": "put_item"}]}"#,
    );
    let router = RouteManifest::load(file.path())
        .unwrap()
        .into_router(RuntimeConfig::default())
        .unwrap();

    let res = router.handle(request(Method::PUT, "/items/abc"));
    assert_eq!(json_body(&res)["params"]["id"], "abc");

    let res = router.handle(request(Method::GET, "/items/abc"));
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.body().as_slice(), b"404 page not found\n");
}

#[test]
fn test_manifest_with_malformed_pattern() {
    let file = create_temp_yaml(
        "routes:\n  - method: GET\n    path: \"/users/{id:[0-9}\"\n    handler: broken\n",
    );
    let err = RouteManifest::load(file.path())
        .unwrap()
        .into_router(RuntimeConfig::default())
        .unwrap_err();
    assert!(matches!(err, RouterError::InvalidConstraint { .. }));
}

#[test]
fn test_missing_manifest_file() {
    let err = RouteManifest::load("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("failed to read route manifest"));
}
