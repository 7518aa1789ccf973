//! Route manifests.
//!
//! A manifest declares a route table in YAML or JSON, chosen by file
//! extension (`.json` is JSON, anything else YAML):
//!
//! ```yaml
//! routes:
//!   - method: GET
//!     path: /togo/:id/users/:user_id
//!     handler: get_user
//!   - method: GET
//!     path: /togo/{id:[0-9]+}/{username:[^0-9]+}/{active:[0-1]}
//!     handler: get_profile
//! not_found:
//!   status: 404
//!   body: "nothing here"
//! ```
//!
//! Routes are registered in file order, which is also their match priority.
//! Each route is served by an [`echo_handler`] that reports its handler name
//! and captured parameters.

use anyhow::{Context, Result};
use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::echo::echo_handler;
use crate::error::RouterError;
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;
use crate::server::{write_error, Request, ResponseWriter};

/// One declared route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// HTTP method, e.g. `GET`
    pub method: String,
    /// Path pattern
    pub path: String,
    /// Name reported by the echo handler
    pub handler: String,
}

/// Custom not-found response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundEntry {
    #[serde(default = "default_not_found_status")]
    pub status: u16,
    pub body: String,
}

fn default_not_found_status() -> u16 {
    404
}

/// A route table declared in a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteManifest {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub not_found: Option<NotFoundEntry>,
}

impl RouteManifest {
    /// Load a manifest from a YAML or JSON file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route manifest {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let manifest = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
        .with_context(|| format!("failed to parse route manifest {}", path.display()))?;
        info!(
            manifest = %path.display(),
            routes_count = manifest.routes.len(),
            custom_not_found = manifest.not_found.is_some(),
            "Route manifest loaded"
        );
        Ok(manifest)
    }

    /// Parse a YAML manifest
    ///
    /// # Errors
    ///
    /// Fails on invalid YAML or an unexpected shape.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("invalid YAML route manifest")
    }

    /// Parse a JSON manifest
    ///
    /// # Errors
    ///
    /// Fails on invalid JSON or an unexpected shape.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("invalid JSON route manifest")
    }

    /// Build a router serving every declared route with an echo handler.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouterError`]: an unparsable method or a
    /// malformed pattern.
    pub fn into_router(&self, config: RuntimeConfig) -> Result<Router, RouterError> {
        let mut router = Router::with_config(config);
        for entry in &self.routes {
            let method = parse_method(&entry.method)?;
            router.register(method, &entry.path, echo_handler(entry.handler.clone()))?;
        }
        if let Some(nf) = &self.not_found {
            let status = StatusCode::from_u16(nf.status).unwrap_or(StatusCode::NOT_FOUND);
            let body = nf.body.clone();
            router.set_not_found(move |res: &mut ResponseWriter, _: &Request| {
                write_error(res, status, &body);
            });
        }
        Ok(router)
    }
}

/// Parse a method string, accepting lowercase input
///
/// # Errors
///
/// Returns [`RouterError::InvalidMethod`] for strings that are not valid
/// HTTP method tokens.
pub fn parse_method(method: &str) -> Result<Method, RouterError> {
    Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes()).map_err(|_| {
        RouterError::InvalidMethod {
            method: method.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
routes:
  - method: get
    path: /togo/:id/users/:user_id
    handler: get_user
  - method: POST
    path: /togo
    handler: create_togo
not_found:
  body: "nothing here"
"#;

    #[test]
    fn test_yaml_manifest() {
        let m = RouteManifest::from_yaml_str(MANIFEST).unwrap();
        assert_eq!(m.routes.len(), 2);
        assert_eq!(m.routes[0].handler, "get_user");
        assert_eq!(m.not_found.as_ref().unwrap().status, 404);
    }

    #[test]
    fn test_json_manifest() {
        let json = r#"{"routes":[{"method":"DELETE","path":"/togo/:id","handler":"drop"}]}"#;
        let m = RouteManifest::from_json_str(json).unwrap();
        assert_eq!(m.routes[0].method, "DELETE");
        assert!(m.not_found.is_none());
    }

    #[test]
    fn test_into_router_respects_order() {
        let router = RouteManifest::from_yaml_str(MANIFEST)
            .unwrap()
            .into_router(RuntimeConfig::default())
            .unwrap();
        assert_eq!(
            router.route_patterns(),
            vec!["GET /togo/:id/users/:user_id", "POST /togo"]
        );
        assert!(router.has_not_found());
    }

    #[test]
    fn test_bad_method_rejected() {
        let m = RouteManifest {
            routes: vec![RouteEntry {
                method: "GE T".to_string(),
                path: "/".to_string(),
                handler: "root".to_string(),
            }],
            not_found: None,
        };
        assert!(matches!(
            m.into_router(RuntimeConfig::default()),
            Err(RouterError::InvalidMethod { .. })
        ));
    }
}
