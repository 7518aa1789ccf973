//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::io::Write;

fn manifest_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_check_command_parses() {
    let cli = Cli::try_parse_from(["togo-router", "check", "--routes", "routes.yaml"]).unwrap();
    match cli.command {
        Commands::Check { routes } => assert_eq!(routes.to_string_lossy(), "routes.yaml"),
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_resolve_defaults_to_get() {
    let cli = Cli::try_parse_from(["togo-router", "resolve", "-r", "r.yaml", "/togo/1"]).unwrap();
    match cli.command {
        Commands::Resolve { method, path, .. } => {
            assert_eq!(method, "GET");
            assert_eq!(path, "/togo/1");
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_check_reports_routes() {
    let file = manifest_file(
        "routes:\n  - method: GET\n    path: /togo/:id\n    handler: get_togo\n",
    );
    let cli = Cli::try_parse_from([
        "togo-router",
        "check",
        "--routes",
        file.path().to_str().unwrap(),
    ])
    .unwrap();
    let mut out = Vec::new();
    execute(&cli, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("[route] #0 GET /togo/:id -> get_togo"));
    assert!(out.contains("ok: 1 routes, not_found=default"));
}

#[test]
fn test_check_fails_on_malformed_pattern() {
    let file = manifest_file(
        "routes:\n  - method: GET\n    path: /togo/{id\n    handler: broken\n  - method: GET\n    path: /ok\n    handler: ok\n",
    );
    let cli = Cli::try_parse_from([
        "togo-router",
        "check",
        "--routes",
        file.path().to_str().unwrap(),
    ])
    .unwrap();
    let mut out = Vec::new();
    let err = execute(&cli, &mut out).unwrap_err();
    assert!(err.to_string().contains("1 of 2 routes"));
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("[error] #0"));
    assert!(out.contains("[route] #1 GET /ok -> ok"));
}

#[test]
fn test_resolve_prints_echo_and_not_found() {
    let file = manifest_file(
        "routes:\n  - method: GET\n    path: /togo/:id/users/:user_id\n    handler: get_user\n",
    );
    let path = file.path().to_str().unwrap().to_string();

    let cli = Cli::try_parse_from(["togo-router", "resolve", "-r", &path, "/togo/415/users/9v02"])
        .unwrap();
    let mut out = Vec::new();
    execute(&cli, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("200 OK\n"));
    assert!(out.contains(r#""user_id":"9v02""#));

    let cli = Cli::try_parse_from(["togo-router", "resolve", "-r", &path, "/missing"]).unwrap();
    let mut out = Vec::new();
    execute(&cli, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "404 Not Found\n404 page not found\n"
    );
}
