use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::manifest::{parse_method, RouteManifest};
use crate::router::PathPattern;
use crate::runtime_config::RuntimeConfig;

/// Command-line interface for togo-router
#[derive(Parser)]
#[command(name = "togo-router")]
#[command(about = "Inspect and exercise route manifests", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compile every route in a manifest and print the table
    Check {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Dispatch a request through a manifest's router and print the response
    Resolve {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP method of the request
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, e.g. /togo/415
        path: String,
    },
}

/// Parse process arguments and run the selected command
///
/// # Errors
///
/// Propagates any command failure.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Run a parsed command, writing its report to `out`
///
/// # Errors
///
/// Fails when the manifest cannot be loaded, when `check` finds malformed
/// routes, or when `resolve` cannot build its router or request.
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = RuntimeConfig::from_env();
    match &cli.command {
        Commands::Check { routes } => {
            let manifest = RouteManifest::load(routes)?;
            let mut failures = 0usize;
            for (idx, entry) in manifest.routes.iter().enumerate() {
                let compiled = parse_method(&entry.method).and_then(|method| {
                    PathPattern::parse_with_limit(&entry.path, config.pattern_size_limit)
                        .map(|p| (method, p))
                });
                match compiled {
                    Ok((method, pattern)) => writeln!(
                        out,
                        "[route] #{idx} {method} {} -> {} params={:?}",
                        pattern.as_str(),
                        entry.handler,
                        pattern.param_names()
                    )?,
                    Err(e) => {
                        failures += 1;
                        writeln!(out, "[error] #{idx} {} {}: {e}", entry.method, entry.path)?;
                    }
                }
            }
            if failures > 0 {
                bail!(
                    "{failures} of {} routes in {} are invalid",
                    manifest.routes.len(),
                    routes.display()
                );
            }
            writeln!(
                out,
                "ok: {} routes, not_found={}",
                manifest.routes.len(),
                if manifest.not_found.is_some() { "custom" } else { "default" }
            )?;
            Ok(())
        }
        Commands::Resolve {
            routes,
            method,
            path,
        } => {
            let manifest = RouteManifest::load(routes)?;
            let router = manifest
                .into_router(config)
                .with_context(|| format!("invalid route manifest {}", routes.display()))?;
            let request = http::Request::builder()
                .method(parse_method(method)?)
                .uri(path.as_str())
                .body(Vec::new())
                .with_context(|| format!("invalid request path '{path}'"))?;
            let response = router.handle(request);
            writeln!(out, "{}", response.status())?;
            out.write_all(response.body())?;
            if !response.body().ends_with(b"\n") {
                writeln!(out)?;
            }
            Ok(())
        }
    }
}
