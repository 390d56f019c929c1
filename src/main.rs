//! Discovery server entry point.
//!
//! Initializes logging, loads configuration, declares the sample catalog and
//! serves its discovery documents over HTTP.

use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use swagger_doc::core::{Config, HttpTransport, RouteTable};
use swagger_doc::domains::catalog::{Registry, declare_all_resources};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    config.validate()?;

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Bind the registry before declaring resources so each one gets a route
    let routes = RouteTable::with_version(config.server.version.clone());
    let registry = Registry::new();
    registry.configure(Arc::new(routes.clone()), config.discovery.clone());

    let resources = declare_all_resources(&registry);
    info!(
        "Catalog ready at {} with {} resources",
        registry.discovery_url(),
        resources.len()
    );

    HttpTransport::new(config.transport).run(routes).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
