//! Configuration management for the discovery server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{Error, Result};
use super::transport::HttpConfig;
use crate::domains::catalog::DiscoveryOptions;

/// Main configuration structure for the discovery server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Options the registry is configured with.
    pub discovery: DiscoveryOptions,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub transport: HttpConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server, used in logs.
    pub name: String,

    /// The version of the server. Reported as the API version unless
    /// `discovery.version` overrides it.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "swagger-doc".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            discovery: DiscoveryOptions::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `SWAGGER_`.
    /// For example: `SWAGGER_PATH`, `SWAGGER_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("SWAGGER_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("SWAGGER_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.discovery.discovery_url = std::env::var("SWAGGER_DISCOVERY_URL").ok();
        config.discovery.swagger_path = std::env::var("SWAGGER_PATH").ok();
        config.discovery.version = std::env::var("SWAGGER_API_VERSION").ok();
        config.discovery.base_path = std::env::var("SWAGGER_BASE_PATH").ok();

        if let Some(ref base_path) = config.discovery.base_path {
            info!("Fixed basePath configured: {}", base_path);
        }

        config.transport = HttpConfig::from_env();

        config
    }

    /// Check that configured paths can be routed.
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("SWAGGER_DISCOVERY_URL", &self.discovery.discovery_url),
            ("SWAGGER_PATH", &self.discovery.swagger_path),
        ];

        for (name, path) in paths {
            if let Some(path) = path.as_deref().filter(|p| !p.starts_with('/')) {
                return Err(Error::config(format!(
                    "{} must start with '/', got {:?}",
                    name, path
                )));
            }
        }

        if self.transport.port == 0 {
            return Err(Error::config("SWAGGER_HTTP_PORT must not be 0"));
        }

        Ok(())
    }
}
