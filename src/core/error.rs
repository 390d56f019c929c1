//! Error types and handling for the discovery server.
//!
//! This module defines a unified error type that can represent errors from
//! the catalog domain, the transport layer and configuration, providing
//! consistent error handling across the entire application.

use thiserror::Error;

/// A specialized Result type for discovery server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the discovery server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the catalog domain.
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::domains::catalog::CatalogError),

    /// Error originating from the HTTP transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
