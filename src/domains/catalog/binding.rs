//! The seam between the catalog and whatever server answers HTTP requests.
//!
//! The catalog never routes or sends anything itself. It hands a
//! [`DiscoveryHandler`] to a [`DiscoveryServer`] for each discovery path and
//! the server is responsible for matching requests and writing the returned
//! document to the client as JSON.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::CatalogError;

/// The parts of an incoming request the catalog reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryRequest {
    /// Header name (lower-cased) -> value.
    headers: HashMap<String, String>,
}

impl DiscoveryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a request carrying only a `host` header.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self::new().header_value("host", host)
    }

    /// Add a header. Names are matched case-insensitively.
    pub fn header_value(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn host(&self) -> Option<&str> {
        self.header("host")
    }
}

/// Renders one discovery document for a request.
pub type DiscoveryHandler =
    Arc<dyn Fn(&DiscoveryRequest) -> Result<Value, CatalogError> + Send + Sync>;

/// A server capability the registry can bind discovery routes to.
///
/// Implementations register `handler` for exact-match GET requests on
/// `path`. How a second registration on the same path behaves is up to the
/// implementation.
pub trait DiscoveryServer: Send + Sync {
    /// The server's own version, used when no API version is configured.
    fn version(&self) -> Option<String> {
        None
    }

    fn register_get_handler(&self, path: &str, handler: DiscoveryHandler);
}
