//! In-process route table for discovery handlers.
//!
//! [`RouteTable`] is the server capability the registry binds its discovery
//! routes to. It only stores handlers by exact path; the HTTP transport looks
//! them up per request, so routes added after the listener starts are served
//! too.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use crate::domains::catalog::{CatalogError, DiscoveryHandler, DiscoveryRequest, DiscoveryServer};

/// Exact-match table of GET handlers.
///
/// Clones share the same table. When a path is registered twice the first
/// handler is kept.
#[derive(Clone, Default)]
pub struct RouteTable {
    version: Option<String>,
    routes: Arc<RwLock<HashMap<String, DiscoveryHandler>>>,
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("version", &self.version)
            .field("paths", &self.paths())
            .finish()
    }
}

impl RouteTable {
    /// Create an empty table with no server version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table that reports `version` as the server version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Default::default()
        }
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let routes = self.routes.read().unwrap_or_else(PoisonError::into_inner);
        let mut paths: Vec<_> = routes.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    /// Render the document registered at `path`, if any.
    pub fn dispatch(
        &self,
        path: &str,
        request: &DiscoveryRequest,
    ) -> Option<Result<Value, CatalogError>> {
        // Clone the handler out so rendering runs without the table locked.
        let handler = self
            .routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()?;

        Some(handler(request))
    }
}

impl DiscoveryServer for RouteTable {
    fn version(&self) -> Option<String> {
        self.version.clone()
    }

    fn register_get_handler(&self, path: &str, handler: DiscoveryHandler) {
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);

        if routes.contains_key(path) {
            warn!(path, "Route already registered, keeping the first handler");
            return;
        }

        debug!(path, "Registered discovery route");
        routes.insert(path.to_string(), handler);
    }
}
