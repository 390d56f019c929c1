//! The catalog registry.
//!
//! A [`Registry`] owns every declared resource plus the settings that shape
//! the discovery documents (API version, base path, discovery path). It can
//! render documents on its own, or be bound to a [`DiscoveryServer`] so the
//! documents are served over HTTP.
//!
//! ## Binding order
//!
//! Resources created after [`Registry::configure`] get a route of their own
//! immediately. Resources created before it are listed in the catalog but
//! never get a route; `configure` does not bind them retroactively.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use tracing::{info, warn};

use super::binding::{DiscoveryHandler, DiscoveryRequest, DiscoveryServer};
use super::document::{CatalogDocument, CatalogEntry, Envelope, ResourceDocument};
use super::error::CatalogError;
use super::resource::{Resource, ResourceOptions, SharedResource};

/// Path the catalog is served at when nothing else is configured.
pub const DEFAULT_DISCOVERY_URL: &str = "/resources.json";

/// API version reported when neither the options nor the server supply one.
pub const DEFAULT_API_VERSION: &str = "0.1";

/// Options accepted by [`Registry::configure`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryOptions {
    /// Path of the catalog document. Ignored when `swagger_path` is set.
    #[serde(default)]
    pub discovery_url: Option<String>,

    /// Serves the catalog here and prefixes every resource route with it.
    #[serde(default)]
    pub swagger_path: Option<String>,

    /// API version reported in every envelope.
    #[serde(default)]
    pub version: Option<String>,

    /// Fixed base path. When absent it is derived from the request's host.
    #[serde(default)]
    pub base_path: Option<String>,
}

impl DiscoveryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discovery_url(mut self, url: impl Into<String>) -> Self {
        self.discovery_url = Some(url.into());
        self
    }

    pub fn swagger_path(mut self, path: impl Into<String>) -> Self {
        self.swagger_path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }
}

struct RegistryState {
    resources: Vec<SharedResource>,
    server: Option<Arc<dyn DiscoveryServer>>,
    api_version: String,
    base_path: Option<String>,
    swagger_path: String,
    discovery_url: String,
}

impl RegistryState {
    fn envelope(&self, request: &DiscoveryRequest) -> Envelope {
        let base_path = match &self.base_path {
            Some(base_path) => base_path.clone(),
            None => {
                let host = request.host().unwrap_or_else(|| {
                    warn!("Discovery request without host header; basePath will be incomplete");
                    ""
                });
                format!("http://{}", host)
            }
        };

        Envelope::new(self.api_version.clone(), base_path)
    }

    fn catalog_document(&self, request: &DiscoveryRequest) -> CatalogDocument {
        let apis = self
            .resources
            .iter()
            .map(|resource| CatalogEntry {
                path: format!("{}{}", self.swagger_path, resource.read().path()),
                description: String::new(),
            })
            .collect();

        CatalogDocument {
            envelope: self.envelope(request),
            apis,
        }
    }

    fn resource_document(
        &self,
        resource: &SharedResource,
        request: &DiscoveryRequest,
    ) -> ResourceDocument {
        let resource = resource.read();

        ResourceDocument {
            envelope: self.envelope(request),
            resource_path: resource.path().to_string(),
            apis: resource.apis().to_vec(),
            models: resource.models().clone(),
        }
    }
}

/// Catalog of declared resources.
///
/// Cloning yields another handle to the same catalog. Independent catalogs
/// come from separate [`Registry::new`] calls.
#[derive(Clone)]
pub struct Registry {
    state: Arc<RwLock<RegistryState>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("Registry")
            .field("resources", &state.resources.len())
            .field("bound", &state.server.is_some())
            .field("api_version", &state.api_version)
            .field("base_path", &state.base_path)
            .field("swagger_path", &state.swagger_path)
            .field("discovery_url", &state.discovery_url)
            .finish()
    }
}

impl Registry {
    /// Create an empty, unbound registry.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState {
                resources: Vec::new(),
                server: None,
                api_version: DEFAULT_API_VERSION.to_string(),
                base_path: None,
                swagger_path: String::new(),
                discovery_url: DEFAULT_DISCOVERY_URL.to_string(),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bind the registry to `server` and register the catalog route.
    ///
    /// Every call registers the catalog route again and replaces the API
    /// version and base path. A `swagger_path` sticks until another call
    /// supplies a new one.
    pub fn configure(&self, server: Arc<dyn DiscoveryServer>, options: DiscoveryOptions) {
        let discovery_url = {
            let mut state = self.write();

            let discovery_url = match options.swagger_path {
                Some(swagger_path) => {
                    state.swagger_path = swagger_path.clone();
                    swagger_path
                }
                None => options
                    .discovery_url
                    .unwrap_or_else(|| DEFAULT_DISCOVERY_URL.to_string()),
            };

            state.api_version = options
                .version
                .or_else(|| server.version())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
            state.base_path = options.base_path;
            state.discovery_url = discovery_url.clone();
            state.server = Some(server.clone());

            info!(
                discovery_url = %discovery_url,
                api_version = %state.api_version,
                base_path = ?state.base_path,
                "Registry bound to server"
            );
            discovery_url
        };

        server.register_get_handler(&discovery_url, catalog_handler(Arc::downgrade(&self.state)));
    }

    /// Declare a new resource and, if a server is bound, its route.
    ///
    /// The returned handle stays usable whether or not a route was bound.
    pub fn create_resource(&self, path: &str, options: ResourceOptions) -> SharedResource {
        let resource = SharedResource::new(Resource::new(path, options));

        let binding = {
            let mut state = self.write();
            state.resources.push(resource.clone());
            state
                .server
                .clone()
                .map(|server| (server, format!("{}{}", state.swagger_path, path)))
        };

        let Some((server, route)) = binding else {
            info!(resource = path, "Resource declared without a bound server");
            return resource;
        };

        info!(resource = path, route = %route, "Resource declared");

        let handler = resource_handler(Arc::downgrade(&self.state), resource.clone());
        server.register_get_handler(&route, handler);

        resource
    }

    /// Render the catalog document without going through a server.
    pub fn catalog_document(&self, request: &DiscoveryRequest) -> CatalogDocument {
        self.read().catalog_document(request)
    }

    /// Render a resource document without going through a server.
    pub fn resource_document(
        &self,
        resource: &SharedResource,
        request: &DiscoveryRequest,
    ) -> ResourceDocument {
        self.read().resource_document(resource, request)
    }

    /// Build the envelope shared by both documents.
    pub fn envelope(&self, request: &DiscoveryRequest) -> Envelope {
        self.read().envelope(request)
    }

    /// All declared resources, in declaration order.
    pub fn resources(&self) -> Vec<SharedResource> {
        self.read().resources.clone()
    }

    pub fn is_bound(&self) -> bool {
        self.read().server.is_some()
    }

    pub fn api_version(&self) -> String {
        self.read().api_version.clone()
    }

    pub fn base_path(&self) -> Option<String> {
        self.read().base_path.clone()
    }

    pub fn swagger_path(&self) -> String {
        self.read().swagger_path.clone()
    }

    pub fn discovery_url(&self) -> String {
        self.read().discovery_url.clone()
    }
}

/// Handlers hold the registry weakly; the registry already owns the server.
fn catalog_handler(registry: Weak<RwLock<RegistryState>>) -> DiscoveryHandler {
    Arc::new(move |request: &DiscoveryRequest| -> Result<Value, CatalogError> {
        let state = registry.upgrade().ok_or(CatalogError::RegistryDropped)?;
        let state = state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(serde_json::to_value(state.catalog_document(request))?)
    })
}

fn resource_handler(
    registry: Weak<RwLock<RegistryState>>,
    resource: SharedResource,
) -> DiscoveryHandler {
    Arc::new(move |request: &DiscoveryRequest| -> Result<Value, CatalogError> {
        let state = registry.upgrade().ok_or(CatalogError::RegistryDropped)?;
        let state = state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(serde_json::to_value(state.resource_document(&resource, request))?)
    })
}
