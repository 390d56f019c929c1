//! Resources and the API paths they own.
//!
//! A [`Resource`] groups API paths under one logical prefix together with the
//! data models its operations refer to. Everything here is append-only: APIs
//! are created on first reference and operations are only ever pushed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use super::error::CatalogError;
use super::operation::{HttpMethod, Operation};

/// One concrete path within a resource and the operations it supports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Api {
    path: String,

    /// Free-text description, empty unless set by the caller.
    pub description: String,

    operations: Vec<Operation>,
}

impl Api {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            description: String::new(),
            operations: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Operations in declaration order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

/// Options accepted when a resource is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceOptions {
    /// Model name -> definition, rendered verbatim in the resource document.
    #[serde(default)]
    pub models: Map<String, Value>,
}

impl ResourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model definition.
    pub fn model(mut self, name: impl Into<String>, definition: Value) -> Self {
        self.models.insert(name.into(), definition);
        self
    }

    /// Read options from an untyped JSON object such as `{"models": {...}}`.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        serde_json::from_value(value).map_err(|e| CatalogError::invalid_models(e.to_string()))
    }
}

/// The API surface of one logical path prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    path: String,
    models: Map<String, Value>,
    apis: Vec<Api>,
}

impl Resource {
    /// Create an empty resource.
    pub fn new(path: impl Into<String>, options: ResourceOptions) -> Self {
        Self {
            path: path.into(),
            models: options.models,
            apis: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn models(&self) -> &Map<String, Value> {
        &self.models
    }

    /// All APIs, in the order their paths were first referenced.
    pub fn apis(&self) -> &[Api] {
        &self.apis
    }

    /// Look up an API without creating it.
    pub fn find_api(&self, path: &str) -> Option<&Api> {
        self.apis.iter().find(|api| api.path == path)
    }

    /// Return the API for `path`, creating an empty one on first reference.
    pub fn api(&mut self, path: &str) -> &mut Api {
        let index = match self.apis.iter().position(|api| api.path == path) {
            Some(index) => index,
            None => {
                self.apis.push(Api::new(path));
                self.apis.len() - 1
            }
        };
        &mut self.apis[index]
    }

    /// Declare `operation` for `method` at `path`.
    ///
    /// When `summary` is given it replaces whatever summary the operation
    /// carried; otherwise the operation's own summary is kept. Custom fields
    /// named `httpMethod` or `summary` never override the registered values.
    pub fn register(
        &mut self,
        method: HttpMethod,
        path: &str,
        summary: Option<&str>,
        mut operation: Operation,
    ) {
        operation.assign(method, summary);

        debug!(resource = %self.path, api = path, %method, "Registering operation");
        self.api(path).operations.push(operation);
    }

    pub fn get(&mut self, path: &str, summary: Option<&str>, operation: Operation) {
        self.register(HttpMethod::Get, path, summary, operation);
    }

    pub fn post(&mut self, path: &str, summary: Option<&str>, operation: Operation) {
        self.register(HttpMethod::Post, path, summary, operation);
    }

    pub fn put(&mut self, path: &str, summary: Option<&str>, operation: Operation) {
        self.register(HttpMethod::Put, path, summary, operation);
    }

    pub fn delete(&mut self, path: &str, summary: Option<&str>, operation: Operation) {
        self.register(HttpMethod::Delete, path, summary, operation);
    }
}

/// A resource shared between the code declaring it and the discovery
/// handlers rendering it.
///
/// Declarations are expected to finish before discovery traffic starts; the
/// lock only keeps concurrent access memory safe.
#[derive(Debug, Clone)]
pub struct SharedResource {
    inner: Arc<RwLock<Resource>>,
}

impl SharedResource {
    pub fn new(resource: Resource) -> Self {
        Self {
            inner: Arc::new(RwLock::new(resource)),
        }
    }

    /// Read access to the resource.
    pub fn read(&self) -> RwLockReadGuard<'_, Resource> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the resource, e.g. to reach [`Resource::api`].
    pub fn write(&self) -> RwLockWriteGuard<'_, Resource> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn path(&self) -> String {
        self.read().path.clone()
    }

    /// Whether both handles point at the same resource.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Set the description of the API at `path`, creating it if needed.
    pub fn describe(&self, path: &str, description: impl Into<String>) {
        self.write().api(path).description = description.into();
    }

    pub fn register(
        &self,
        method: HttpMethod,
        path: &str,
        summary: Option<&str>,
        operation: Operation,
    ) {
        self.write().register(method, path, summary, operation);
    }

    pub fn get(&self, path: &str, summary: Option<&str>, operation: Operation) {
        self.register(HttpMethod::Get, path, summary, operation);
    }

    pub fn post(&self, path: &str, summary: Option<&str>, operation: Operation) {
        self.register(HttpMethod::Post, path, summary, operation);
    }

    pub fn put(&self, path: &str, summary: Option<&str>, operation: Operation) {
        self.register(HttpMethod::Put, path, summary, operation);
    }

    pub fn delete(&self, path: &str, summary: Option<&str>, operation: Operation) {
        self.register(HttpMethod::Delete, path, summary, operation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_lookup_returns_same_entry() {
        let mut resource = Resource::new("/pets", ResourceOptions::default());

        let first: *const Api = resource.api("/pets");
        let second: *const Api = resource.api("/pets");
        assert!(std::ptr::eq(first, second));

        let other: *const Api = resource.api("/pets/{id}");
        assert!(!std::ptr::eq(first, other));
        assert_eq!(resource.apis().len(), 2);
    }

    #[test]
    fn test_new_api_is_empty() {
        let mut resource = Resource::new("/pets", ResourceOptions::default());
        let api = resource.api("/pets");
        assert_eq!(api.path(), "/pets");
        assert_eq!(api.description, "");
        assert!(api.operations().is_empty());
    }

    #[test]
    fn test_operations_keep_declaration_order() {
        let mut resource = Resource::new("/pets", ResourceOptions::default());
        resource.delete("/pets/{id}", Some("Remove"), Operation::new());
        resource.get("/pets/{id}", Some("Fetch"), Operation::new());
        resource.put("/pets/{id}", Some("Replace"), Operation::new());
        resource.get("/pets/{id}", Some("Fetch again"), Operation::new());

        let api = resource.find_api("/pets/{id}").unwrap();
        let declared: Vec<_> = api
            .operations()
            .iter()
            .map(|op| (op.http_method.unwrap(), op.summary.as_deref().unwrap_or_default()))
            .collect();
        assert_eq!(
            declared,
            vec![
                (HttpMethod::Delete, "Remove"),
                (HttpMethod::Get, "Fetch"),
                (HttpMethod::Put, "Replace"),
                (HttpMethod::Get, "Fetch again"),
            ]
        );
    }

    #[test]
    fn test_summary_argument_overrides_operation_summary() {
        let mut resource = Resource::new("/pets", ResourceOptions::default());
        resource.post("/pets", None, Operation::new().summary("Kept"));
        resource.post("/pets", Some("S"), Operation::new().summary("Replaced"));

        let ops = resource.find_api("/pets").unwrap().operations();
        assert_eq!(ops[0].summary.as_deref(), Some("Kept"));
        assert_eq!(ops[1].summary.as_deref(), Some("S"));
    }

    #[test]
    fn test_register_overwrites_preset_method() {
        let mut resource = Resource::new("/pets", ResourceOptions::default());
        let mut op = Operation::new();
        op.http_method = Some(HttpMethod::Delete);
        resource.get("/pets", None, op);

        let ops = resource.find_api("/pets").unwrap().operations();
        assert_eq!(ops[0].http_method, Some(HttpMethod::Get));
    }

    #[test]
    fn test_custom_fields_cannot_override_method_or_summary() {
        let mut resource = Resource::new("/pets", ResourceOptions::default());
        resource.get(
            "/pets",
            Some("S"),
            Operation::new()
                .field("httpMethod", "PATCH")
                .field("summary", "other"),
        );

        let mut op = Operation::new();
        op.extra.insert("httpMethod".into(), json!("PATCH"));
        resource.delete("/pets", None, op);

        let api = serde_json::to_value(resource.find_api("/pets").unwrap()).unwrap();
        assert_eq!(
            api["operations"],
            json!([
                {"httpMethod": "GET", "summary": "S"},
                {"httpMethod": "DELETE", "summary": ""}
            ])
        );
    }

    #[test]
    fn test_options_from_value() {
        let options = ResourceOptions::from_value(json!({
            "models": {"Pet": {"id": "integer"}}
        }))
        .unwrap();
        assert_eq!(options.models.get("Pet"), Some(&json!({"id": "integer"})));

        assert!(ResourceOptions::from_value(json!({"models": 3})).is_err());
        assert!(ResourceOptions::from_value(json!({})).unwrap().models.is_empty());
    }

    #[test]
    fn test_shared_resource_handles_see_same_state() {
        let shared = SharedResource::new(Resource::new("/store", ResourceOptions::default()));
        let handle = shared.clone();

        handle.get("/store/inventory", Some("Inventory"), Operation::new());
        shared.describe("/store/inventory", "Stock levels");

        let resource = shared.read();
        let api = resource.find_api("/store/inventory").unwrap();
        assert_eq!(api.description, "Stock levels");
        assert_eq!(api.operations().len(), 1);
        assert!(shared.ptr_eq(&handle));
    }
}
