//! Wire shapes of the two discovery documents.

use serde::Serialize;
use serde_json::{Map, Value};

use super::resource::Api;

/// Swagger specification version every document declares.
pub const SWAGGER_VERSION: &str = "1.0";

/// Fields shared by the catalog and resource documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub swagger_version: &'static str,
    pub api_version: String,
    pub base_path: String,
}

impl Envelope {
    pub fn new(api_version: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            swagger_version: SWAGGER_VERSION,
            api_version: api_version.into(),
            base_path: base_path.into(),
        }
    }
}

/// One resource listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub path: String,
    pub description: String,
}

/// Top-level listing served at the discovery path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogDocument {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub apis: Vec<CatalogEntry>,
}

/// Detail document for a single resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDocument {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub resource_path: String,
    pub apis: Vec<Api>,
    pub models: Map<String, Value>,
}
