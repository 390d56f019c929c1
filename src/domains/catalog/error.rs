//! Catalog-specific error types.

use thiserror::Error;

/// Errors that can occur in the catalog domain.
///
/// Registration itself never fails. These errors surface when a caller
/// converts loosely-typed JSON into catalog types, or when a discovery
/// handler cannot render its document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The operation payload could not be read as an operation object.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The model definitions could not be read as a name -> definition map.
    #[error("Invalid models: {0}")]
    InvalidModels(String),

    /// The HTTP method is not one of GET, POST, PUT or DELETE.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A discovery route outlived the registry that bound it.
    #[error("Registry is no longer available")]
    RegistryDropped,

    /// A document could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create a new "invalid operation" error.
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Create a new "invalid models" error.
    pub fn invalid_models(msg: impl Into<String>) -> Self {
        Self::InvalidModels(msg.into())
    }

    /// Create a new "unsupported method" error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod(method.into())
    }
}
