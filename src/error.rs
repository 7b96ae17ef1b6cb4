//! Error types for the association layer
//!
//! Provides error handling for schema registration, association
//! configuration, and delegated store operations.

use std::fmt;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for schema and store operations
#[derive(Debug, Clone)]
pub enum ModelError {
    /// Store-level failure, propagated verbatim from the backing store
    Database(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Invalid registration-time configuration
    Configuration(String),
    /// Association lookup or construction failed
    Association(String),
    /// Model name not present in the model registry
    UnknownModel(String),
    /// Query building error
    Query(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Database(msg) => write!(f, "Database error: {}", msg),
            ModelError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ModelError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ModelError::Association(msg) => write!(f, "Association error: {}", msg),
            ModelError::UnknownModel(name) => write!(f, "Model '{}' is not registered", name),
            ModelError::Query(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

// Convert from serde_json errors
impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}
