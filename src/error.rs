//! Error types for the content-generation registry.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error type returned by collaborator-supplied callables.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Identifies one of the four registry tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    Recipe,
    GenerationFunction,
    PostProcessingFunction,
    FormActionFunction,
}

impl RegistryKind {
    /// Human-readable label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            RegistryKind::Recipe => "Recipe",
            RegistryKind::GenerationFunction => "Generation function",
            RegistryKind::PostProcessingFunction => "Post-Processing function",
            RegistryKind::FormActionFunction => "Form-action function",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised by the registry, the data models and the ambient layers.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{kind} '{key}' not registered.")]
    NotRegistered { kind: RegistryKind, key: String },

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Field is missing required attribute '{field}'")]
    MissingField { field: &'static str },

    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    /// Failure raised inside a registered callable, passed through as-is.
    #[error(transparent)]
    Function(BoxError),

    #[error("Failed to load content from {path:?}: {reason}")]
    Content { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GenerationError {
    pub fn not_registered(kind: RegistryKind, key: impl Into<String>) -> Self {
        GenerationError::NotRegistered {
            kind,
            key: key.into(),
        }
    }

    pub fn content(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        GenerationError::Content {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns the table and requested key when this is a lookup miss.
    pub fn as_not_registered(&self) -> Option<(RegistryKind, &str)> {
        match self {
            GenerationError::NotRegistered { kind, key } => Some((*kind, key.as_str())),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for GenerationError {
    fn from(err: config::ConfigError) -> Self {
        GenerationError::Config(err.to_string())
    }
}
