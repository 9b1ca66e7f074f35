//! Configuration System
//!
//! Layered configuration: built-in defaults, then the user-level file, then the
//! workspace files, then `CONJURE_*` environment variables. Tests included.

use crate::error::GenerationError;
use crate::field::FieldMode;
use crate::logging::LoggingConfig;
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod global_file;
    pub mod workspace_file;
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConjureConfig {
    /// Where recipe files are loaded from
    #[serde(default)]
    pub content: ContentConfig,

    /// Field deserialization settings
    #[serde(default)]
    pub fields: FieldConfig,

    /// Register the built-in function library
    #[serde(default = "default_true")]
    pub builtins: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Recipe directories; relative paths resolve against the workspace root
    #[serde(default = "default_recipe_dirs")]
    pub recipe_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Reject fields without a `name` or `label`
    #[serde(default)]
    pub strict: bool,
}

fn default_true() -> bool {
    true
}

fn default_recipe_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("recipes")]
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            recipe_dirs: default_recipe_dirs(),
        }
    }
}

impl ContentConfig {
    /// Recipe directories made absolute against `workspace_root`.
    pub fn resolve_dirs(&self, workspace_root: &Path) -> Vec<PathBuf> {
        self.recipe_dirs
            .iter()
            .map(|dir| {
                if dir.is_absolute() {
                    dir.clone()
                } else {
                    workspace_root.join(dir)
                }
            })
            .collect()
    }
}

impl FieldConfig {
    pub fn mode(&self) -> FieldMode {
        if self.strict {
            FieldMode::Strict
        } else {
            FieldMode::Permissive
        }
    }
}

impl Default for ConjureConfig {
    fn default() -> Self {
        Self {
            content: ContentConfig::default(),
            fields: FieldConfig::default(),
            builtins: default_true(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Content(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Content(msg) => write!(f, "Content: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ConjureConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for dir in &self.content.recipe_dirs {
            if dir.as_os_str().is_empty() {
                errors.push(ValidationError::Content(
                    "Recipe directory cannot be empty".to_string(),
                ));
            }
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`ConjureConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    pub fn load(workspace_root: &Path) -> Result<ConjureConfig, GenerationError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder
            .add_source(environment())
            .build()?
            .try_deserialize::<ConjureConfig>()?;
        Self::validated(config)
    }

    /// Load configuration from one explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<ConjureConfig, GenerationError> {
        let config = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(environment())
            .build()?
            .try_deserialize::<ConjureConfig>()?;
        Self::validated(config)
    }

    /// Path of the user-level configuration file, if `HOME` is set.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }

    fn validated(config: ConjureConfig) -> Result<ConjureConfig, GenerationError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            GenerationError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CONJURE")
        .separator("__")
        .try_parsing(true)
}
