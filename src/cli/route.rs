//! CLI route: run context and command dispatch onto the generation registry.

use crate::builtin::Builtins;
use crate::cli::help::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_recipes_json, format_recipes_text, format_roll_json, format_roll_text,
};
use crate::config::{ConfigLoader, ConjureConfig};
use crate::content::RecipeDirectory;
use crate::error::GenerationError;
use crate::functions::FieldValues;
use crate::hooks::HookBus;
use crate::registry::GenerationRegistry;
use crate::scene::{IdentityLocalizer, NoopWindowOpener};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Runtime context for CLI execution: workspace, loaded config and initialized registry.
pub struct RunContext {
    registry: Arc<GenerationRegistry>,
    workspace_root: PathBuf,
    config: ConjureConfig,
}

impl RunContext {
    /// Load config for the workspace (or from `config_path`) and initialize the registry.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, GenerationError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::from_config(workspace_root, config))
    }

    /// Build a context from an already-loaded configuration.
    pub fn from_config(workspace_root: PathBuf, config: ConjureConfig) -> Self {
        let bus = build_hook_bus(&config, &workspace_root);
        let mut registry = GenerationRegistry::with_field_mode(config.fields.mode());
        registry.init(&bus);
        Self {
            registry: Arc::new(registry),
            workspace_root,
            config,
        }
    }

    pub fn registry(&self) -> Arc<GenerationRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &ConjureConfig {
        &self.config
    }

    /// Execute one command and return its rendered output.
    pub async fn execute(&self, command: &Commands) -> Result<String, GenerationError> {
        let started = Instant::now();
        let output = self.dispatch(command).await;
        info!(
            command = command_name(command),
            ok = output.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        output
    }

    async fn dispatch(&self, command: &Commands) -> Result<String, GenerationError> {
        match command {
            Commands::Recipes { format } => {
                let buttons = self
                    .registry
                    .scene_buttons(&IdentityLocalizer, Arc::new(NoopWindowOpener));
                if format == "json" {
                    format_recipes_json(&buttons)
                } else {
                    Ok(format_recipes_text(&buttons))
                }
            }
            Commands::Roll { recipe, format } => {
                let data = self.registry.roll_recipe(recipe)?;
                if format == "json" {
                    format_roll_json(&data)
                } else {
                    Ok(format_roll_text(&data))
                }
            }
            Commands::Generate {
                function,
                args,
                fields,
            } => {
                let values = parse_field_values(fields)?;
                self.registry.generate(function, &values, args).await
            }
            Commands::Process {
                function,
                input,
                args,
            } => self.registry.post_process(function, input, args),
        }
    }
}

/// Subscribers for `init`: the built-in library (when enabled) then the recipe directories.
pub fn build_hook_bus(config: &ConjureConfig, workspace_root: &Path) -> HookBus {
    let mut bus = HookBus::new();
    if config.builtins {
        bus.subscribe(Arc::new(Builtins));
    }
    bus.subscribe(Arc::new(RecipeDirectory::new(
        config.content.resolve_dirs(workspace_root),
    )));
    bus
}

/// Parse repeated `name=value` arguments into field values.
pub fn parse_field_values(pairs: &[String]) -> Result<FieldValues, GenerationError> {
    let mut values = FieldValues::new();
    for pair in pairs {
        let (name, value) = pair.split_once('=').ok_or_else(|| {
            GenerationError::InvalidField(format!("expected name=value, got '{}'", pair))
        })?;
        values.insert(name.trim().to_string(), value.to_string());
    }
    Ok(values)
}
