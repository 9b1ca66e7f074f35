//! Recipe content loading from directories of JSON and TOML files.

use crate::error::GenerationError;
use crate::hooks::{Collaborator, RecipeRegistrar};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Collaborator registering every recipe file found under a set of directories.
#[derive(Debug, Clone, Default)]
pub struct RecipeDirectory {
    roots: Vec<PathBuf>,
}

impl RecipeDirectory {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Recipe files under every root, sorted per root for a stable registration order.
    pub fn recipe_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for root in &self.roots {
            if !root.is_dir() {
                warn!(path = %root.display(), "Recipe directory not found, skipping");
                continue;
            }
            let mut found: Vec<PathBuf> = WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| is_recipe_file(path))
                .collect();
            found.sort();
            files.extend(found);
        }
        files
    }
}

fn is_recipe_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json") | Some("toml")
    )
}

/// Parse one recipe file into plain recipe objects.
///
/// A file holds a single recipe, an array of recipes, or a table with a `recipes` array.
pub fn read_recipe_file(path: &Path) -> Result<Vec<Value>, GenerationError> {
    let text = std::fs::read_to_string(path).map_err(|e| GenerationError::content(path, e))?;
    let value: Value = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&text).map_err(|e| GenerationError::content(path, e))?,
        _ => serde_json::from_str(&text).map_err(|e| GenerationError::content(path, e))?,
    };
    Ok(match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("recipes") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                map.insert("recipes".to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        other => vec![other],
    })
}

impl Collaborator for RecipeDirectory {
    fn name(&self) -> &str {
        "recipe-directory"
    }

    fn register_recipes(&self, registrar: &mut RecipeRegistrar<'_>) -> Result<(), GenerationError> {
        let mut first_failure = None;
        let mut failed = 0usize;
        for path in self.recipe_files() {
            let recipes = match read_recipe_file(&path) {
                Ok(recipes) => recipes,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping recipe file");
                    failed += 1;
                    first_failure.get_or_insert(e);
                    continue;
                }
            };
            let mut loaded = 0usize;
            for (index, recipe) in recipes.iter().enumerate() {
                match registrar.add(recipe) {
                    Ok(()) => loaded += 1,
                    Err(e) => {
                        warn!(path = %path.display(), index, error = %e, "Skipping recipe entry");
                        failed += 1;
                        first_failure.get_or_insert_with(|| {
                            GenerationError::content(&path, format!("entry {}: {}", index, e))
                        });
                    }
                }
            }
            debug!(path = %path.display(), loaded, total = recipes.len(), "Loaded recipe file");
        }
        match first_failure {
            Some(GenerationError::Content { path, reason }) if failed > 1 => {
                Err(GenerationError::Content {
                    path,
                    reason: format!("{} (and {} more failures)", reason, failed - 1),
                })
            }
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
