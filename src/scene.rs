//! Scene-control affordances derived from the registered recipes.

use crate::recipe::RecipeModel;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Resolves a label key into display text.
pub trait Localizer {
    fn localize(&self, key: &str) -> String;
}

/// Returns every key unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityLocalizer;

impl Localizer for IdentityLocalizer {
    fn localize(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Looks keys up in a flat catalog, falling back to the key itself.
#[derive(Debug, Default, Clone)]
pub struct CatalogLocalizer {
    entries: HashMap<String, String>,
}

impl CatalogLocalizer {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl Localizer for CatalogLocalizer {
    fn localize(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Opens an interactive generation window for a recipe.
pub trait WindowOpener: Send + Sync {
    fn open(&self, recipe: &RecipeModel);
}

/// Opener for hosts without a window layer; only logs the request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWindowOpener;

impl WindowOpener for NoopWindowOpener {
    fn open(&self, recipe: &RecipeModel) {
        debug!(recipe = %recipe.name, "Window open requested without a window layer");
    }
}

/// A scene-control button for one recipe.
#[derive(Serialize)]
pub struct SceneButton {
    pub icon: String,
    pub name: String,
    pub title: String,
    pub visible: bool,
    pub button: bool,
    #[serde(skip)]
    recipe: Arc<RecipeModel>,
    #[serde(skip)]
    opener: Arc<dyn WindowOpener>,
}

impl SceneButton {
    pub(crate) fn new(
        recipe: Arc<RecipeModel>,
        localizer: &dyn Localizer,
        opener: Arc<dyn WindowOpener>,
    ) -> Self {
        Self {
            icon: recipe.icon.clone(),
            name: recipe.name.clone(),
            title: localizer.localize(&recipe.label),
            visible: true,
            button: true,
            recipe,
            opener,
        }
    }

    pub fn recipe(&self) -> &RecipeModel {
        &self.recipe
    }

    /// Open the generation window for this button's recipe.
    pub fn on_click(&self) {
        self.opener.open(&self.recipe);
    }
}

impl fmt::Debug for SceneButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneButton")
            .field("icon", &self.icon)
            .field("name", &self.name)
            .field("title", &self.title)
            .field("visible", &self.visible)
            .field("button", &self.button)
            .finish()
    }
}
