//! Generation registry: four independent name-keyed tables of recipes and functions.
//!
//! Keys are lowercased on insert and on lookup. A second registration under an equal
//! key replaces the first. Tables keep first-insertion order so derived views are stable.

use crate::error::{GenerationError, RegistryKind};
use crate::field::{FieldMode, FieldModel};
use crate::functions::{FieldValues, FormActionFn, FormData, GeneratorFunction, PostProcessFn};
use crate::hooks::{Hook, HookBus};
use crate::recipe::RecipeModel;
use crate::scene::{Localizer, SceneButton, WindowOpener};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

fn table_key(key: &str) -> String {
    key.to_lowercase()
}

/// Process-wide content-generation registry, passed explicitly to its users.
pub struct GenerationRegistry {
    recipes: IndexMap<String, Arc<RecipeModel>>,
    gen_funcs: IndexMap<String, Arc<dyn GeneratorFunction>>,
    post_proc_funcs: IndexMap<String, PostProcessFn>,
    form_action_funcs: IndexMap<String, FormActionFn>,
    field_mode: FieldMode,
}

impl GenerationRegistry {
    /// Create an empty registry with permissive field deserialization.
    pub fn new() -> Self {
        Self::with_field_mode(FieldMode::Permissive)
    }

    pub fn with_field_mode(field_mode: FieldMode) -> Self {
        Self {
            recipes: IndexMap::new(),
            gen_funcs: IndexMap::new(),
            post_proc_funcs: IndexMap::new(),
            form_action_funcs: IndexMap::new(),
            field_mode,
        }
    }

    pub fn field_mode(&self) -> FieldMode {
        self.field_mode
    }

    /// Broadcast the four registration hooks, in order, to every subscriber on `bus`.
    ///
    /// Not idempotent: a second call re-runs every subscriber and overwrites entries.
    pub fn init(&mut self, bus: &HookBus) {
        let mut failures = 0;
        for hook in Hook::ALL {
            failures += bus.call_all(hook, self);
        }
        info!(
            recipes = self.recipes.len(),
            generator_functions = self.gen_funcs.len(),
            post_processing_functions = self.post_proc_funcs.len(),
            form_action_functions = self.form_action_funcs.len(),
            subscribers = bus.len(),
            failures,
            "Generation registry initialized"
        );
    }

    /// Deserialize a recipe and register it under its lowercased name.
    pub fn add_recipe(&mut self, data: &Value) -> Result<(), GenerationError> {
        let recipe = RecipeModel::from_object_with(data, self.field_mode)?;
        self.add_recipe_model(recipe);
        Ok(())
    }

    pub fn add_recipe_model(&mut self, recipe: RecipeModel) {
        let key = table_key(&recipe.name);
        log_insert(RegistryKind::Recipe, &key, self.recipes.contains_key(&key));
        self.recipes.insert(key, Arc::new(recipe));
    }

    pub fn add_generator_function(&mut self, key: &str, func: Arc<dyn GeneratorFunction>) {
        let key = table_key(key);
        log_insert(
            RegistryKind::GenerationFunction,
            &key,
            self.gen_funcs.contains_key(&key),
        );
        self.gen_funcs.insert(key, func);
    }

    pub fn add_post_processing_function(&mut self, key: &str, func: PostProcessFn) {
        let key = table_key(key);
        log_insert(
            RegistryKind::PostProcessingFunction,
            &key,
            self.post_proc_funcs.contains_key(&key),
        );
        self.post_proc_funcs.insert(key, func);
    }

    pub fn add_form_action_function(&mut self, key: &str, func: FormActionFn) {
        let key = table_key(key);
        log_insert(
            RegistryKind::FormActionFunction,
            &key,
            self.form_action_funcs.contains_key(&key),
        );
        self.form_action_funcs.insert(key, func);
    }

    /// Run the generator function registered under `key`.
    pub async fn generate(
        &self,
        key: &str,
        fields: &FieldValues,
        args: &[String],
    ) -> Result<String, GenerationError> {
        let func = self
            .gen_funcs
            .get(&table_key(key))
            .ok_or_else(|| GenerationError::not_registered(RegistryKind::GenerationFunction, key))?;
        func.generate(fields, args)
            .await
            .map_err(GenerationError::Function)
    }

    /// Transform `input` with the post-processing function registered under `key`.
    pub fn post_process(
        &self,
        key: &str,
        input: &str,
        args: &[String],
    ) -> Result<String, GenerationError> {
        let func = self.post_proc_funcs.get(&table_key(key)).ok_or_else(|| {
            GenerationError::not_registered(RegistryKind::PostProcessingFunction, key)
        })?;
        func(input, args).map_err(GenerationError::Function)
    }

    /// Run the form-action function registered under `key` against `data`.
    pub fn exec_form_action(
        &self,
        key: &str,
        data: &mut FormData,
        args: &[String],
    ) -> Result<(), GenerationError> {
        let func = self.form_action_funcs.get(&table_key(key)).ok_or_else(|| {
            GenerationError::not_registered(RegistryKind::FormActionFunction, key)
        })?;
        func(data, args).map_err(GenerationError::Function)
    }

    pub fn get_recipe(&self, name: &str) -> Result<&Arc<RecipeModel>, GenerationError> {
        self.recipes
            .get(&table_key(name))
            .ok_or_else(|| GenerationError::not_registered(RegistryKind::Recipe, name))
    }

    /// Fold `value` through the field's post-processing steps in order.
    pub fn apply_post_processing(
        &self,
        field: &FieldModel,
        value: String,
    ) -> Result<String, GenerationError> {
        field
            .post_proc()
            .iter()
            .try_fold(value, |acc, step| self.post_process(&step.function, &acc, &step.args))
    }

    /// Pick an option for `field`, post-process it, store it and propagate it.
    pub fn resolve_field(
        &self,
        field: &FieldModel,
        data: &mut FormData,
    ) -> Result<String, GenerationError> {
        let value = self.apply_post_processing(field, field.option())?;
        if let Some(name) = field.name() {
            data.set(name, value.clone());
        }
        data.propagate(field.propagates(), &value);
        Ok(value)
    }

    /// Resolve every field of a recipe, in order, into fresh form data.
    pub fn roll_recipe(&self, name: &str) -> Result<FormData, GenerationError> {
        let recipe = self.get_recipe(name)?;
        let mut data = FormData::new(recipe.name.clone());
        for field in &recipe.fields {
            self.resolve_field(field, &mut data)?;
        }
        debug!(recipe = %recipe.name, fields = data.values.len(), "Recipe rolled");
        Ok(data)
    }

    /// Scene-control buttons, one per registered recipe. Rebuilt on every call.
    pub fn scene_buttons(
        &self,
        localizer: &dyn Localizer,
        opener: Arc<dyn WindowOpener>,
    ) -> Vec<SceneButton> {
        self.recipes
            .values()
            .map(|recipe| SceneButton::new(Arc::clone(recipe), localizer, Arc::clone(&opener)))
            .collect()
    }

    /// Registered recipe names, in registration order.
    pub fn recipe_names(&self) -> Vec<&str> {
        self.recipes.values().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self, kind: RegistryKind) -> usize {
        match kind {
            RegistryKind::Recipe => self.recipes.len(),
            RegistryKind::GenerationFunction => self.gen_funcs.len(),
            RegistryKind::PostProcessingFunction => self.post_proc_funcs.len(),
            RegistryKind::FormActionFunction => self.form_action_funcs.len(),
        }
    }

    pub fn contains(&self, kind: RegistryKind, key: &str) -> bool {
        let key = table_key(key);
        match kind {
            RegistryKind::Recipe => self.recipes.contains_key(&key),
            RegistryKind::GenerationFunction => self.gen_funcs.contains_key(&key),
            RegistryKind::PostProcessingFunction => self.post_proc_funcs.contains_key(&key),
            RegistryKind::FormActionFunction => self.form_action_funcs.contains_key(&key),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
            && self.gen_funcs.is_empty()
            && self.post_proc_funcs.is_empty()
            && self.form_action_funcs.is_empty()
    }
}

impl Default for GenerationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn log_insert(kind: RegistryKind, key: &str, replaced: bool) {
    if replaced {
        debug!(kind = %kind, key, "Overwriting registry entry");
    } else {
        debug!(kind = %kind, key, "Registering entry");
    }
}
