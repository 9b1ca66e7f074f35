//! Recipe Model
//!
//! A named generation form: icon, label, ordered fields, the template the
//! rendering layer fills in, and the form-action buttons shown under the form.

use crate::error::GenerationError;
use crate::field::{scalar_text, FieldMode, FieldModel};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A button at the bottom of a generation form bound to a form-action function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormActionButton {
    pub label: String,
    pub function: String,
    pub args: Vec<String>,
}

#[derive(Deserialize)]
struct RawAction {
    #[serde(default)]
    label: Option<String>,
    #[serde(alias = "func")]
    function: String,
    #[serde(default)]
    args: Vec<Value>,
}

#[derive(Deserialize)]
struct RawRecipe {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    fields: Vec<Value>,
    #[serde(default)]
    template: String,
    #[serde(default)]
    actions: Vec<RawAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeModel {
    pub name: String,
    pub label: String,
    pub icon: String,
    pub fields: Vec<FieldModel>,
    pub template: String,
    pub actions: Vec<FormActionButton>,
}

impl RecipeModel {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            icon: String::new(),
            fields: Vec::new(),
            template: String::new(),
            actions: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }

    /// Deserialize a recipe with permissive field handling.
    pub fn from_object(data: &Value) -> Result<Self, GenerationError> {
        Self::from_object_with(data, FieldMode::Permissive)
    }

    pub fn from_object_with(data: &Value, mode: FieldMode) -> Result<Self, GenerationError> {
        let raw: RawRecipe = serde_json::from_value(data.clone())
            .map_err(|e| GenerationError::InvalidRecipe(e.to_string()))?;

        if raw.name.trim().is_empty() {
            return Err(GenerationError::InvalidRecipe(
                "recipe name cannot be empty".to_string(),
            ));
        }

        let fields = raw
            .fields
            .iter()
            .map(|f| FieldModel::from_object_with(f, mode))
            .collect::<Result<Vec<_>, _>>()?;

        let actions = raw
            .actions
            .into_iter()
            .map(|a| FormActionButton {
                label: a.label.unwrap_or_else(|| a.function.clone()),
                args: a.args.iter().map(scalar_text).collect(),
                function: a.function,
            })
            .collect();

        Ok(Self {
            label: raw.label.unwrap_or_else(|| raw.name.clone()),
            name: raw.name,
            icon: raw.icon,
            fields,
            template: raw.template,
            actions,
        })
    }

    /// Looks up a field by its exact name.
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name() == Some(name))
    }
}
