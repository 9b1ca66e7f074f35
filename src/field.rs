//! Field Model
//!
//! One input slot of a recipe's generation form: its identity, display label,
//! static candidate options, propagation targets and post-processing chain.
//! Fields are built once from plain structured data and only read afterwards.

use crate::error::GenerationError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value returned by [`FieldModel::option`] when the field has no options.
pub const EMPTY_OPTION: &str = "EMPTY";

/// How strictly [`FieldModel::from_object_with`] treats missing attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
    /// Absent `name` / `label` are kept as `None`.
    #[default]
    Permissive,
    /// Absent `name` / `label` fail deserialization.
    Strict,
}

/// One post-processing step: a registered function name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostProcessStep {
    pub function: String,
    pub args: Vec<String>,
}

#[derive(Deserialize)]
struct RawStep {
    #[serde(alias = "func", alias = "name")]
    function: String,
    #[serde(default)]
    args: Vec<Value>,
}

impl PostProcessStep {
    pub fn new(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }

    /// Deserialize a step from `{ "function": "...", "args": [...] }`.
    pub fn from_object(data: &Value) -> Result<Self, GenerationError> {
        let raw: RawStep = serde_json::from_value(data.clone()).map_err(|e| {
            GenerationError::InvalidField(format!("post-processing step: {}", e))
        })?;
        Ok(Self {
            function: raw.function,
            args: raw.args.iter().map(scalar_text).collect(),
        })
    }
}

#[derive(Deserialize)]
struct RawField {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    label: Option<Value>,
    #[serde(default)]
    options: Option<Vec<Value>>,
    #[serde(default)]
    propagates: Option<Vec<Value>>,
    #[serde(default)]
    post_proc: Option<Vec<Value>>,
}

/// Renders a JSON scalar as plain text; strings are taken verbatim.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A single input field of a generation form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldModel {
    name: Option<String>,
    label: Option<String>,
    options: Vec<String>,
    propagates: Vec<String>,
    post_proc: Vec<PostProcessStep>,
}

impl FieldModel {
    /// Deserialize a field, keeping absent `name` / `label` as `None`.
    pub fn from_object(data: &Value) -> Result<Self, GenerationError> {
        Self::from_object_with(data, FieldMode::Permissive)
    }

    pub fn from_object_with(data: &Value, mode: FieldMode) -> Result<Self, GenerationError> {
        if !data.is_object() {
            return Err(GenerationError::InvalidField(format!(
                "expected an object, got {}",
                data
            )));
        }
        let raw: RawField = serde_json::from_value(data.clone())
            .map_err(|e| GenerationError::InvalidField(e.to_string()))?;

        if mode == FieldMode::Strict {
            if raw.name.is_none() {
                return Err(GenerationError::MissingField { field: "name" });
            }
            if raw.label.is_none() {
                return Err(GenerationError::MissingField { field: "label" });
            }
        }

        let mut field = FieldModel {
            name: raw.name.as_ref().map(scalar_text),
            label: raw.label.as_ref().map(scalar_text),
            ..Default::default()
        };
        field
            .options
            .extend(raw.options.unwrap_or_default().iter().map(scalar_text));
        field
            .propagates
            .extend(raw.propagates.unwrap_or_default().iter().map(scalar_text));
        for step in &raw.post_proc.unwrap_or_default() {
            field.post_proc.push(PostProcessStep::from_object(step)?);
        }
        Ok(field)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn propagates(&self) -> &[String] {
        &self.propagates
    }

    pub fn post_proc(&self) -> &[PostProcessStep] {
        &self.post_proc
    }

    /// A uniformly chosen option, or [`EMPTY_OPTION`] when there are none.
    pub fn option(&self) -> String {
        self.option_with(&mut rand::thread_rng())
    }

    /// Same as [`option`](Self::option) with a caller-provided RNG.
    pub fn option_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.options
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| EMPTY_OPTION.to_string())
    }
}
