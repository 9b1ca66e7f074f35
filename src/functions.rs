//! Callable contracts for the three function tables, and the form state they act on.

use crate::error::BoxError;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

/// Current values of a form's fields, keyed by field name in form order.
pub type FieldValues = IndexMap<String, String>;

/// Transforms one string value given extra arguments.
pub type PostProcessFn = Arc<dyn Fn(&str, &[String]) -> Result<String, BoxError> + Send + Sync>;

/// Acts on the whole form. Mutates the data in place; no value is returned.
pub type FormActionFn =
    Arc<dyn Fn(&mut FormData, &[String]) -> Result<(), BoxError> + Send + Sync>;

/// Computes a value for one field from the current values of all fields.
///
/// Generation may perform remote or file I/O, so it is the one async contract
/// in the registry.
#[async_trait]
pub trait GeneratorFunction: Send + Sync {
    async fn generate(&self, fields: &FieldValues, args: &[String]) -> Result<String, BoxError>;
}

/// Adapter turning an async closure over owned inputs into a [`GeneratorFunction`].
pub struct FnGenerator<F>(F);

#[async_trait]
impl<F, Fut> GeneratorFunction for FnGenerator<F>
where
    F: Fn(FieldValues, Vec<String>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, BoxError>> + Send,
{
    async fn generate(&self, fields: &FieldValues, args: &[String]) -> Result<String, BoxError> {
        (self.0)(fields.clone(), args.to_vec()).await
    }
}

/// Wrap an async closure as a shareable generator function.
pub fn generator_fn<F, Fut>(f: F) -> Arc<dyn GeneratorFunction>
where
    F: Fn(FieldValues, Vec<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, BoxError>> + Send + 'static,
{
    Arc::new(FnGenerator(f))
}

/// Wrap a closure as a post-processing function.
pub fn post_process_fn<F>(f: F) -> PostProcessFn
where
    F: Fn(&str, &[String]) -> Result<String, BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a form-action function.
pub fn form_action_fn<F>(f: F) -> FormActionFn
where
    F: Fn(&mut FormData, &[String]) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// State of one generation form: the recipe it belongs to and the latest values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub recipe: String,
    pub values: FieldValues,
}

impl FormData {
    pub fn new(recipe: impl Into<String>) -> Self {
        Self {
            recipe: recipe.into(),
            values: FieldValues::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Writes `value` into every target field, in order.
    pub fn propagate(&mut self, targets: &[String], value: &str) {
        for target in targets {
            self.values.insert(target.clone(), value.to_string());
        }
    }
}
