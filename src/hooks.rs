//! Registration Hooks
//!
//! Collaborators subscribe to a [`HookBus`] before the registry initializes. During
//! [`GenerationRegistry::init`](crate::registry::GenerationRegistry::init) each of the
//! four registration hooks is broadcast to every subscriber, synchronously and in
//! subscription order, with a typed registrar as payload.

use crate::error::{BoxError, GenerationError};
use crate::functions::{
    form_action_fn, generator_fn, post_process_fn, FieldValues, FormActionFn, FormData,
    GeneratorFunction, PostProcessFn,
};
use crate::recipe::RecipeModel;
use crate::registry::GenerationRegistry;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

pub const REGISTER_GENERATOR_FUNCTIONS_HOOK: &str = "registerGeneratorFunctions";
pub const REGISTER_POST_PROCESSING_FUNCTIONS_HOOK: &str = "registerPostProcessingFunctions";
pub const REGISTER_FORM_ACTION_FUNCTIONS_HOOK: &str = "registerFormActionFunctions";
pub const REGISTER_RECIPES_HOOK: &str = "registerRecipes";

/// The four registration broadcasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    GeneratorFunctions,
    PostProcessingFunctions,
    FormActionFunctions,
    Recipes,
}

impl Hook {
    /// Broadcast order used by `init`.
    pub const ALL: [Hook; 4] = [
        Hook::GeneratorFunctions,
        Hook::PostProcessingFunctions,
        Hook::FormActionFunctions,
        Hook::Recipes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Hook::GeneratorFunctions => REGISTER_GENERATOR_FUNCTIONS_HOOK,
            Hook::PostProcessingFunctions => REGISTER_POST_PROCESSING_FUNCTIONS_HOOK,
            Hook::FormActionFunctions => REGISTER_FORM_ACTION_FUNCTIONS_HOOK,
            Hook::Recipes => REGISTER_RECIPES_HOOK,
        }
    }

    pub fn from_name(name: &str) -> Option<Hook> {
        Hook::ALL.into_iter().find(|hook| hook.name() == name)
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of the generator-functions broadcast.
pub struct GeneratorRegistrar<'a> {
    registry: &'a mut GenerationRegistry,
}

impl GeneratorRegistrar<'_> {
    pub fn add(&mut self, key: &str, func: Arc<dyn GeneratorFunction>) {
        self.registry.add_generator_function(key, func);
    }

    pub fn add_fn<F, Fut>(&mut self, key: &str, f: F)
    where
        F: Fn(FieldValues, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, BoxError>> + Send + 'static,
    {
        self.add(key, generator_fn(f));
    }
}

/// Payload of the post-processing-functions broadcast.
pub struct PostProcessRegistrar<'a> {
    registry: &'a mut GenerationRegistry,
}

impl PostProcessRegistrar<'_> {
    pub fn add(&mut self, key: &str, func: PostProcessFn) {
        self.registry.add_post_processing_function(key, func);
    }

    pub fn add_fn<F>(&mut self, key: &str, f: F)
    where
        F: Fn(&str, &[String]) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.add(key, post_process_fn(f));
    }
}

/// Payload of the form-action-functions broadcast.
pub struct FormActionRegistrar<'a> {
    registry: &'a mut GenerationRegistry,
}

impl FormActionRegistrar<'_> {
    pub fn add(&mut self, key: &str, func: FormActionFn) {
        self.registry.add_form_action_function(key, func);
    }

    pub fn add_fn<F>(&mut self, key: &str, f: F)
    where
        F: Fn(&mut FormData, &[String]) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.add(key, form_action_fn(f));
    }
}

/// Payload of the recipes broadcast.
pub struct RecipeRegistrar<'a> {
    registry: &'a mut GenerationRegistry,
}

impl RecipeRegistrar<'_> {
    /// Deserialize and register a recipe from plain data.
    pub fn add(&mut self, data: &Value) -> Result<(), GenerationError> {
        self.registry.add_recipe(data)
    }

    pub fn add_model(&mut self, recipe: RecipeModel) {
        self.registry.add_recipe_model(recipe);
    }
}

/// A party contributing registry entries. Every hook defaults to contributing nothing.
pub trait Collaborator: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    fn register_generator_functions(
        &self,
        _registrar: &mut GeneratorRegistrar<'_>,
    ) -> Result<(), GenerationError> {
        Ok(())
    }

    fn register_post_processing_functions(
        &self,
        _registrar: &mut PostProcessRegistrar<'_>,
    ) -> Result<(), GenerationError> {
        Ok(())
    }

    fn register_form_action_functions(
        &self,
        _registrar: &mut FormActionRegistrar<'_>,
    ) -> Result<(), GenerationError> {
        Ok(())
    }

    fn register_recipes(&self, _registrar: &mut RecipeRegistrar<'_>) -> Result<(), GenerationError> {
        Ok(())
    }
}

type GeneratorHandler =
    Box<dyn Fn(&mut GeneratorRegistrar<'_>) -> Result<(), GenerationError> + Send + Sync>;
type PostProcessHandler =
    Box<dyn Fn(&mut PostProcessRegistrar<'_>) -> Result<(), GenerationError> + Send + Sync>;
type FormActionHandler =
    Box<dyn Fn(&mut FormActionRegistrar<'_>) -> Result<(), GenerationError> + Send + Sync>;
type RecipeHandler =
    Box<dyn Fn(&mut RecipeRegistrar<'_>) -> Result<(), GenerationError> + Send + Sync>;

/// A closure subscribed to exactly one hook.
enum HookHandler {
    GeneratorFunctions(GeneratorHandler),
    PostProcessingFunctions(PostProcessHandler),
    FormActionFunctions(FormActionHandler),
    Recipes(RecipeHandler),
}

enum Subscriber {
    Collaborator(Arc<dyn Collaborator>),
    Handler { label: String, handler: HookHandler },
}

impl Subscriber {
    fn label(&self) -> &str {
        match self {
            Subscriber::Collaborator(c) => c.name(),
            Subscriber::Handler { label, .. } => label,
        }
    }
}

/// Ordered list of registration subscribers handed to `init`.
#[derive(Default)]
pub struct HookBus {
    subscribers: Vec<Subscriber>,
}

impl HookBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a collaborator to all four hooks.
    pub fn subscribe(&mut self, collaborator: Arc<dyn Collaborator>) -> &mut Self {
        self.subscribers.push(Subscriber::Collaborator(collaborator));
        self
    }

    pub fn on_generator_functions<F>(&mut self, f: F) -> &mut Self
    where
        F: for<'a> Fn(&mut GeneratorRegistrar<'a>) -> Result<(), GenerationError>
            + Send
            + Sync
            + 'static,
    {
        self.push_handler(
            Hook::GeneratorFunctions,
            HookHandler::GeneratorFunctions(Box::new(f)),
        )
    }

    pub fn on_post_processing_functions<F>(&mut self, f: F) -> &mut Self
    where
        F: for<'a> Fn(&mut PostProcessRegistrar<'a>) -> Result<(), GenerationError>
            + Send
            + Sync
            + 'static,
    {
        self.push_handler(
            Hook::PostProcessingFunctions,
            HookHandler::PostProcessingFunctions(Box::new(f)),
        )
    }

    pub fn on_form_action_functions<F>(&mut self, f: F) -> &mut Self
    where
        F: for<'a> Fn(&mut FormActionRegistrar<'a>) -> Result<(), GenerationError>
            + Send
            + Sync
            + 'static,
    {
        self.push_handler(
            Hook::FormActionFunctions,
            HookHandler::FormActionFunctions(Box::new(f)),
        )
    }

    pub fn on_recipes<F>(&mut self, f: F) -> &mut Self
    where
        F: for<'a> Fn(&mut RecipeRegistrar<'a>) -> Result<(), GenerationError>
            + Send
            + Sync
            + 'static,
    {
        self.push_handler(Hook::Recipes, HookHandler::Recipes(Box::new(f)))
    }

    fn push_handler(&mut self, hook: Hook, handler: HookHandler) -> &mut Self {
        let label = format!("{}#{}", hook.name(), self.subscribers.len());
        self.subscribers.push(Subscriber::Handler { label, handler });
        self
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Broadcast one hook to every subscriber in subscription order.
    ///
    /// A failing subscriber is logged and skipped; the rest still run. Returns the
    /// number of failures.
    pub fn call_all(&self, hook: Hook, registry: &mut GenerationRegistry) -> usize {
        let mut failures = 0;
        for subscriber in &self.subscribers {
            let result = dispatch(subscriber, hook, registry);
            if let Err(e) = result {
                failures += 1;
                warn!(
                    hook = hook.name(),
                    subscriber = subscriber.label(),
                    error = %e,
                    "Registration subscriber failed"
                );
            }
        }
        debug!(
            hook = hook.name(),
            subscribers = self.subscribers.len(),
            failures,
            "Hook broadcast complete"
        );
        failures
    }
}

fn dispatch(
    subscriber: &Subscriber,
    hook: Hook,
    registry: &mut GenerationRegistry,
) -> Result<(), GenerationError> {
    match subscriber {
        Subscriber::Collaborator(c) => match hook {
            Hook::GeneratorFunctions => {
                c.register_generator_functions(&mut GeneratorRegistrar { registry })
            }
            Hook::PostProcessingFunctions => {
                c.register_post_processing_functions(&mut PostProcessRegistrar { registry })
            }
            Hook::FormActionFunctions => {
                c.register_form_action_functions(&mut FormActionRegistrar { registry })
            }
            Hook::Recipes => c.register_recipes(&mut RecipeRegistrar { registry }),
        },
        Subscriber::Handler { handler, .. } => match (hook, handler) {
            (Hook::GeneratorFunctions, HookHandler::GeneratorFunctions(f)) => {
                f(&mut GeneratorRegistrar { registry })
            }
            (Hook::PostProcessingFunctions, HookHandler::PostProcessingFunctions(f)) => {
                f(&mut PostProcessRegistrar { registry })
            }
            (Hook::FormActionFunctions, HookHandler::FormActionFunctions(f)) => {
                f(&mut FormActionRegistrar { registry })
            }
            (Hook::Recipes, HookHandler::Recipes(f)) => f(&mut RecipeRegistrar { registry }),
            _ => Ok(()),
        },
    }
}
