//! Conjure: Content-Generation Registry
//!
//! Name-keyed registries of recipes, generator functions, post-processing functions
//! and form-action functions for a virtual tabletop. Collaborators register entries
//! through hooks during initialization; the rendering layer resolves them by name.

pub mod builtin;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod field;
pub mod functions;
pub mod hooks;
pub mod logging;
pub mod recipe;
pub mod registry;
pub mod scene;

pub use error::{BoxError, GenerationError, RegistryKind};
pub use field::{FieldMode, FieldModel, PostProcessStep, EMPTY_OPTION};
pub use functions::{FieldValues, FormData, GeneratorFunction};
pub use hooks::{Collaborator, Hook, HookBus};
pub use recipe::RecipeModel;
pub use registry::GenerationRegistry;
