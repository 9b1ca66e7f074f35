//! Built-in functions contributed through the regular registration hooks.

use crate::error::{BoxError, GenerationError};
use crate::field::EMPTY_OPTION;
use crate::functions::{FieldValues, FormData, GeneratorFunction};
use crate::hooks::{Collaborator, FormActionRegistrar, GeneratorRegistrar, PostProcessRegistrar};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Collaborator registering the standard generator, post-processing and form-action functions.
#[derive(Debug, Default, Clone, Copy)]
pub struct Builtins;

impl Collaborator for Builtins {
    fn name(&self) -> &str {
        "builtins"
    }

    fn register_generator_functions(
        &self,
        registrar: &mut GeneratorRegistrar<'_>,
    ) -> Result<(), GenerationError> {
        registrar.add("pick", Arc::new(Pick));
        registrar.add("field", Arc::new(FieldValue));
        registrar.add("join", Arc::new(JoinFields));
        Ok(())
    }

    fn register_post_processing_functions(
        &self,
        registrar: &mut PostProcessRegistrar<'_>,
    ) -> Result<(), GenerationError> {
        registrar.add_fn("upper", |input, _| Ok(input.to_uppercase()));
        registrar.add_fn("lower", |input, _| Ok(input.to_lowercase()));
        registrar.add_fn("capitalize", |input, _| Ok(capitalize_words(input)));
        registrar.add_fn("trim", |input, _| Ok(input.trim().to_string()));
        registrar.add_fn("prefix", |input, args| Ok(format!("{}{}", args.concat(), input)));
        registrar.add_fn("suffix", |input, args| Ok(format!("{}{}", input, args.concat())));
        registrar.add_fn("replace", replace);
        Ok(())
    }

    fn register_form_action_functions(
        &self,
        registrar: &mut FormActionRegistrar<'_>,
    ) -> Result<(), GenerationError> {
        registrar.add_fn("clear", clear);
        registrar.add_fn("set", set);
        Ok(())
    }
}

/// Uppercases the first character of every whitespace-separated word.
pub fn capitalize_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn replace(input: &str, args: &[String]) -> Result<String, BoxError> {
    match args {
        [from, to, ..] if !from.is_empty() => Ok(input.replace(from.as_str(), to)),
        _ => Err("replace expects a non-empty pattern and a replacement".into()),
    }
}

fn clear(data: &mut FormData, args: &[String]) -> Result<(), BoxError> {
    if args.is_empty() {
        data.values.values_mut().for_each(String::clear);
    } else {
        for name in args {
            if let Some(value) = data.values.get_mut(name) {
                value.clear();
            }
        }
    }
    Ok(())
}

fn set(data: &mut FormData, args: &[String]) -> Result<(), BoxError> {
    match args {
        [field, value, ..] => {
            data.set(field.clone(), value.clone());
            Ok(())
        }
        _ => Err("set expects a field name and a value".into()),
    }
}

/// Uniform choice among the arguments.
struct Pick;

#[async_trait]
impl GeneratorFunction for Pick {
    async fn generate(&self, _fields: &FieldValues, args: &[String]) -> Result<String, BoxError> {
        Ok(args
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| EMPTY_OPTION.to_string()))
    }
}

/// Current value of the field named by the first argument.
struct FieldValue;

#[async_trait]
impl GeneratorFunction for FieldValue {
    async fn generate(&self, fields: &FieldValues, args: &[String]) -> Result<String, BoxError> {
        let name = args.first().ok_or("field expects a field name")?;
        fields
            .get(name)
            .cloned()
            .ok_or_else(|| format!("field '{}' has no value", name).into())
    }
}

/// Values of the named fields joined by a space; missing fields are skipped.
struct JoinFields;

#[async_trait]
impl GeneratorFunction for JoinFields {
    async fn generate(&self, fields: &FieldValues, args: &[String]) -> Result<String, BoxError> {
        let parts: Vec<&str> = args
            .iter()
            .filter_map(|name| fields.get(name).map(String::as_str))
            .filter(|value| !value.is_empty())
            .collect();
        Ok(parts.join(" "))
    }
}
