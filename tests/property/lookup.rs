//! Property-based tests for registry lookup and field options

use conjure::functions::post_process_fn;
use conjure::{FieldModel, FormData, GenerationRegistry, RecipeModel, RegistryKind, EMPTY_OPTION};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

/// Flip the case of characters selected by `mask`.
fn recase(key: &str, mask: &[bool]) -> String {
    key.chars()
        .zip(mask.iter().cycle())
        .map(|(c, &upper)| {
            if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn lookup_ignores_key_casing(
        key in "[a-zA-Z][a-zA-Z0-9_]{0,15}",
        mask in prop::collection::vec(any::<bool>(), 1..16),
    ) {
        let mut registry = GenerationRegistry::new();
        registry.add_post_processing_function(&key, post_process_fn(|input, _| Ok(input.to_string())));
        registry.add_recipe_model(RecipeModel::new(key.clone()));

        let lookup_key = recase(&key, &mask);
        prop_assert_eq!(registry.post_process(&lookup_key, "v", &[]).unwrap(), "v");
        prop_assert_eq!(&registry.get_recipe(&lookup_key).unwrap().name, &key);
    }

    #[test]
    fn equal_keys_collapse_to_the_last_registration(
        key in "[a-z]{1,10}",
        mask in prop::collection::vec(any::<bool>(), 1..10),
        versions in 1usize..6,
    ) {
        let mut registry = GenerationRegistry::new();
        for version in 0..versions {
            let name = if version % 2 == 0 { key.clone() } else { recase(&key, &mask) };
            registry.add_recipe_model(RecipeModel::new(name).with_label(version.to_string()));
        }

        prop_assert_eq!(registry.len(RegistryKind::Recipe), 1);
        let last = (versions - 1).to_string();
        prop_assert_eq!(&registry.get_recipe(&key).unwrap().label, &last);
    }

    #[test]
    fn unregistered_keys_report_their_original_spelling(key in "[A-Za-z]{1,12}") {
        let registry = GenerationRegistry::new();
        let err = registry.post_process(&key, "", &[]).unwrap_err();
        prop_assert_eq!(
            err.to_string(),
            format!("Post-Processing function '{}' not registered.", key)
        );
    }

    #[test]
    fn option_always_comes_from_the_options(
        options in prop::collection::vec("[a-z ]{0,8}", 0..6),
        seed in any::<u64>(),
    ) {
        let field = FieldModel::from_object(&json!({"name": "f", "options": &options})).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = field.option_with(&mut rng);

        if options.is_empty() {
            prop_assert_eq!(picked, EMPTY_OPTION);
        } else {
            prop_assert!(options.contains(&picked));
        }
    }

    #[test]
    fn propagation_writes_every_target(
        targets in prop::collection::vec("[a-z]{1,6}", 0..5),
        value in "[A-Za-z]{1,10}",
    ) {
        let mut data = FormData::new("npc");
        data.propagate(&targets, &value);
        for target in &targets {
            prop_assert_eq!(data.get(target), Some(value.as_str()));
        }
    }
}
