//! Integration tests for the query side: generation, form actions and scene buttons

use conjure::functions::{form_action_fn, generator_fn, post_process_fn};
use conjure::scene::{CatalogLocalizer, IdentityLocalizer, WindowOpener};
use conjure::{FieldValues, FormData, GenerationRegistry, RecipeModel, RegistryKind};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Window opener that remembers which recipes it was asked to open.
#[derive(Default)]
struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl WindowOpener for RecordingOpener {
    fn open(&self, recipe: &RecipeModel) {
        self.opened.lock().push(recipe.name.clone());
    }
}

fn registry_with_npc() -> GenerationRegistry {
    let mut registry = GenerationRegistry::new();
    registry
        .add_recipe(&json!({
            "name": "NPC",
            "label": "RECIPE.Npc",
            "icon": "fas fa-user",
            "fields": [
                {"name": "race", "label": "Race", "options": ["elf"]},
                {"name": "name", "label": "Name"}
            ]
        }))
        .unwrap();
    registry
}

#[tokio::test]
async fn test_generator_sees_current_field_values() {
    let mut registry = registry_with_npc();
    registry.add_generator_function(
        "roll",
        generator_fn(|fields: FieldValues, args: Vec<String>| async move {
            let race = fields.get("race").cloned().unwrap_or_default();
            Ok(format!("{} {}", race, args.join(" ")))
        }),
    );

    let mut fields = FieldValues::new();
    fields.insert("race".to_string(), "dwarf".to_string());
    let out = registry
        .generate("ROLL", &fields, &["of".to_string(), "the hills".to_string()])
        .await
        .unwrap();
    assert_eq!(out, "dwarf of the hills");

    let err = registry
        .generate("missing", &fields, &[])
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Generation function 'missing' not registered."
    );
}

#[tokio::test]
async fn test_shared_registry_serves_concurrent_generation() {
    let mut registry = GenerationRegistry::new();
    registry.add_generator_function(
        "echo",
        generator_fn(|_, args: Vec<String>| async move {
            tokio::task::yield_now().await;
            Ok(args.concat())
        }),
    );
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                registry
                    .generate("Echo", &FieldValues::new(), &[i.to_string()])
                    .await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap().unwrap(), i.to_string());
    }
}

#[test]
fn test_get_recipe_is_case_insensitive_and_exact() {
    let registry = registry_with_npc();
    let recipe = registry.get_recipe("npc").unwrap();
    assert_eq!(recipe.label, "RECIPE.Npc");
    assert_eq!(recipe.fields.len(), 2);

    let err = registry.get_recipe("pc").unwrap_err();
    assert_eq!(err.as_not_registered(), Some((RegistryKind::Recipe, "pc")));
    assert_eq!(err.to_string(), "Recipe 'pc' not registered.");
}

#[test]
fn test_form_action_mutates_form_in_place() {
    let mut registry = registry_with_npc();
    registry.add_form_action_function(
        "Swap",
        form_action_fn(|data, args| {
            let [a, b] = args else {
                return Err("swap expects two field names".into());
            };
            let left = data.get(a).unwrap_or_default().to_string();
            let right = data.get(b).unwrap_or_default().to_string();
            data.set(a.clone(), right);
            data.set(b.clone(), left);
            Ok(())
        }),
    );

    let mut data = FormData::new("NPC");
    data.set("race", "elf");
    data.set("name", "Ilsa");
    registry
        .exec_form_action("swap", &mut data, &["race".to_string(), "name".to_string()])
        .unwrap();
    assert_eq!(data.get("race"), Some("Ilsa"));
    assert_eq!(data.get("name"), Some("elf"));

    let err = registry
        .exec_form_action("swap", &mut data, &[])
        .unwrap_err();
    assert_eq!(err.to_string(), "swap expects two field names");
}

#[test]
fn test_roll_recipe_uses_post_processing_chain() {
    let mut registry = GenerationRegistry::new();
    registry.add_post_processing_function(
        "Title",
        post_process_fn(|input, args| Ok(format!("{} {}", args.concat(), input))),
    );
    registry
        .add_recipe(&json!({
            "name": "Noble",
            "fields": [{
                "name": "name",
                "options": ["Aldric"],
                "propagates": ["heading"],
                "post_proc": [{"function": "title", "args": ["Lord"]}]
            }]
        }))
        .unwrap();

    let data = registry.roll_recipe("noble").unwrap();
    assert_eq!(data.get("name"), Some("Lord Aldric"));
    assert_eq!(data.get("heading"), Some("Lord Aldric"));
}

#[test]
fn test_scene_buttons_open_their_recipe() {
    let mut registry = registry_with_npc();
    registry.add_recipe_model(RecipeModel::new("Loot").with_icon("fas fa-coins"));

    let opener = Arc::new(RecordingOpener::default());
    let buttons = registry.scene_buttons(&IdentityLocalizer, opener.clone());
    assert_eq!(buttons.len(), 2);
    assert_eq!(buttons[0].name, "NPC");
    assert_eq!(buttons[0].icon, "fas fa-user");
    assert!(buttons[0].visible && buttons[0].button);
    assert!(opener.opened.lock().is_empty());

    buttons[1].on_click();
    buttons[0].on_click();
    assert_eq!(*opener.opened.lock(), ["Loot", "NPC"]);
}

#[test]
fn test_scene_buttons_localize_titles() {
    let registry = registry_with_npc();
    let catalog = CatalogLocalizer::new(HashMap::from([(
        "RECIPE.Npc".to_string(),
        "Non-player character".to_string(),
    )]));

    let buttons = registry.scene_buttons(&catalog, Arc::new(RecordingOpener::default()));
    assert_eq!(buttons[0].title, "Non-player character");

    let buttons = registry.scene_buttons(&IdentityLocalizer, Arc::new(RecordingOpener::default()));
    assert_eq!(buttons[0].title, "RECIPE.Npc");
}

#[test]
fn test_scene_buttons_track_registry_changes() {
    let mut registry = GenerationRegistry::new();
    let opener: Arc<dyn WindowOpener> = Arc::new(RecordingOpener::default());
    assert!(registry
        .scene_buttons(&IdentityLocalizer, Arc::clone(&opener))
        .is_empty());

    registry.add_recipe_model(RecipeModel::new("Tavern"));
    let buttons = registry.scene_buttons(&IdentityLocalizer, opener);
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].title, "Tavern");
}
