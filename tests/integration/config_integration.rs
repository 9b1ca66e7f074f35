//! Integration tests for the configuration layers feeding registry initialization

use crate::integration::test_utils::{with_isolated_home, write_recipe};
use conjure::cli::build_hook_bus;
use conjure::config::ConfigLoader;
use conjure::{FieldMode, GenerationError, GenerationRegistry, RegistryKind};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_workspace_config(workspace: &std::path::Path, file: &str, contents: &str) {
    let dir = workspace.join("config");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(file), contents).unwrap();
}

#[test]
fn test_strict_config_produces_strict_registry() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("ws");
    write_workspace_config(&workspace, "config.toml", "[fields]\nstrict = true\n");
    write_recipe(
        &workspace.join("recipes"),
        "bad.json",
        r#"{"name": "bad", "fields": [{"label": "Unnamed"}]}"#,
    );
    write_recipe(
        &workspace.join("recipes"),
        "good.json",
        r#"{"name": "good", "fields": [{"name": "n", "label": "N"}]}"#,
    );

    let config = with_isolated_home(&temp_dir, || ConfigLoader::load(&workspace).unwrap());
    assert_eq!(config.fields.mode(), FieldMode::Strict);

    let bus = build_hook_bus(&config, &workspace);
    let mut registry = GenerationRegistry::with_field_mode(config.fields.mode());
    registry.init(&bus);

    assert!(registry.contains(RegistryKind::Recipe, "good"));
    assert!(!registry.contains(RegistryKind::Recipe, "bad"));
}

#[test]
fn test_environment_specific_file_overrides_base() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("ws");
    write_workspace_config(
        &workspace,
        "config.toml",
        "builtins = true\n\n[content]\nrecipe_dirs = [\"base\"]\n",
    );
    write_workspace_config(
        &workspace,
        "development.toml",
        "[content]\nrecipe_dirs = [\"dev\", \"shared\"]\n",
    );

    let config = with_isolated_home(&temp_dir, || {
        std::env::remove_var("CONJURE_ENV");
        ConfigLoader::load(&workspace).unwrap()
    });
    assert_eq!(
        config.content.recipe_dirs,
        vec![PathBuf::from("dev"), PathBuf::from("shared")]
    );
    assert_eq!(
        config.content.resolve_dirs(&workspace),
        vec![workspace.join("dev"), workspace.join("shared")]
    );
}

#[test]
fn test_environment_variables_override_files() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("ws");
    write_workspace_config(&workspace, "config.toml", "builtins = true\n");

    let config = with_isolated_home(&temp_dir, || {
        std::env::set_var("CONJURE__BUILTINS", "false");
        let loaded = ConfigLoader::load(&workspace);
        std::env::remove_var("CONJURE__BUILTINS");
        loaded.unwrap()
    });
    assert!(!config.builtins);

    let bus = build_hook_bus(&config, &workspace);
    let mut registry = GenerationRegistry::new();
    registry.init(&bus);
    assert_eq!(registry.len(RegistryKind::PostProcessingFunction), 0);
}

#[test]
fn test_global_config_path_follows_home() {
    let temp_dir = TempDir::new().unwrap();
    let path = with_isolated_home(&temp_dir, ConfigLoader::global_config_path).unwrap();
    assert_eq!(
        path,
        temp_dir
            .path()
            .join("home")
            .join(".config")
            .join("conjure")
            .join("config.toml")
    );
}

#[test]
fn test_invalid_explicit_file_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("conjure.toml");
    std::fs::write(&config_file, "[content]\nrecipe_dirs = [\"\"]\n").unwrap();

    let err = ConfigLoader::load_from_file(&config_file).unwrap_err();
    assert!(matches!(err, GenerationError::Config(_)));
    assert!(err.to_string().contains("Recipe directory cannot be empty"));

    let missing = ConfigLoader::load_from_file(&temp_dir.path().join("absent.toml"));
    assert!(matches!(missing, Err(GenerationError::Config(_))));
}
