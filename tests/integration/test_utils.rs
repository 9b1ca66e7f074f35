//! Shared test utilities for integration tests
//!
//! Provides HOME isolation for config loading and helpers for writing recipe packs.

use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize HOME access across all tests in this binary
static HOME_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with HOME pointed at an empty directory inside `test_dir`.
///
/// The original HOME is restored afterwards.
pub fn with_isolated_home<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = HOME_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let original_home = std::env::var("HOME").ok();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();
    std::env::set_var("HOME", test_home.to_str().unwrap());

    let result = f();

    if let Some(orig) = original_home {
        std::env::set_var("HOME", orig);
    } else {
        std::env::remove_var("HOME");
    }

    result
}

/// Write a recipe file under `dir`, creating parent directories.
pub fn write_recipe(dir: &Path, file_name: &str, contents: &str) {
    let path = dir.join(file_name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// A small NPC recipe exercising options, propagation and post-processing.
pub const NPC_RECIPE: &str = r#"{
    "name": "NPC",
    "label": "RECIPE.Npc",
    "icon": "fas fa-user",
    "fields": [
        {
            "name": "given",
            "label": "FIELD.Given",
            "options": ["bram"],
            "propagates": ["title"],
            "post_proc": [{"function": "capitalize"}]
        },
        {
            "name": "trade",
            "label": "FIELD.Trade",
            "options": ["smith"],
            "post_proc": [{"function": "prefix", "args": ["master "]}, {"function": "upper"}]
        }
    ],
    "actions": [{"label": "Reset", "function": "clear"}]
}"#;
