//! CLI presentation: text and json formatters per command.

use crate::error::GenerationError;
use crate::functions::FormData;
use crate::scene::SceneButton;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, GenerationError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn format_recipes_text(buttons: &[SceneButton]) -> String {
    if buttons.is_empty() {
        return "No recipes registered.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Title", "Icon", "Fields"]);
    for button in buttons {
        table.add_row(vec![
            button.name.clone(),
            button.title.clone(),
            button.icon.clone(),
            button.recipe().fields.len().to_string(),
        ]);
    }
    table.to_string()
}

pub fn format_recipes_json(buttons: &[SceneButton]) -> Result<String, GenerationError> {
    to_json(buttons)
}

pub fn format_roll_text(data: &FormData) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);
    for (field, value) in &data.values {
        table.add_row(vec![field.as_str(), value.as_str()]);
    }
    format!("{}\n{}", data.recipe, table)
}

pub fn format_roll_json(data: &FormData) -> Result<String, GenerationError> {
    to_json(data)
}
