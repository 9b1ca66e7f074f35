//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; the route dispatches onto the generation registry.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_recipes_json, format_recipes_text, format_roll_json, format_roll_text,
};
pub use route::{build_hook_bus, parse_field_values, RunContext};
