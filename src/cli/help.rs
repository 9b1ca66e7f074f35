//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string for log records (e.g. "roll", "recipes").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Recipes { .. } => "recipes",
        Commands::Roll { .. } => "roll",
        Commands::Generate { .. } => "generate",
        Commands::Process { .. } => "process",
    }
}
