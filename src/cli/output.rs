//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::GenerationError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &GenerationError) -> String {
    match e {
        GenerationError::NotRegistered { .. } => {
            format!("{} Check the recipe directories and enabled collaborators.", e)
        }
        _ => e.to_string(),
    }
}
