//! CLI parse: clap types for Conjure. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Conjure CLI - roll procedurally generated tabletop content from recipes
#[derive(Parser)]
#[command(name = "conjure")]
#[command(about = "Roll procedurally generated tabletop content from registered recipes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable logging entirely
    #[arg(long)]
    pub quiet: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List registered recipes as scene buttons
    Recipes {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve every field of a recipe
    Roll {
        /// Recipe name (case-insensitive)
        recipe: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run one generator function
    Generate {
        /// Generator function name (case-insensitive)
        function: String,
        /// Argument passed to the function (repeatable)
        #[arg(long = "arg")]
        args: Vec<String>,
        /// Current field value as name=value (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,
    },
    /// Run one post-processing function over an input string
    Process {
        /// Post-processing function name (case-insensitive)
        function: String,
        /// Input value
        input: String,
        /// Argument passed to the function (repeatable)
        #[arg(long = "arg")]
        args: Vec<String>,
    },
}
