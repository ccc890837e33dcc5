use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How query results are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Matching lines exactly as they appear in the file
    #[default]
    Text,
    /// A JSON document with line numbers
    Json,
    /// A table of line numbers and lines
    Table,
}

/// When to use ANSI colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}
