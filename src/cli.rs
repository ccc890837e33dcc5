mod format;

use clap::{ArgAction, Parser, Subcommand};
pub use format::{ColorMode, OutputFormat};
use std::path::PathBuf;

/// Filter the lines of a text file with SQL-like queries
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// TOML configuration file
    #[arg(short, long, global = true, env = "TXTQL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Match case-sensitively unless the query says otherwise
    #[arg(long, global = true)]
    pub case_sensitive: bool,

    /// Output format for query and explain (overrides the config file)
    #[arg(short = 'F', long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Color output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also write the rendered output of query or explain to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a single query and print the matching lines
    Query {
        /// e.g. "select line from app.log containing error"
        query: String,

        /// Prefix each line with its line number
        #[arg(short = 'n', long)]
        line_numbers: bool,
    },
    /// Show how a query is parsed without reading the file
    Explain {
        query: String,
    },
    /// Read queries from stdin, one per line (the default)
    Repl,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
