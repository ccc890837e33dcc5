pub mod cli;
pub mod config;
pub mod output;
pub mod query;
pub mod repl;

use crate::config::TxtqlConfig;
use crate::output::{
    format_lines_json, format_lines_table, format_lines_text, format_plan_json, format_plan_text,
};
use anyhow::Context;
pub use cli::{Cli, ColorMode, Commands, OutputFormat, cli_parse};
pub use query::{
    GrammarError, IoError, Line, ParsedQuery, QueryError, QueryOptions, evaluate, parse,
    parse_query, run_query, tokenize,
};
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins; otherwise the level follows `-v`/`-q`.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn apply_color_mode(color_mode: ColorMode) {
    match color_mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
}

fn write_output_file(path: &std::path::Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

/// Render query results in the configured format
fn render_results(lines: &[Line], parsed: &ParsedQuery, config: &TxtqlConfig, quiet: bool) -> String {
    match config.output.format {
        OutputFormat::Text if lines.is_empty() && !quiet => {
            format!("{}\n", config.repl.no_match_message)
        }
        OutputFormat::Text => format_lines_text(lines, config.output.line_numbers),
        OutputFormat::Json => format!("{}\n", format_lines_json(lines, parsed)),
        OutputFormat::Table => format_lines_table(lines),
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_tracing(cli.verbose, cli.quiet);
    apply_color_mode(cli.color);

    let mut config = config::load_config(cli.config.as_deref())?;
    if cli.case_sensitive {
        config.case_sensitive = true;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    tracing::info!(
        case_sensitive = config.case_sensitive,
        format = ?config.output.format,
        "configuration resolved"
    );

    let options = config.query_options();

    match cli.command.clone().unwrap_or(Commands::Repl) {
        Commands::Query {
            query,
            line_numbers,
        } => {
            if line_numbers {
                config.output.line_numbers = true;
            }
            let parsed = parse_query(&query, &options)?;
            let lines = evaluate(&parsed)?;
            tracing::info!(matched = lines.len(), "query finished");

            let rendered = render_results(&lines, &parsed, &config, cli.quiet);
            print!("{rendered}");
            if let Some(path) = &cli.output {
                write_output_file(path, &rendered)?;
            }
        }
        Commands::Explain { query } => {
            let parsed = parse_query(&query, &options)?;
            let rendered = match config.output.format {
                OutputFormat::Json => format!("{}\n", format_plan_json(&parsed)),
                OutputFormat::Text | OutputFormat::Table => format_plan_text(&parsed),
            };
            print!("{rendered}");
            if let Some(path) = &cli.output {
                write_output_file(path, &rendered)?;
            }
        }
        Commands::Repl => {
            if cli.format.is_some() || cli.output.is_some() {
                tracing::warn!("--format and --output are ignored by repl; results are printed as text");
            }
            tracing::debug!("starting interactive session");
            let stdin = std::io::stdin();
            repl::run_repl(stdin.lock(), &mut std::io::stdout(), &config)
                .context("Interactive session failed")?;
        }
    }

    Ok(())
}
