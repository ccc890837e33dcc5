use crate::config::TxtqlConfig;
use crate::output::format_lines_text;
use crate::query::run_query;
use colored::Colorize;
use std::io::{self, BufRead, Write};

const BANNER: &str = "\
Tiny text-query runner.
Enter queries like:
  select line from data.txt containing 'error' and starting 'WARN'
  select line from \"my logs.txt\" containing 'timeout' or ending 'failed'
Type 'quit' or 'exit' to leave.
";

/// Read queries line by line and print their results
///
/// Each query starts from the configured case sensitivity; a `casesensitive`
/// suffix only affects the query it ends. Errors are printed and the loop
/// continues. Returns at end of input or on `quit`/`exit`.
pub fn run_repl<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    config: &TxtqlConfig,
) -> io::Result<()> {
    if config.repl.banner {
        writeln!(out, "{}", BANNER.bold())?;
    }

    let mut buffer = String::new();
    loop {
        write!(out, "{}", config.repl.prompt.cyan())?;
        out.flush()?;

        buffer.clear();
        if input.read_line(&mut buffer)? == 0 {
            writeln!(out)?;
            break;
        }

        let query = buffer.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            writeln!(out, "bye!")?;
            break;
        }

        match run_query(query, &config.query_options()) {
            Ok(lines) if lines.is_empty() => {
                writeln!(out, "{}", config.repl.no_match_message.dimmed())?
            }
            Ok(lines) => write!(out, "{}", format_lines_text(&lines, config.output.line_numbers))?,
            Err(e) => {
                tracing::debug!(error = %e, grammar = e.is_grammar(), "query failed");
                writeln!(out, "{} {}", "Error:".red().bold(), e)?;
            }
        }
    }

    Ok(())
}
