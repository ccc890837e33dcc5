use crate::query::{Line, ParsedQuery};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use serde_json::json;
use std::fmt::Write;

/// Render lines as they appear in the file
///
/// The block always ends with a newline, even when the last line of the file
/// had no terminator.
pub fn format_lines_text(lines: &[Line], line_numbers: bool) -> String {
    let mut out = String::new();
    for line in lines {
        if line_numbers {
            let _ = write!(out, "{:>6}: ", line.number);
        }
        out.push_str(&line.text);
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn format_lines_json(lines: &[Line], query: &ParsedQuery) -> String {
    serde_json::to_string_pretty(&json!({
        "file": query.target_file().display().to_string(),
        "case_sensitive": query.case_sensitive(),
        "count": lines.len(),
        "lines": lines,
    }))
    .unwrap_or_else(|_| "{\"error\":\"failed to serialize results\"}".to_string())
}

pub fn format_lines_table(lines: &[Line]) -> String {
    let mut table = new_table();
    table.set_header(vec!["#", "Line"]);
    for line in lines {
        table.add_row(vec![
            Cell::new(line.number),
            Cell::new(line.stripped()),
        ]);
    }
    format!("{table}\n")
}

/// Describe a parsed query: target, case mode, conditions and tweaks
pub fn format_plan_text(query: &ParsedQuery) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "File:           {}", query.target_file().display());
    let _ = writeln!(
        out,
        "Case sensitive: {}",
        if query.case_sensitive() { "yes" } else { "no" }
    );

    if query.conditions().is_empty() {
        let _ = writeln!(out, "Conditions:     none (every line)");
    } else {
        let mut table = new_table();
        table.set_header(vec!["#", "Not", "Kind", "Value", "Count", "Then"]);
        for (idx, condition) in query.conditions().iter().enumerate() {
            let predicate = &condition.predicate;
            table.add_row(vec![
                Cell::new(idx + 1),
                Cell::new(if condition.negated { "not" } else { "" }),
                Cell::new(predicate.kind()),
                Cell::new(
                    predicate
                        .value()
                        .map(|v| format!("{v:?}"))
                        .unwrap_or_default(),
                ),
                Cell::new(
                    predicate
                        .count()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                ),
                Cell::new(condition.connector.map(|c| c.keyword()).unwrap_or("")),
            ]);
        }
        let _ = writeln!(out, "Conditions:");
        let _ = writeln!(out, "{table}");
    }

    let tweaks: Vec<String> = query.tweaks().iter().map(ToString::to_string).collect();
    let _ = writeln!(
        out,
        "Tweaks:         {}",
        if tweaks.is_empty() {
            "none".to_string()
        } else {
            tweaks.join(" -> ")
        }
    );
    out
}

pub fn format_plan_json(query: &ParsedQuery) -> String {
    serde_json::to_string_pretty(query)
        .unwrap_or_else(|_| "{\"error\":\"failed to serialize plan\"}".to_string())
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}
