use super::entities::{Condition, Connector, Line, ParsedQuery, Predicate, Tweak, strip_terminator};
use super::error::IoError;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read a file into lines, each keeping its terminator
///
/// The whole file is loaded into memory.
pub fn read_lines(path: &Path) -> Result<Vec<Line>, IoError> {
    let content = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let lines: Vec<Line> = content
        .split_inclusive('\n')
        .enumerate()
        .map(|(idx, text)| Line::new(idx + 1, text))
        .collect();

    tracing::debug!(file = %path.display(), lines = lines.len(), "loaded file");
    Ok(lines)
}

/// Run a parsed query against its target file
pub fn evaluate(query: &ParsedQuery) -> Result<Vec<Line>, IoError> {
    let lines = read_lines(query.target_file())?;
    Ok(evaluate_lines(query, &lines))
}

/// Run a parsed query against lines already in memory
pub fn evaluate_lines(query: &ParsedQuery, lines: &[Line]) -> Vec<Line> {
    let mask = fold_mask(query.conditions(), lines, query.case_sensitive());

    let mut selected: Vec<Line> = match mask {
        Some(mask) => lines
            .iter()
            .zip(mask)
            .filter_map(|(line, keep)| keep.then(|| line.clone()))
            .collect(),
        None => lines.to_vec(),
    };
    tracing::trace!(selected = selected.len(), total = lines.len(), "mask applied");

    if !query.tweaks().is_empty() {
        let occurrences = count_occurrences(lines);
        for tweak in query.tweaks() {
            apply_tweak(*tweak, &mut selected, &occurrences);
            tracing::trace!(%tweak, remaining = selected.len(), "tweak applied");
        }
    }

    selected
}

/// Fold per-condition results left to right
///
/// Each condition after the first is joined to the running mask with the
/// connector stored on the condition before it. Returns `None` when there are
/// no conditions.
fn fold_mask(conditions: &[Condition], lines: &[Line], case_sensitive: bool) -> Option<Vec<bool>> {
    let (mask, _) = conditions.iter().fold(
        (None::<Vec<bool>>, None::<Connector>),
        |(mask, pending), condition| {
            let current: Vec<bool> = lines
                .iter()
                .map(|line| matches(condition, &line.text, case_sensitive))
                .collect();

            let mask = match mask {
                None => current,
                Some(mask) => {
                    // the parser rejects adjacent conditions without a connector
                    let connector = pending.unwrap_or(Connector::And);
                    mask.into_iter()
                        .zip(current)
                        .map(|(lhs, rhs)| connector.combine(lhs, rhs))
                        .collect()
                }
            };

            (Some(mask), condition.connector)
        },
    );

    mask
}

/// Test a single condition against one line, negation included
pub fn matches(condition: &Condition, line: &str, case_sensitive: bool) -> bool {
    matches_predicate(&condition.predicate, line, case_sensitive) ^ condition.negated
}

fn matches_predicate(predicate: &Predicate, line: &str, case_sensitive: bool) -> bool {
    let line = fold_case(line, case_sensitive);
    let stripped = strip_terminator(&line);

    match predicate {
        Predicate::Containing { needle, count } => {
            let found = line.matches(&*fold_case(needle, case_sensitive)).count();
            match count {
                Some(count) => count.matches(found),
                None => found > 0,
            }
        }
        Predicate::Starting { prefix } => line.starts_with(&*fold_case(prefix, case_sensitive)),
        Predicate::Ending { suffix } => stripped.ends_with(&*fold_case(suffix, case_sensitive)),
        Predicate::Length { count } => count.matches(stripped.chars().count()),
        Predicate::HasWord { word, count } => {
            let word = fold_case(word, case_sensitive);
            let mut words = stripped.split(' ');
            match count {
                Some(count) => count.matches(words.filter(|w| *w == word).count()),
                None => words.any(|w| w == word),
            }
        }
        Predicate::WordCount { count } => count.matches(stripped.split(' ').count()),
    }
}

/// Lowercase unless the comparison is case-sensitive
fn fold_case(s: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.to_lowercase())
    }
}

fn count_occurrences(lines: &[Line]) -> HashMap<&str, usize> {
    let mut occurrences = HashMap::new();
    for line in lines {
        *occurrences.entry(line.text.as_str()).or_insert(0) += 1;
    }
    occurrences
}

fn apply_tweak(tweak: Tweak, selected: &mut Vec<Line>, occurrences: &HashMap<&str, usize>) {
    let seen = |line: &Line| -> usize {
        occurrences
            .get(line.text.as_str())
            .copied()
            .unwrap_or(0)
    };

    match tweak {
        Tweak::Unique => selected.retain(|line| seen(line) == 1),
        Tweak::Duplicate => selected.retain(|line| seen(line) > 1),
        Tweak::Reverse => selected.reverse(),
        Tweak::Limit(n) => selected.truncate(n),
        Tweak::Offset(n) => {
            selected.drain(..n.min(selected.len()));
        }
    }
}
