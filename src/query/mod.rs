//! Line query language
//!
//! Filters the lines of a text file with a small SQL-like syntax. A query is
//! tokenized, parsed into a [`ParsedQuery`] and evaluated against the file.
//!
//! # Syntax
//!
//! ```text
//! select line from <file> [[not] <condition> [and|or]]* [tweak]* [casesensitive]
//! ```
//!
//! # Conditions
//!
//! - `containing <value>` / `containing <op> <n> <value>` - substring, optionally counted
//! - `starting <value>` - line prefix
//! - `ending <value>` - line suffix, terminator ignored
//! - `length <op> <n>` / `length <n>` - character count
//! - `hasword <value>` / `hasword <op> <n> <value>` - space-separated word, optionally counted
//! - `wordcount <op> <n>` / `wordcount <n>` - number of space-separated words
//!
//! `<op>` is one of `=`, `<`, `>`, `<=`, `>=`; a bare number means `=`. The
//! comparison may also follow the value (`hasword foo >= 2`).
//!
//! Conditions combine strictly left to right: `a or b and c` is `(a or b) and c`.
//!
//! # Tweaks
//!
//! Applied in the order written, after filtering:
//! `unique`, `duplicate`, `reverse`, `limit <n>`, `offset <n>`.
//!
//! # Examples
//!
//! ```text
//! select line from app.log containing 'error' and starting 'WARN'
//! select line from "my logs.txt" containing timeout or ending failed reverse limit 10
//! select line from words.txt not hasword >= 2 the and length < 40 unique
//! select line from app.log containing ERR casesensitive
//! ```

pub mod entities;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod tokenizer;

pub use entities::{
    CompareOp, Condition, ConditionKind, Connector, CountFilter, Line, ParsedQuery, Predicate,
    Tweak,
};
pub use error::{GrammarError, IoError, QueryError};
pub use evaluator::{evaluate, evaluate_lines, matches, read_lines};
pub use parser::{QueryOptions, parse};
pub use tokenizer::{Token, tokenize};

/// Tokenize and parse a query string
pub fn parse_query(query: &str, options: &QueryOptions) -> Result<ParsedQuery, GrammarError> {
    parse(&tokenize(query), options)
}

/// Tokenize, parse and evaluate a query string
///
/// An empty result is a successful query with no matching lines.
pub fn run_query(query: &str, options: &QueryOptions) -> Result<Vec<Line>, QueryError> {
    let parsed = parse_query(query, options)?;
    Ok(evaluate(&parsed)?)
}
