use super::error::GrammarError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The condition keywords understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionKind {
    /// Line contains the value (optionally a given number of times)
    Containing,
    /// Line starts with the value
    Starting,
    /// Line, without its terminator, ends with the value
    Ending,
    /// Character count of the stripped line
    Length,
    /// Value is one of the space-separated words (optionally counted)
    HasWord,
    /// Number of space-separated words
    WordCount,
}

impl FromStr for ConditionKind {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "containing" => Ok(ConditionKind::Containing),
            "starting" => Ok(ConditionKind::Starting),
            "ending" => Ok(ConditionKind::Ending),
            "length" => Ok(ConditionKind::Length),
            "hasword" => Ok(ConditionKind::HasWord),
            "wordcount" => Ok(ConditionKind::WordCount),
            _ => Err(GrammarError::UnknownCondition(s.to_string())),
        }
    }
}

impl ConditionKind {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ConditionKind::Containing => "containing",
            ConditionKind::Starting => "starting",
            ConditionKind::Ending => "ending",
            ConditionKind::Length => "length",
            ConditionKind::HasWord => "hasword",
            ConditionKind::WordCount => "wordcount",
        }
    }

    /// Kinds that compare against a literal value token
    pub fn takes_value(&self) -> bool {
        !self.requires_count()
    }

    /// Kinds that are meaningless without a count
    pub fn requires_count(&self) -> bool {
        matches!(self, ConditionKind::Length | ConditionKind::WordCount)
    }

    pub fn accepts_count(&self) -> bool {
        !matches!(self, ConditionKind::Starting | ConditionKind::Ending)
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Comparison operator between a measured count and an operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
}

impl CompareOp {
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "=" => Some(CompareOp::Eq),
            "<" => Some(CompareOp::Lt),
            ">" => Some(CompareOp::Gt),
            "<=" => Some(CompareOp::Le),
            ">=" => Some(CompareOp::Ge),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }

    pub fn apply(&self, lhs: usize, rhs: usize) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Ge => lhs >= rhs,
        }
    }
}

/// An operator together with its operand; the two never exist apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountFilter {
    pub op: CompareOp,
    pub operand: usize,
}

impl CountFilter {
    pub fn new(op: CompareOp, operand: usize) -> Self {
        Self { op, operand }
    }

    pub fn matches(&self, measured: usize) -> bool {
        self.op.apply(measured, self.operand)
    }
}

impl fmt::Display for CountFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.symbol(), self.operand)
    }
}

/// Boolean operator joining a condition to the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    pub fn from_keyword(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("and") {
            Some(Connector::And)
        } else if s.eq_ignore_ascii_case("or") {
            Some(Connector::Or)
        } else {
            None
        }
    }

    pub fn combine(&self, lhs: bool, rhs: bool) -> bool {
        match self {
            Connector::And => lhs && rhs,
            Connector::Or => lhs || rhs,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Connector::And => "and",
            Connector::Or => "or",
        }
    }
}

/// What a single condition tests, carrying only the fields its kind uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Predicate {
    Containing {
        needle: String,
        count: Option<CountFilter>,
    },
    Starting {
        prefix: String,
    },
    Ending {
        suffix: String,
    },
    Length {
        count: CountFilter,
    },
    HasWord {
        word: String,
        count: Option<CountFilter>,
    },
    WordCount {
        count: CountFilter,
    },
}

impl Predicate {
    pub fn kind(&self) -> ConditionKind {
        match self {
            Predicate::Containing { .. } => ConditionKind::Containing,
            Predicate::Starting { .. } => ConditionKind::Starting,
            Predicate::Ending { .. } => ConditionKind::Ending,
            Predicate::Length { .. } => ConditionKind::Length,
            Predicate::HasWord { .. } => ConditionKind::HasWord,
            Predicate::WordCount { .. } => ConditionKind::WordCount,
        }
    }

    /// The literal compared against, for kinds that have one
    pub fn value(&self) -> Option<&str> {
        match self {
            Predicate::Containing { needle, .. } => Some(needle.as_str()),
            Predicate::Starting { prefix } => Some(prefix.as_str()),
            Predicate::Ending { suffix } => Some(suffix.as_str()),
            Predicate::HasWord { word, .. } => Some(word.as_str()),
            Predicate::Length { .. } | Predicate::WordCount { .. } => None,
        }
    }

    pub fn count(&self) -> Option<&CountFilter> {
        match self {
            Predicate::Containing { count, .. } | Predicate::HasWord { count, .. } => {
                count.as_ref()
            }
            Predicate::Length { count } | Predicate::WordCount { count } => Some(count),
            Predicate::Starting { .. } | Predicate::Ending { .. } => None,
        }
    }
}

/// A predicate plus its negation flag and the connector to the next condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    #[serde(flatten)]
    pub predicate: Predicate,
    pub negated: bool,
    pub connector: Option<Connector>,
}

/// Post-filter transform applied after the mask is folded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "tweak", content = "count", rename_all = "lowercase")]
pub enum Tweak {
    Unique,
    Duplicate,
    Reverse,
    Limit(usize),
    Offset(usize),
}

impl fmt::Display for Tweak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tweak::Unique => f.write_str("unique"),
            Tweak::Duplicate => f.write_str("duplicate"),
            Tweak::Reverse => f.write_str("reverse"),
            Tweak::Limit(n) => write!(f, "limit {n}"),
            Tweak::Offset(n) => write!(f, "offset {n}"),
        }
    }
}

/// A validated query, produced by [`super::parse`] and consumed by the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    target_file: PathBuf,
    conditions: Vec<Condition>,
    tweaks: Vec<Tweak>,
    case_sensitive: bool,
}

impl ParsedQuery {
    pub(crate) fn new(
        target_file: PathBuf,
        conditions: Vec<Condition>,
        tweaks: Vec<Tweak>,
        case_sensitive: bool,
    ) -> Self {
        Self {
            target_file,
            conditions,
            tweaks,
            case_sensitive,
        }
    }

    pub fn target_file(&self) -> &Path {
        &self.target_file
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn tweaks(&self) -> &[Tweak] {
        &self.tweaks
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

/// One line of the queried file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// 1-based position in the original file
    pub number: usize,
    /// Content including its original terminator, if any
    pub text: String,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// The content with its trailing line terminator removed
    pub fn stripped(&self) -> &str {
        strip_terminator(&self.text)
    }
}

pub(crate) fn strip_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}
