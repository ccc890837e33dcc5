use thiserror::Error;

/// Errors raised while turning tokens into a query plan
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Empty query")]
    EmptyQuery,

    #[error("Query must start with 'select'")]
    MissingSelect,

    #[error("Missing 'from' keyword")]
    MissingFrom,

    #[error("Missing filename after 'from'")]
    MissingFilename,

    #[error(
        "Unknown condition type '{0}'. Allowed: containing, ending, hasword, length, starting, wordcount"
    )]
    UnknownCondition(String),

    #[error("Missing value for condition '{0}'")]
    MissingValue(String),

    #[error("Condition '{0}' requires a count, e.g. '{0} >= 3'")]
    MissingCount(String),

    #[error("Count for condition '{condition}' is not a number: '{value}'")]
    InvalidCount { condition: String, value: String },

    #[error("Condition '{0}' does not take a count")]
    UnexpectedCount(String),

    #[error("Tweak '{0}' missing count")]
    MissingTweakCount(String),

    #[error("Tweak '{tweak}' count is not a number: '{value}'")]
    InvalidTweakCount { tweak: String, value: String },

    #[error("Missing 'and'/'or' between condition '{previous}' and condition '{next}'")]
    MissingConnector { previous: String, next: String },

    #[error("Connector '{0}' must directly follow a condition")]
    MisplacedConnector(String),

    #[error("Connector '{0}' is not followed by a condition")]
    DanglingConnector(String),

    #[error("'not' is not followed by a condition")]
    DanglingNegation,
}

/// Errors raised while reading the queried file
#[derive(Debug, Error)]
pub enum IoError {
    #[error("Could not open file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure of a full tokenize, parse and evaluate run
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Io(#[from] IoError),
}

impl QueryError {
    pub fn is_grammar(&self) -> bool {
        matches!(self, QueryError::Grammar(_))
    }
}
