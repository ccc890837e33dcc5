use super::entities::{
    CompareOp, Condition, ConditionKind, Connector, CountFilter, ParsedQuery, Predicate, Tweak,
};
use super::error::GrammarError;
use super::tokenizer::Token;
use std::path::PathBuf;

/// Per-invocation defaults that a query may override
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Used unless the query ends with `casesensitive`
    pub case_sensitive: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }
}

/// Build a query plan from tokens
///
/// Conditions and tweaks may appear in any order after the filename; tweaks
/// keep their source order. A condition's trailing `and`/`or` is stored on that
/// condition and joins it to the next one.
pub fn parse(tokens: &[Token], options: &QueryOptions) -> Result<ParsedQuery, GrammarError> {
    let first = tokens.first().ok_or(GrammarError::EmptyQuery)?;
    if !first.is_keyword("select") {
        return Err(GrammarError::MissingSelect);
    }

    let (tokens, case_sensitive) = match tokens.split_last() {
        Some((last, rest)) if last.is_keyword("casesensitive") => (rest, true),
        _ => (tokens, options.case_sensitive),
    };

    let from_idx = tokens
        .iter()
        .position(|t| t.is_keyword("from"))
        .ok_or(GrammarError::MissingFrom)?;
    let target_file = tokens
        .get(from_idx + 1)
        .map(|t| PathBuf::from(&t.text))
        .ok_or(GrammarError::MissingFilename)?;

    let mut conditions: Vec<Condition> = Vec::new();
    let mut tweaks = Vec::new();
    let mut negated = false;
    let mut skipped_connector: Option<Connector> = None;
    let mut i = from_idx + 2;

    while i < tokens.len() {
        let token = &tokens[i];

        if let Some(consumed) = parse_tweak(token, &tokens[i + 1..], &mut tweaks)? {
            i += consumed;
            continue;
        }
        if !token.quoted
            && let Some(connector) = Connector::from_keyword(&token.text)
        {
            skipped_connector = Some(connector);
            i += 1;
            continue;
        }
        if token.is_keyword("not") {
            negated = true;
            i += 1;
            continue;
        }

        let kind = if token.quoted {
            return Err(GrammarError::UnknownCondition(token.text.clone()));
        } else {
            token.text.parse::<ConditionKind>()?
        };
        let (predicate, consumed) = parse_predicate(kind, &tokens[i + 1..])?;
        i += consumed;

        let connector = tokens
            .get(i)
            .filter(|t| !t.quoted)
            .and_then(|t| Connector::from_keyword(&t.text));
        if connector.is_some() {
            i += 1;
        }

        if let Some(previous) = conditions.last()
            && previous.connector.is_none()
        {
            return Err(match skipped_connector {
                Some(stray) => GrammarError::MisplacedConnector(stray.keyword().to_string()),
                None => GrammarError::MissingConnector {
                    previous: previous.predicate.kind().to_string(),
                    next: kind.to_string(),
                },
            });
        }
        skipped_connector = None;

        conditions.push(Condition {
            predicate,
            negated,
            connector,
        });
        negated = false;
    }

    if negated {
        return Err(GrammarError::DanglingNegation);
    }
    if let Some(connector) = conditions.last().and_then(|c| c.connector) {
        return Err(GrammarError::DanglingConnector(
            connector.keyword().to_string(),
        ));
    }

    tracing::debug!(
        file = %target_file.display(),
        conditions = conditions.len(),
        tweaks = tweaks.len(),
        case_sensitive,
        "parsed query"
    );

    Ok(ParsedQuery::new(
        target_file,
        conditions,
        tweaks,
        case_sensitive,
    ))
}

/// Recognize a tweak keyword at `token`, returning how many tokens it used
fn parse_tweak(
    token: &Token,
    rest: &[Token],
    tweaks: &mut Vec<Tweak>,
) -> Result<Option<usize>, GrammarError> {
    if token.quoted {
        return Ok(None);
    }

    let keyword = token.text.to_lowercase();
    let tweak = match keyword.as_str() {
        "unique" => Tweak::Unique,
        "duplicate" => Tweak::Duplicate,
        "reverse" => Tweak::Reverse,
        "limit" | "offset" => {
            let count = rest
                .first()
                .ok_or_else(|| GrammarError::MissingTweakCount(keyword.clone()))?;
            let n = parse_integer(count).ok_or_else(|| GrammarError::InvalidTweakCount {
                tweak: keyword.clone(),
                value: count.text.clone(),
            })?;
            tweaks.push(if keyword == "limit" {
                Tweak::Limit(n)
            } else {
                Tweak::Offset(n)
            });
            return Ok(Some(2));
        }
        _ => return Ok(None),
    };

    tweaks.push(tweak);
    Ok(Some(1))
}

/// Parse the tokens following a condition keyword
///
/// Returns the predicate and the number of tokens used, keyword included.
fn parse_predicate(kind: ConditionKind, rest: &[Token]) -> Result<(Predicate, usize), GrammarError> {
    let name = kind.canonical_name();
    let next = rest.first().ok_or_else(|| {
        if kind.requires_count() {
            GrammarError::MissingCount(name.to_string())
        } else {
            GrammarError::MissingValue(name.to_string())
        }
    })?;

    let operator = if next.quoted {
        None
    } else {
        CompareOp::from_symbol(&next.text)
    };

    let (count, mut consumed) = if let Some(op) = operator {
        let operand = rest
            .get(1)
            .ok_or_else(|| GrammarError::MissingCount(name.to_string()))?;
        let operand = parse_integer(operand).ok_or_else(|| GrammarError::InvalidCount {
            condition: name.to_string(),
            value: operand.text.clone(),
        })?;
        (Some(CountFilter::new(op, operand)), 3)
    } else if next.is_bare_integer() {
        let operand = parse_integer(next).ok_or_else(|| GrammarError::InvalidCount {
            condition: name.to_string(),
            value: next.text.clone(),
        })?;
        (Some(CountFilter::new(CompareOp::Eq, operand)), 2)
    } else {
        (None, 1)
    };

    let value = if kind.takes_value() {
        let value = rest
            .get(consumed - 1)
            .ok_or_else(|| GrammarError::MissingValue(name.to_string()))?;
        consumed += 1;
        Some(value.text.clone())
    } else {
        None
    };

    // `hasword 'foo' = 2`: the comparison may also follow the value
    let count = match (count, value.is_some()) {
        (None, true) => match parse_trailing_count(name, &rest[consumed - 1..])? {
            Some(trailing) => {
                consumed += 2;
                Some(trailing)
            }
            None => None,
        },
        (count, _) => count,
    };
    if count.is_some() && !kind.accepts_count() {
        return Err(GrammarError::UnexpectedCount(name.to_string()));
    }

    let predicate = match (kind, count, value) {
        (ConditionKind::Containing, count, Some(needle)) => Predicate::Containing { needle, count },
        (ConditionKind::Starting, _, Some(prefix)) => Predicate::Starting { prefix },
        (ConditionKind::Ending, _, Some(suffix)) => Predicate::Ending { suffix },
        (ConditionKind::HasWord, count, Some(word)) => Predicate::HasWord { word, count },
        (ConditionKind::Length, Some(count), _) => Predicate::Length { count },
        (ConditionKind::WordCount, Some(count), _) => Predicate::WordCount { count },
        _ => return Err(GrammarError::MissingCount(name.to_string())),
    };

    Ok((predicate, consumed))
}

/// A bare operator followed by its operand, placed after the value
fn parse_trailing_count(name: &str, rest: &[Token]) -> Result<Option<CountFilter>, GrammarError> {
    let Some(op) = rest
        .first()
        .filter(|t| !t.quoted)
        .and_then(|t| CompareOp::from_symbol(&t.text))
    else {
        return Ok(None);
    };

    let operand = rest
        .get(1)
        .ok_or_else(|| GrammarError::MissingCount(name.to_string()))?;
    let operand = parse_integer(operand).ok_or_else(|| GrammarError::InvalidCount {
        condition: name.to_string(),
        value: operand.text.clone(),
    })?;
    Ok(Some(CountFilter::new(op, operand)))
}

fn parse_integer(token: &Token) -> Option<usize> {
    if token.is_bare_integer() {
        token.text.parse().ok()
    } else {
        None
    }
}
