/// A single word of a query, as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Whether the token came from a quoted literal
    pub quoted: bool,
}

impl Token {
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }

    /// Case-insensitive keyword test; quoted literals are never keywords
    pub fn is_keyword(&self, keyword: &str) -> bool {
        !self.quoted && self.text.eq_ignore_ascii_case(keyword)
    }

    /// A bare run of ASCII digits
    pub fn is_bare_integer(&self) -> bool {
        !self.quoted && !self.text.is_empty() && self.text.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Split a query into tokens, keeping quoted segments whole
///
/// Single and double quotes both delimit literals; inside a literal the other
/// quote character is ordinary text. An empty literal (`''`) still produces a
/// token. There is no escape character. An unterminated literal runs to the
/// end of the input and is kept as a quoted token.
pub fn tokenize(query: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in query.chars() {
        match quote {
            Some(q) if c == q => {
                tokens.push(Token::quoted(std::mem::take(&mut current)));
                quote = None;
            }
            Some(_) => current.push(c),
            None if c == '\'' || c == '"' => {
                if !current.is_empty() {
                    tokens.push(Token::bare(std::mem::take(&mut current)));
                }
                quote = Some(c);
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(Token::bare(std::mem::take(&mut current)));
                }
            }
            None => current.push(c),
        }
    }

    if quote.is_some() {
        tracing::debug!(content = %current, "unterminated quote kept as literal");
        tokens.push(Token::quoted(current));
    } else if !current.is_empty() {
        tokens.push(Token::bare(current));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_splits_on_whitespace() {
        let tokens = tokenize("select  line\tfrom a.txt");
        assert_eq!(texts(&tokens), vec!["select", "line", "from", "a.txt"]);
        assert!(tokens.iter().all(|t| !t.quoted));
    }

    #[test]
    fn test_quoted_literal_is_one_token() {
        let tokens = tokenize(r#"containing "two words" or 'it"s'"#);
        assert_eq!(texts(&tokens), vec!["containing", "two words", "or", "it\"s"]);
        assert!(tokens[1].quoted);
        assert!(!tokens[2].quoted);
        assert!(tokens[3].quoted);
    }

    #[test]
    fn test_empty_quotes_produce_empty_token() {
        let tokens = tokenize("ending ''");
        assert_eq!(tokens, vec![Token::bare("ending"), Token::quoted("")]);
    }

    #[test]
    fn test_quote_flushes_pending_word() {
        let tokens = tokenize("abc'def'ghi");
        assert_eq!(
            tokens,
            vec![Token::bare("abc"), Token::quoted("def"), Token::bare("ghi")]
        );
    }

    #[test]
    fn test_unterminated_quote_is_kept() {
        let tokens = tokenize("containing 'oops here");
        assert_eq!(
            tokens,
            vec![Token::bare("containing"), Token::quoted("oops here")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_bare_integer_detection() {
        assert!(Token::bare("42").is_bare_integer());
        assert!(!Token::quoted("42").is_bare_integer());
        assert!(!Token::bare("-4").is_bare_integer());
        assert!(!Token::bare("").is_bare_integer());
    }
}
