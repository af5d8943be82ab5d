//! Query string parser.
//!
//! The parser is an iterator: each call to `next` reads one selector, so the
//! evaluator can stop reading the query as soon as the JSON side fails.

use super::ast::{Index, Selector};
use super::error::QueryError;

/// Parser for jread query strings.
#[derive(Debug, Clone)]
pub struct Parser<'q> {
    input: &'q str,
    position: usize,
    failed: bool,
}

impl<'q> Parser<'q> {
    /// Creates a new parser for the given query string.
    pub fn new(query: &'q str) -> Self {
        Self {
            input: query,
            position: 0,
            failed: false,
        }
    }

    /// Parses the whole query up front.
    pub fn parse(query: &'q str) -> Result<Vec<Selector<'q>>, QueryError> {
        Parser::new(query).collect()
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the current character and advances past it.
    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn unexpected(&self, expected: &'static str) -> QueryError {
        match self.peek() {
            Some(found) => QueryError::UnexpectedToken {
                position: self.position,
                found,
                expected,
            },
            None => QueryError::UnexpectedEnd { expected },
        }
    }

    fn parse_selector(&mut self) -> Result<Selector<'q>, QueryError> {
        match self.peek() {
            Some('{') => {
                self.bump();
                self.skip_whitespace();
                match self.peek() {
                    Some(quote @ ('\'' | '"')) => {
                        self.bump();
                        self.parse_key(quote).map(Selector::Key)
                    }
                    _ => self
                        .parse_index("a quoted key, an index or '*'")
                        .map(Selector::KeyAt),
                }
            }
            Some('[') => {
                self.bump();
                self.skip_whitespace();
                self.parse_index("an index or '*'").map(Selector::Item)
            }
            _ => Err(self.unexpected("'{' or '['")),
        }
    }

    /// Reads key text up to the closing `quote`; the text is used verbatim.
    fn parse_key(&mut self, quote: char) -> Result<&'q str, QueryError> {
        let start = self.position;
        match self.input[start..].find(quote) {
            Some(len) => {
                self.position = start + len + quote.len_utf8();
                Ok(&self.input[start..start + len])
            }
            None => {
                self.position = self.input.len();
                Err(QueryError::UnexpectedEnd {
                    expected: "closing quote",
                })
            }
        }
    }

    fn parse_index(&mut self, expected: &'static str) -> Result<Index, QueryError> {
        let start = self.position;
        match self.peek() {
            Some('*') => {
                self.bump();
                Ok(Index::Param)
            }
            Some(ch) if ch.is_ascii_digit() => {
                let mut value: usize = 0;
                while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit as usize))
                        .ok_or(QueryError::IndexOverflow { position: start })?;
                    self.bump();
                }
                Ok(Index::At(value))
            }
            _ => Err(self.unexpected(expected)),
        }
    }
}

impl<'q> Iterator for Parser<'q> {
    type Item = Result<Selector<'q>, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_whitespace();
        self.peek()?;
        let selector = self.parse_selector();
        if selector.is_err() {
            self.failed = true;
        }
        Some(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert!(Parser::parse("").unwrap().is_empty());
        assert!(Parser::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_key() {
        let path = Parser::parse("{'astring'").unwrap();
        assert_eq!(path, vec![Selector::Key("astring")]);
    }

    #[test]
    fn test_parse_double_quoted_key() {
        let path = Parser::parse(r#"{"obj2.1""#).unwrap();
        assert_eq!(path, vec![Selector::Key("obj2.1")]);
    }

    #[test]
    fn test_parse_key_keeps_other_quote() {
        let path = Parser::parse(r#"{'say "hi"'"#).unwrap();
        assert_eq!(path, vec![Selector::Key(r#"say "hi""#)]);
    }

    #[test]
    fn test_parse_indices() {
        let path = Parser::parse("[4[2{1").unwrap();
        assert_eq!(
            path,
            vec![
                Selector::Item(Index::At(4)),
                Selector::Item(Index::At(2)),
                Selector::KeyAt(Index::At(1)),
            ]
        );
    }

    #[test]
    fn test_parse_wildcards() {
        let path = Parser::parse("[*{*").unwrap();
        assert_eq!(
            path,
            vec![Selector::Item(Index::Param), Selector::KeyAt(Index::Param)]
        );
        assert!(path.iter().all(Selector::is_wildcard));
    }

    #[test]
    fn test_parse_whitespace_handling() {
        let path = Parser::parse(" {'anObject' { 'two' [ 3 ").unwrap();
        assert_eq!(
            path,
            vec![
                Selector::Key("anObject"),
                Selector::Key("two"),
                Selector::Item(Index::At(3)),
            ]
        );
    }

    #[test]
    fn test_parse_unterminated_key_fails() {
        let err = Parser::parse("{'abc").unwrap_err();
        assert_eq!(
            err,
            QueryError::UnexpectedEnd {
                expected: "closing quote"
            }
        );
    }

    #[test]
    fn test_parse_bad_token_fails() {
        let err = Parser::parse("{'a'.b").unwrap_err();
        assert!(matches!(
            err,
            QueryError::UnexpectedToken {
                position: 4,
                found: '.',
                ..
            }
        ));
        assert!(Parser::parse("[x").is_err());
        assert!(Parser::parse("[").is_err());
        assert!(Parser::parse("[-1").is_err());
    }

    #[test]
    fn test_parse_index_overflow() {
        let err = Parser::parse("[99999999999999999999999").unwrap_err();
        assert_eq!(err, QueryError::IndexOverflow { position: 1 });
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut parser = Parser::new("[1 ? [2");
        assert_eq!(parser.next(), Some(Ok(Selector::Item(Index::At(1)))));
        assert!(matches!(parser.next(), Some(Err(_))));
        assert_eq!(parser.next(), None);
    }
}
