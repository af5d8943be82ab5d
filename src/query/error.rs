//! Error types for query parsing.

use std::fmt;

/// Errors that can occur while parsing a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Unexpected character at a specific position.
    UnexpectedToken {
        position: usize,
        found: char,
        expected: &'static str,
    },
    /// Unexpected end of input.
    UnexpectedEnd { expected: &'static str },
    /// An index too large to represent.
    IndexOverflow { position: usize },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnexpectedToken {
                position,
                found,
                expected,
            } => write!(
                f,
                "Unexpected '{}' at position {}, expected {}",
                found, position, expected
            ),
            QueryError::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of query, expected {}", expected)
            }
            QueryError::IndexOverflow { position } => {
                write!(f, "Index at position {} is too large", position)
            }
        }
    }
}

impl std::error::Error for QueryError {}
