//! Error codes reported by the scanner and the query evaluator.
//!
//! Errors never unwind: they are stored in the [`Element`](super::Element)
//! returned by a lookup, next to whatever location was resolved last.

use std::fmt;

/// Broad classification of a [`ReadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A string, number or keyword could not be read.
    MalformedLiteral,
    /// An object or array is missing a delimiter or ends early.
    MalformedContainer,
    /// A named key selector matched no member.
    KeyNotFound,
    /// An index selector went past the last member.
    IndexOutOfRange,
    /// A selector was applied to a value of the wrong type.
    TypeMismatch,
    /// A wildcard found no parameter left to consume.
    ParameterExhausted,
    /// The query text itself could not be parsed.
    MalformedQuery,
}

/// Errors that can occur while locating or converting an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadError {
    /// The byte at the value position does not start any JSON value.
    BadValue,
    /// A string literal has no closing quote.
    UnterminatedString,
    /// A `-` without digits, or a number where none may start.
    InvalidNumber,
    /// Something starting with `t`, `f` or `n` that is not a keyword.
    BadKeyword,
    /// A number does not fit the requested integer type.
    NumberOutOfRange,
    /// An object member does not start with a string key.
    ExpectedKey,
    /// An object key is not followed by `:`.
    ExpectedColon,
    /// An object member is followed by neither `,` nor `}`.
    ExpectedObjectComma,
    /// An array element is followed by neither `,` nor `]`.
    ExpectedArrayComma,
    /// The buffer ended in the middle of a container.
    UnexpectedEnd,
    /// Containers are nested deeper than the configured limit.
    TooDeep,
    /// Named key selector matched no member.
    KeyNotFound,
    /// Array index is past the last element.
    IndexOutOfRange,
    /// Positional key index is past the last member.
    KeyIndexOutOfRange,
    /// Object selector on an array or array selector on an object.
    TypeMismatch,
    /// A selector remains but the current value is a scalar.
    TerminalValue,
    /// A `*` selector has no parameter left.
    ParamExhausted,
    /// The query contains something other than a selector.
    BadQuery,
}

impl ReadError {
    /// Returns the broad classification of this error.
    pub fn kind(self) -> ErrorKind {
        match self {
            ReadError::BadValue
            | ReadError::UnterminatedString
            | ReadError::InvalidNumber
            | ReadError::BadKeyword
            | ReadError::NumberOutOfRange => ErrorKind::MalformedLiteral,
            ReadError::ExpectedKey
            | ReadError::ExpectedColon
            | ReadError::ExpectedObjectComma
            | ReadError::ExpectedArrayComma
            | ReadError::UnexpectedEnd
            | ReadError::TooDeep => ErrorKind::MalformedContainer,
            ReadError::KeyNotFound => ErrorKind::KeyNotFound,
            ReadError::IndexOutOfRange | ReadError::KeyIndexOutOfRange => {
                ErrorKind::IndexOutOfRange
            }
            ReadError::TypeMismatch | ReadError::TerminalValue => ErrorKind::TypeMismatch,
            ReadError::ParamExhausted => ErrorKind::ParameterExhausted,
            ReadError::BadQuery => ErrorKind::MalformedQuery,
        }
    }

    /// Numeric code, stable across releases; 0 is reserved for success.
    pub fn code(self) -> u8 {
        match self {
            ReadError::TypeMismatch => 1,
            ReadError::BadValue => 2,
            ReadError::ExpectedKey => 3,
            ReadError::ExpectedColon => 4,
            ReadError::KeyNotFound => 5,
            ReadError::ExpectedObjectComma => 6,
            ReadError::TerminalValue => 7,
            ReadError::BadKeyword => 8,
            ReadError::ExpectedArrayComma => 9,
            ReadError::IndexOutOfRange => 10,
            ReadError::KeyIndexOutOfRange => 11,
            ReadError::BadQuery => 12,
            ReadError::UnterminatedString => 13,
            ReadError::InvalidNumber => 14,
            ReadError::UnexpectedEnd => 15,
            ReadError::TooDeep => 16,
            ReadError::ParamExhausted => 17,
            ReadError::NumberOutOfRange => 18,
        }
    }

    /// Human readable message for this error.
    pub fn as_str(self) -> &'static str {
        match self {
            ReadError::BadValue => "Error reading JSON value",
            ReadError::UnterminatedString => "Unterminated string",
            ReadError::InvalidNumber => "Invalid number",
            ReadError::BadKeyword => "Unexpected character",
            ReadError::NumberOutOfRange => "Number out of range",
            ReadError::ExpectedKey => "Expected \"key\"",
            ReadError::ExpectedColon => "Expected ':'",
            ReadError::ExpectedObjectComma => "Expected ',' in object",
            ReadError::ExpectedArrayComma => "Expected ',' in array",
            ReadError::UnexpectedEnd => "Unexpected end of JSON",
            ReadError::TooDeep => "Nesting too deep",
            ReadError::KeyNotFound => "Object key not found",
            ReadError::IndexOutOfRange => "Array element not found (bad index)",
            ReadError::KeyIndexOutOfRange => "Object key not found (bad index)",
            ReadError::TypeMismatch => "JSON does not match Query",
            ReadError::TerminalValue => "Terminal value found before end of query",
            ReadError::ParamExhausted => "Query parameter missing",
            ReadError::BadQuery => "Bad query",
        }
    }
}

/// Renders an optional error the way diagnostics print it: `None` is "Ok".
pub fn error_to_str(error: Option<ReadError>) -> &'static str {
    error.map_or("Ok", ReadError::as_str)
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for ReadError {}
