//! Typed access to located elements.
//!
//! The `read_*` functions run a query and convert the result; the
//! `*_value` functions convert an element already in hand, such as one
//! produced by [`ArraySteps`](crate::ArraySteps). Errors from the lookup are
//! passed through unchanged, and `unwrap_or_default()` on any result gives
//! the conventional zero value.
//!
//! # Example
//!
//! ```
//! use jread::accessor::{read_double, read_int, read_long, read_string};
//!
//! let json = br#"{"n": 42, "x": -123.45, "yes": true, "s": "This is a string"}"#;
//! assert_eq!(read_long(json, "{'n'", &[]), Ok(42));
//! assert_eq!(read_int(json, "{'yes'", &[]), Ok(1));
//! assert_eq!(read_double(json, "{'x'", &[]), Ok(-123.45));
//!
//! let mut buf = [0u8; 16];
//! let copied = read_string(json, "{'s'", &[], &mut buf).unwrap();
//! assert_eq!(&buf[..copied.written], b"This is a strin");
//! assert!(copied.is_truncated());
//! ```

use crate::document::{Element, JsonType, ReadError};
use crate::locate;

/// Outcome of copying an element's text into a bounded sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Copied {
    /// Bytes written, not counting the NUL terminator.
    pub written: usize,
    /// Bytes the element had to offer.
    pub available: usize,
}

impl Copied {
    pub fn is_truncated(&self) -> bool {
        self.written < self.available
    }
}

/// Parses the leading integer part of a JSON number, like C's `atol`.
///
/// Any fraction or exponent is ignored.
fn parse_long(raw: &[u8]) -> Result<i64, ReadError> {
    let (negative, digits) = match raw.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, raw),
    };
    let mut value: i64 = 0;
    let mut seen = false;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i64::from(b - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            })
            .ok_or(ReadError::NumberOutOfRange)?;
        seen = true;
    }
    if seen {
        Ok(value)
    } else {
        Err(ReadError::InvalidNumber)
    }
}

/// Converts a number (or `true`/`false` as 1/0) to `i64`.
pub fn long_value(element: &Element<'_>) -> Result<i64, ReadError> {
    let element = element.check()?;
    match element.kind() {
        JsonType::Number => parse_long(element.raw()),
        JsonType::True => Ok(1),
        JsonType::False => Ok(0),
        _ => Err(ReadError::TypeMismatch),
    }
}

/// Like [`long_value`], failing with `NumberOutOfRange` outside `i32`.
pub fn int_value(element: &Element<'_>) -> Result<i32, ReadError> {
    let value = long_value(element)?;
    i32::try_from(value).map_err(|_| ReadError::NumberOutOfRange)
}

/// Converts a number (or `true`/`false` as 1.0/0.0) to `f64`.
pub fn double_value(element: &Element<'_>) -> Result<f64, ReadError> {
    let element = element.check()?;
    match element.kind() {
        JsonType::Number => std::str::from_utf8(element.raw())
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .ok_or(ReadError::InvalidNumber),
        JsonType::True => Ok(1.0),
        JsonType::False => Ok(0.0),
        _ => Err(ReadError::TypeMismatch),
    }
}

/// Converts `true`/`false`, or a number compared against zero, to `bool`.
pub fn bool_value(element: &Element<'_>) -> Result<bool, ReadError> {
    let element = element.check()?;
    match element.kind() {
        JsonType::True => Ok(true),
        JsonType::False => Ok(false),
        JsonType::Number => double_value(&element).map(|value| value != 0.0),
        _ => Err(ReadError::TypeMismatch),
    }
}

/// Copies the element's text into `sink`, NUL terminated.
///
/// At most `sink.len() - 1` bytes are written. Strings are copied without
/// their quotes but with escapes as written; other kinds copy their raw
/// text. On error `sink` is left holding an empty string.
pub fn copy_string(element: &Element<'_>, sink: &mut [u8]) -> Result<Copied, ReadError> {
    if let Some(error) = element.error() {
        if let Some(first) = sink.first_mut() {
            *first = 0;
        }
        return Err(error);
    }
    let source = element.contents();
    let written = source.len().min(sink.len().saturating_sub(1));
    sink[..written].copy_from_slice(&source[..written]);
    if let Some(terminator) = sink.get_mut(written) {
        *terminator = 0;
    }
    Ok(Copied {
        written,
        available: source.len(),
    })
}

pub fn read_long(buf: &[u8], query: &str, params: &[usize]) -> Result<i64, ReadError> {
    long_value(&locate(buf, query, params))
}

pub fn read_int(buf: &[u8], query: &str, params: &[usize]) -> Result<i32, ReadError> {
    int_value(&locate(buf, query, params))
}

pub fn read_double(buf: &[u8], query: &str, params: &[usize]) -> Result<f64, ReadError> {
    double_value(&locate(buf, query, params))
}

pub fn read_bool(buf: &[u8], query: &str, params: &[usize]) -> Result<bool, ReadError> {
    bool_value(&locate(buf, query, params))
}

/// Locates an element and copies its text into `sink`; see [`copy_string`].
pub fn read_string(
    buf: &[u8],
    query: &str,
    params: &[usize],
    sink: &mut [u8],
) -> Result<Copied, ReadError> {
    copy_string(&locate(buf, query, params), sink)
}
