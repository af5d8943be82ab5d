//! Zero-copy element descriptors.
//!
//! An [`Element`] is a borrowed view over the caller's JSON buffer: a
//! structural type, a byte range, a child count and an optional error. It
//! never owns data, and the lifetime `'a` keeps it from outliving the buffer
//! it was resolved against.
//!
//! # Example
//!
//! ```
//! use jread::{locate, JsonType};
//!
//! let json = br#"{"a":1,"b":[10,20,30]}"#;
//! let element = locate(json, "{'b'", &[]);
//! assert_eq!(element.kind(), JsonType::Array);
//! assert_eq!(element.elements(), 3);
//! assert_eq!(element.raw(), b"[10,20,30]");
//! ```

use super::error::{error_to_str, ReadError};
use std::fmt;

/// Structural type of a located element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// Scanning failed before the type could be determined.
    Invalid,
    Object,
    Array,
    String,
    Number,
    True,
    False,
    Null,
    /// A wildcard selector had no parameter to consume.
    QueryParam,
    /// The array step iterator reached the closing `]`.
    EndOfArray,
}

impl JsonType {
    /// Human readable name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Invalid => "Error",
            JsonType::Object => "Object",
            JsonType::Array => "Array",
            JsonType::String => "String",
            JsonType::Number => "Number",
            JsonType::True => "true",
            JsonType::False => "false",
            JsonType::Null => "null",
            JsonType::QueryParam => "* parameter",
            JsonType::EndOfArray => "]",
        }
    }

    /// True for objects and arrays.
    pub fn is_container(self) -> bool {
        matches!(self, JsonType::Object | JsonType::Array)
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located region of a JSON buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a> {
    buf: &'a [u8],
    kind: JsonType,
    error: Option<ReadError>,
    offset: usize,
    len: usize,
    elements: usize,
}

impl<'a> Element<'a> {
    /// Creates a successfully scanned element.
    pub(crate) fn new(
        buf: &'a [u8],
        kind: JsonType,
        offset: usize,
        len: usize,
        elements: usize,
    ) -> Self {
        let offset = offset.min(buf.len());
        let len = len.min(buf.len() - offset);
        Self {
            buf,
            kind,
            error: None,
            offset,
            len,
            elements,
        }
    }

    /// Creates an empty element at `offset` carrying `error`.
    pub(crate) fn failed(buf: &'a [u8], kind: JsonType, error: ReadError, offset: usize) -> Self {
        let mut element = Self::new(buf, kind, offset, 0, 0);
        element.error = Some(error);
        element
    }

    /// Keeps the location of `self` but marks it with `error`.
    pub(crate) fn with_error(mut self, error: ReadError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn kind(&self) -> JsonType {
        self.kind
    }

    pub fn error(&self) -> Option<ReadError> {
        self.error
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Message for the error field, "Ok" on success.
    pub fn error_message(&self) -> &'static str {
        error_to_str(self.error)
    }

    /// Byte offset of the element's first byte in the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes of the element's raw text.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of immediate children for containers, 0 otherwise.
    pub fn elements(&self) -> usize {
        self.elements
    }

    /// The buffer this element was located in.
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Raw bytes of the element exactly as written, quotes and escapes included.
    pub fn raw(&self) -> &'a [u8] {
        &self.buf[self.offset..self.offset + self.len]
    }

    /// Raw text as `&str`, or `None` when it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.raw()).ok()
    }

    /// Raw bytes with the enclosing quotes of a string removed.
    ///
    /// Escapes are left as written. Other kinds return [`Element::raw`].
    pub fn contents(&self) -> &'a [u8] {
        let raw = self.raw();
        if self.kind == JsonType::String && raw.len() >= 2 {
            &raw[1..raw.len() - 1]
        } else {
            raw
        }
    }

    /// Converts the error field into a `Result`.
    pub fn check(self) -> Result<Self, ReadError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}
