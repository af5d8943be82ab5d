//! Byte-level JSON scanning primitives.
//!
//! The scanner measures one JSON value at a time: given the offset of its
//! first byte it reports the value's type, where it ends and, for
//! containers, how many immediate children it has. Nothing is allocated and
//! nothing is decoded. A NUL byte is treated the same as the end of the
//! buffer so C-style terminated buffers can be passed through unchanged.
//!
//! [`Children`] walks the members of one object or array and is shared by
//! container scanning, the query evaluator and the array step iterator.

use super::element::{Element, JsonType};
use super::error::ReadError;

/// Nesting depth accepted when no other limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// A value measured by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned {
    pub kind: JsonType,
    /// Offset of the value's first byte.
    pub start: usize,
    /// Offset just past the value's last byte.
    pub end: usize,
    /// Immediate children for containers, 0 otherwise.
    pub elements: usize,
}

/// A scan failure and the offset of the byte that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    pub error: ReadError,
    pub at: usize,
}

impl ScanError {
    fn new(error: ReadError, at: usize) -> Self {
        Self { error, at }
    }
}

/// Scans values inside a borrowed JSON buffer.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    buf: &'a [u8],
    max_depth: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limits how deeply nested containers may be before `TooDeep` is reported.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the byte at `pos`, or `None` at the end of the buffer or a NUL.
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        match self.buf.get(pos) {
            None | Some(0) => None,
            Some(&b) => Some(b),
        }
    }

    /// Returns the offset of the first non-whitespace byte at or after `pos`.
    pub fn skip_whitespace(&self, mut pos: usize) -> usize {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.byte_at(pos) {
            pos += 1;
        }
        pos
    }

    /// Measures the value whose first byte is at `pos`.
    pub fn scan_value(&self, pos: usize) -> Result<Scanned, ScanError> {
        self.scan_at_depth(pos, 0)
    }

    /// Measures the value at `pos` and wraps the outcome in an [`Element`].
    pub fn element(&self, pos: usize) -> Element<'a> {
        self.element_at_depth(pos, 0)
    }

    /// Like [`Scanner::element`] for a value nested `depth` containers deep,
    /// so the depth limit still counts from the document root.
    pub(crate) fn element_at_depth(&self, pos: usize, depth: usize) -> Element<'a> {
        match self.scan_at_depth(pos, depth) {
            Ok(scanned) => self.to_element(scanned),
            Err(err) => Element::failed(self.buf, self.classify(pos), err.error, err.at),
        }
    }

    pub(crate) fn to_element(&self, scanned: Scanned) -> Element<'a> {
        Element::new(
            self.buf,
            scanned.kind,
            scanned.start,
            scanned.end - scanned.start,
            scanned.elements,
        )
    }

    /// Guesses the type of the value at `pos` from its first byte.
    pub fn classify(&self, pos: usize) -> JsonType {
        match self.byte_at(pos) {
            Some(b'{') => JsonType::Object,
            Some(b'[') => JsonType::Array,
            Some(b'"') => JsonType::String,
            Some(b'-' | b'0'..=b'9') => JsonType::Number,
            Some(b't') => JsonType::True,
            Some(b'f') => JsonType::False,
            Some(b'n') => JsonType::Null,
            _ => JsonType::Invalid,
        }
    }

    /// Scans the string literal starting with the `"` at `pos`, returning the
    /// offset just past its closing quote.
    pub fn scan_string(&self, pos: usize) -> Result<usize, ScanError> {
        if self.byte_at(pos) != Some(b'"') {
            return Err(ScanError::new(ReadError::ExpectedKey, pos));
        }
        let mut i = pos + 1;
        loop {
            match self.byte_at(i) {
                None => return Err(ScanError::new(ReadError::UnterminatedString, pos)),
                Some(b'\\') => {
                    if self.byte_at(i + 1).is_none() {
                        return Err(ScanError::new(ReadError::UnterminatedString, pos));
                    }
                    i += 2;
                }
                Some(b'"') => return Ok(i + 1),
                Some(_) => i += 1,
            }
        }
    }

    fn scan_at_depth(&self, pos: usize, depth: usize) -> Result<Scanned, ScanError> {
        let kind = self.classify(pos);
        let (end, elements) = match kind {
            JsonType::Object => self.scan_container(pos, b'}', depth)?,
            JsonType::Array => self.scan_container(pos, b']', depth)?,
            JsonType::String => (self.scan_string(pos)?, 0),
            JsonType::Number => (self.scan_number(pos)?, 0),
            JsonType::True => (self.scan_keyword(pos, b"true")?, 0),
            JsonType::False => (self.scan_keyword(pos, b"false")?, 0),
            JsonType::Null => (self.scan_keyword(pos, b"null")?, 0),
            _ => {
                let error = match self.byte_at(pos) {
                    None => ReadError::UnexpectedEnd,
                    Some(_) => ReadError::BadValue,
                };
                return Err(ScanError::new(error, pos));
            }
        };
        Ok(Scanned {
            kind,
            start: pos,
            end,
            elements,
        })
    }

    fn scan_container(
        &self,
        pos: usize,
        close: u8,
        depth: usize,
    ) -> Result<(usize, usize), ScanError> {
        if depth >= self.max_depth {
            return Err(ScanError::new(ReadError::TooDeep, pos));
        }
        let mut children = Children::new(self, pos, close, depth);
        let mut count = 0;
        while let Some(member) = children.next_member()? {
            children.skip_value(&member)?;
            count += 1;
        }
        // `next_member` only returns None once the closing byte was consumed.
        Ok((children.position(), count))
    }

    fn scan_digits(&self, mut pos: usize) -> usize {
        while let Some(b'0'..=b'9') = self.byte_at(pos) {
            pos += 1;
        }
        pos
    }

    fn scan_number(&self, pos: usize) -> Result<usize, ScanError> {
        let mut end = pos;
        if self.byte_at(end) == Some(b'-') {
            end += 1;
        }
        let digits_end = self.scan_digits(end);
        if digits_end == end {
            return Err(ScanError::new(ReadError::InvalidNumber, pos));
        }
        end = digits_end;

        if self.byte_at(end) == Some(b'.') {
            let fraction_end = self.scan_digits(end + 1);
            if fraction_end > end + 1 {
                end = fraction_end;
            }
        }

        if let Some(b'e' | b'E') = self.byte_at(end) {
            let mut exp = end + 1;
            if let Some(b'+' | b'-') = self.byte_at(exp) {
                exp += 1;
            }
            let exp_end = self.scan_digits(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }
        Ok(end)
    }

    fn scan_keyword(&self, pos: usize, word: &[u8]) -> Result<usize, ScanError> {
        if self.buf[pos..].starts_with(word) {
            Ok(pos + word.len())
        } else {
            Err(ScanError::new(ReadError::BadKeyword, pos))
        }
    }
}

/// One member of an object or array, positioned at its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    /// Start and end of the quoted key, objects only.
    pub key: Option<(usize, usize)>,
    /// Offset of the value's first byte.
    pub value: usize,
}

/// Walks the immediate children of one container.
///
/// Call [`Children::next_member`] to reach the next value, then either
/// [`Children::skip_value`] to move past it or stop walking to descend into it.
#[derive(Debug)]
pub struct Children<'s, 'a> {
    scanner: &'s Scanner<'a>,
    pos: usize,
    close: u8,
    depth: usize,
    started: bool,
    /// Set when walking resumed just past a `,`, so a member must follow.
    after_comma: bool,
    done: bool,
}

impl<'s, 'a> Children<'s, 'a> {
    /// Starts walking the container whose opening byte is at `open`.
    pub fn new(scanner: &'s Scanner<'a>, open: usize, close: u8, depth: usize) -> Self {
        Self {
            scanner,
            pos: open + 1,
            close,
            depth,
            started: false,
            after_comma: false,
            done: false,
        }
    }

    /// Resumes walking at `pos`, which lies just past the opening byte or
    /// just past a separating `,`.
    pub fn resume(scanner: &'s Scanner<'a>, pos: usize, close: u8) -> Self {
        let after_comma = scanner
            .buffer()
            .get(..pos)
            .and_then(|before| {
                before
                    .iter()
                    .rev()
                    .find(|&&b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
            })
            == Some(&b',');
        Self {
            scanner,
            pos,
            close,
            depth: 0,
            started: false,
            after_comma,
            done: false,
        }
    }

    /// Current offset; just past the closing byte once the walk is done.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn is_object(&self) -> bool {
        self.close == b'}'
    }

    fn comma_error(&self) -> ReadError {
        if self.is_object() {
            ReadError::ExpectedObjectComma
        } else {
            ReadError::ExpectedArrayComma
        }
    }

    /// Advances to the next member, or returns `None` after consuming the
    /// closing byte.
    pub fn next_member(&mut self) -> Result<Option<Member>, ScanError> {
        if self.done {
            return Ok(None);
        }
        let s = self.scanner;
        let mut pos = s.skip_whitespace(self.pos);

        match s.byte_at(pos) {
            Some(b) if b == self.close && !self.after_comma => {
                self.pos = pos + 1;
                self.done = true;
                return Ok(None);
            }
            None => return Err(ScanError::new(ReadError::UnexpectedEnd, pos)),
            Some(b',') if self.started => pos = s.skip_whitespace(pos + 1),
            Some(_) if self.started => return Err(ScanError::new(self.comma_error(), pos)),
            Some(_) => {}
        }
        self.started = true;
        self.after_comma = false;

        let key = if self.is_object() {
            match s.byte_at(pos) {
                Some(b'"') => {}
                None => return Err(ScanError::new(ReadError::UnexpectedEnd, pos)),
                Some(_) => return Err(ScanError::new(ReadError::ExpectedKey, pos)),
            }
            let key_end = s.scan_string(pos)?;
            let colon = s.skip_whitespace(key_end);
            match s.byte_at(colon) {
                Some(b':') => {}
                None => return Err(ScanError::new(ReadError::UnexpectedEnd, colon)),
                Some(_) => return Err(ScanError::new(ReadError::ExpectedColon, colon)),
            }
            let key = (pos, key_end);
            pos = s.skip_whitespace(colon + 1);
            Some(key)
        } else {
            None
        };

        if s.byte_at(pos).is_none() {
            return Err(ScanError::new(ReadError::UnexpectedEnd, pos));
        }
        self.pos = pos;
        Ok(Some(Member { key, value: pos }))
    }

    /// Measures the member's value and moves past it.
    pub fn skip_value(&mut self, member: &Member) -> Result<Scanned, ScanError> {
        let scanned = self.scanner.scan_at_depth(member.value, self.depth + 1)?;
        self.pos = scanned.end;
        Ok(scanned)
    }

    /// Moves past the separator following the last skipped value without
    /// advancing to the next member.
    ///
    /// Returns true when a `,` was consumed and false when the closing byte
    /// is next; the closing byte itself is left in place.
    pub fn finish_separator(&mut self) -> Result<bool, ScanError> {
        let s = self.scanner;
        let pos = s.skip_whitespace(self.pos);
        match s.byte_at(pos) {
            Some(b',') => {
                self.pos = pos + 1;
                Ok(true)
            }
            Some(b) if b == self.close => {
                self.pos = pos;
                Ok(false)
            }
            None => Err(ScanError::new(ReadError::UnexpectedEnd, pos)),
            Some(_) => Err(ScanError::new(self.comma_error(), pos)),
        }
    }
}
