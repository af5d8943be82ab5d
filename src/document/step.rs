//! Resumable stepping through array elements.
//!
//! Indexing an array with `[N` rescans every element before `N`, so reading
//! all of a large array by index is quadratic. [`step`] instead scans exactly
//! one element and hands back the offset to resume from, and [`ArraySteps`]
//! wraps that in an iterator.
//!
//! # Example
//!
//! ```
//! use jread::{locate, ArraySteps};
//!
//! let json = br#"{"list": [1, "two", [3]]}"#;
//! let list = locate(json, "{'list'", &[]);
//! let raw: Vec<&[u8]> = ArraySteps::new(&list).unwrap().map(|e| e.raw()).collect();
//! assert_eq!(raw, vec![&b"1"[..], &b"\"two\""[..], &b"[3]"[..]]);
//! ```

use super::element::{Element, JsonType};
use super::error::ReadError;
use super::scanner::{Children, Scanner};

/// Scans one array element starting at `pos`.
///
/// `pos` must lie just past the array's `[` or be the offset returned by the
/// previous call. Returns the element and the offset just past its trailing
/// `,`. When the closing `]` is reached instead, the element has type
/// [`JsonType::EndOfArray`] and the returned offset stays on the `]`.
pub fn step(buf: &[u8], pos: usize) -> (Element<'_>, usize) {
    step_with(&Scanner::new(buf), pos)
}

/// Like [`step`], reusing an existing scanner and its depth limit.
///
/// Depth is counted from the array being stepped, which sits at depth 0.
pub fn step_with<'a>(scanner: &Scanner<'a>, pos: usize) -> (Element<'a>, usize) {
    let buf = scanner.buffer();
    let mut children = Children::resume(scanner, pos, b']');

    let member = match children.next_member() {
        Ok(Some(member)) => member,
        Ok(None) => {
            let close = children.position() - 1;
            return (Element::new(buf, JsonType::EndOfArray, close, 1, 0), close);
        }
        Err(err) => {
            let element = Element::failed(buf, scanner.classify(err.at), err.error, err.at);
            return (element, err.at);
        }
    };

    let element = match children.skip_value(&member) {
        Ok(scanned) => scanner.to_element(scanned),
        Err(err) => {
            let element = Element::failed(buf, scanner.classify(member.value), err.error, err.at);
            return (element, err.at);
        }
    };

    match children.finish_separator() {
        Ok(_) => (element, children.position()),
        Err(err) => (element.with_error(err.error), err.at),
    }
}

/// Iterator over the elements of one array, one scan per element.
///
/// Iteration stops after the closing `]`, or after yielding the first
/// element that carries an error.
#[derive(Debug, Clone)]
pub struct ArraySteps<'a> {
    scanner: Scanner<'a>,
    pos: usize,
    finished: bool,
}

impl<'a> ArraySteps<'a> {
    /// Starts stepping through a successfully located array element.
    pub fn new(array: &Element<'a>) -> Result<Self, ReadError> {
        let array = array.check()?;
        if array.kind() != JsonType::Array {
            return Err(ReadError::TypeMismatch);
        }
        Ok(Self::resume(array.buffer(), array.offset() + 1))
    }

    /// Resumes stepping at a position previously obtained from [`step`] or
    /// [`ArraySteps::position`].
    pub fn resume(buf: &'a [u8], pos: usize) -> Self {
        Self {
            scanner: Scanner::new(buf),
            pos,
            finished: false,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.scanner = self.scanner.with_max_depth(max_depth);
        self
    }

    /// Offset the next call to `next` will scan from.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for ArraySteps<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let (element, next) = step_with(&self.scanner, self.pos);
        self.pos = next;
        if element.kind() == JsonType::EndOfArray && element.is_ok() {
            self.finished = true;
            return None;
        }
        if !element.is_ok() {
            self.finished = true;
        }
        Some(element)
    }
}

impl std::iter::FusedIterator for ArraySteps<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_through_array() {
        let json = b"[ 1, \"two\" ,{\"x\":3} ]";
        let (first, pos) = step(json, 1);
        assert_eq!(first.raw(), b"1");
        assert_eq!(first.kind(), JsonType::Number);
        assert_eq!(pos, 4);

        let (second, pos) = step(json, pos);
        assert_eq!(second.raw(), b"\"two\"");
        assert_eq!(pos, 12);

        let (third, pos) = step(json, pos);
        assert_eq!(third.kind(), JsonType::Object);
        assert_eq!(third.elements(), 1);

        let (end, end_pos) = step(json, pos);
        assert_eq!(end.kind(), JsonType::EndOfArray);
        assert!(end.is_ok());
        assert_eq!(end_pos, pos);
        assert_eq!(json[end_pos], b']');

        // Stepping again stays on the end marker.
        let (again, _) = step(json, end_pos);
        assert_eq!(again.kind(), JsonType::EndOfArray);
    }

    #[test]
    fn test_step_empty_array() {
        let (end, pos) = step(b"[]", 1);
        assert_eq!(end.kind(), JsonType::EndOfArray);
        assert_eq!(pos, 1);
    }

    #[test]
    fn test_step_missing_comma() {
        let (element, _) = step(b"[1 2]", 1);
        assert_eq!(element.raw(), b"1");
        assert_eq!(element.error(), Some(ReadError::ExpectedArrayComma));
    }

    #[test]
    fn test_step_unterminated() {
        let (element, _) = step(b"[1,", 3);
        assert_eq!(element.error(), Some(ReadError::UnexpectedEnd));
        assert!(element.is_empty());
    }

    #[test]
    fn test_array_steps_requires_array() {
        let json = b"{\"a\":1}";
        let object = Scanner::new(json).element(0);
        assert_eq!(ArraySteps::new(&object).unwrap_err(), ReadError::TypeMismatch);
    }

    #[test]
    fn test_array_steps_stops_after_error() {
        let json = b"[1, 2 3, 4]";
        let array = Element::new(json, JsonType::Array, 0, json.len(), 4);
        let items: Vec<_> = ArraySteps::new(&array).unwrap().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert_eq!(items[1].error(), Some(ReadError::ExpectedArrayComma));
    }

    #[test]
    fn test_step_trailing_comma() {
        let json = b"[1,2,]";
        let (end, next) = step(json, 5);
        assert_eq!(end.kind(), JsonType::Invalid);
        assert_eq!(end.error(), Some(ReadError::BadValue));
        assert_eq!(end.offset(), 5);
        assert_eq!(next, 5);
    }
}
