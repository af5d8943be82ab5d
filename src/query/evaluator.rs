//! Query evaluation over a raw JSON buffer.

use super::ast::{Index, Selector};
use super::parser::Parser;
use crate::document::element::{Element, JsonType};
use crate::document::error::ReadError;
use crate::document::scanner::{Children, Scanner};

/// Resolves queries against one borrowed JSON buffer.
///
/// The evaluator keeps no state between calls, so one instance can serve any
/// number of lookups, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Evaluator<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Evaluator {
            scanner: Scanner::new(buf),
        }
    }

    /// Limits container nesting accepted while measuring values.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.scanner = self.scanner.with_max_depth(max_depth);
        self
    }

    pub fn scanner(&self) -> &Scanner<'a> {
        &self.scanner
    }

    /// Locates the element selected by `query`.
    ///
    /// Each `*` in the query takes the next value of `params`, left to right.
    /// The first error ends evaluation and is reported in the returned
    /// element, together with the location resolved so far. The depth limit
    /// counts from the document root however far the query has descended.
    pub fn locate(&self, query: &str, params: &[usize]) -> Element<'a> {
        let mut params = params.iter().copied();
        let mut pos = self.scanner.skip_whitespace(0);
        let mut depth = 0;

        for selector in Parser::new(query) {
            let selector = match selector {
                Ok(selector) => selector,
                Err(err) => {
                    log::debug!("query {:?} rejected: {}", query, err);
                    return Element::failed(
                        self.scanner.buffer(),
                        JsonType::Invalid,
                        ReadError::BadQuery,
                        pos,
                    );
                }
            };
            log::trace!("applying {:?} at offset {}", selector, pos);
            match self.apply(pos, depth, selector, &mut params) {
                Ok(next) => {
                    pos = next;
                    depth += 1;
                }
                Err(element) => {
                    log::debug!(
                        "query {:?} failed at offset {}: {}",
                        query,
                        element.offset(),
                        element.error_message()
                    );
                    return element;
                }
            }
        }

        self.scanner.element_at_depth(pos, depth)
    }

    /// Applies one selector to the value starting at `pos`, nested `depth`
    /// containers deep, and returns the offset of the selected child.
    fn apply(
        &self,
        pos: usize,
        depth: usize,
        selector: Selector<'_>,
        params: &mut impl Iterator<Item = usize>,
    ) -> Result<usize, Element<'a>> {
        let s = &self.scanner;
        let buf = s.buffer();
        let kind = s.classify(pos);
        let (wanted, close) = if selector.wants_object() {
            (JsonType::Object, b'}')
        } else {
            (JsonType::Array, b']')
        };

        if kind != wanted {
            let element = s.element_at_depth(pos, depth);
            if !element.is_ok() {
                return Err(element);
            }
            let error = if kind.is_container() {
                ReadError::TypeMismatch
            } else {
                ReadError::TerminalValue
            };
            return Err(element.with_error(error));
        }

        let index = match selector {
            Selector::Key(_) => None,
            Selector::KeyAt(index) | Selector::Item(index) => Some(match index {
                Index::At(n) => n,
                Index::Param => params.next().ok_or_else(|| {
                    Element::failed(buf, JsonType::QueryParam, ReadError::ParamExhausted, pos)
                })?,
            }),
        };

        if depth >= s.max_depth() {
            return Err(Element::failed(buf, kind, ReadError::TooDeep, pos));
        }

        let mut children = Children::new(s, pos, close, depth);
        let mut ordinal = 0;
        loop {
            let member = match children.next_member() {
                Ok(Some(member)) => member,
                Ok(None) => {
                    let error = match selector {
                        Selector::Key(_) => ReadError::KeyNotFound,
                        Selector::KeyAt(_) => ReadError::KeyIndexOutOfRange,
                        Selector::Item(_) => ReadError::IndexOutOfRange,
                    };
                    let len = children.position() - pos;
                    return Err(Element::new(buf, kind, pos, len, ordinal).with_error(error));
                }
                Err(err) => return Err(Element::failed(buf, kind, err.error, err.at)),
            };

            match (selector, member.key) {
                (Selector::Key(name), Some((start, end))) => {
                    if &buf[start + 1..end - 1] == name.as_bytes() {
                        return Ok(member.value);
                    }
                }
                (Selector::KeyAt(_), Some((start, _))) if index == Some(ordinal) => {
                    return Ok(start);
                }
                (Selector::Item(_), _) if index == Some(ordinal) => return Ok(member.value),
                _ => {}
            }

            if let Err(err) = children.skip_value(&member) {
                return Err(Element::failed(buf, kind, err.error, err.at));
            }
            ordinal += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{
  "astring": "This is a string",
  "number1": 42,
  "anObject":{"one":1,"two":{"obj2.1":21,"obj2.2":22},"three":333},
  "anArray":[0, "one", {"two.0":20,"two.1":21}, 3, [4,44,444]],
  "emptyArray":[],
  "emptyObject":{  }
}"#;

    fn locate<'a>(json: &'a str, query: &str, params: &[usize]) -> Element<'a> {
        Evaluator::new(json.as_bytes()).locate(query, params)
    }

    #[test]
    fn test_empty_query_is_whole_document() {
        let element = locate(EXAMPLE, "", &[]);
        assert!(element.is_ok());
        assert_eq!(element.kind(), JsonType::Object);
        assert_eq!(element.elements(), 6);
        assert_eq!(element.raw(), EXAMPLE.as_bytes());
    }

    #[test]
    fn test_named_key() {
        let element = locate(EXAMPLE, "{'astring'", &[]);
        assert_eq!(element.kind(), JsonType::String);
        assert_eq!(element.raw(), br#""This is a string""#);
    }

    #[test]
    fn test_nested_keys() {
        let element = locate(EXAMPLE, "{'anObject' {'two' {'obj2.2'", &[]);
        assert_eq!(element.kind(), JsonType::Number);
        assert_eq!(element.raw(), b"22");
    }

    #[test]
    fn test_array_index_and_nested() {
        assert_eq!(locate(EXAMPLE, "{'anArray' [1", &[]).raw(), br#""one""#);
        assert_eq!(locate(EXAMPLE, "{'anArray' [2 {'two.1'", &[]).raw(), b"21");
        assert_eq!(locate(EXAMPLE, "{'anArray' [4 [2", &[]).raw(), b"444");
    }

    #[test]
    fn test_key_not_found() {
        let element = locate(EXAMPLE, "{'missing'", &[]);
        assert_eq!(element.error(), Some(ReadError::KeyNotFound));
        assert_eq!(element.kind(), JsonType::Object);
        assert_eq!(element.elements(), 6);
    }

    #[test]
    fn test_index_out_of_range() {
        let element = locate(EXAMPLE, "{'anArray' [999", &[]);
        assert_eq!(element.error(), Some(ReadError::IndexOutOfRange));
        assert_eq!(element.elements(), 5);
    }

    #[test]
    fn test_key_by_position() {
        let element = locate(EXAMPLE, "{2", &[]);
        assert_eq!(element.kind(), JsonType::String);
        assert_eq!(element.raw(), br#""anObject""#);
        assert_eq!(
            locate(EXAMPLE, "{999", &[]).error(),
            Some(ReadError::KeyIndexOutOfRange)
        );
    }

    #[test]
    fn test_selector_after_positional_key_is_terminal() {
        let element = locate(EXAMPLE, "{0 [0", &[]);
        assert_eq!(element.error(), Some(ReadError::TerminalValue));
        assert_eq!(element.raw(), br#""astring""#);
    }

    #[test]
    fn test_type_mismatch_keeps_location() {
        let element = locate(EXAMPLE, "[0", &[]);
        assert_eq!(element.error(), Some(ReadError::TypeMismatch));
        assert_eq!(element.kind(), JsonType::Object);
        assert_eq!(element.raw(), EXAMPLE.as_bytes());

        let element = locate(EXAMPLE, "{'number1' {'x'", &[]);
        assert_eq!(element.error(), Some(ReadError::TerminalValue));
        assert_eq!(element.raw(), b"42");
    }

    #[test]
    fn test_wildcards_consume_params_in_order() {
        let element = locate(EXAMPLE, "{'anArray' [* {*", &[2, 1]);
        assert_eq!(element.raw(), br#""two.1""#);
    }

    #[test]
    fn test_missing_param() {
        let element = locate(EXAMPLE, "{'anArray' [* [*", &[4]);
        assert_eq!(element.error(), Some(ReadError::ParamExhausted));
        assert_eq!(element.kind(), JsonType::QueryParam);
    }

    #[test]
    fn test_bad_query() {
        let element = locate(EXAMPLE, "{'anArray' .", &[]);
        assert_eq!(element.error(), Some(ReadError::BadQuery));
    }

    #[test]
    fn test_stops_once_resolved() {
        // Everything after the selected member is never looked at.
        let json = r#"{"a": [1, 2], "b": oops"#;
        let element = locate(json, "{'a' [1", &[]);
        assert!(element.is_ok());
        assert_eq!(element.raw(), b"2");
    }

    #[test]
    fn test_malformed_sibling_is_reported() {
        let json = r#"{"a": tru, "b": 1}"#;
        let element = locate(json, "{'b'", &[]);
        assert_eq!(element.error(), Some(ReadError::BadKeyword));
        assert_eq!(element.offset(), 6);
    }

    #[test]
    fn test_key_compared_raw() {
        let json = r#"{"a\"b": 1, "a\\": 2}"#;
        assert_eq!(locate(json, r#"{'a\"b'"#, &[]).raw(), b"1");
        assert_eq!(locate(json, r#"{'a\\'"#, &[]).raw(), b"2");
    }

    #[test]
    fn test_depth_counts_from_root() {
        let evaluator = Evaluator::new(b"[[1]]").with_max_depth(1);
        assert_eq!(evaluator.locate("", &[]).error(), Some(ReadError::TooDeep));
        assert_eq!(evaluator.locate("[0", &[]).error(), Some(ReadError::TooDeep));
        assert_eq!(evaluator.locate("[0 [0", &[]).error(), Some(ReadError::TooDeep));

        let evaluator = Evaluator::new(b"[[1]]").with_max_depth(2);
        assert_eq!(evaluator.locate("[0 [0", &[]).raw(), b"1");
    }
}
