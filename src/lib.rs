//! jread - an in-place JSON element reader.
//!
//! jread finds one element of a JSON document, selected by a compact query,
//! and describes where it sits in the original buffer. No tree is built and
//! nothing is copied or unescaped, so a lookup costs one forward scan over
//! the parts of the document that precede the element.
//!
//! # Example
//!
//! ```
//! use jread::{locate, JsonType};
//!
//! let json = br#"{"a":1,"b":[10,20,30]}"#;
//!
//! let b = locate(json, "{'b'", &[]);
//! assert_eq!(b.kind(), JsonType::Array);
//! assert_eq!(b.elements(), 3);
//!
//! // Cascade into the located slice, taking the index from a parameter.
//! let second = locate(b.raw(), "[*", &[1]);
//! assert_eq!(second.raw(), b"20");
//! ```

pub mod accessor;
pub mod config;
pub mod document;
pub mod file;
pub mod harness;
pub mod query;

pub use document::{
    error_to_str, step, ArraySteps, Element, ErrorKind, JsonType, ReadError, Scanner,
};
pub use query::Evaluator;

/// Locates the element of `buf` selected by `query`.
///
/// Shorthand for `Evaluator::new(buf).locate(query, params)`.
pub fn locate<'a>(buf: &'a [u8], query: &str, params: &[usize]) -> Element<'a> {
    Evaluator::new(buf).locate(query, params)
}
