//! Query parser and evaluator for locating elements in raw JSON.
//!
//! A query is a sequence of selectors applied left to right, starting at
//! the document's top-level value.
//!
//! # Supported Syntax
//!
//! - `` (empty) - The whole document
//! - `{'key'` or `{"key"` - Object member by key
//! - `{N` - Key of the Nth object member (returned as a string element)
//! - `[N` - Array element N
//! - `{*` / `[*` - Like `{N` / `[N` with N taken from the query parameters
//!
//! Keys are compared byte for byte with the key as written in the JSON,
//! escapes included. Whitespace between selectors, and after `{` or `[`, is
//! ignored. Named and positional key selectors can be mixed freely, though a
//! positional key resolves to a string so nothing may follow it.
//!
//! # Examples
//!
//! ```
//! // {'anObject' {'two'   - anObject.two
//! // {'anArray' [2 {1     - second key of anArray[2]
//! // [* {'Users'          - Users of array element given by params[0]
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{Index, Selector};
pub use error::QueryError;
pub use evaluator::Evaluator;
pub use parser::Parser;
