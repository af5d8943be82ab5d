//! Raw JSON document access.
//!
//! Everything in this module works directly on the caller's bytes: the
//! scanner measures values, [`Element`] describes a located region, and the
//! step iterator walks arrays one element at a time.

pub mod element;
pub mod error;
pub mod scanner;
pub mod step;

pub use element::{Element, JsonType};
pub use error::{error_to_str, ErrorKind, ReadError};
pub use scanner::{Scanner, DEFAULT_MAX_DEPTH};
pub use step::{step, ArraySteps};
