//! Demonstration and timing harnesses used by the `jread` binary.
//!
//! Everything here writes to a caller supplied `io::Write` and takes its
//! inputs as arguments, so the binary and the tests drive it the same way.

pub mod bench;
pub mod demo;
