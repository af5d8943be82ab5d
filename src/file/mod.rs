//! File I/O for JSON buffers.
//!
//! This module provides functionality to load JSON files from disk or stdin
//! into memory, ready to be queried in place.

pub mod loader;
