//! Hand-rolled VT/ANSI input decoding.
//!
//! This is deliberately not built on a terminal-input crate: the parser is
//! the thing being built, not a wrapper around something that already
//! builds it.

mod parser;

pub use parser::VTParser;
