//! Conversion engine for Fluent Bit classic configuration files.
//!
//! The engine reads the line-oriented classic format (`[INPUT]`, `[SERVICE]`
//! sections with `key value` attributes), groups the directives into a
//! [`Document`] and renders that document as a YAML pipeline definition.
//! Nothing here touches the environment or the terminal; problems found in
//! the source are returned as [`Diagnostic`] values for the caller to report.

pub mod attributes;
pub mod block;
pub mod diagnostic;
pub mod document;
pub mod format;
pub mod parser;
pub mod singleton;
pub mod writer;

pub use attributes::AttributeStore;
pub use block::{idiomatic_key, BlockKind, DirectiveBlock};
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use document::{BlockCounts, Document};
pub use format::{format_json, format_text};
pub use parser::{parse, parse_file, parse_str, Conversion, ConvertOptions, ParseError};
pub use singleton::{merge, Absorbed, Singleton};
pub use writer::{render, write, write_file, WriteError};
