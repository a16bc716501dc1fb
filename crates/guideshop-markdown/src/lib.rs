//! guideshop-markdown: the article editor's markdown toolbar as pure text
//! transformations.
//!
//! This crate provides:
//! - `TextEditState` / `TextRange` - text plus a UTF-16 selection
//! - `BasicFormatter` - headers, emphasis, lists, rules, new lines
//! - `ComplexFormatter` - links, images, code blocks (need dialog params)
//! - `MarkdownStrings` - marker and hint table, overridable from KDL
//! - `Formatters` - registry dispatching both formatter families by value or name
//! - `ContentField` - editor body field state driven by toolbar events

pub mod basic;
pub mod complex;
pub mod error;
pub mod field;
pub mod formatters;
pub mod strings;
pub mod text;
pub mod types;

pub use basic::BasicFormatter;
pub use complex::{CODE_PLACEHOLDER, ComplexFormatter};
pub use error::{ConfigError, FormatError};
pub use field::{ContentField, EditorEvent};
pub use formatters::{FORMATTERS, FormatAction, FormatterKind, Formatters};
pub use strings::MarkdownStrings;
pub use text::{MarkdownRope, TextBuffer, utf16_len};
pub use types::{TextEditState, TextRange};
