//! Block-level parser for Markdown.
//!
//! The block parser is line-oriented and flat: exactly one block context is
//! open at a time. It handles:
//! - ATX headings
//! - Fenced code blocks
//! - Blockquotes
//! - Ordered and unordered lists
//! - Thematic breaks
//! - Paragraphs

mod event;
mod parser;

pub use event::{BlockEvent, ListKind};
pub use parser::{BlockParser, LineEvents, LineKind, ListCounter, ParserState, classify};
