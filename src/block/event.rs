//! Block-level event types.

/// Type of list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Unordered list (`- ` items).
    Unordered,
    /// Ordered list.
    Ordered {
        /// Number of the first item, written as the `start` attribute.
        start: u32,
    },
}

/// Events emitted by the block parser.
///
/// Payloads borrow from the line that produced them and never outlive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEvent<'a> {
    /// Start of a paragraph.
    ParagraphStart,
    /// End of a paragraph.
    ParagraphEnd,

    /// A complete single-line heading.
    Heading {
        /// Heading level (1-6).
        level: u8,
        /// Inline content after the marker.
        text: &'a [u8],
    },

    /// Start of a fenced code block.
    CodeBlockStart,
    /// End of a fenced code block.
    CodeBlockEnd,
    /// One raw line of code (never inline-formatted).
    Code(&'a [u8]),

    /// Start of a blockquote.
    BlockQuoteStart,
    /// End of a blockquote.
    BlockQuoteEnd,

    /// Start of a list.
    ListStart {
        /// List type.
        kind: ListKind,
    },
    /// End of a list.
    ListEnd {
        /// List type.
        kind: ListKind,
    },
    /// A complete single-line list item.
    ListItem {
        /// Ordinal of this item in an ordered list, `None` for unordered.
        ordinal: Option<u32>,
        /// Inline content after the marker.
        text: &'a [u8],
    },

    /// A thematic break (horizontal rule).
    ThematicBreak,

    /// One line of inline content inside a paragraph or blockquote.
    Text(&'a [u8]),
}
