//! Open inline span tracking.
//!
//! Spans live on a stack so tags always close in reverse order of opening.
//! The toggling rules keep the stack well-formed: code is always innermost
//! while open, and emphasis never opens inside strong.

use smallvec::SmallVec;

use crate::limits::MAX_OPEN_SPANS;

/// An inline span kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// `` `code` ``
    Code,
    /// `**strong**`
    Strong,
    /// `*emphasis*`
    Emphasis,
}

impl Span {
    /// Opening HTML tag.
    pub fn open_tag(self) -> &'static str {
        match self {
            Self::Code => "<code>",
            Self::Strong => "<strong>",
            Self::Emphasis => "<em>",
        }
    }

    /// Closing HTML tag.
    pub fn close_tag(self) -> &'static str {
        match self {
            Self::Code => "</code>",
            Self::Strong => "</strong>",
            Self::Emphasis => "</em>",
        }
    }
}

/// Spans open on the current line, innermost last.
#[derive(Debug, Default)]
pub struct SpanStack {
    open: SmallVec<[Span; MAX_OPEN_SPANS]>,
}

impl SpanStack {
    /// Whether `span` is open anywhere on the stack.
    #[inline]
    pub fn contains(&self, span: Span) -> bool {
        self.open.contains(&span)
    }

    /// Whether a code span is open. Markers other than backticks and
    /// backslash escapes are literal while this holds.
    #[inline]
    pub fn in_code(&self) -> bool {
        self.innermost() == Some(Span::Code)
    }

    /// The most recently opened span.
    #[inline]
    pub fn innermost(&self) -> Option<Span> {
        self.open.last().copied()
    }

    /// Open `span` if closed, close it if innermost. Returns the tag to write.
    pub fn toggle(&mut self, span: Span) -> &'static str {
        if self.innermost() == Some(span) {
            self.open.pop();
            span.close_tag()
        } else {
            debug_assert!(!self.contains(span), "{span:?} open but not innermost");
            self.open.push(span);
            span.open_tag()
        }
    }

    /// Close the innermost span, returning its closing tag.
    pub fn close_innermost(&mut self) -> Option<&'static str> {
        self.open.pop().map(Span::close_tag)
    }
}
