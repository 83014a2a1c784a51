//! Inline link scanning.
//!
//! Only complete `[text](url)` sequences are links: an opening `[`, the
//! first `]` after it, a `(` immediately after that, and the first `)`
//! after the `(`. Anything short of that leaves the `[` as literal text.

use std::ops::Range;

use memchr::memchr;

/// A complete link found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Bytes between `[` and `]`.
    pub text: Range<usize>,
    /// Bytes between `(` and `)`.
    pub url: Range<usize>,
    /// Position just past the closing `)`.
    pub end: usize,
}

/// Remembers the last forward search for one delimiter byte.
///
/// If a search from `from` found `found`, any later search starting in
/// `from..=found` has the same answer, and a failed search stays failed for
/// every later start. This keeps a line full of `[` linear.
#[derive(Debug, Clone, Copy)]
struct NextByte {
    needle: u8,
    last: Option<(usize, Option<usize>)>,
}

impl NextByte {
    const fn new(needle: u8) -> Self {
        Self { needle, last: None }
    }

    fn find(&mut self, haystack: &[u8], from: usize) -> Option<usize> {
        if let Some((searched_from, found)) = self.last {
            let covered = from >= searched_from && found.is_none_or(|pos| from <= pos);
            if covered {
                return found;
            }
        }
        let found = haystack
            .get(from..)
            .and_then(|rest| memchr(self.needle, rest))
            .map(|offset| from + offset);
        self.last = Some((from, found));
        found
    }
}

/// Forward link scanner over one line.
#[derive(Debug)]
pub struct LinkScanner<'a> {
    text: &'a [u8],
    close_bracket: NextByte,
    close_paren: NextByte,
}

impl<'a> LinkScanner<'a> {
    /// Create a scanner for `text`.
    pub fn new(text: &'a [u8]) -> Self {
        Self {
            text,
            close_bracket: NextByte::new(b']'),
            close_paren: NextByte::new(b')'),
        }
    }

    /// Try to read a link whose `[` is at `open`.
    ///
    /// Positions must be queried in increasing order for the caches to help.
    pub fn link_at(&mut self, open: usize) -> Option<Link> {
        debug_assert_eq!(self.text.get(open), Some(&b'['));
        let close = self.close_bracket.find(self.text, open + 1)?;
        if self.text.get(close + 1) != Some(&b'(') {
            return None;
        }
        let paren = self.close_paren.find(self.text, close + 2)?;
        Some(Link {
            text: open + 1..close,
            url: close + 2..paren,
            end: paren + 1,
        })
    }
}
