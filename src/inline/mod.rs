//! Inline formatter for Markdown.
//!
//! One left-to-right pass over a single line's payload. At each position
//! the first matching rule wins:
//! 1. Backslash escape of `*`, `` ` `` or `[`
//! 2. Backtick: toggles code
//! 3. `**`: toggles strong (literal inside code)
//! 4. `*`: toggles emphasis (literal inside code or strong)
//! 5. `[text](url)`: complete links only (literal inside code)
//! 6. Everything else is HTML-escaped text
//!
//! Spans never continue past the end of the line; whatever is still open
//! is closed there.

mod links;
mod spans;

pub use links::{Link, LinkScanner};
pub use spans::{Span, SpanStack};

use crate::Options;
use crate::render::HtmlWriter;

/// Bytes that may start an inline construct. Everything else is bulk-escaped.
const MARKER_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'\\' as usize] = true;
    table[b'`' as usize] = true;
    table[b'*' as usize] = true;
    table[b'[' as usize] = true;
    table
};

/// Inline formatter. Holds configuration only; span state is per call.
#[derive(Debug, Clone, Copy)]
pub struct InlineFormatter {
    escape_link_urls: bool,
}

impl InlineFormatter {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::with_options(&Options::default())
    }

    /// Create a formatter from conversion options.
    pub fn with_options(options: &Options) -> Self {
        Self {
            escape_link_urls: options.escape_link_urls,
        }
    }

    /// Format one line of inline content into `writer`.
    pub fn format_into(&self, text: &[u8], writer: &mut HtmlWriter) {
        let mut spans = SpanStack::default();
        let mut links = LinkScanner::new(text);
        let mut run_start = 0;
        let mut pos = 0;

        while pos < text.len() {
            if !MARKER_TABLE[text[pos] as usize] {
                pos += 1;
                continue;
            }

            // Plain text up to the marker goes out in one piece.
            writer.write_escaped_text(&text[run_start..pos]);
            run_start = pos;

            match text[pos] {
                b'\\' => {
                    if let Some(&escaped @ (b'*' | b'`' | b'[')) = text.get(pos + 1) {
                        writer.write_byte(escaped);
                        pos += 2;
                        run_start = pos;
                        continue;
                    }
                }
                b'`' => {
                    writer.write_str(spans.toggle(Span::Code));
                    pos += 1;
                    run_start = pos;
                    continue;
                }
                b'*' if !spans.in_code() => {
                    if text.get(pos + 1) == Some(&b'*') {
                        writer.write_str(spans.toggle(Span::Strong));
                        pos += 2;
                        run_start = pos;
                        continue;
                    }
                    if !spans.contains(Span::Strong) {
                        writer.write_str(spans.toggle(Span::Emphasis));
                        pos += 1;
                        run_start = pos;
                        continue;
                    }
                }
                b'[' if !spans.in_code() => {
                    if let Some(link) = links.link_at(pos) {
                        self.write_link(text, &link, writer);
                        pos = link.end;
                        run_start = pos;
                        continue;
                    }
                }
                _ => {}
            }

            // Marker did not apply: it stays in the literal run.
            pos += 1;
        }

        writer.write_escaped_text(&text[run_start..]);

        while let Some(close) = spans.close_innermost() {
            writer.write_str(close);
        }
    }

    /// Format one line of inline content into a new `String`.
    pub fn format(&self, text: &str) -> String {
        let mut writer = HtmlWriter::with_capacity_for(text.len());
        self.format_into(text.as_bytes(), &mut writer);
        writer.into_string()
    }

    fn write_link(&self, text: &[u8], link: &Link, writer: &mut HtmlWriter) {
        let url = &text[link.url.clone()];
        if self.escape_link_urls {
            writer.link_start(url);
        } else {
            writer.link_start_raw(url);
        }
        writer.write_escaped_text(&text[link.text.clone()]);
        writer.link_end();
    }
}

impl Default for InlineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format one line of inline Markdown with default options.
///
/// # Example
/// ```
/// assert_eq!(
///     phantom::format_inline("a **b** *c* `d`"),
///     "a <strong>b</strong> <em>c</em> <code>d</code>"
/// );
/// ```
pub fn format_inline(text: &str) -> String {
    InlineFormatter::new().format(text)
}
