//! HTML output writer and block event rendering.

use std::io::{self, Write};

use crate::block::{BlockEvent, ListKind};
use crate::escape;
use crate::inline::InlineFormatter;

/// HTML output writer with a pre-allocated, reusable buffer.
///
/// # Example
/// ```
/// use phantom::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity_for(64);
/// writer.paragraph_start();
/// writer.write_escaped_text(b"Hello <World>");
/// writer.newline();
/// writer.paragraph_end();
///
/// assert_eq!(writer.into_string(), "<p>\nHello &lt;World&gt;\n</p>\n");
/// ```
#[derive(Debug)]
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create with capacity based on expected input size.
    ///
    /// Typical HTML is ~1.25x input size.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self::with_capacity(input_len + input_len / 4)
    }

    /// Create with explicit capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
        }
    }

    /// Write raw bytes without escaping.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    /// Write a static string (tags and other markup).
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write a single byte.
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        self.out.push(b);
    }

    /// Write text with HTML escaping.
    #[inline]
    pub fn write_escaped_text(&mut self, text: &[u8]) {
        escape::escape_text_into(&mut self.out, text);
    }

    /// Write an attribute value with full escaping (including quotes).
    #[inline]
    pub fn write_escaped_attr(&mut self, attr: &[u8]) {
        escape::escape_attr_into(&mut self.out, attr);
    }

    /// Write a newline.
    #[inline]
    pub fn newline(&mut self) {
        self.out.push(b'\n');
    }

    /// Check if output is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Get output as byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    /// Write everything buffered so far to `sink` and clear the buffer.
    pub fn flush_to<W: Write + ?Sized>(&mut self, sink: &mut W) -> io::Result<usize> {
        if self.is_empty() {
            return Ok(0);
        }
        sink.write_all(&self.out)?;
        let written = self.out.len();
        self.out.clear();
        Ok(written)
    }

    /// Move the buffered output out, leaving the writer empty.
    #[inline]
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.out)
    }

    /// Take ownership as `String`.
    ///
    /// Markup is ASCII and text is copied through unchanged, so valid UTF-8
    /// input gives valid UTF-8 output. Invalid input bytes are replaced.
    pub fn into_string(self) -> String {
        String::from_utf8(self.out)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }

    // --- Block Elements ---

    /// Write paragraph start: `<p>\n`
    #[inline]
    pub fn paragraph_start(&mut self) {
        self.write_str("<p>\n");
    }

    /// Write paragraph end: `</p>\n`
    #[inline]
    pub fn paragraph_end(&mut self) {
        self.write_str("</p>\n");
    }

    /// Write heading start: `<hN>`
    #[inline]
    pub fn heading_start(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("<h");
        self.write_byte(b'0' + level);
        self.write_byte(b'>');
    }

    /// Write heading end: `</hN>\n`
    #[inline]
    pub fn heading_end(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("</h");
        self.write_byte(b'0' + level);
        self.write_str(">\n");
    }

    /// Write code block start: `<pre><code>`
    #[inline]
    pub fn code_block_start(&mut self) {
        self.write_str("<pre><code>");
    }

    /// Write code block end: `</code></pre>\n`
    #[inline]
    pub fn code_block_end(&mut self) {
        self.write_str("</code></pre>\n");
    }

    /// Write thematic break: `<hr>\n`
    #[inline]
    pub fn thematic_break(&mut self) {
        self.write_str("<hr>\n");
    }

    /// Write blockquote start. Quotes hold one paragraph: `<blockquote><p>\n`
    #[inline]
    pub fn blockquote_start(&mut self) {
        self.write_str("<blockquote><p>\n");
    }

    /// Write blockquote end: `</p></blockquote>\n`
    #[inline]
    pub fn blockquote_end(&mut self) {
        self.write_str("</p></blockquote>\n");
    }

    /// Write list start (unordered): `<ul>\n`
    #[inline]
    pub fn ul_start(&mut self) {
        self.write_str("<ul>\n");
    }

    /// Write list end (unordered): `</ul>\n`
    #[inline]
    pub fn ul_end(&mut self) {
        self.write_str("</ul>\n");
    }

    /// Write list start (ordered): `<ol start="N">\n`, always with `start`.
    #[inline]
    pub fn ol_start(&mut self, start: u32) {
        self.write_str("<ol start=\"");
        self.write_u32(start);
        self.write_str("\">\n");
    }

    /// Write list end (ordered): `</ol>\n`
    #[inline]
    pub fn ol_end(&mut self) {
        self.write_str("</ol>\n");
    }

    /// Write list item start: `<li>`
    #[inline]
    pub fn li_start(&mut self) {
        self.write_str("<li>");
    }

    /// Write list item end: `</li>\n`
    #[inline]
    pub fn li_end(&mut self) {
        self.write_str("</li>\n");
    }

    // --- Inline Elements ---

    /// Write link start with an attribute-escaped URL: `<a href="url">`
    #[inline]
    pub fn link_start(&mut self, url: &[u8]) {
        self.write_str("<a href=\"");
        self.write_escaped_attr(url);
        self.write_str("\">");
    }

    /// Write link start with the URL copied verbatim.
    ///
    /// Quotes in `url` end the attribute early; only for output that must
    /// match legacy converters byte for byte.
    #[inline]
    pub fn link_start_raw(&mut self, url: &[u8]) {
        self.write_str("<a href=\"");
        self.write_bytes(url);
        self.write_str("\">");
    }

    /// Write link end: `</a>`
    #[inline]
    pub fn link_end(&mut self) {
        self.write_str("</a>");
    }

    /// Write a u32 as decimal.
    fn write_u32(&mut self, mut n: u32) {
        if n == 0 {
            self.write_byte(b'0');
            return;
        }

        let mut buf = [0u8; 10]; // Max digits for u32
        let mut i = buf.len();

        while n > 0 {
            i -= 1;
            // n % 10 < 10, always fits
            buf[i] = b'0' + (n % 10) as u8;
            n /= 10;
        }

        self.write_bytes(&buf[i..]);
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a single block event to HTML.
///
/// Line payloads in paragraphs, quotes, headings and list items go through
/// the inline formatter; code lines are only escaped.
pub fn render_block_event(event: &BlockEvent<'_>, writer: &mut HtmlWriter, inline: &InlineFormatter) {
    match *event {
        BlockEvent::ParagraphStart => writer.paragraph_start(),
        BlockEvent::ParagraphEnd => writer.paragraph_end(),
        BlockEvent::Heading { level, text } => {
            writer.heading_start(level);
            inline.format_into(text, writer);
            writer.heading_end(level);
        }
        BlockEvent::CodeBlockStart => writer.code_block_start(),
        BlockEvent::CodeBlockEnd => writer.code_block_end(),
        BlockEvent::Code(line) => {
            writer.write_escaped_text(line);
            writer.newline();
        }
        BlockEvent::BlockQuoteStart => writer.blockquote_start(),
        BlockEvent::BlockQuoteEnd => writer.blockquote_end(),
        BlockEvent::ListStart { kind } => match kind {
            ListKind::Unordered => writer.ul_start(),
            ListKind::Ordered { start } => writer.ol_start(start),
        },
        BlockEvent::ListEnd { kind } => match kind {
            ListKind::Unordered => writer.ul_end(),
            ListKind::Ordered { .. } => writer.ol_end(),
        },
        BlockEvent::ListItem { text, .. } => {
            writer.li_start();
            inline.format_into(text, writer);
            writer.li_end();
        }
        BlockEvent::ThematicBreak => writer.thematic_break(),
        BlockEvent::Text(text) => {
            inline.format_into(text, writer);
            writer.newline();
        }
    }
}
