//! phantom: single-pass, line-oriented Markdown to HTML converter
//!
//! A block-level state machine layered on an inline span formatter. Input
//! is consumed one line at a time and HTML fragments are produced as each
//! line is read; nothing is buffered beyond the current line.
//!
//! # Design Principles
//! - Flat block grammar: exactly one block context is open at a time
//! - No lookahead: each line is decided from the current state alone
//! - Total: any input, however malformed, yields well-formed HTML
//! - Byte-level scanning: every marker is ASCII, text passes through as is
//!
//! # Supported Markdown
//! - ATX headings (`#` to `######`)
//! - Paragraphs, blockquotes (`> `), thematic breaks (`---`, `***`)
//! - Unordered (`- `) and ordered (`N. `) lists, one level
//! - Fenced code blocks (three backticks)
//! - Inline code, strong, emphasis, `[text](url)` links, backslash escapes

pub mod block;
pub mod document;
pub mod error;
pub mod escape;
pub mod files;
pub mod inline;
pub mod limits;
pub mod render;

use std::io::{BufRead, Write};

// Re-export primary types
pub use block::{BlockEvent, BlockParser, LineEvents, ListCounter, ParserState};
pub use document::DocumentOptions;
pub use error::{Error, Result};
pub use inline::{InlineFormatter, format_inline};
pub use render::{HtmlWriter, render_block_event};

/// Conversion options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Attribute-escape link targets before writing them into `href`.
    ///
    /// Disable only for byte-for-byte compatibility with converters that
    /// copy the URL verbatim (a quote in the URL then ends the attribute).
    pub escape_link_urls: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            escape_link_urls: true,
        }
    }
}

/// Counters reported by [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertStats {
    /// Lines read from the source.
    pub lines: usize,
    /// HTML bytes written to the sink.
    pub bytes_written: usize,
}

/// Strip trailing `\r` and `\n` from a raw line.
#[inline]
pub fn strip_line_ending(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|&b| b != b'\n' && b != b'\r')
        .map_or(0, |last| last + 1);
    &line[..end]
}

/// One conversion job: block state, inline formatter and pending output.
///
/// Owns all of its state, so separate jobs can run on separate threads.
#[derive(Debug)]
pub struct Converter {
    parser: BlockParser,
    inline: InlineFormatter,
    writer: HtmlWriter,
    lines: usize,
}

impl Converter {
    /// Create a converter for a new job.
    pub fn new(options: &Options) -> Self {
        Self::with_capacity(options, 1024)
    }

    /// Create a converter with an explicit output buffer capacity.
    pub fn with_capacity(options: &Options, capacity: usize) -> Self {
        Self {
            parser: BlockParser::new(),
            inline: InlineFormatter::with_options(options),
            writer: HtmlWriter::with_capacity(capacity),
            lines: 0,
        }
    }

    /// Process one raw line. A trailing line ending is stripped first.
    pub fn push_line(&mut self, line: &[u8]) {
        let mut events = LineEvents::new();
        self.parser.process_line(strip_line_ending(line), &mut events);
        self.render(&events);
        self.lines += 1;
    }

    /// Close whatever block is still open. Safe to call more than once.
    pub fn finish(&mut self) {
        let mut events = LineEvents::new();
        self.parser.finish(&mut events);
        self.render(&events);
    }

    /// Currently active block context.
    pub fn state(&self) -> ParserState {
        self.parser.state()
    }

    /// Number of lines pushed so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// HTML produced but not yet drained.
    pub fn pending(&self) -> &[u8] {
        self.writer.as_bytes()
    }

    /// Drain pending HTML into a new buffer.
    pub fn take_output(&mut self) -> Vec<u8> {
        self.writer.take()
    }

    /// Write pending HTML to `sink` and clear it. Returns bytes written.
    pub fn write_pending<W: Write + ?Sized>(&mut self, sink: &mut W) -> std::io::Result<usize> {
        self.writer.flush_to(sink)
    }

    /// Finish the job and return everything not yet drained.
    pub fn into_string(mut self) -> String {
        self.finish();
        self.writer.into_string()
    }

    fn render(&mut self, events: &[BlockEvent<'_>]) {
        for event in events {
            render_block_event(event, &mut self.writer, &self.inline);
        }
    }
}

/// Convert a line source into HTML fragments written to `sink`.
///
/// Each line's HTML is written before the next line is read. Lines are raw
/// bytes; invalid UTF-8 is copied through unchanged.
///
/// # Errors
/// [`Error::Read`] if the source fails, [`Error::Write`] if the sink fails.
/// Nothing is retried.
pub fn convert<R: BufRead, W: Write>(
    mut reader: R,
    mut sink: W,
    options: &Options,
) -> Result<ConvertStats> {
    let mut converter = Converter::new(options);
    let mut line = Vec::with_capacity(256);
    let mut bytes_written = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).map_err(Error::Read)? == 0 {
            break;
        }
        converter.push_line(&line);
        bytes_written += converter.write_pending(&mut sink).map_err(Error::Write)?;
    }

    converter.finish();
    bytes_written += converter.write_pending(&mut sink).map_err(Error::Write)?;
    sink.flush().map_err(Error::Write)?;

    Ok(ConvertStats {
        lines: converter.lines(),
        bytes_written,
    })
}

/// Convert Markdown to an HTML body fragment.
///
/// This is the primary API for simple use cases.
///
/// # Example
/// ```
/// let html = phantom::to_html("# Hello\n\nWorld");
/// assert_eq!(html, "<h1>Hello</h1>\n<p>\nWorld\n</p>\n");
/// ```
pub fn to_html(input: &str) -> String {
    to_html_with_options(input, &Options::default())
}

/// Convert Markdown to an HTML body fragment with options.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    let mut converter = Converter::with_capacity(options, input.len() + input.len() / 4);
    for line in input.as_bytes().split_inclusive(|&b| b == b'\n') {
        converter.push_line(line);
    }
    converter.into_string()
}

/// Run one line through the block state machine and render it.
///
/// Returns the next state, the next counter and the HTML for this line.
///
/// # Example
/// ```
/// use phantom::{ListCounter, ParserState, process_line};
///
/// let (state, counter, html) =
///     process_line(ParserState::Outside, ListCounter::default(), b"3. x");
/// assert_eq!(state, ParserState::OrderedList);
/// assert_eq!(counter.next_ordinal(), 4);
/// assert_eq!(html, "<ol start=\"3\">\n<li>x</li>\n");
/// ```
pub fn process_line(
    state: ParserState,
    counter: ListCounter,
    line: &[u8],
) -> (ParserState, ListCounter, String) {
    process_line_with_options(state, counter, line, &Options::default())
}

/// [`process_line`] with options.
pub fn process_line_with_options(
    state: ParserState,
    counter: ListCounter,
    line: &[u8],
    options: &Options,
) -> (ParserState, ListCounter, String) {
    let mut parser = BlockParser::from_parts(state, counter);
    let mut writer = HtmlWriter::with_capacity_for(line.len());
    let inline = InlineFormatter::with_options(options);

    let mut events = LineEvents::new();
    parser.process_line(strip_line_ending(line), &mut events);
    for event in &events {
        render_block_event(event, &mut writer, &inline);
    }

    let (state, counter) = parser.into_parts();
    (state, counter, writer.into_string())
}

/// Closing HTML for whatever `state` still has open at end of input.
///
/// Closing tags carry no inline content, so no options are needed.
pub fn finalize(state: ParserState, counter: ListCounter) -> String {
    let mut parser = BlockParser::from_parts(state, counter);
    let mut writer = HtmlWriter::with_capacity(32);
    let inline = InlineFormatter::new();

    let mut events = LineEvents::new();
    parser.finish(&mut events);
    for event in &events {
        render_block_event(event, &mut writer, &inline);
    }
    writer.into_string()
}
