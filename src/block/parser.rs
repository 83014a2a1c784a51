//! Block parser implementation.
//!
//! Each line is classified by a prefix test, then the parser decides
//! whether the open block context continues, closes, or gives way to a new
//! one. Nothing looks ahead: the decision for a line depends only on the
//! current state and the line itself.

use smallvec::SmallVec;

use crate::limits;

use super::event::{BlockEvent, ListKind};

/// Events produced by a single line.
///
/// A line closes at most one context, opens at most one, and emits at most
/// one payload, so this never spills to the heap.
pub type LineEvents<'a> = SmallVec<[BlockEvent<'a>; 4]>;

/// The single active block context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// No block is open.
    #[default]
    Outside,
    /// Inside a paragraph.
    Paragraph,
    /// Inside a fenced code block.
    CodeBlock,
    /// Inside an ordered list run.
    OrderedList,
    /// Inside an unordered list run.
    UnorderedList,
    /// Inside a blockquote.
    Blockquote,
}

/// Ordinal bookkeeping for the current ordered list run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCounter {
    start: u32,
    next: u32,
}

impl ListCounter {
    /// Counter for a run whose first item carries `start`.
    pub const fn new(start: u32) -> Self {
        Self { start, next: start }
    }

    /// Number declared by the first item of the run.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Ordinal the next item will receive.
    pub fn next_ordinal(&self) -> u32 {
        self.next
    }

    /// Hand out the current ordinal and move to the following one.
    fn advance(&mut self) -> u32 {
        let ordinal = self.next;
        self.next = self.next.saturating_add(1);
        ordinal
    }
}

impl Default for ListCounter {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Result of the prefix test on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty line.
    Blank,
    /// A line starting with three backticks.
    Fence,
    /// `#` x 1-6 followed by a space.
    Heading {
        /// Number of `#`.
        level: u8,
        /// Text after the marker and its space.
        text: &'a [u8],
    },
    /// `- ` item.
    UnorderedItem(&'a [u8]),
    /// Digits followed by `. `.
    OrderedItem {
        /// The literal number on the line.
        number: u32,
        /// Text after the marker.
        text: &'a [u8],
    },
    /// `> ` line.
    Quote(&'a [u8]),
    /// `---` or `***` alone.
    ThematicBreak,
    /// Anything else.
    Text(&'a [u8]),
}

/// Classify a line (without its line ending). First match wins.
pub fn classify(line: &[u8]) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if is_fence(line) {
        return LineKind::Fence;
    }
    if let Some(heading) = heading(line) {
        return heading;
    }
    if let Some(text) = line.strip_prefix(b"- ") {
        return LineKind::UnorderedItem(text);
    }
    if let Some(item) = ordered_item(line) {
        return item;
    }
    if let Some(text) = line.strip_prefix(b"> ") {
        return LineKind::Quote(text);
    }
    if line == b"---" || line == b"***" {
        return LineKind::ThematicBreak;
    }
    LineKind::Text(line)
}

#[inline]
fn is_fence(line: &[u8]) -> bool {
    line.starts_with(b"```")
}

fn heading(line: &[u8]) -> Option<LineKind<'_>> {
    // Look one past the limit so a 7th `#` disqualifies the line.
    let level = line
        .iter()
        .take(limits::MAX_HEADING_LEVEL + 1)
        .take_while(|&&b| b == b'#')
        .count();
    if level == 0 || level > limits::MAX_HEADING_LEVEL {
        return None;
    }
    let text = line[level..].strip_prefix(b" ")?;
    Some(LineKind::Heading {
        level: u8::try_from(level).ok()?,
        text,
    })
}

fn ordered_item(line: &[u8]) -> Option<LineKind<'_>> {
    let digits = line
        .iter()
        .take(limits::MAX_LIST_MARKER_DIGITS + 1)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 || digits > limits::MAX_LIST_MARKER_DIGITS {
        return None;
    }
    let text = line[digits..].strip_prefix(b". ")?;
    let number = line[..digits]
        .iter()
        .fold(0u32, |n, &d| n * 10 + u32::from(d - b'0'));
    Some(LineKind::OrderedItem { number, text })
}

/// Block parser state for one conversion job.
#[derive(Debug, Clone, Default)]
pub struct BlockParser {
    state: ParserState,
    counter: ListCounter,
}

impl BlockParser {
    /// Create a parser in the `Outside` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from an explicit state and counter.
    pub fn from_parts(state: ParserState, counter: ListCounter) -> Self {
        Self { state, counter }
    }

    /// Split back into state and counter.
    pub fn into_parts(self) -> (ParserState, ListCounter) {
        (self.state, self.counter)
    }

    /// Currently active block context.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Ordered list bookkeeping. Meaningless outside `OrderedList`.
    pub fn counter(&self) -> ListCounter {
        self.counter
    }

    /// Process one line and push the events it produces.
    ///
    /// `line` must already have its line ending stripped.
    pub fn process_line<'a>(&mut self, line: &'a [u8], events: &mut LineEvents<'a>) {
        // Code block content is checked before every rule but the fence.
        if self.state == ParserState::CodeBlock {
            if is_fence(line) {
                self.close(events);
            } else {
                events.push(BlockEvent::Code(line));
            }
            return;
        }

        let kind = classify(line);

        // A list or quote that does not continue is closed before the line
        // is handled as whatever it is.
        if !self.continues(kind) {
            self.close(events);
        }

        match kind {
            LineKind::Blank => self.close(events),
            LineKind::Fence => {
                self.close(events);
                events.push(BlockEvent::CodeBlockStart);
                self.transition(ParserState::CodeBlock);
            }
            LineKind::Heading { level, text } => {
                self.close(events);
                events.push(BlockEvent::Heading { level, text });
            }
            LineKind::UnorderedItem(text) => {
                if self.state != ParserState::UnorderedList {
                    self.close(events);
                    events.push(BlockEvent::ListStart {
                        kind: ListKind::Unordered,
                    });
                    self.transition(ParserState::UnorderedList);
                }
                events.push(BlockEvent::ListItem {
                    ordinal: None,
                    text,
                });
            }
            LineKind::OrderedItem { number, text } => {
                if self.state != ParserState::OrderedList {
                    self.close(events);
                    self.counter = ListCounter::new(number);
                    events.push(BlockEvent::ListStart {
                        kind: ListKind::Ordered { start: number },
                    });
                    self.transition(ParserState::OrderedList);
                }
                let ordinal = self.counter.advance();
                events.push(BlockEvent::ListItem {
                    ordinal: Some(ordinal),
                    text,
                });
            }
            LineKind::Quote(text) => {
                if self.state != ParserState::Blockquote {
                    self.close(events);
                    events.push(BlockEvent::BlockQuoteStart);
                    self.transition(ParserState::Blockquote);
                }
                events.push(BlockEvent::Text(text));
            }
            // Lists and quotes were closed above; a paragraph stays open.
            LineKind::ThematicBreak => events.push(BlockEvent::ThematicBreak),
            LineKind::Text(text) => {
                if self.state != ParserState::Paragraph {
                    self.close(events);
                    events.push(BlockEvent::ParagraphStart);
                    self.transition(ParserState::Paragraph);
                }
                events.push(BlockEvent::Text(text));
            }
        }
    }

    /// Close whatever is still open at end of input.
    pub fn finish(&mut self, events: &mut LineEvents<'_>) {
        self.close(events);
    }

    /// Whether `kind` keeps the current list or quote open.
    fn continues(&self, kind: LineKind<'_>) -> bool {
        match self.state {
            ParserState::UnorderedList => matches!(kind, LineKind::UnorderedItem(_)),
            ParserState::OrderedList => matches!(kind, LineKind::OrderedItem { .. }),
            ParserState::Blockquote => matches!(kind, LineKind::Quote(_)),
            ParserState::Outside | ParserState::Paragraph | ParserState::CodeBlock => true,
        }
    }

    /// Emit the closing event for the active context and go `Outside`.
    fn close(&mut self, events: &mut LineEvents<'_>) {
        let event = match self.state {
            ParserState::Outside => return,
            ParserState::Paragraph => BlockEvent::ParagraphEnd,
            ParserState::CodeBlock => BlockEvent::CodeBlockEnd,
            ParserState::Blockquote => BlockEvent::BlockQuoteEnd,
            ParserState::UnorderedList => BlockEvent::ListEnd {
                kind: ListKind::Unordered,
            },
            ParserState::OrderedList => BlockEvent::ListEnd {
                kind: ListKind::Ordered {
                    start: self.counter.start(),
                },
            },
        };
        events.push(event);
        self.transition(ParserState::Outside);
    }

    #[inline]
    fn transition(&mut self, next: ParserState) {
        log::trace!("block state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(lines: &[&'static str]) -> Vec<BlockEvent<'static>> {
        let mut parser = BlockParser::new();
        let mut all = Vec::new();
        for line in lines {
            let mut events = LineEvents::new();
            parser.process_line(line.as_bytes(), &mut events);
            all.extend(events);
        }
        let mut events = LineEvents::new();
        parser.finish(&mut events);
        all.extend(events);
        all
    }

    #[test]
    fn test_classify_blank() {
        assert_eq!(classify(b""), LineKind::Blank);
        // Only the empty line is blank
        assert_eq!(classify(b"  "), LineKind::Text(b"  "));
    }

    #[test]
    fn test_classify_headings() {
        assert_eq!(
            classify(b"# Hello"),
            LineKind::Heading {
                level: 1,
                text: b"Hello"
            }
        );
        assert_eq!(
            classify(b"###### six"),
            LineKind::Heading {
                level: 6,
                text: b"six"
            }
        );
        assert_eq!(classify(b"####### seven"), LineKind::Text(b"####### seven"));
        assert_eq!(classify(b"#tag"), LineKind::Text(b"#tag"));
        assert_eq!(classify(b"#"), LineKind::Text(b"#"));
        assert_eq!(
            classify(b"# "),
            LineKind::Heading {
                level: 1,
                text: b""
            }
        );
    }

    #[test]
    fn test_classify_ordered() {
        assert_eq!(
            classify(b"42. answer"),
            LineKind::OrderedItem {
                number: 42,
                text: b"answer"
            }
        );
        assert_eq!(classify(b"42"), LineKind::Text(b"42"));
        assert_eq!(classify(b"42.x"), LineKind::Text(b"42.x"));
        assert_eq!(classify(b"1) x"), LineKind::Text(b"1) x"));
    }

    #[test]
    fn test_classify_ordered_digit_limit() {
        assert_eq!(
            classify(b"999999999. x"),
            LineKind::OrderedItem {
                number: 999_999_999,
                text: b"x"
            }
        );
        assert_eq!(classify(b"1234567890. x"), LineKind::Text(b"1234567890. x"));
    }

    #[test]
    fn test_classify_misc() {
        assert_eq!(classify(b"```rust"), LineKind::Fence);
        assert_eq!(classify(b"- item"), LineKind::UnorderedItem(b"item"));
        assert_eq!(classify(b"-item"), LineKind::Text(b"-item"));
        assert_eq!(classify(b"> quote"), LineKind::Quote(b"quote"));
        assert_eq!(classify(b">quote"), LineKind::Text(b">quote"));
        assert_eq!(classify(b"---"), LineKind::ThematicBreak);
        assert_eq!(classify(b"***"), LineKind::ThematicBreak);
        assert_eq!(classify(b"----"), LineKind::Text(b"----"));
        assert_eq!(classify(b"- - -"), LineKind::UnorderedItem(b"- -"));
    }

    #[test]
    fn test_paragraph_lines() {
        assert_eq!(
            parse(&["one", "two"]),
            vec![
                BlockEvent::ParagraphStart,
                BlockEvent::Text(b"one"),
                BlockEvent::Text(b"two"),
                BlockEvent::ParagraphEnd,
            ]
        );
    }

    #[test]
    fn test_blank_closes_paragraph() {
        assert_eq!(
            parse(&["one", "", "two"]),
            vec![
                BlockEvent::ParagraphStart,
                BlockEvent::Text(b"one"),
                BlockEvent::ParagraphEnd,
                BlockEvent::ParagraphStart,
                BlockEvent::Text(b"two"),
                BlockEvent::ParagraphEnd,
            ]
        );
    }

    #[test]
    fn test_blank_lines_alone_emit_nothing() {
        assert!(parse(&["", "", ""]).is_empty());
    }

    #[test]
    fn test_heading_closes_paragraph() {
        assert_eq!(
            parse(&["text", "## Title"]),
            vec![
                BlockEvent::ParagraphStart,
                BlockEvent::Text(b"text"),
                BlockEvent::ParagraphEnd,
                BlockEvent::Heading {
                    level: 2,
                    text: b"Title"
                },
            ]
        );
    }

    #[test]
    fn test_unordered_list_run() {
        assert_eq!(
            parse(&["- a", "- b", ""]),
            vec![
                BlockEvent::ListStart {
                    kind: ListKind::Unordered
                },
                BlockEvent::ListItem {
                    ordinal: None,
                    text: b"a"
                },
                BlockEvent::ListItem {
                    ordinal: None,
                    text: b"b"
                },
                BlockEvent::ListEnd {
                    kind: ListKind::Unordered
                },
            ]
        );
    }

    #[test]
    fn test_ordered_list_counts_from_first_item() {
        let kind = ListKind::Ordered { start: 3 };
        assert_eq!(
            parse(&["3. x", "9. y", "1. z"]),
            vec![
                BlockEvent::ListStart { kind },
                BlockEvent::ListItem {
                    ordinal: Some(3),
                    text: b"x"
                },
                BlockEvent::ListItem {
                    ordinal: Some(4),
                    text: b"y"
                },
                BlockEvent::ListItem {
                    ordinal: Some(5),
                    text: b"z"
                },
                BlockEvent::ListEnd { kind },
            ]
        );
    }

    #[test]
    fn test_counter_resets_for_new_run() {
        let mut parser = BlockParser::new();
        let mut events = LineEvents::new();
        parser.process_line(b"7. a", &mut events);
        parser.process_line(b"8. b", &mut events);
        assert_eq!(parser.counter().next_ordinal(), 9);
        parser.process_line(b"", &mut events);
        parser.process_line(b"2. c", &mut events);
        assert_eq!(parser.counter().start(), 2);
        assert_eq!(parser.counter().next_ordinal(), 3);
    }

    #[test]
    fn test_list_switches_kind() {
        let events = parse(&["- a", "1. b"]);
        assert_eq!(
            events[2],
            BlockEvent::ListEnd {
                kind: ListKind::Unordered
            }
        );
        assert_eq!(
            events[3],
            BlockEvent::ListStart {
                kind: ListKind::Ordered { start: 1 }
            }
        );
    }

    #[test]
    fn test_list_closed_by_text_then_paragraph_opens() {
        assert_eq!(
            parse(&["- a", "after"]),
            vec![
                BlockEvent::ListStart {
                    kind: ListKind::Unordered
                },
                BlockEvent::ListItem {
                    ordinal: None,
                    text: b"a"
                },
                BlockEvent::ListEnd {
                    kind: ListKind::Unordered
                },
                BlockEvent::ParagraphStart,
                BlockEvent::Text(b"after"),
                BlockEvent::ParagraphEnd,
            ]
        );
    }

    #[test]
    fn test_blockquote_run() {
        assert_eq!(
            parse(&["> a", "> b", "c"]),
            vec![
                BlockEvent::BlockQuoteStart,
                BlockEvent::Text(b"a"),
                BlockEvent::Text(b"b"),
                BlockEvent::BlockQuoteEnd,
                BlockEvent::ParagraphStart,
                BlockEvent::Text(b"c"),
                BlockEvent::ParagraphEnd,
            ]
        );
    }

    #[test]
    fn test_paragraph_then_quote() {
        let events = parse(&["p", "> q"]);
        assert_eq!(events[2], BlockEvent::ParagraphEnd);
        assert_eq!(events[3], BlockEvent::BlockQuoteStart);
    }

    #[test]
    fn test_code_block_is_opaque() {
        assert_eq!(
            parse(&["```", "# not a heading", "", "- nor a list", "```"]),
            vec![
                BlockEvent::CodeBlockStart,
                BlockEvent::Code(b"# not a heading"),
                BlockEvent::Code(b""),
                BlockEvent::Code(b"- nor a list"),
                BlockEvent::CodeBlockEnd,
            ]
        );
    }

    #[test]
    fn test_fence_closes_paragraph_and_list() {
        let events = parse(&["text", "```"]);
        assert_eq!(events[2], BlockEvent::ParagraphEnd);
        assert_eq!(events[3], BlockEvent::CodeBlockStart);

        let events = parse(&["- a", "```"]);
        assert_eq!(
            events[2],
            BlockEvent::ListEnd {
                kind: ListKind::Unordered
            }
        );
        assert_eq!(events[3], BlockEvent::CodeBlockStart);
    }

    #[test]
    fn test_unterminated_fence_is_closed() {
        let events = parse(&["```", "code"]);
        assert_eq!(events.last(), Some(&BlockEvent::CodeBlockEnd));
    }

    #[test]
    fn test_thematic_break_between_paragraphs() {
        assert_eq!(
            parse(&["a", "---", "b"]),
            vec![
                BlockEvent::ParagraphStart,
                BlockEvent::Text(b"a"),
                BlockEvent::ThematicBreak,
                BlockEvent::Text(b"b"),
                BlockEvent::ParagraphEnd,
            ]
        );
    }

    #[test]
    fn test_thematic_break_keeps_paragraph_open() {
        let mut parser = BlockParser::from_parts(ParserState::Paragraph, ListCounter::default());
        let mut events = LineEvents::new();
        parser.process_line(b"---", &mut events);
        assert_eq!(parser.state(), ParserState::Paragraph);
        assert_eq!(events.as_slice(), &[BlockEvent::ThematicBreak]);
    }

    #[test]
    fn test_thematic_break_closes_list_and_quote() {
        assert_eq!(
            parse(&["- a", "---"]),
            vec![
                BlockEvent::ListStart {
                    kind: ListKind::Unordered,
                },
                BlockEvent::ListItem {
                    ordinal: None,
                    text: b"a",
                },
                BlockEvent::ListEnd {
                    kind: ListKind::Unordered,
                },
                BlockEvent::ThematicBreak,
            ]
        );
        assert_eq!(
            parse(&["> q", "***"]),
            vec![
                BlockEvent::BlockQuoteStart,
                BlockEvent::Text(b"q"),
                BlockEvent::BlockQuoteEnd,
                BlockEvent::ThematicBreak,
            ]
        );
    }

    #[test]
    fn test_thematic_break_leaves_state_outside() {
        let mut parser = BlockParser::new();
        let mut events = LineEvents::new();
        parser.process_line(b"***", &mut events);
        assert_eq!(parser.state(), ParserState::Outside);
        assert_eq!(events.as_slice(), &[BlockEvent::ThematicBreak]);
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut parser = BlockParser::new();
        let mut events = LineEvents::new();
        parser.process_line(b"text", &mut events);
        parser.finish(&mut events);
        parser.finish(&mut events);
        assert_eq!(
            events.iter().filter(|e| **e == BlockEvent::ParagraphEnd).count(),
            1
        );
    }

    #[test]
    fn test_line_events_stay_inline() {
        let mut parser = BlockParser::new();
        let mut events = LineEvents::new();
        parser.process_line(b"> q", &mut events);
        events.clear();
        parser.process_line(b"1. x", &mut events);
        assert_eq!(events.len(), 3);
        assert!(!events.spilled());
    }

    #[test]
    fn test_from_parts_round_trip() {
        let parser = BlockParser::from_parts(ParserState::OrderedList, ListCounter::new(5));
        let (state, counter) = parser.into_parts();
        assert_eq!(state, ParserState::OrderedList);
        assert_eq!(counter.start(), 5);
    }
}
