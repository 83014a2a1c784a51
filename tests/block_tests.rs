use phantom::{ListCounter, ParserState, finalize, process_line, to_html};

fn html(input: &str) -> String {
    to_html(input)
}

// --- Headings ---

#[test]
fn heading_levels() {
    for level in 1..=6 {
        let input = format!("{} Title", "#".repeat(level));
        assert_eq!(html(&input), format!("<h{level}>Title</h{level}>\n"));
    }
}

#[test]
fn seven_hashes_is_paragraph() {
    assert_eq!(html("####### Title"), "<p>\n####### Title\n</p>\n");
}

#[test]
fn hash_without_space_is_paragraph() {
    assert_eq!(html("#Title"), "<p>\n#Title\n</p>\n");
}

#[test]
fn heading_closes_open_blocks() {
    assert_eq!(html("text\n# H"), "<p>\ntext\n</p>\n<h1>H</h1>\n");
    assert_eq!(html("- a\n# H"), "<ul>\n<li>a</li>\n</ul>\n<h1>H</h1>\n");
    assert_eq!(
        html("> q\n# H"),
        "<blockquote><p>\nq\n</p></blockquote>\n<h1>H</h1>\n"
    );
}

#[test]
fn heading_content_is_inline_formatted() {
    assert_eq!(html("## a *b* <c>"), "<h2>a <em>b</em> &lt;c&gt;</h2>\n");
}

// --- Paragraphs ---

#[test]
fn consecutive_lines_share_paragraph() {
    assert_eq!(html("one\ntwo\nthree"), "<p>\none\ntwo\nthree\n</p>\n");
}

#[test]
fn blank_line_separates_paragraphs() {
    assert_eq!(html("one\n\ntwo"), "<p>\none\n</p>\n<p>\ntwo\n</p>\n");
}

#[test]
fn repeated_blank_lines_emit_nothing() {
    assert_eq!(html("\n\n\n"), "");
    assert_eq!(html("a\n\n\n\nb"), "<p>\na\n</p>\n<p>\nb\n</p>\n");
}

#[test]
fn whitespace_only_line_is_text() {
    assert_eq!(html("a\n \nb"), "<p>\na\n \nb\n</p>\n");
}

// --- Unordered lists ---

#[test]
fn unordered_list_single_open() {
    let out = html("- a\n- b\n- c");
    assert_eq!(out.matches("<ul>").count(), 1);
    assert_eq!(out.matches("<li>").count(), 3);
}

#[test]
fn dash_without_space_is_text() {
    assert_eq!(html("-a"), "<p>\n-a\n</p>\n");
}

#[test]
fn text_after_list_closes_it() {
    assert_eq!(
        html("- a\ntext"),
        "<ul>\n<li>a</li>\n</ul>\n<p>\ntext\n</p>\n"
    );
}

#[test]
fn switching_list_kinds() {
    assert_eq!(
        html("- a\n1. b\n- c"),
        "<ul>\n<li>a</li>\n</ul>\n<ol start=\"1\">\n<li>b</li>\n</ol>\n<ul>\n<li>c</li>\n</ul>\n"
    );
}

// --- Ordered lists ---

#[test]
fn ordered_list_ignores_later_numbers() {
    assert_eq!(
        html("5. a\n1. b\n99. c"),
        "<ol start=\"5\">\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ol>\n"
    );
}

#[test]
fn new_run_takes_new_start() {
    assert_eq!(
        html("2. a\n\n8. b"),
        "<ol start=\"2\">\n<li>a</li>\n</ol>\n<ol start=\"8\">\n<li>b</li>\n</ol>\n"
    );
}

#[test]
fn digits_without_marker_are_text() {
    assert_eq!(html("42"), "<p>\n42\n</p>\n");
    assert_eq!(html("42."), "<p>\n42.\n</p>\n");
    assert_eq!(html("42.x"), "<p>\n42.x\n</p>\n");
}

#[test]
fn overlong_number_is_text() {
    assert_eq!(html("1234567890. x"), "<p>\n1234567890. x\n</p>\n");
    assert_eq!(
        html("123456789. x"),
        "<ol start=\"123456789\">\n<li>x</li>\n</ol>\n"
    );
}

#[test]
fn ordered_counter_advances() {
    let (state, counter, _) = process_line(ParserState::Outside, ListCounter::default(), b"10. a");
    assert_eq!(state, ParserState::OrderedList);
    assert_eq!(counter.start(), 10);
    assert_eq!(counter.next_ordinal(), 11);

    let (_, counter, html) = process_line(state, counter, b"3. b");
    assert_eq!(html, "<li>b</li>\n");
    assert_eq!(counter.start(), 10);
    assert_eq!(counter.next_ordinal(), 12);
}

// --- Blockquotes ---

#[test]
fn blockquote_lines_share_one_paragraph() {
    assert_eq!(
        html("> a\n> b"),
        "<blockquote><p>\na\nb\n</p></blockquote>\n"
    );
}

#[test]
fn quote_closed_by_unprefixed_line() {
    assert_eq!(
        html("> a\nb"),
        "<blockquote><p>\na\n</p></blockquote>\n<p>\nb\n</p>\n"
    );
}

#[test]
fn bare_marker_is_text() {
    assert_eq!(html(">a"), "<p>\n&gt;a\n</p>\n");
}

// --- Code blocks ---

#[test]
fn fence_line_content_is_discarded() {
    assert_eq!(html("```rust\nx\n``` trailing"), "<pre><code>x\n</code></pre>\n");
}

#[test]
fn code_block_preserves_markdown_and_blank_lines() {
    assert_eq!(
        html("```\n# not heading\n\n- not item\n**raw**\n```"),
        "<pre><code># not heading\n\n- not item\n**raw**\n</code></pre>\n"
    );
}

#[test]
fn fence_closes_open_paragraph() {
    assert_eq!(
        html("text\n```\ncode\n```"),
        "<p>\ntext\n</p>\n<pre><code>code\n</code></pre>\n"
    );
}

#[test]
fn code_escapes_quotes() {
    assert_eq!(
        html("```\nsay \"hi\" & <bye>\n```"),
        "<pre><code>say &quot;hi&quot; &amp; &lt;bye&gt;\n</code></pre>\n"
    );
}

// --- Thematic breaks ---

#[test]
fn thematic_break_variants() {
    assert_eq!(html("---"), "<hr>\n");
    assert_eq!(html("***"), "<hr>\n");
    assert_eq!(html("----"), "<p>\n----\n</p>\n");
    assert_eq!(html("--- "), "<p>\n--- \n</p>\n");
}

#[test]
fn thematic_break_inside_paragraph() {
    assert_eq!(html("a\n---\nb"), "<p>\na\n<hr>\nb\n</p>\n");
}

#[test]
fn thematic_break_after_list_and_quote() {
    assert_eq!(html("- a\n---"), "<ul>\n<li>a</li>\n</ul>\n<hr>\n");
    assert_eq!(
        html("> q\n---\nb"),
        "<blockquote><p>\nq\n</p></blockquote>\n<hr>\n<p>\nb\n</p>\n"
    );
}

#[test]
fn thematic_break_line_keeps_state() {
    let (state, _, html) = process_line(ParserState::Paragraph, ListCounter::default(), b"---");
    assert_eq!(state, ParserState::Paragraph);
    assert_eq!(html, "<hr>\n");
}

// --- Finalization ---

#[test]
fn finalize_each_state() {
    let counter = ListCounter::default();
    assert_eq!(finalize(ParserState::Outside, counter), "");
    assert_eq!(finalize(ParserState::Paragraph, counter), "</p>\n");
    assert_eq!(finalize(ParserState::UnorderedList, counter), "</ul>\n");
    assert_eq!(finalize(ParserState::OrderedList, counter), "</ol>\n");
    assert_eq!(finalize(ParserState::CodeBlock, counter), "</code></pre>\n");
    assert_eq!(
        finalize(ParserState::Blockquote, counter),
        "</p></blockquote>\n"
    );
}
