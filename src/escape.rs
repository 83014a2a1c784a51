//! HTML escaping utilities.
//!
//! Fast-path optimized: finds the first escapable byte with `memchr`,
//! then bulk-copies the runs between escapes. Every replacement is ASCII,
//! so UTF-8 input stays UTF-8.

use memchr::{memchr, memchr2, memchr3};

/// Lookup table for escapable bytes in text content (`<`, `>`, `&`, `"`).
const TEXT_ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table
};

/// Lookup table for escapable bytes in attribute values (adds `'`).
const ATTR_ESCAPE_TABLE: [bool; 256] = {
    let mut table = TEXT_ESCAPE_TABLE;
    table[b'\'' as usize] = true;
    table
};

/// Escape HTML text content into output buffer.
///
/// Escapes `<`, `>`, `&` and `"`. Each input byte is escaped at most once,
/// so already-escaped text such as `&lt;` becomes `&amp;lt;`.
///
/// # Example
/// ```
/// use phantom::escape::escape_text_into;
///
/// let mut out = Vec::new();
/// escape_text_into(&mut out, b"<tag>");
/// assert_eq!(out, b"&lt;tag&gt;");
/// ```
#[inline]
pub fn escape_text_into(out: &mut Vec<u8>, input: &[u8]) {
    match first_text_escape(input) {
        Some(pos) => escape_from(out, input, pos, &TEXT_ESCAPE_TABLE),
        None => out.extend_from_slice(input),
    }
}

/// Escape an HTML attribute value into output buffer.
///
/// Escapes `<`, `>`, `&`, `"` and `'`.
#[inline]
pub fn escape_attr_into(out: &mut Vec<u8>, input: &[u8]) {
    match first_attr_escape(input) {
        Some(pos) => escape_from(out, input, pos, &ATTR_ESCAPE_TABLE),
        None => out.extend_from_slice(input),
    }
}

/// Copy `input[..first]` verbatim, then escape the rest using `table`.
fn escape_from(out: &mut Vec<u8>, input: &[u8], first: usize, table: &[bool; 256]) {
    out.reserve(input.len() + input.len() / 8);
    out.extend_from_slice(&input[..first]);

    let mut pos = first;
    while pos < input.len() {
        let run_start = pos;
        while pos < input.len() && !table[input[pos] as usize] {
            pos += 1;
        }
        out.extend_from_slice(&input[run_start..pos]);

        if let Some(&b) = input.get(pos) {
            out.extend_from_slice(entity_for(b));
            pos += 1;
        }
    }
}

/// Entity for an escapable byte.
#[inline]
fn entity_for(b: u8) -> &'static [u8] {
    match b {
        b'<' => b"&lt;",
        b'>' => b"&gt;",
        b'&' => b"&amp;",
        b'"' => b"&quot;",
        b'\'' => b"&#39;",
        _ => unreachable!("byte {b:#04x} is not in an escape table"),
    }
}

#[inline]
fn first_text_escape(input: &[u8]) -> Option<usize> {
    min_opt(memchr3(b'<', b'>', b'&', input), memchr(b'"', input))
}

#[inline]
fn first_attr_escape(input: &[u8]) -> Option<usize> {
    min_opt(memchr3(b'<', b'>', b'&', input), memchr2(b'"', b'\'', input))
}

#[inline]
fn min_opt(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}
