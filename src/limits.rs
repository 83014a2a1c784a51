//! DoS prevention constants.
//!
//! These limits keep pathological lines from causing big-integer parsing
//! or quadratic scanning.

/// Maximum digits in an ordered list marker (keeps the start in `u32`).
pub const MAX_LIST_MARKER_DIGITS: usize = 9;

/// Deepest ATX heading level. A run of more `#` is paragraph text.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Maximum number of simultaneously open inline spans (code, strong, emphasis).
pub const MAX_OPEN_SPANS: usize = 3;
