//! Whitespace normalization for extracted text.
//!
//! Two layers: [`normalize_whitespace`] is applied wherever a text fragment
//! is produced (titles, cells, captions, paragraphs); [`normalize_document`]
//! runs once over the fully assembled flow text. Both are idempotent.

use crate::patterns::{EXCESS_BLANK_LINES, TRAILING_LINE_WHITESPACE, WHITESPACE_RUN};

/// Collapse every run of whitespace to a single space and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Final pass over assembled flow text: drop horizontal whitespace hanging
/// before newlines, cap blank-line runs at a single blank line, and trim.
///
/// Newlines themselves are preserved so heading and list lines survive.
#[must_use]
pub fn normalize_document(text: &str) -> String {
    let trimmed_lines = TRAILING_LINE_WHITESPACE.replace_all(text, "\n");
    let capped = EXCESS_BLANK_LINES.replace_all(&trimmed_lines, "\n\n");
    capped.trim().to_string()
}
