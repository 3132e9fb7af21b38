//! Character encoding detection and transcoding.
//!
//! Wikipedia serves UTF-8, but mirrors and archived dumps do not always;
//! the byte front door sniffs the charset declared in meta tags and decodes
//! to UTF-8 before parsing.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// How many leading bytes to scan for a charset declaration.
const SNIFF_WINDOW: usize = 1024;

#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("META_CHARSET regex")
});

/// Charset declared in the document's meta tags, if any.
///
/// Covers both `<meta charset="...">` and the legacy
/// `<meta http-equiv="Content-Type" content="...; charset=...">` form
/// (`charset=` appears in the content attribute either way).
#[must_use]
pub fn declared_charset(head: &str) -> Option<String> {
    META_CHARSET
        .captures(head)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolve the encoding for a raw HTML document, defaulting to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(SNIFF_WINDOW)];
    let head_str = String::from_utf8_lossy(head);

    declared_charset(&head_str)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode raw HTML bytes to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than failing; a page
/// with a bad byte still yields a record.
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
