//! Compiled regex patterns, selector catalogues, and keyword sets.
//!
//! All patterns are compiled once at startup using `LazyLock`. The selector
//! catalogues are fixed: each entry is applied best-effort and an unparsable
//! entry is skipped without affecting the others.

#![allow(clippy::expect_used)]

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Removal catalogues
// =============================================================================

/// Structural and cosmetic markup removed before any extraction: scripts,
/// styles, hidden accessibility text, coordinate widgets, and site furniture.
pub static PREPROCESS_SELECTORS: [&str; 17] = [
    "script",
    "style",
    "noscript",
    "link[rel='stylesheet']",
    ".mw-empty-elt",
    "span.Z3988",
    ".sr-only",
    ".visually-hidden",
    ".screen-reader-text",
    "span#coordinates",
    "div#coordinates",
    ".geo-default",
    ".geo-multi-punct",
    ".geo",
    "div.vector-body-before-content",
    "div#siteNotice, div#centralNotice",
    "div.mw-indicators",
];

/// Navigation, message boxes, metadata blocks, site chrome, citation
/// markers, table-of-contents, and reference lists. Removed after infobox
/// extraction and before trailing-section pruning.
pub static BOILERPLATE_SELECTORS: [&str; 34] = [
    "div.navbox",
    "table.navbox",
    "div.vertical-navbox",
    "table.vertical-navbox",
    "table.ambox",
    "table.tmbox",
    "table.fmbox",
    "div.ombox",
    "table.commons-caption",
    "div.metadata",
    "table.metadata",
    "div#siteSub",
    "div#jump-to-nav",
    "div.printfooter",
    "div.catlinks",
    "div#p-search, div#p-lang-btn, div#p-namespaces, div#p-personal",
    "div#p-views, div#p-navigation, div#p-interaction, div#p-tb",
    "div#p-coll-print_export",
    "div#footer",
    "span.mw-editsection",
    "sup.reference",
    "sup.noprint",
    ".noprint",
    ".mw-cite-backlink",
    ".citation-needed-content",
    "figure, gallery, ul.gallery, table.gallery",
    "table.wikitable.sidebar",
    "div.thumbcaption[style*='display:none']",
    "div.hatnote, div.rellink, div.Dablink",
    "table.fmbox-system, div.authority-control, div.shortdescription",
    "div#toc, table#toc, .toc",
    "div.reflist, ol.references, ul.plainlinks",
    ".portalbox, .sisterproject, div.mw-references-wrap, span.mwe-math-fallback-image-inline",
    "div[class*='mw-jump']",
];

/// Infobox structural signature, in preference order (table form first).
pub static INFOBOX_SELECTORS: [&str; 2] = ["table.infobox", "div.infobox"];

/// Image-bearing markup removed wholesale when image retention is off.
pub static IMAGE_REMOVAL_SELECTORS: [&str; 16] = [
    "img",
    "div.thumb",
    "figure.image",
    "a.image",
    "div.PopUpMediaTransform",
    "div.thumbinner",
    "div.thumbimage",
    "div.floatnone",
    "div.floatright",
    "div.floatleft",
    "div.gallerybox",
    "td[style*='padding'] > a.image",
    "figcaption",
    "div.thumbcaption",
    "div.gallerytext",
    "div.mw-caption-text",
];

/// Image container patterns in priority order; records follow this order,
/// then loose-image document order.
pub static IMAGE_CONTAINER_SELECTORS: [&str; 9] = [
    "figure.image",
    ".thumb",
    "div.thumbimage",
    "div.image",
    "div.floatnone",
    "div.floatright",
    "div.floatleft",
    ".gallerybox",
    "td[style*='padding'] > a.image",
];

/// Fixed caption-bearing tag/class combinations checked inside an image
/// container before falling back to any descendant with "caption" in its
/// class name.
pub const CAPTION_SELECTOR: &str = "figcaption.thumbcaption, figcaption.gallerytext, \
     figcaption.mw-caption-text, div.thumbcaption, div.gallerytext, div.mw-caption-text";

/// Fallback caption lookup.
pub const CAPTION_FALLBACK_SELECTOR: &str = "[class*='caption']";

// =============================================================================
// Keyword sets
// =============================================================================

/// A heading whose normalized lower-cased title contains one of these is a
/// trailing section: the heading and everything up to the next heading of
/// equal or shallower depth is discarded.
pub static TRAILING_SECTION_KEYWORDS: [&str; 9] = [
    "references",
    "external links",
    "see also",
    "notes",
    "bibliography",
    "further reading",
    "sources",
    "citations",
    "gallery",
];

/// Headings whose normalized lower-cased title exactly matches one of these
/// are omitted from rendered text and from the section list.
pub static SECTION_TITLE_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "references",
        "external links",
        "see also",
        "notes",
        "contents",
        "bibliography",
        "further reading",
        "gallery",
    ]
    .into_iter()
    .collect()
});

/// Child elements the text renderer never descends into.
pub static RENDER_SKIP_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["table", "figure", "img", "sup", "style", "script"]
        .into_iter()
        .collect()
});

/// Class tokens that exclude a child element from text rendering.
pub static RENDER_SKIP_CLASSES: [&str; 3] = ["reference", "noprint", "mw-editsection"];

// =============================================================================
// Text normalization patterns
// =============================================================================

/// Matches any run of whitespace characters.
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

/// Matches horizontal whitespace hanging at the end of a line.
pub static TRAILING_LINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("TRAILING_LINE_WHITESPACE regex"));

/// Matches runs of three or more newlines (two or more blank lines).
pub static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("EXCESS_BLANK_LINES regex"));

/// Matches the first heading-marker line in rendered flow text.
pub static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*#{2,}\s*\S.*\n").expect("HEADING_LINE regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_run_collapses_mixed_whitespace() {
        let result = WHITESPACE_RUN.replace_all("a \t\n b", " ");
        assert_eq!(result, "a b");
    }

    #[test]
    fn heading_line_finds_first_marker_line() {
        let text = "intro text\n## History\nBorn 1990.\n";
        let m = HEADING_LINE.find(text).expect("heading line");
        assert_eq!(&text[m.start()..m.end()], "## History\n");
    }

    #[test]
    fn heading_line_ignores_bullet_lines() {
        assert!(HEADING_LINE.find("* item one\n* item two\n").is_none());
    }

    #[test]
    fn catalogue_selectors_parse() {
        for &selector in PREPROCESS_SELECTORS
            .iter()
            .chain(BOILERPLATE_SELECTORS.iter())
            .chain(IMAGE_REMOVAL_SELECTORS.iter())
            .chain(IMAGE_CONTAINER_SELECTORS.iter())
        {
            assert!(
                dom_query::Matcher::new(selector).is_ok(),
                "selector should parse: {selector}"
            );
        }
    }
}
