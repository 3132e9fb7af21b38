//! # wikiharvest
//!
//! Harvest, clean, and export Wikipedia articles.
//!
//! The core of this crate is a document-transformation pipeline that turns a
//! rendered article page into a compact structured record: a clean title,
//! linearized body text in lightweight markup, an ordered section list, and
//! optionally a key/value infobox mapping and image descriptors. Navigation,
//! citations, and styling are discarded by design; the transformation is
//! one-directional and lossy.
//!
//! ## Quick Start
//!
//! ```rust
//! use wikiharvest::clean_article;
//!
//! let html = r#"<html><body>
//! <h1 id="firstHeading">Ada Lovelace</h1>
//! <div class="mw-parser-output"><p>Ada Lovelace was a mathematician.</p></div>
//! </body></html>"#;
//!
//! let record = clean_article(html, "Ada Lovelace");
//! assert_eq!(record.title, "Ada Lovelace");
//! assert_eq!(record.content, "Ada Lovelace was a mathematician.");
//! assert_eq!(record.sections, vec!["Content"]);
//! ```
//!
//! ## Pipeline
//!
//! Per document, stages run strictly in sequence over one mutable tree:
//! pruning (comments, scripts, site furniture), infobox extraction,
//! boilerplate and trailing-section removal, image extraction, then text
//! rendering and normalization. A page missing expected structure degrades
//! to an empty-content record rather than failing.
//!
//! Fetching (`fetcher`), output schemas (`schema`), and JSON export
//! (`serializer`) live alongside the pipeline for the CLI; the pipeline
//! itself never performs I/O.

mod error;
mod options;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Whitespace normalization helpers.
pub mod text_utils;

/// Selector catalogues, keyword sets, and compiled patterns.
pub mod patterns;

/// The article cleaning pipeline.
pub mod cleaner;

/// Rate-limited Wikipedia fetching with retry/backoff.
pub mod fetcher;

/// Output schema handling.
pub mod schema;

/// Schema-driven JSON serialization.
pub mod serializer;

// Public API - re-exports
pub use cleaner::ArticleCleaner;
pub use error::{Error, Result};
pub use fetcher::{Fetcher, FetcherConfig};
pub use options::Options;
pub use result::{ArticleRecord, ImageData, InfoboxData, InfoboxValue};
pub use serializer::ArticleSerializer;

/// Clean one article page using default options (no infobox, no images).
#[must_use]
pub fn clean_article(html: &str, page_title: &str) -> ArticleRecord {
    clean_article_with_options(html, page_title, Options::default())
}

/// Clean one article page with explicit retention options.
///
/// # Example
///
/// ```rust
/// use wikiharvest::{clean_article_with_options, Options};
///
/// let html = r#"<div class="mw-parser-output">
/// <table class="infobox"><tr><th>Born</th><td>1815</td></tr></table>
/// <p>Lead paragraph.</p></div>"#;
///
/// let options = Options { keep_infobox: true, ..Options::default() };
/// let record = clean_article_with_options(html, "Ada Lovelace", options);
/// assert!(record.infobox_data.is_some());
/// assert!(!record.content.contains("1815"));
/// ```
#[must_use]
pub fn clean_article_with_options(html: &str, page_title: &str, options: Options) -> ArticleRecord {
    ArticleCleaner::new(options).clean(html, page_title)
}

/// Clean one article page from raw bytes, sniffing the character encoding
/// from meta tags and transcoding to UTF-8 first.
#[must_use]
pub fn clean_article_bytes(html: &[u8], page_title: &str, options: Options) -> ArticleRecord {
    let decoded = encoding::decode_html(html);
    clean_article_with_options(&decoded, page_title, options)
}
