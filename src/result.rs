//! Result types for cleaned articles.
//!
//! One [`ArticleRecord`] is produced per processed page. The record always
//! carries all six fields; `images` and `infobox_data` serialize as `null`
//! whenever their retention switch is off.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single image found in article content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    /// Absolute image URL (protocol-relative sources are rewritten to https).
    pub src: String,

    /// Normalized alt text, possibly empty.
    pub alt: String,

    /// Normalized caption text, possibly empty.
    pub caption: String,
}

/// A single infobox cell value.
///
/// Cells that contain list items become `List`; everything else collapses to
/// a single normalized line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoboxValue {
    Text(String),
    List(Vec<String>),
}

/// Ordered label → value mapping extracted from an article's infobox.
///
/// Besides regular row labels, two reserved keys may appear: `_caption_`
/// (the table caption) and `_infobox_notes_` (freeform unlabeled rows).
pub type InfoboxData = IndexMap<String, InfoboxValue>;

/// Structured record produced for one article page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Resolved article title (page heading when present, else the
    /// requested title).
    pub title: String,

    /// Canonical page URL. Always emitted empty by the cleaning pipeline;
    /// the fetcher fills it in from the resolved title.
    pub url: String,

    /// Linearized body text in lightweight markup (headings as `#` runs,
    /// `*`/numbered list items, `**term**:` definitions).
    pub content: String,

    /// Ordered top-level section titles, with a synthesized leading
    /// "Introduction" or "Content" entry where body text warrants one.
    pub sections: Vec<String>,

    /// Image records in extraction order, or `None` when image retention
    /// is disabled.
    pub images: Option<Vec<ImageData>>,

    /// Infobox mapping, or `None` when absent or retention is disabled.
    pub infobox_data: Option<InfoboxData>,
}

impl ArticleRecord {
    /// Empty record used when there is no content to process.
    #[must_use]
    pub fn empty(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}
