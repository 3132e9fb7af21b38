//! The article cleaning pipeline.
//!
//! Stages run strictly in sequence over one mutable document tree: pruning,
//! infobox extraction, boilerplate and trailing-section removal, image
//! extraction, then content-root location, section collection, text
//! rendering, and normalization. Later stages only ever see what earlier
//! stages left behind.

pub mod boilerplate;
pub mod images;
pub mod infobox;
pub mod prune;
pub mod render;
pub mod sections;

use dom_query::Document;
use tracing::{debug, info, warn};

use crate::dom;
use crate::options::Options;
use crate::result::ArticleRecord;
use crate::text_utils::{normalize_document, normalize_whitespace};

/// Converts one rendered article page into an [`ArticleRecord`].
///
/// A cleaner owns nothing but its options; every call parses a fresh tree,
/// so instances are cheap and invocations are independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleCleaner {
    options: Options,
}

impl ArticleCleaner {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Clean one page. Never fails: pages missing expected structure yield
    /// a well-formed record with empty fields instead.
    #[must_use]
    pub fn clean(&self, html: &str, page_title: &str) -> ArticleRecord {
        if html.trim().is_empty() {
            warn!(page = page_title, "received empty HTML");
            return ArticleRecord::empty(page_title);
        }

        let doc = dom::parse(html);
        let title = resolve_title(&doc, page_title);

        prune::preprocess(&doc);
        let infobox_data = infobox::extract_infobox(&doc, &self.options);
        boilerplate::remove_boilerplate(&doc, &self.options);
        let images = images::extract_images(&doc, &self.options);

        let Some(root) = sections::find_content_root(&doc) else {
            warn!(page = %title, "no content root found; emitting empty content");
            return ArticleRecord {
                title,
                content: String::new(),
                sections: Vec::new(),
                images: self.options.keep_images.then_some(images),
                infobox_data: if self.options.keep_infobox {
                    infobox_data
                } else {
                    None
                },
                ..ArticleRecord::default()
            };
        };

        let mut section_titles = sections::collect_section_titles(&root);

        let mut fragments = Vec::new();
        for child in dom::element_children(&root) {
            render::element_fragments(&child, &mut fragments);
        }
        let content = normalize_document(&fragments.concat());
        sections::finalize_sections(&mut section_titles, &content);

        debug!(
            page = %title,
            chars = content.len(),
            sections = section_titles.len(),
            "cleaning done"
        );

        ArticleRecord {
            title,
            url: String::new(),
            content,
            sections: section_titles,
            images: self.options.keep_images.then_some(images),
            infobox_data: if self.options.keep_infobox {
                infobox_data
            } else {
                None
            },
        }
    }
}

/// Prefer the page's own first heading over the requested title, and drop
/// the heading node so it never renders into the body.
fn resolve_title(doc: &Document, page_title: &str) -> String {
    let heading = doc.select_single("h1#firstHeading");
    if !heading.exists() {
        return page_title.to_string();
    }
    let extracted = normalize_whitespace(&dom::selection_text_joined(&heading));
    heading.remove();
    if extracted.is_empty() {
        info!(page = page_title, "first heading present but empty");
        page_title.to_string()
    } else {
        extracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!(
            r#"<html><head><title>t</title></head><body>
               <h1 id="firstHeading">Jane  Doe</h1>
               <div id="mw-content-text"><div class="mw-parser-output">{body}</div></div>
               </body></html>"#
        )
    }

    #[test]
    fn title_comes_from_first_heading() {
        let cleaner = ArticleCleaner::default();
        let record = cleaner.clean(&page("<p>Hello.</p>"), "Requested Title");
        assert_eq!(record.title, "Jane Doe");
        assert!(!record.content.contains("Jane Doe"));
    }

    #[test]
    fn requested_title_used_when_heading_missing() {
        let cleaner = ArticleCleaner::default();
        let record = cleaner.clean(
            r#"<div class="mw-parser-output"><p>Hi.</p></div>"#,
            "Fallback",
        );
        assert_eq!(record.title, "Fallback");
    }

    #[test]
    fn empty_html_yields_empty_record() {
        let cleaner = ArticleCleaner::default();
        let record = cleaner.clean("   ", "Whatever");
        assert_eq!(record.title, "Whatever");
        assert_eq!(record.content, "");
        assert!(record.sections.is_empty());
        assert!(record.images.is_none());
        assert!(record.infobox_data.is_none());
    }

    #[test]
    fn url_is_always_emitted_empty() {
        let cleaner = ArticleCleaner::default();
        let record = cleaner.clean(&page("<p>Hello.</p>"), "T");
        assert_eq!(record.url, "");
    }
}
