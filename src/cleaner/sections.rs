//! Content-root location and section list assembly.

use dom_query::{Document, NodeRef};

use crate::dom;
use crate::patterns::{HEADING_LINE, SECTION_TITLE_STOPWORDS};

use super::render::heading_title;

/// Locate the node holding the article's rendered body.
///
/// Prefers the parser-output division; falls back to the content-text
/// wrapper (and its own parser-output child when present). `None` means the
/// page doesn't follow the expected conventions and yields an empty-content
/// record.
pub fn find_content_root(doc: &Document) -> Option<NodeRef<'_>> {
    let parser_output = doc.select_single("div.mw-parser-output");
    if parser_output.exists() {
        return parser_output.nodes().first().cloned();
    }

    let content_text = doc.select_single("div#mw-content-text");
    if content_text.exists() {
        let inner = content_text.select_single("div.mw-parser-output");
        if inner.exists() {
            return inner.nodes().first().cloned();
        }
        return content_text.nodes().first().cloned();
    }

    None
}

/// Titles of the top-level headings directly under the content root, in
/// document order, stopword sections excluded.
#[must_use]
pub fn collect_section_titles(root: &NodeRef) -> Vec<String> {
    dom::element_children(root)
        .iter()
        .filter(|child| dom::node_tag(child) == "h2")
        .filter_map(|heading| {
            let title = heading_title(heading);
            if title.is_empty() || SECTION_TITLE_STOPWORDS.contains(title.to_lowercase().as_str())
            {
                None
            } else {
                Some(title)
            }
        })
        .collect()
}

/// Synthesize the leading "Introduction"/"Content" entry after rendering.
///
/// If body text precedes the first heading marker (or no marker exists at
/// all), the section list gains a leading "Introduction". A page with text
/// but no sections becomes `["Content"]`. Empty text leaves the list as
/// computed.
pub fn finalize_sections(sections: &mut Vec<String>, content: &str) {
    if content.is_empty() {
        return;
    }
    if sections.is_empty() {
        sections.push("Content".to_string());
        return;
    }

    let first_marker = format!("## {}", sections[0]).to_lowercase();
    if content.to_lowercase().starts_with(&first_marker) {
        return;
    }

    match HEADING_LINE.find(content) {
        Some(m) => {
            if !content[..m.start()].trim().is_empty() {
                sections.insert(0, "Introduction".to_string());
            }
        }
        None => sections.insert(0, "Introduction".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn parser_output_is_preferred_root() {
        let doc = parse(
            r#"<div id="mw-content-text"><div class="mw-parser-output"><p>x</p></div></div>"#,
        );
        let root = find_content_root(&doc).expect("content root");
        assert!(dom::class_tokens(&root).contains(&"mw-parser-output".to_string()));
    }

    #[test]
    fn content_text_wrapper_is_the_fallback() {
        let doc = parse(r#"<div id="mw-content-text"><p>bare</p></div>"#);
        let root = find_content_root(&doc).expect("content root");
        assert_eq!(dom::node_attr(&root, "id").as_deref(), Some("mw-content-text"));
    }

    #[test]
    fn missing_root_is_none() {
        let doc = parse("<div><p>unmarked page</p></div>");
        assert!(find_content_root(&doc).is_none());
    }

    #[test]
    fn section_titles_come_from_direct_h2_children() {
        let doc = parse(
            r#"<div class="mw-parser-output"><p>intro</p>
               <h2>History</h2><p>a</p>
               <div><h2>Nested heading</h2></div>
               <h2><span class="mw-headline">Career</span></h2>
               <h2>References</h2></div>"#,
        );
        let root = find_content_root(&doc).expect("content root");
        assert_eq!(collect_section_titles(&root), ["History", "Career"]);
    }

    #[test]
    fn intro_prepended_when_text_precedes_first_heading() {
        let mut sections = vec!["History".to_string()];
        finalize_sections(&mut sections, "Lead paragraph.\n\n## History\nBorn 1990.");
        assert_eq!(sections, ["Introduction", "History"]);
    }

    #[test]
    fn no_intro_when_content_starts_with_first_section() {
        let mut sections = vec!["History".to_string()];
        finalize_sections(&mut sections, "## History\nBorn 1990.");
        assert_eq!(sections, ["History"]);
    }

    #[test]
    fn intro_prepended_when_no_marker_found() {
        let mut sections = vec!["History".to_string()];
        finalize_sections(&mut sections, "Text without any markers.");
        assert_eq!(sections, ["Introduction", "History"]);
    }

    #[test]
    fn content_entry_synthesized_for_sectionless_text() {
        let mut sections = Vec::new();
        finalize_sections(&mut sections, "Hello world.");
        assert_eq!(sections, ["Content"]);
    }

    #[test]
    fn empty_content_leaves_sections_untouched() {
        let mut sections = Vec::new();
        finalize_sections(&mut sections, "");
        assert!(sections.is_empty());

        let mut sections = vec!["History".to_string()];
        finalize_sections(&mut sections, "");
        assert_eq!(sections, ["History"]);
    }
}
