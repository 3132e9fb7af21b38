//! Boilerplate removal and trailing-section pruning.
//!
//! Two independent passes: a selector catalogue for navigation/metadata
//! chrome, then a reverse-order sweep that deletes conventional tail
//! sections (references, external links, ...) together with their content.

use dom_query::Document;
use tracing::debug;

use crate::dom;
use crate::options::Options;
use crate::patterns::{BOILERPLATE_SELECTORS, INFOBOX_SELECTORS, TRAILING_SECTION_KEYWORDS};

use super::prune::remove_by_selectors;
use super::render::heading_title;

/// Remove navigation boxes, banners, metadata blocks, and trailing sections.
pub fn remove_boilerplate(doc: &Document, options: &Options) {
    remove_by_selectors(doc, &BOILERPLATE_SELECTORS);
    if !options.keep_infobox {
        // Covers any second infobox-like node the extractor didn't consume.
        remove_by_selectors(doc, &INFOBOX_SELECTORS);
    }
    let removed = remove_trailing_sections(doc);
    debug!(trailing_sections = removed, "boilerplate removal done");
}

/// Walk headings tail-first and delete each trailing section as one unit.
///
/// Processing in reverse document order means removing a later section never
/// disturbs the sibling chains an earlier heading still needs.
fn remove_trailing_sections(doc: &Document) -> usize {
    let headings = doc.select("h2, h3, h4").nodes().to_vec();
    let mut removed = 0;

    for heading in headings.iter().rev() {
        let title = heading_title(heading).to_lowercase();
        if !TRAILING_SECTION_KEYWORDS
            .iter()
            .any(|keyword| title.contains(keyword))
        {
            continue;
        }

        let heading_tag = dom::node_tag(heading);
        let mut doomed = vec![*heading];
        let mut sibling = dom::next_element_sibling(heading);
        while let Some(node) = sibling {
            let tag = dom::node_tag(&node);
            // A sibling heading at the same or a higher level terminates the
            // section; deeper sub-headings are swept in. Tag identity is
            // compared lexically ("h2" <= "h3").
            if tag.starts_with('h') && tag.as_str() <= heading_tag.as_str() {
                break;
            }
            sibling = dom::next_element_sibling(&node);
            doomed.push(node);
        }

        for node in doomed {
            node.remove_from_parent();
        }
        removed += 1;
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    fn cleaned_html(html: &str) -> String {
        let doc = parse(html);
        remove_boilerplate(&doc, &Options::default());
        doc.html().to_string()
    }

    #[test]
    fn navboxes_and_toc_are_removed() {
        let html = cleaned_html(
            r#"<div><div class="navbox">nav</div><div id="toc">contents</div>
               <p>article text</p></div>"#,
        );
        assert!(!html.contains("nav"));
        assert!(!html.contains("contents"));
        assert!(html.contains("article text"));
    }

    #[test]
    fn references_section_is_removed_to_the_end() {
        let html = cleaned_html(
            "<div><h2>History</h2><p>Born 1990.</p>\
             <h2>References</h2><p>cite one</p><p>cite two</p></div>",
        );
        assert!(html.contains("Born 1990."));
        assert!(!html.contains("References"));
        assert!(!html.contains("cite one"));
        assert!(!html.contains("cite two"));
    }

    #[test]
    fn deeper_subheadings_are_swept_into_the_removed_section() {
        let html = cleaned_html(
            "<div><h2>Career</h2><p>kept</p>\
             <h2>External links</h2><p>gone</p><h3>Official sites</h3><p>also gone</p>\
             <h2>Legacy</h2><p>kept too</p></div>",
        );
        assert!(html.contains("kept"));
        assert!(html.contains("kept too"));
        assert!(html.contains("Legacy"));
        assert!(!html.contains("gone"));
        assert!(!html.contains("Official sites"));
    }

    #[test]
    fn equal_level_heading_terminates_the_sweep() {
        let html = cleaned_html(
            "<div><h3>Notes</h3><p>dropped</p><h3>Reception</h3><p>survives</p></div>",
        );
        assert!(!html.contains("dropped"));
        assert!(html.contains("Reception"));
        assert!(html.contains("survives"));
    }

    #[test]
    fn shallower_heading_terminates_a_deeper_sweep() {
        let html = cleaned_html(
            "<div><h3>Sources</h3><p>dropped</p><h2>Aftermath</h2><p>survives</p></div>",
        );
        assert!(!html.contains("dropped"));
        assert!(html.contains("Aftermath"));
        assert!(html.contains("survives"));
    }

    #[test]
    fn h4_under_h3_is_swept_lexically() {
        let html = cleaned_html(
            "<div><h3>Further reading</h3><p>shelf one</p><h4>Books</h4><p>shelf two</p>\
             <h3>Style</h3><p>prose kept</p></div>",
        );
        assert!(!html.contains("Books"));
        assert!(!html.contains("shelf"));
        assert!(html.contains("Style"));
        assert!(html.contains("prose kept"));
    }

    #[test]
    fn adjacent_trailing_sections_are_both_removed() {
        let html = cleaned_html(
            "<div><h2>Plot</h2><p>kept</p>\
             <h2>See also</h2><p>x</p><h2>References</h2><p>y</p></div>",
        );
        assert!(html.contains("kept"));
        assert!(!html.contains("See also"));
        assert!(!html.contains("References"));
    }

    #[test]
    fn keyword_match_is_substring_on_headline_text() {
        let html = cleaned_html(
            r#"<div><h2><span class="mw-headline">Notes and references</span></h2>
               <p>dropped</p><h2>Trivia</h2><p>kept</p></div>"#,
        );
        assert!(!html.contains("dropped"));
        assert!(html.contains("kept"));
    }

    #[test]
    fn generic_infobox_nodes_removed_when_retention_off() {
        let doc = parse(r#"<div><div class="infobox">leftover</div><p>text</p></div>"#);
        remove_boilerplate(&doc, &Options::default());
        assert!(!doc.html().contains("leftover"));

        let doc = parse(r#"<div><div class="infobox">leftover</div><p>text</p></div>"#);
        let keep = Options {
            keep_infobox: true,
            ..Options::default()
        };
        remove_boilerplate(&doc, &keep);
        assert!(doc.html().contains("leftover"));
    }
}
