//! Infobox extraction: the summary table's rows become an ordered
//! label → value mapping, and the table is removed from the tree either way.

use dom_query::{Document, NodeRef, Selection};
use tracing::debug;

use crate::dom;
use crate::options::Options;
use crate::patterns::INFOBOX_SELECTORS;
use crate::result::{InfoboxData, InfoboxValue};
use crate::text_utils::normalize_whitespace;

use super::prune::remove_by_selectors;

/// Reserved key for the table caption.
const CAPTION_KEY: &str = "_caption_";
/// Reserved key for freeform unlabeled rows.
const NOTES_KEY: &str = "_infobox_notes_";

/// Extract the first infobox on the page, then delete it from the tree.
///
/// With retention disabled, every node matching the infobox signature is
/// removed and no data is returned. With retention enabled but no infobox
/// present, the tree is left untouched.
pub fn extract_infobox(doc: &Document, options: &Options) -> Option<InfoboxData> {
    if !options.keep_infobox {
        remove_by_selectors(doc, &INFOBOX_SELECTORS);
        return None;
    }

    // Table form preferred over division form.
    let infobox = INFOBOX_SELECTORS
        .iter()
        .map(|&selector| doc.select_single(selector))
        .find(Selection::exists)?;

    let mut data = InfoboxData::new();

    let caption = infobox.select_single("caption");
    if caption.exists() {
        data.insert(
            CAPTION_KEY.to_string(),
            InfoboxValue::Text(normalize_whitespace(&dom::selection_text_joined(&caption))),
        );
    }

    if let Some(node) = infobox.nodes().first() {
        for row in direct_rows(node) {
            extract_row(&row, &mut data);
        }
    }

    // The node is consumed whether or not any data was found; its text must
    // never reappear in the rendered body.
    infobox.remove();

    debug!(entries = data.len(), "infobox extraction done");
    if data.is_empty() {
        None
    } else {
        Some(data)
    }
}

/// Rows directly under the infobox, looking through the tbody/thead/tfoot
/// wrappers the HTML parser inserts.
fn direct_rows<'a>(infobox: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut rows = Vec::new();
    for child in dom::element_children(infobox) {
        match dom::node_tag(&child).as_str() {
            "tr" => rows.push(child),
            "tbody" | "thead" | "tfoot" => {
                rows.extend(
                    dom::element_children(&child)
                        .into_iter()
                        .filter(|grandchild| dom::node_tag(grandchild) == "tr"),
                );
            }
            _ => {}
        }
    }
    rows
}

fn extract_row(row: &NodeRef, data: &mut InfoboxData) {
    let cells = dom::element_children(row);
    let header = cells.iter().find(|cell| dom::node_tag(cell) == "th");
    let value_cell = cells.iter().find(|cell| dom::node_tag(cell) == "td");
    let cell_count = cells
        .iter()
        .filter(|cell| matches!(dom::node_tag(cell).as_str(), "th" | "td"))
        .count();

    match (header, value_cell) {
        (Some(th), Some(td)) => {
            let key = normalize_whitespace(&dom::text_joined(th));
            if key.is_empty() {
                return;
            }
            data.insert(key, extract_cell_value(td));
        }
        // Unlabeled single-cell rows become freeform notes, unless they
        // carry an image.
        (None, Some(td)) if cell_count == 1 => {
            let text = normalize_whitespace(&dom::text_joined(td));
            let has_image = Selection::from(*td).select("img").exists();
            if !text.is_empty() && !has_image {
                let notes = data
                    .entry(NOTES_KEY.to_string())
                    .or_insert_with(|| InfoboxValue::List(Vec::new()));
                if let InfoboxValue::List(items) = notes {
                    items.push(text);
                }
            }
        }
        _ => {}
    }
}

fn extract_cell_value(cell: &NodeRef) -> InfoboxValue {
    let cell_sel = Selection::from(*cell);

    // Citation markers never belong in values; line breaks become newlines
    // so multi-line cells collapse predictably.
    cell_sel.select("sup.reference").remove();
    cell_sel.select("br").replace_with_html("\n");

    let items = cell_sel.select("li");
    if items.exists() {
        let values: Vec<String> = items
            .nodes()
            .iter()
            .map(|item| normalize_whitespace(&dom::text_joined(item)))
            .filter(|value| !value.is_empty())
            .collect();
        InfoboxValue::List(values)
    } else {
        let text = dom::text_joined(cell).replace('\n', " ");
        InfoboxValue::Text(normalize_whitespace(&text))
    }
}
