//! Text rendering: recursive conversion of the pruned tree into flow-text
//! fragments with lightweight markup for headings, lists, and definitions.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::patterns::{RENDER_SKIP_CLASSES, RENDER_SKIP_TAGS, SECTION_TITLE_STOPWORDS};
use crate::text_utils::normalize_whitespace;

/// The recognized tag kinds the renderer dispatches on. Anything else is a
/// generic container whose children are rendered in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Heading(usize),
    Paragraph,
    UnorderedList,
    OrderedList,
    DefinitionList,
    LineBreak,
    Container,
}

impl TagKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "ul" => Self::UnorderedList,
            "ol" => Self::OrderedList,
            "dl" => Self::DefinitionList,
            "br" => Self::LineBreak,
            _ => Self::Container,
        }
    }
}

/// Normalized heading title, preferring the inner headline span when present.
#[must_use]
pub fn heading_title(heading: &NodeRef) -> String {
    let sel = Selection::from(*heading);
    let headline = sel.select_single("span.mw-headline");
    let raw = if headline.exists() {
        dom::selection_text_joined(&headline)
    } else {
        dom::text_joined(heading)
    };
    normalize_whitespace(&raw)
}

/// Append the flow-text fragments for one element to `out`.
pub fn element_fragments(element: &NodeRef, out: &mut Vec<String>) {
    match TagKind::from_tag(&dom::node_tag(element)) {
        TagKind::Heading(level) => {
            let title = heading_title(element);
            if !title.is_empty() && !SECTION_TITLE_STOPWORDS.contains(title.to_lowercase().as_str())
            {
                out.push(format!("\n\n{} {title}\n", "#".repeat(level)));
            }
        }
        TagKind::Paragraph => {
            remove_hidden_spans(element);
            let text = normalize_whitespace(&dom::text_joined(element));
            if !text.is_empty() {
                out.push(format!("{text}\n"));
            }
        }
        TagKind::UnorderedList => {
            let items = list_items(element);
            push_block(
                out,
                items.iter().map(|item| format!("* {item}\n")).collect(),
            );
        }
        TagKind::OrderedList => {
            let items = list_items(element);
            push_block(
                out,
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| format!("{}. {item}\n", index + 1))
                    .collect(),
            );
        }
        TagKind::DefinitionList => {
            let mut entries = Vec::new();
            for child in dom::element_children(element) {
                let tag = dom::node_tag(&child);
                if tag != "dt" && tag != "dd" {
                    continue;
                }
                let text = normalize_whitespace(&dom::text_joined(&child));
                if text.is_empty() {
                    continue;
                }
                if tag == "dt" {
                    entries.push(format!("**{text}**:\n"));
                } else {
                    entries.push(format!("  {text}\n"));
                }
            }
            push_block(out, entries);
        }
        TagKind::LineBreak => out.push("\n".to_string()),
        TagKind::Container => child_fragments(element, out),
    }
}

/// Render the children of a node, skipping residual non-content elements.
/// Character data contributes its raw text unless it is pure whitespace.
pub fn child_fragments(parent: &NodeRef, out: &mut Vec<String>) {
    let mut child = parent.first_child();
    while let Some(current) = child {
        child = current.next_sibling();
        if current.is_text() {
            let text = current.text();
            if !text.trim().is_empty() {
                out.push(text.to_string());
            }
        } else if current.is_element() && !skip_child(&current) {
            element_fragments(&current, out);
        }
    }
}

fn skip_child(element: &NodeRef) -> bool {
    if RENDER_SKIP_TAGS.contains(dom::node_tag(element).as_str()) {
        return true;
    }
    dom::class_tokens(element)
        .iter()
        .any(|token| RENDER_SKIP_CLASSES.contains(&token.as_str()))
}

/// Rendered text of each direct list item, empties dropped.
fn list_items(list: &NodeRef) -> Vec<String> {
    dom::element_children(list)
        .iter()
        .filter(|child| dom::node_tag(child) == "li")
        .filter_map(|item| {
            let mut buffer = Vec::new();
            child_fragments(item, &mut buffer);
            let text = buffer.concat().trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .collect()
}

/// Emit a list/definition block wrapped in blank lines, but only if at least
/// one entry produced text.
fn push_block(out: &mut Vec<String>, entries: Vec<String>) {
    if entries.is_empty() {
        return;
    }
    out.push("\n".to_string());
    out.extend(entries);
    out.push("\n".to_string());
}

fn remove_hidden_spans(paragraph: &NodeRef) {
    let sel = Selection::from(*paragraph);
    for span in sel.select("span[style]").nodes() {
        let hidden = dom::node_attr(span, "style")
            .map(|style| style.to_lowercase().replace(' ', "").contains("display:none"))
            .unwrap_or(false);
        if hidden {
            Selection::from(*span).remove();
        }
    }
}
