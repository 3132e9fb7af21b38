//! DOM operations adapter.
//!
//! Thin helpers over the `dom_query` crate. Selections cover CSS-driven
//! removal and lookup; the node-level helpers here cover what selectors
//! can't express conveniently: direct-child iteration, sibling walks,
//! separator-joined text collection, and comment sweeping.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export the zero-copy text handle dom_query returns
pub use tendril::StrTendril;

// === Parsing ===

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Node information ===

/// Lowercase tag name of an element node (empty string for non-elements).
#[must_use]
pub fn node_tag(node: &NodeRef) -> String {
    node.node_name()
        .map(|name| name.to_lowercase())
        .unwrap_or_default()
}

/// Attribute value of a node, if present.
#[must_use]
pub fn node_attr(node: &NodeRef, name: &str) -> Option<String> {
    node.attrs()
        .iter()
        .find(|attr| &*attr.name.local == name)
        .map(|attr| attr.value.to_string())
}

/// Whitespace-separated class tokens of a node.
#[must_use]
pub fn class_tokens(node: &NodeRef) -> Vec<String> {
    node_attr(node, "class")
        .map(|class| class.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

// === Tree navigation ===

/// Direct element children, in document order.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut children = Vec::new();
    let mut child = node.first_child();
    while let Some(current) = child {
        child = current.next_sibling();
        if current.is_element() {
            children.push(current);
        }
    }
    children
}

/// All direct children (elements, text, comments), in document order.
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut children = Vec::new();
    let mut child = node.first_child();
    while let Some(current) = child {
        child = current.next_sibling();
        children.push(current);
    }
    children
}

/// Next sibling that is an element, skipping text and comment nodes.
#[must_use]
pub fn next_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.next_sibling();
    while let Some(current) = sibling {
        if current.is_element() {
            return Some(current);
        }
        sibling = current.next_sibling();
    }
    None
}

// === Text content ===

/// Text of a node's subtree with each text fragment trimmed and joined by a
/// single space (adjacent inline elements don't run together).
#[must_use]
pub fn text_joined(node: &NodeRef) -> String {
    let mut parts = Vec::new();
    collect_text(node, &mut parts);
    parts.join(" ")
}

fn collect_text(node: &NodeRef, parts: &mut Vec<String>) {
    let mut child = node.first_child();
    while let Some(current) = child {
        if current.is_text() {
            let text = current.text();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        } else if current.is_element() {
            collect_text(&current, parts);
        }
        child = current.next_sibling();
    }
}

/// [`text_joined`] over the first node of a selection.
#[must_use]
pub fn selection_text_joined(sel: &Selection) -> String {
    sel.nodes().first().map(text_joined).unwrap_or_default()
}

/// Raw subtree text of a selection, as the zero-copy handle dom_query
/// produces. No separator between adjacent elements; prefer
/// [`selection_text_joined`] for user-facing text.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

// === Tree mutation ===

/// Remove every comment node in the document.
pub fn remove_comments(doc: &Document) {
    let root = doc.root();
    let mut comments = Vec::new();
    collect_comments(&root, &mut comments);
    for comment in comments {
        comment.remove_from_parent();
    }
}

fn collect_comments<'a>(node: &NodeRef<'a>, out: &mut Vec<NodeRef<'a>>) {
    let mut child = node.first_child();
    while let Some(current) = child {
        child = current.next_sibling();
        if current.is_comment() {
            out.push(current);
        } else {
            collect_comments(&current, out);
        }
    }
}
