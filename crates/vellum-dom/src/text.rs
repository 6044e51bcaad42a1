//! Plain-text extraction from DOM subtrees.
//!
//! Word-boundary resolution needs the text a user actually reads, with
//! markup removed and no-break-space filler spans (caret placeholders the
//! editing surface inserts into otherwise-empty inline elements) excluded.
//! Offsets into the returned string line up with offsets into the
//! subtree's text nodes in document order, which is what makes this
//! usable as a coordinate space for word scanning.

use crate::{DomTree, NodeId, NodeType};

/// U+00A0 NO-BREAK SPACE, the filler character editing surfaces insert.
const NBSP: char = '\u{00A0}';
/// U+200B ZERO WIDTH SPACE.
const ZWSP: char = '\u{200B}';
/// U+FEFF ZERO WIDTH NO-BREAK SPACE, used by some surfaces as a filler.
const ZWNBSP: char = '\u{FEFF}';

/// Check whether a node is a filler span: a `<span>` whose entire text
/// content consists of no-break-space / zero-width characters.
///
/// Such spans exist to keep a caret position inside empty inline markup;
/// they carry no word content and must not take part in word-boundary
/// resolution.
#[must_use]
pub fn is_filler_span(tree: &DomTree, id: NodeId) -> bool {
    let Some(data) = tree.as_element(id) else {
        return false;
    };
    if !data.has_tag("span") {
        return false;
    }

    let text = raw_text(tree, id);
    !text.is_empty() && text.chars().all(|c| c == NBSP || c == ZWSP || c == ZWNBSP)
}

/// Concatenated descendant text with no filtering. Comments contribute
/// nothing.
fn raw_text(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    collect_text(tree, id, false, &mut out);
    out
}

/// Extract the visible text of a subtree.
///
/// - For a text node, the raw text.
/// - For an element or the document, the concatenation of descendant text
///   in tree order, with filler spans (see [`is_filler_span`]) and
///   comments excluded.
///
/// This is the in-tree equivalent of serializing a node to HTML and
/// stripping the tags: the resulting string preserves character offsets
/// relative to the node's rendered text.
#[must_use]
pub fn visible_text(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    collect_text(tree, id, true, &mut out);
    out
}

fn collect_text(tree: &DomTree, id: NodeId, skip_fillers: bool, out: &mut String) {
    let Some(node) = tree.get(id) else { return };

    match &node.node_type {
        NodeType::Text(text) => out.push_str(text),
        NodeType::Comment(_) => {}
        NodeType::Element(_) | NodeType::Document => {
            if skip_fillers && is_filler_span(tree, id) {
                return;
            }
            for &child in tree.children(id) {
                collect_text(tree, child, skip_fillers, out);
            }
        }
    }
}
