//! HTML serialization of DOM subtrees.
//!
//! [§ 13.2 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Output is deterministic: attributes are emitted sorted by name (the
//! attribute map is unordered, and tests compare serialized markup).

use crate::{DomTree, ElementData, NodeId, NodeType};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize a node and its subtree to HTML.
#[must_use]
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

/// Serialize a node's children to HTML.
#[must_use]
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(id) {
        write_node(tree, child, &mut out);
    }
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else { return };

    match &node.node_type {
        NodeType::Document => {
            for &child in tree.children(id) {
                write_node(tree, child, out);
            }
        }
        NodeType::Text(text) => out.push_str(&escape_text(text)),
        NodeType::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeType::Element(data) => {
            write_start_tag(data, out);
            if is_void(&data.tag_name) {
                return;
            }
            for &child in tree.children(id) {
                write_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(&data.tag_name.to_ascii_lowercase());
            out.push('>');
        }
    }
}

fn write_start_tag(data: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&data.tag_name.to_ascii_lowercase());

    // Sorted for deterministic output; the map itself is unordered.
    let mut names: Vec<&String> = data.attrs.keys().collect();
    names.sort();
    for name in names {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(&data.attrs[name]));
        out.push('"');
    }
    out.push('>');
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|&void| tag.eq_ignore_ascii_case(void))
}

/// [§ 13.2 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{00A0}', "&nbsp;")
}

/// [§ 13.2 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
/// "If the algorithm was invoked in the attribute mode, replace any
/// occurrences of the `"` character by the string `&quot;`."
fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\u{00A0}', "&nbsp;")
}
