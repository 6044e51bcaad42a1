//! Integration tests for DOM tree mutation and serialization.

use vellum_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType, inner_html, outer_html};

/// Helper to create element node types
fn make_element(tag: &str, attrs: &[(&str, &str)]) -> NodeType {
    let mut map = AttributesMap::new();
    for (name, value) in attrs {
        let _ = map.insert((*name).to_string(), (*value).to_string());
    }
    NodeType::Element(ElementData {
        tag_name: tag.to_string(),
        attrs: map,
    })
}

#[test]
fn test_append_child_links_siblings() {
    let mut tree = DomTree::new();
    let p = tree.alloc(make_element("p", &[]));
    tree.append_child(NodeId::ROOT, p);
    let a = tree.alloc_text("a");
    let b = tree.alloc_text("b");
    tree.append_child(p, a);
    tree.append_child(p, b);

    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.first_child(p), Some(a));
    assert_eq!(tree.last_child(p), Some(b));
    assert_eq!(tree.parent(a), Some(p));
}

#[test]
fn test_insert_before_relinks() {
    let mut tree = DomTree::new();
    let p = tree.alloc(make_element("p", &[]));
    tree.append_child(NodeId::ROOT, p);
    let a = tree.alloc_text("a");
    let c = tree.alloc_text("c");
    tree.append_child(p, a);
    tree.append_child(p, c);

    let b = tree.alloc_text("b");
    tree.insert_before(b, c);

    assert_eq!(tree.children(p), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
}

#[test]
fn test_insert_after_last_child() {
    let mut tree = DomTree::new();
    let p = tree.alloc(make_element("p", &[]));
    tree.append_child(NodeId::ROOT, p);
    let a = tree.alloc_text("a");
    tree.append_child(p, a);

    let b = tree.alloc_text("b");
    tree.insert_after(b, a);

    assert_eq!(tree.children(p), &[a, b]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_detach_keeps_node_usable() {
    let mut tree = DomTree::new();
    let p = tree.alloc(make_element("p", &[]));
    tree.append_child(NodeId::ROOT, p);
    let a = tree.alloc_text("a");
    let b = tree.alloc_text("b");
    let c = tree.alloc_text("c");
    tree.append_child(p, a);
    tree.append_child(p, b);
    tree.append_child(p, c);

    tree.detach(b);

    assert_eq!(tree.children(p), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_eq!(tree.parent(b), None);
    // Detached node is still in the arena and can be re-inserted.
    assert_eq!(tree.as_text(b), Some("b"));
    tree.append_child(p, b);
    assert_eq!(tree.children(p), &[a, c, b]);
}

#[test]
fn test_split_text_in_the_middle() {
    let mut tree = DomTree::new();
    let p = tree.alloc(make_element("p", &[]));
    tree.append_child(NodeId::ROOT, p);
    let t = tree.alloc_text("hello world");
    tree.append_child(p, t);

    let tail = tree.split_text(t, 5).unwrap();

    assert_eq!(tree.as_text(t), Some("hello"));
    assert_eq!(tree.as_text(tail), Some(" world"));
    assert_eq!(tree.next_sibling(t), Some(tail));
    assert_eq!(tree.parent(tail), Some(p));
}

#[test]
fn test_split_text_at_boundaries_is_a_no_op() {
    let mut tree = DomTree::new();
    let t = tree.alloc_text("abc");
    tree.append_child(NodeId::ROOT, t);

    assert_eq!(tree.split_text(t, 0), None);
    assert_eq!(tree.split_text(t, 3), None);
    assert_eq!(tree.as_text(t), Some("abc"));
}

#[test]
fn test_split_text_uses_char_offsets() {
    let mut tree = DomTree::new();
    let t = tree.alloc_text("naïve");
    tree.append_child(NodeId::ROOT, t);

    let tail = tree.split_text(t, 3).unwrap();

    assert_eq!(tree.as_text(t), Some("naï"));
    assert_eq!(tree.as_text(tail), Some("ve"));
}

#[test]
fn test_outer_html_sorts_attributes() {
    let mut tree = DomTree::new();
    let strong = tree.alloc(make_element(
        "strong",
        &[("style", "color: red"), ("data-x", "1")],
    ));
    tree.append_child(NodeId::ROOT, strong);
    let t = tree.alloc_text("hello");
    tree.append_child(strong, t);

    assert_eq!(
        outer_html(&tree, strong),
        "<strong data-x=\"1\" style=\"color: red\">hello</strong>"
    );
}

#[test]
fn test_inner_html_and_text_escaping() {
    let mut tree = DomTree::new();
    let p = tree.alloc(make_element("p", &[]));
    tree.append_child(NodeId::ROOT, p);
    let t = tree.alloc_text("a < b & c");
    tree.append_child(p, t);
    let br = tree.alloc(make_element("br", &[]));
    tree.append_child(p, br);

    assert_eq!(inner_html(&tree, p), "a &lt; b &amp; c<br>");
}

#[test]
fn test_document_element_and_body() {
    let mut tree = DomTree::new();
    let html = tree.alloc(make_element("html", &[]));
    tree.append_child(NodeId::ROOT, html);
    let head = tree.alloc(make_element("head", &[]));
    tree.append_child(html, head);
    let body = tree.alloc(make_element("body", &[]));
    tree.append_child(html, body);

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.body(), Some(body));
}
