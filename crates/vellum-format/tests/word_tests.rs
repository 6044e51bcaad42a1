//! Integration tests for word-boundary resolution around a collapsed caret.

use vellum_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};
use vellum_format::{Position, Range, selected_word_boundary};

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

fn element_child(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let id = tree.alloc(make_element(tag, attrs));
    tree.append_child(parent, id);
    id
}

fn text_child(tree: &mut DomTree, parent: NodeId, text: &str) -> NodeId {
    let id = tree.alloc_text(text);
    tree.append_child(parent, id);
    id
}

fn paragraph(tree: &mut DomTree) -> NodeId {
    let body = element_child(tree, NodeId::ROOT, "body", &[]);
    element_child(tree, body, "p", &[])
}

#[test]
fn test_word_in_the_middle_of_a_text_node() {
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let t = text_child(&mut tree, p, "foo bar baz");

    let word = selected_word_boundary(&tree, &Range::caret(Position::new(t, 5))).unwrap();

    assert_eq!(word.start, Position::new(t, 4));
    assert_eq!(word.end, Position::new(t, 7));
}

#[test]
fn test_resolution_is_idempotent() {
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let t = text_child(&mut tree, p, "foo bar baz");
    let caret = Range::caret(Position::new(t, 5));

    let first = selected_word_boundary(&tree, &caret).unwrap();
    let second = selected_word_boundary(&tree, &caret).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_word_fragmented_across_inline_markup() {
    // lu<span style="color: #f00;">n</span>ar resolves as one word.
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let lu = text_child(&mut tree, p, "lu");
    let span = element_child(&mut tree, p, "span", &[("style", "color: #f00")]);
    let n = text_child(&mut tree, span, "n");
    let ar = text_child(&mut tree, p, "ar");

    let word = selected_word_boundary(&tree, &Range::caret(Position::new(n, 1))).unwrap();

    assert_eq!(word.start, Position::new(lu, 0));
    assert_eq!(word.end, Position::new(ar, 2));
}

#[test]
fn test_word_at_paragraph_start_stops_at_the_block_edge() {
    let mut tree = DomTree::new();
    let body = element_child(&mut tree, NodeId::ROOT, "body", &[]);
    let first = element_child(&mut tree, body, "p", &[]);
    let _ = text_child(&mut tree, first, "previous block");
    let second = element_child(&mut tree, body, "p", &[]);
    let t = text_child(&mut tree, second, "hello world");

    let word = selected_word_boundary(&tree, &Range::caret(Position::new(t, 2))).unwrap();

    // Start offset 0, never crossing into the preceding paragraph.
    assert_eq!(word.start, Position::new(t, 0));
    assert_eq!(word.end, Position::new(t, 5));
}

#[test]
fn test_word_at_list_item_start_stops_at_the_block_edge() {
    let mut tree = DomTree::new();
    let body = element_child(&mut tree, NodeId::ROOT, "body", &[]);
    let ul = element_child(&mut tree, body, "ul", &[]);
    let li = element_child(&mut tree, ul, "li", &[]);
    let em = element_child(&mut tree, li, "em", &[]);
    let t = text_child(&mut tree, em, "item text");

    let word = selected_word_boundary(&tree, &Range::caret(Position::new(t, 1))).unwrap();

    assert_eq!(word.start, Position::new(t, 0));
    assert_eq!(word.end, Position::new(t, 4));
}

#[test]
fn test_no_word_found() {
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let spaces = text_child(&mut tree, p, "   ");
    let dots = text_child(&mut tree, p, "...");

    assert!(selected_word_boundary(&tree, &Range::caret(Position::new(spaces, 1))).is_none());
    assert!(selected_word_boundary(&tree, &Range::caret(Position::new(dots, 2))).is_none());
}

#[test]
fn test_caret_inside_nbsp_filler_span_finds_no_word() {
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let _ = text_child(&mut tree, p, "before");
    let filler = element_child(&mut tree, p, "span", &[]);
    let nbsp = text_child(&mut tree, filler, "\u{00A0}");
    let _ = text_child(&mut tree, p, "after");

    assert!(selected_word_boundary(&tree, &Range::caret(Position::new(nbsp, 0))).is_none());
}

#[test]
fn test_hidden_siblings_are_skipped_by_extension_search() {
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let foo = text_child(&mut tree, p, "foo");
    let hidden = element_child(&mut tree, p, "span", &[("style", "display: none")]);
    let _ = text_child(&mut tree, hidden, "xxx");
    let bar = text_child(&mut tree, p, "bar");

    let word = selected_word_boundary(&tree, &Range::caret(Position::new(bar, 1))).unwrap();

    // The hidden span contributes nothing; the word begins in "foo".
    assert_eq!(word.start, Position::new(foo, 0));
    assert_eq!(word.end, Position::new(bar, 3));
}

#[test]
fn test_backward_extension_stops_after_last_whitespace() {
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let head = text_child(&mut tree, p, "foo bar");
    let tail = text_child(&mut tree, p, "baz");

    let word = selected_word_boundary(&tree, &Range::caret(Position::new(tail, 1))).unwrap();

    // "bar" + "baz" form one word split across two text nodes.
    assert_eq!(word.start, Position::new(head, 4));
    assert_eq!(word.end, Position::new(tail, 3));
}

#[test]
fn test_backward_extension_shifts_off_a_trailing_space() {
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let _ = text_child(&mut tree, p, "foo ");
    let bar = text_child(&mut tree, p, "bar");

    let word = selected_word_boundary(&tree, &Range::caret(Position::new(bar, 1))).unwrap();

    // The preceding node ends in the separating space, so the word starts
    // at the beginning of the caret node itself.
    assert_eq!(word.start, Position::new(bar, 0));
    assert_eq!(word.end, Position::new(bar, 3));
}

#[test]
fn test_forward_extension_into_the_next_fragment() {
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let head = text_child(&mut tree, p, "foo ba");
    let span = element_child(&mut tree, p, "span", &[]);
    let _ = text_child(&mut tree, span, "r");

    // Caret exactly at the matched word's end triggers forward extension.
    let word = selected_word_boundary(&tree, &Range::caret(Position::new(head, 6))).unwrap();

    assert_eq!(word.start, Position::new(head, 4));
    // Offset indexes into the span's visible text.
    assert_eq!(word.end, Position::new(span, 1));
}

#[test]
fn test_forward_extension_excludes_a_trailing_period() {
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let head = text_child(&mut tree, p, "wor");
    let span = element_child(&mut tree, p, "span", &[]);
    let _ = text_child(&mut tree, span, "d.");

    let word = selected_word_boundary(&tree, &Range::caret(Position::new(head, 3))).unwrap();

    assert_eq!(word.start, Position::new(head, 0));
    // The sentence-terminating period stays outside the word.
    assert_eq!(word.end, Position::new(span, 1));
}

#[test]
fn test_caret_in_whitespace_resolves_the_following_word() {
    let mut tree = DomTree::new();
    let p = paragraph(&mut tree);
    let t = text_child(&mut tree, p, "foo  bar");

    let word = selected_word_boundary(&tree, &Range::caret(Position::new(t, 4))).unwrap();

    assert_eq!(word.start, Position::new(t, 5));
    assert_eq!(word.end, Position::new(t, 8));
}
