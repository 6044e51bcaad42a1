//! Word-boundary resolution around a collapsed caret.
//!
//! Given a caret inside a text node, find the DOM boundary points of the
//! word under it. The hard cases are words fragmented across inline
//! markup (`lu<span>n</span>ar`) and words sitting against a block edge:
//! the search extends into sibling nodes, climbing out of inline wrappers,
//! and stops hard at block containers.
//!
//! All offsets are char-indices into a node's visible text (see
//! [`vellum_dom::visible_text`]), the same coordinate space
//! [`vellum_dom::DomTree::split_text`] uses.

use vellum_css::parse_style_text;
use vellum_dom::{DomTree, NodeId, visible_text};

use crate::selection::{Position, Range};

/// Block-level tags that stop sibling-extension walks. A word never
/// continues across one of these.
const BOUNDARY_ELEMENTS: &[&str] = &["p", "li", "div", "body"];

/// Resolved boundary points of the word under a caret.
///
/// Anchors into the live tree at the moment of resolution; not meaningful
/// after the tree mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBoundary {
    /// Boundary point where the word begins.
    pub start: Position,
    /// Boundary point where the word ends.
    pub end: Position,
}

/// Direction of a sibling-extension search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Toward the start of the document: the word may begin earlier.
    Backward,
    /// Toward the end of the document: the word may continue further.
    Forward,
}

/// `\w` with the Unicode flag: letters, digits, underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Maximal runs of word characters in `text`, as `(start, end)` char
/// offsets, in order.
fn word_runs(text: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    let mut char_count = 0;

    for (index, c) in text.chars().enumerate() {
        char_count = index + 1;
        if is_word_char(c) {
            if start.is_none() {
                start = Some(index);
            }
        } else if let Some(s) = start.take() {
            runs.push((s, index));
        }
    }
    if let Some(s) = start {
        runs.push((s, char_count));
    }

    runs
}

/// Resolve the word under a collapsed caret.
///
/// Scans the caret node's visible text for word tokens and takes the first
/// whose end covers or abuts the caret offset. A token starting at offset
/// 0 may begin in an earlier sibling; a token ending exactly at the
/// range's end offset may continue in a later one — both cases trigger a
/// sibling-extension search. Returns `None` when the caret node contains
/// no word token at or after the caret.
#[must_use]
pub fn selected_word_boundary(tree: &DomTree, range: &Range) -> Option<WordBoundary> {
    let node = range.start.node;
    let contents = visible_text(tree, node);

    for (run_start, run_end) in word_runs(&contents) {
        if run_end < range.start.offset {
            continue;
        }

        let mut start = Position::new(node, run_start);
        let mut end = Position::new(node, run_end);

        // The word probably begins in a previous node.
        if run_start == 0 {
            start = sibling_node_offset(tree, node, Direction::Backward);
        }

        // The word probably ends in a next node.
        if run_end == range.end.offset {
            end = sibling_node_offset(tree, node, Direction::Forward);
        }

        return Some(WordBoundary { start, end });
    }

    None
}

/// Inline elements styled `display: none` are invisible and contribute no
/// word content. Only the inline `style` attribute is consulted; there is
/// no stylesheet cascade in this engine.
fn is_hidden(tree: &DomTree, id: NodeId) -> bool {
    let Some(style_text) = tree.as_element(id).and_then(|data| data.attrs.get("style")) else {
        return false;
    };
    parse_style_text(style_text).is_ok_and(|css| {
        css.get("display")
            .is_some_and(|display| display.eq_ignore_ascii_case("none"))
    })
}

fn is_boundary_element(tree: &DomTree, id: NodeId) -> bool {
    tree.as_element(id).is_some_and(|data| {
        BOUNDARY_ELEMENTS
            .iter()
            .any(|&boundary| data.has_tag(boundary))
    })
}

fn step(tree: &DomTree, id: NodeId, direction: Direction) -> Option<NodeId> {
    match direction {
        Direction::Backward => tree.prev_sibling(id),
        Direction::Forward => tree.next_sibling(id),
    }
}

/// Find the word's beginning/ending in the previous/next node with
/// content, skipping hidden and empty elements.
///
/// The walk moves to the adjacent sibling, climbing out of inline
/// wrappers when a node has none — unless the parent is a block boundary,
/// which stops the walk hard. When no usable candidate exists the search
/// falls back to the starting node and resolves with the boundary rules,
/// so a word flush against a block edge anchors at that edge.
fn sibling_node_offset(tree: &DomTree, start_node: NodeId, direction: Direction) -> Position {
    let mut current = Some(start_node);
    let mut is_boundary = false;

    loop {
        let mut at = current.take().unwrap_or(start_node);
        let mut sibling = step(tree, at, direction);

        // No sibling: the text is probably inside an inline wrapper, so
        // climb and retry from the wrapper's sibling.
        while sibling.is_none() {
            let Some(parent) = tree.parent(at) else {
                break;
            };
            if is_boundary_element(tree, parent) {
                is_boundary = true;
                break;
            }
            at = parent;
            sibling = step(tree, at, direction);
        }

        current = sibling;

        match current {
            // Hidden and textless element candidates are skipped; text
            // node candidates are always accepted.
            Some(candidate)
                if tree.is_element(candidate)
                    && (is_hidden(tree, candidate)
                        || visible_text(tree, candidate).is_empty()) => {}
            _ => break,
        }
    }

    // Reaching a boundary (or running out of tree) leaves no candidate;
    // resolve against the node we started from.
    let no_candidate = current.is_none();
    let candidate = current.unwrap_or(start_node);

    let contents = visible_text(tree, candidate);
    let char_count = contents.chars().count();

    // Forward search wants the first whitespace, backward the last: scan
    // the whole text and keep overwriting for backward.
    let mut whitespace_at = None;
    for (index, c) in contents.chars().enumerate() {
        if c.is_whitespace() {
            whitespace_at = Some(index);
            if direction == Direction::Forward {
                break;
            }
        }
    }

    // No whitespace in this node and no hard boundary reached: the word
    // continues, fetch one more node in the same direction.
    if whitespace_at.is_none() && !is_boundary && !no_candidate {
        return sibling_node_offset(tree, candidate, direction);
    }

    if is_boundary || no_candidate {
        return match direction {
            // The word starts flush at the block edge.
            Direction::Backward => Position::new(candidate, 0),
            // The word ends at the node's end, minus a trailing sentence
            // terminator when one is present. Only a literal final period
            // counts; deliberately not generalized.
            Direction::Forward => {
                let offset = if contents.ends_with('.') {
                    char_count - 1
                } else {
                    char_count
                };
                Position::new(candidate, offset)
            }
        };
    }

    let whitespace_at = whitespace_at.unwrap_or(0);
    match direction {
        Direction::Forward => Position::new(candidate, whitespace_at),
        Direction::Backward => {
            // The space sits just before the word, so move one character
            // right; when that runs off the node's end, the word starts at
            // the beginning of the following node instead.
            let offset = whitespace_at + 1;
            if offset > char_count.saturating_sub(1) {
                match step(tree, candidate, Direction::Forward) {
                    Some(next) => Position::new(next, 0),
                    None => Position::new(candidate, char_count),
                }
            } else {
                Position::new(candidate, offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_runs_finds_tokens_and_offsets() {
        assert_eq!(word_runs("foo bar_7!"), vec![(0, 3), (4, 9)]);
        assert_eq!(word_runs("  "), vec![]);
        assert_eq!(word_runs("déjà"), vec![(0, 4)]);
    }

    #[test]
    fn nbsp_is_not_a_word_char_but_is_whitespace() {
        assert!(!is_word_char('\u{00A0}'));
        assert!('\u{00A0}'.is_whitespace());
    }
}
