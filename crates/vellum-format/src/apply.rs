//! Inline style application over a selection.
//!
//! Applying a descriptor wraps the selected content in an element matching
//! it. The selection's boundary text nodes are split so the range consists
//! of whole nodes, the maximal fully-covered node runs are wrapped (so
//! outer descriptors of a chain land outside inner ones), a run that is
//! already a single element of the descriptor's tag is merged into instead
//! of nested, and adjacent identical wrappers produced by fragmentation
//! are fused. Selection positions survive via [`SavedSelection`]
//! reconciliation rather than marker nodes in the document.

use std::collections::HashSet;

use vellum_css::{parse_style_text, serialize_style_text};
use vellum_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use crate::descriptor::{StyleDescriptor, StyleKind};
use crate::selection::{EditingContext, Position, Range, SavedSelection};
use crate::word::selected_word_boundary;

/// Tags that can never themselves be wrapped: wrapping stops at block
/// structure and distributes into it instead.
const WRAP_BOUNDARY_ELEMENTS: &[&str] = &["p", "li", "div", "body", "html"];

/// Which side of a boundary an element-offset position resolves toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bias {
    /// Resolve to the start of the following text when on a seam.
    Start,
    /// Resolve to the end of the preceding text when on a seam.
    End,
}

/// Apply a captured style chain to the current selection.
///
/// - No selected range: no-op.
/// - Collapsed range: resolve the word under the caret; no word means a
///   no-op with the selection untouched, otherwise the word becomes the
///   active range.
/// - Each descriptor wraps the active range in stored (innermost-first)
///   order; the active range tracks the wrapped content between steps.
/// - The pre-apply selection is restored afterward from a snapshot
///   reconciled across every text-node split the wrapping performed.
pub fn apply_format(ctx: &mut EditingContext, styles: &[StyleDescriptor]) {
    let Some(&range) = ctx.selection().primary_range() else {
        return;
    };
    let mut saved = SavedSelection::capture(ctx.selection());

    let mut active = range;
    if range.is_collapsed() {
        let Some(word) = selected_word_boundary(&ctx.tree, &range) else {
            return;
        };
        active = Range::new(word.start, word.end);
        ctx.select(active);
    }

    for descriptor in styles {
        if let Some(updated) = apply_style(&mut ctx.tree, &active, descriptor, &mut saved) {
            active = updated;
        }
    }

    ctx.set_selection(saved.restore());
}

/// Apply one descriptor as an inline wrap over `range`.
///
/// Returns the range covering the wrapped content, or `None` when the
/// range holds no wrappable text. Splits performed on boundary text nodes
/// are reported to `saved`.
pub fn apply_style(
    tree: &mut DomTree,
    range: &Range,
    descriptor: &StyleDescriptor,
    saved: &mut SavedSelection,
) -> Option<Range> {
    // Only inline wrapping exists; a new StyleKind would branch here.
    let StyleKind::Inline = descriptor.kind;

    let start = resolve_position(tree, range.start, Bias::Start)?;
    let end = resolve_position(tree, range.end, Bias::End)?;
    if start == end {
        return None;
    }

    // Split the end first so start offsets into the same node stay valid.
    let mut end_text = end.node;
    if end.offset == 0 {
        end_text = previous_text_leaf(tree, end.node)?;
    } else if let Some(tail) = tree.split_text(end.node, end.offset) {
        saved.note_split(end.node, end.offset, tail);
    }

    let mut start_text = start.node;
    if start.offset >= text_len(tree, start.node) && start.offset > 0 {
        start_text = next_text_leaf(tree, start.node)?;
    } else if let Some(tail) = tree.split_text(start.node, start.offset) {
        saved.note_split(start.node, start.offset, tail);
        if end_text == start.node {
            end_text = tail;
        }
        start_text = tail;
    }

    let visited = nodes_between(tree, start_text, end_text)?;

    // Climb to the lowest ancestor the range does not fully cover; the
    // covered runs among its descendants are what gets wrapped.
    let mut scope = common_ancestor(tree, start_text, end_text);
    while is_covered(tree, scope, &visited) {
        match tree.parent(scope) {
            Some(parent) => scope = parent,
            None => break,
        }
    }

    let mut wrapped = Vec::new();
    wrap_covered_runs(tree, scope, &visited, descriptor, &mut wrapped);
    merge_adjacent_wrappers(tree, &wrapped);

    Some(Range::new(
        Position::new(start_text, 0),
        Position::new(end_text, text_len(tree, end_text)),
    ))
}

fn text_len(tree: &DomTree, id: NodeId) -> usize {
    tree.as_text(id).map_or(0, |t| t.chars().count())
}

/// Resolve a boundary point to a concrete text-node position.
///
/// Word-boundary resolution can anchor on an element with an offset into
/// its visible text (the stripped-markup coordinate space); wrapping needs
/// a real text node to split. Filler spans are transparent here, matching
/// the text extraction they are excluded from.
fn resolve_position(tree: &DomTree, position: Position, bias: Bias) -> Option<Position> {
    if tree.is_text(position.node) {
        return Some(position);
    }

    let leaves = text_leaves(tree, position.node);
    let mut remaining = position.offset;

    if remaining == 0 {
        return leaves.first().map(|&leaf| Position::new(leaf, 0));
    }

    for (index, &leaf) in leaves.iter().enumerate() {
        let len = text_len(tree, leaf);
        let take_here = match bias {
            Bias::Start => remaining < len,
            Bias::End => remaining <= len,
        };
        if take_here || index == leaves.len() - 1 {
            return Some(Position::new(leaf, remaining.min(len)));
        }
        remaining -= len;
    }

    None
}

/// Text nodes under `root` in tree order, excluding filler-span content.
fn text_leaves(tree: &DomTree, root: NodeId) -> Vec<NodeId> {
    let mut leaves = Vec::new();
    collect_text_leaves(tree, root, &mut leaves);
    leaves
}

fn collect_text_leaves(tree: &DomTree, id: NodeId, leaves: &mut Vec<NodeId>) {
    match tree.get(id).map(|n| &n.node_type) {
        Some(NodeType::Text(_)) => leaves.push(id),
        Some(NodeType::Element(_) | NodeType::Document) => {
            if vellum_dom::is_filler_span(tree, id) {
                return;
            }
            for &child in tree.children(id) {
                collect_text_leaves(tree, child, leaves);
            }
        }
        _ => {}
    }
}

/// Next node in document order: first child, else next sibling, else the
/// nearest ancestor's next sibling.
fn next_in_doc_order(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    if let Some(child) = tree.first_child(id) {
        return Some(child);
    }
    let mut at = id;
    loop {
        if let Some(next) = tree.next_sibling(at) {
            return Some(next);
        }
        at = tree.parent(at)?;
    }
}

fn next_text_leaf(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    let mut at = id;
    loop {
        at = next_in_doc_order(tree, at)?;
        if tree.is_text(at) {
            return Some(at);
        }
    }
}

fn previous_text_leaf(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    let mut at = id;
    loop {
        if let Some(prev) = tree.prev_sibling(at) {
            // Deepest last descendant of the previous sibling.
            let mut deepest = prev;
            while let Some(last) = tree.last_child(deepest) {
                deepest = last;
            }
            if tree.is_text(deepest) {
                return Some(deepest);
            }
            at = deepest;
        } else {
            at = tree.parent(at)?;
        }
    }
}

/// Every node visited walking document order from `start` to `end`
/// inclusive. `None` when `end` is not reachable from `start`.
fn nodes_between(tree: &DomTree, start: NodeId, end: NodeId) -> Option<HashSet<NodeId>> {
    let mut visited = HashSet::new();
    let _ = visited.insert(start);

    let mut at = start;
    let mut steps = 0;
    while at != end {
        at = next_in_doc_order(tree, at)?;
        let _ = visited.insert(at);
        steps += 1;
        if steps > tree.len() {
            return None;
        }
    }
    Some(visited)
}

fn common_ancestor(tree: &DomTree, a: NodeId, b: NodeId) -> NodeId {
    if a == b {
        return a;
    }
    let mut ancestors_of_a: HashSet<NodeId> = HashSet::new();
    let _ = ancestors_of_a.insert(a);
    for ancestor in tree.ancestors(a) {
        let _ = ancestors_of_a.insert(ancestor);
    }

    if ancestors_of_a.contains(&b) {
        return b;
    }
    for ancestor in tree.ancestors(b) {
        if ancestors_of_a.contains(&ancestor) {
            return ancestor;
        }
    }
    tree.root()
}

/// A node is covered when every leaf under it was visited by the range
/// walk. Block containers are never covered: wrapping distributes into
/// them rather than around them.
fn is_covered(tree: &DomTree, id: NodeId, visited: &HashSet<NodeId>) -> bool {
    let Some(node) = tree.get(id) else {
        return false;
    };
    match &node.node_type {
        NodeType::Document => false,
        NodeType::Text(_) | NodeType::Comment(_) => visited.contains(&id),
        NodeType::Element(data) => {
            if WRAP_BOUNDARY_ELEMENTS
                .iter()
                .any(|&boundary| data.has_tag(boundary))
            {
                return false;
            }
            if node.children.is_empty() {
                return visited.contains(&id);
            }
            node.children
                .iter()
                .all(|&child| is_covered(tree, child, visited))
        }
    }
}

/// Wrap each maximal run of consecutive covered children of `scope`,
/// recursing into partially-covered elements.
fn wrap_covered_runs(
    tree: &mut DomTree,
    scope: NodeId,
    visited: &HashSet<NodeId>,
    descriptor: &StyleDescriptor,
    wrapped: &mut Vec<NodeId>,
) {
    let children: Vec<NodeId> = tree.children(scope).to_vec();
    let mut run: Vec<NodeId> = Vec::new();

    for child in children {
        if is_covered(tree, child, visited) {
            run.push(child);
        } else {
            wrap_run(tree, &run, descriptor, wrapped);
            run.clear();
            if tree.is_element(child) {
                wrap_covered_runs(tree, child, visited, descriptor, wrapped);
            }
        }
    }
    wrap_run(tree, &run, descriptor, wrapped);
}

/// Wrap one run of sibling nodes. A run that is exactly one element of the
/// descriptor's own tag is merged into (attributes and css folded onto it)
/// instead of nested.
fn wrap_run(
    tree: &mut DomTree,
    run: &[NodeId],
    descriptor: &StyleDescriptor,
    wrapped: &mut Vec<NodeId>,
) {
    let Some(&first) = run.first() else { return };

    if run.len() == 1
        && tree
            .as_element(first)
            .is_some_and(|data| data.has_tag(&descriptor.tag_name))
    {
        merge_into_element(tree, first, descriptor);
        wrapped.push(first);
        return;
    }

    let wrapper = alloc_wrapper(tree, descriptor);
    tree.insert_before(wrapper, first);
    for &node in run {
        tree.detach(node);
        tree.append_child(wrapper, node);
    }
    wrapped.push(wrapper);
}

fn alloc_wrapper(tree: &mut DomTree, descriptor: &StyleDescriptor) -> NodeId {
    let mut attrs: AttributesMap = descriptor
        .attributes
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    if !descriptor.css.is_empty() {
        let _ = attrs.insert("style".to_string(), serialize_style_text(&descriptor.css));
    }
    tree.alloc(NodeType::Element(ElementData {
        tag_name: descriptor.tag_name.clone(),
        attrs,
    }))
}

/// Fold a descriptor's attributes and css onto an existing element of the
/// same tag. Descriptor values win on conflicts, matching what a fresh
/// wrapper would have carried.
fn merge_into_element(tree: &mut DomTree, id: NodeId, descriptor: &StyleDescriptor) {
    let Some(data) = tree.as_element_mut(id) else {
        return;
    };

    for (name, value) in &descriptor.attributes {
        let _ = data.attrs.insert(name.clone(), value.clone());
    }

    if !descriptor.css.is_empty() {
        let mut css = data
            .attrs
            .get("style")
            .and_then(|text| parse_style_text(text).ok())
            .unwrap_or_default();
        for (name, value) in &descriptor.css {
            let _ = css.insert(name.clone(), value.clone());
        }
        let _ = data.attrs.insert("style".to_string(), serialize_style_text(&css));
    }
}

/// Fuse wrappers that ended up as adjacent identical siblings, so a word
/// fragmented by markup comes out as one wrapper per block of content.
fn merge_adjacent_wrappers(tree: &mut DomTree, wrapped: &[NodeId]) {
    for &wrapper in wrapped {
        if tree.parent(wrapper).is_none() {
            // Already fused into an earlier wrapper.
            continue;
        }
        while let Some(next) = tree.next_sibling(wrapper) {
            if !is_identical_element(tree, wrapper, next) {
                break;
            }
            let children: Vec<NodeId> = tree.children(next).to_vec();
            for child in children {
                tree.detach(child);
                tree.append_child(wrapper, child);
            }
            tree.detach(next);
        }
    }
}

fn is_identical_element(tree: &DomTree, a: NodeId, b: NodeId) -> bool {
    match (tree.as_element(a), tree.as_element(b)) {
        (Some(da), Some(db)) => da.has_tag(&db.tag_name) && da.attrs == db.attrs,
        _ => false,
    }
}
