//! Selection and range model over the arena DOM tree.
//!
//! [DOM Living Standard § 5 Ranges](https://dom.spec.whatwg.org/#ranges)
//!
//! "A range represents a sequence of content within a node tree. Each range
//! has a start and an end which are boundary points."
//!
//! Offsets follow the range convention for text nodes (a character offset
//! into the node's data). When word-boundary resolution lands on an element
//! node, the offset instead indexes into that element's visible text; the
//! applicator resolves such positions down to concrete text nodes before
//! mutating.

use vellum_dom::{DomTree, NodeId};

/// [§ 5.2 Boundary points](https://dom.spec.whatwg.org/#concept-range-bp)
///
/// "A boundary point is a tuple consisting of a node and an offset."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// The node the boundary point lives in.
    pub node: NodeId,
    /// Character offset within the node's text (char-index, not bytes).
    pub offset: usize,
}

impl Position {
    /// Create a boundary point.
    #[must_use]
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// [§ 5.5 Interface Range](https://dom.spec.whatwg.org/#interface-range)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// The range's start boundary point.
    pub start: Position,
    /// The range's end boundary point.
    pub end: Position,
}

impl Range {
    /// Create a range from two boundary points.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a collapsed range (a caret) at one boundary point.
    #[must_use]
    pub fn caret(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// [§ 5.5](https://dom.spec.whatwg.org/#range-collapsed)
    /// "A range is collapsed if its start node is its end node and its
    /// start offset is its end offset."
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// The set of ranges currently selected in an editing surface.
///
/// The first range is the primary one; multi-range selections exist only
/// in some surfaces, but the model keeps the list shape so saved-selection
/// snapshots cover every range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<Range>,
}

impl Selection {
    /// An empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection holding a single range.
    #[must_use]
    pub fn single(range: Range) -> Self {
        Self {
            ranges: vec![range],
        }
    }

    /// All selected ranges in order.
    #[must_use]
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// The first selected range, if any.
    #[must_use]
    pub fn primary_range(&self) -> Option<&Range> {
        self.ranges.first()
    }

    /// Replace the selection with a single range.
    pub fn select(&mut self, range: Range) {
        self.ranges = vec![range];
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}

/// The editing surface the formatting commands operate on: one document
/// tree plus its current selection.
#[derive(Debug, Clone)]
pub struct EditingContext {
    /// The live document tree.
    pub tree: DomTree,
    selection: Selection,
}

impl EditingContext {
    /// Create a context over a tree with an empty selection.
    #[must_use]
    pub fn new(tree: DomTree) -> Self {
        Self {
            tree,
            selection: Selection::new(),
        }
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replace the selection with a single range.
    pub fn select(&mut self, range: Range) {
        self.selection.select(range);
    }

    /// Replace the whole selection.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }
}

/// A snapshot of selection positions that survives wrapping mutations.
///
/// The arena never frees nodes, so a `NodeId` held across a mutation stays
/// valid; the only operation that moves characters between nodes is
/// [`DomTree::split_text`]. The applicator reports each split here and the
/// snapshot remaps affected positions, which replaces the marker-node
/// bookmarks an HTML editing surface would otherwise insert into the
/// document.
#[derive(Debug, Clone)]
pub struct SavedSelection {
    positions: Vec<Range>,
}

impl SavedSelection {
    /// Snapshot every range of the selection.
    #[must_use]
    pub fn capture(selection: &Selection) -> Self {
        Self {
            positions: selection.ranges().to_vec(),
        }
    }

    /// Record that `node` was split at `offset`, with the tail characters
    /// now living in `tail`. Positions past the split point move into the
    /// tail node; a position exactly at the split point stays at the end
    /// of the head.
    pub fn note_split(&mut self, node: NodeId, offset: usize, tail: NodeId) {
        for range in &mut self.positions {
            for position in [&mut range.start, &mut range.end] {
                if position.node == node && position.offset > offset {
                    position.node = tail;
                    position.offset -= offset;
                }
            }
        }
    }

    /// Rebuild the selection from the snapshot.
    #[must_use]
    pub fn restore(self) -> Selection {
        Selection {
            ranges: self.positions,
        }
    }
}
