//! DFS stack frame: a node plus a cursor over its candidate transitions.

use crate::node::NodeId;

/// One frame of the depth-first stack.
///
/// The candidate collection is either the node's ample set (`offset == 0`)
/// or, after re-expansion, the complement of the full set with respect to
/// that ample set (`offset == ample.len()`). The recorded choice index of a
/// frame is `offset + cursor`, so ample positions and complement positions
/// never overlap in a serialized trace.
#[derive(Debug, Clone)]
pub struct StackEntry<T> {
    node: NodeId,
    transitions: Vec<T>,
    cursor: usize,
    offset: usize,
    min_successor_stack_index: Option<usize>,
}

impl<T> StackEntry<T> {
    /// A frame positioned at the first of `transitions`.
    #[must_use]
    pub fn new(node: NodeId, transitions: Vec<T>, offset: usize) -> Self {
        Self {
            node,
            transitions,
            cursor: 0,
            offset,
            min_successor_stack_index: None,
        }
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The candidate collection this frame iterates.
    #[must_use]
    pub fn transitions(&self) -> &[T] {
        &self.transitions
    }

    /// Whether an untried candidate remains.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor < self.transitions.len()
    }

    /// The candidate under the cursor, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.transitions.get(self.cursor)
    }

    /// Consume the current candidate.
    pub fn advance(&mut self) {
        if self.has_next() {
            self.cursor += 1;
        }
    }

    /// Choice index recorded for this frame in a serialized trace.
    ///
    /// `None` for a frame with no candidates. Once the cursor runs past the
    /// last candidate the index stays on that last candidate.
    #[must_use]
    pub fn tid(&self) -> Option<usize> {
        let last = self.transitions.len().checked_sub(1)?;
        Some(self.offset + self.cursor.min(last))
    }

    /// Position offset of this frame's collection (0 for an ample set).
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Smallest stack index among on-stack successors observed so far.
    #[must_use]
    pub fn min_successor_stack_index(&self) -> Option<usize> {
        self.min_successor_stack_index
    }

    pub(crate) fn observe_successor_position(&mut self, position: usize) {
        self.min_successor_stack_index = Some(
            self.min_successor_stack_index
                .map_or(position, |current| current.min(position)),
        );
    }

    /// Switch this frame to the candidates its ample set left out.
    ///
    /// `complement` must be `full − ample` in full-set order. The cursor and
    /// the minimum successor index start over.
    pub(crate) fn replace_with_complement(&mut self, complement: Vec<T>) {
        self.offset = self.transitions.len();
        self.transitions = complement;
        self.cursor = 0;
        self.min_successor_stack_index = None;
    }
}
