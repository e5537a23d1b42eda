//! Per-state search metadata.

/// Handle to a [`SearchNode`] owned by the [`crate::registry::NodeRegistry`].
///
/// Ids are assigned in creation order starting at 0, so they double as a
/// stable label for states in traces and log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Creation-order index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable search metadata for one canonical state.
///
/// Exactly one node exists per distinct state for the life of a search
/// session. Stack frames refer to it by [`NodeId`]; all flag updates go
/// through the registry-owned record.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    pub(crate) id: NodeId,
    pub(crate) state: S,
    pub(crate) seen: bool,
    pub(crate) stack_position: Option<usize>,
    pub(crate) expand: bool,
    pub(crate) fully_expanded: bool,
    pub(crate) depth: Option<usize>,
}

impl<S> SearchNode<S> {
    pub(crate) fn new(id: NodeId, state: S) -> Self {
        Self {
            id,
            state,
            seen: false,
            stack_position: None,
            expand: false,
            fully_expanded: false,
            depth: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The canonical state: the first instance registered for its class.
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Whether this node has ever been pushed onto the stack.
    #[must_use]
    pub fn seen(&self) -> bool {
        self.seen
    }

    /// Index of this node's frame, or `None` when it is not on the stack.
    #[must_use]
    pub fn stack_position(&self) -> Option<usize> {
        self.stack_position
    }

    #[must_use]
    pub fn is_on_stack(&self) -> bool {
        self.stack_position.is_some()
    }

    /// Whether the node may still need re-expansion to its full set.
    ///
    /// Set optimistically when the node is pushed with a non-empty ample set,
    /// and cleared as soon as one of its successors is found off the stack.
    #[must_use]
    pub fn expand(&self) -> bool {
        self.expand
    }

    /// Whether the node has been re-expanded to its full transition set.
    #[must_use]
    pub fn fully_expanded(&self) -> bool {
        self.fully_expanded
    }

    /// Smallest stack depth at which the node was admitted. Only recorded
    /// while minimization is enabled.
    #[must_use]
    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    /// Forget expansion decisions so a shorter path reconsiders the node.
    pub(crate) fn reset_expansion(&mut self) {
        self.expand = true;
        self.fully_expanded = false;
    }
}
