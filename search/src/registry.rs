//! Canonical state registry: one [`SearchNode`] per distinct state.
//!
//! Nodes live in an arena indexed by [`NodeId`]; a hash map resolves states
//! to their node. Nodes are never removed while the registry is alive, so
//! every state seen earlier stays addressable for deduplication and cycle
//! checks.

use std::collections::HashMap;
use std::hash::Hash;

use crate::node::{NodeId, SearchNode};

/// Maps states to their unique search node.
///
/// The registry never touches `seen` or the stack position of a node; those
/// belong to the search engine.
#[derive(Debug)]
pub struct NodeRegistry<S> {
    nodes: Vec<SearchNode<S>>,
    index: HashMap<S, NodeId>,
}

impl<S: Clone + Eq + Hash> NodeRegistry<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Resolve `state` to its node, creating one with the next id if no
    /// equal state has been registered.
    pub fn node_for(&mut self, state: S) -> NodeId {
        if let Some(&id) = self.index.get(&state) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.index.insert(state.clone(), id);
        self.nodes.push(SearchNode::new(id, state));
        id
    }

    /// Look up the node of `state` without creating one.
    #[must_use]
    pub fn find(&self, state: &S) -> Option<NodeId> {
        self.index.get(state).copied()
    }
}

impl<S> NodeRegistry<S> {
    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different registry.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.0]
    }

    /// The node behind `id`, or `None` if this registry never issued it.
    #[must_use]
    pub fn try_get(&self, id: NodeId) -> Option<&SearchNode<S>> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.0]
    }

    /// Number of distinct states registered ("search nodes saved").
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &SearchNode<S>> {
        self.nodes.iter()
    }
}

impl<S: Clone + Eq + Hash> Default for NodeRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
