//! Depth-first search engine with ample-set reduction and a cycle proviso.
//!
//! The engine keeps its own stack of [`StackEntry`] frames instead of
//! recursing, so a search can stop at any finding and be resumed later by
//! calling [`DfsSearcher::search`] again.
//!
//! # Reduction and proviso
//!
//! A newly pushed node first explores only its ample set. When that set is
//! exhausted the node is re-expanded to `full − ample` if and only if:
//!
//! - it is not already fully expanded,
//! - its `expand` flag survived (every ample successor was on the stack), and
//! - no frame between the lowest on-stack successor and the node itself is
//!   fully expanded.
//!
//! This keeps every cycle of the reduced graph anchored on at least one
//! fully explored node.

use std::fmt::Debug;
use std::hash::Hash;
use std::io::Write;

use porsearch_kernel::model::enabler::{ample_complement, Enabler};
use porsearch_kernel::model::manager::StateManager;
use porsearch_kernel::model::predicate::StatePredicate;
use tracing::{debug, trace};

use crate::error::SearchError;
use crate::guide::Guide;
use crate::node::{NodeId, SearchNode};
use crate::policy::SearchPolicy;
use crate::registry::NodeRegistry;
use crate::stack_entry::StackEntry;

/// Why the last call to [`DfsSearcher::search`] stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pause {
    /// The predicate holds at the top of the stack.
    Violation,
    /// The top frame's current transition leads back onto the stack.
    Cycle,
}

/// A resumable depth-first searcher.
///
/// States must honor the equality/hash contract documented in
/// [`porsearch_kernel::model`]: the searcher deduplicates on it.
pub struct DfsSearcher<'a, S, T> {
    pub(crate) enabler: &'a dyn Enabler<S, T>,
    pub(crate) manager: &'a dyn StateManager<S, T>,
    predicate: &'a dyn StatePredicate<S>,
    pub(crate) registry: NodeRegistry<S>,
    pub(crate) stack: Vec<StackEntry<T>>,
    pub(crate) policy: SearchPolicy,
    cycle_found: bool,
    pause: Option<Pause>,
    num_transitions: usize,
    num_states_matched: usize,
    num_states_seen: usize,
}

impl<'a, S, T> DfsSearcher<'a, S, T>
where
    S: Clone + Eq + Hash + Debug,
    T: Clone + PartialEq + Debug,
{
    /// Create a searcher over the given collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicy`] if `policy` fails validation.
    pub fn new(
        enabler: &'a dyn Enabler<S, T>,
        manager: &'a dyn StateManager<S, T>,
        predicate: &'a dyn StatePredicate<S>,
        policy: SearchPolicy,
    ) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self {
            enabler,
            manager,
            predicate,
            registry: NodeRegistry::new(),
            stack: Vec::new(),
            policy,
            cycle_found: false,
            pause: None,
            num_transitions: 0,
            num_states_matched: 0,
            num_states_seen: 0,
        })
    }

    /// Search from `initial`, discarding the current stack.
    ///
    /// Nodes registered by earlier searches are kept, so states they saw are
    /// still recognized as seen.
    ///
    /// Returns `true` if the predicate holds at a reachable state (or a cycle
    /// was found while cycles are reported); the stack then holds the path.
    pub fn search_from(&mut self, initial: S) -> bool {
        self.clear_stack();
        let id = self.registry.node_for(initial);
        self.push_node(id);
        debug!(searcher = self.label(), node = %id, "pushed initial state");
        self.search()
    }

    /// Resume the search from the current stack.
    ///
    /// After a `true` return the caller may inspect [`DfsSearcher::stack`]
    /// and call `search` again: the next call moves past the reported
    /// finding before checking the predicate.
    pub fn search(&mut self) -> bool {
        if self.pause == Some(Pause::Violation) && !self.proceed_to_new_state() {
            return self.finish();
        }
        loop {
            let holds = match self.current_state() {
                Some(state) => self.predicate.holds_at(state),
                None => return self.finish(),
            };
            if holds {
                self.pause = Some(Pause::Violation);
                debug!(
                    searcher = self.label(),
                    predicate = %self.predicate.describe(),
                    depth = self.stack.len(),
                    "predicate holds at current state"
                );
                return true;
            }
            if !self.proceed_to_new_state() {
                return self.finish();
            }
        }
    }

    /// Advance until a state not seen before is pushed.
    ///
    /// Returns `true` with the new state on top of the stack, or `false` once
    /// the stack is exhausted or a cycle is reported.
    pub fn proceed_to_new_state(&mut self) -> bool {
        if self.pause.take() == Some(Pause::Cycle) {
            self.cycle_found = false;
            self.num_states_matched += 1;
            if let Some(top) = self.stack.last_mut() {
                top.advance();
            }
        }

        while let Some(top) = self.stack.len().checked_sub(1) {
            let node_id = self.stack[top].node();

            while !self.stack_out_of_bound() && self.stack[top].has_next() {
                let Some(successor) = self.execute_current_transition(top) else {
                    break;
                };
                self.num_transitions += 1;

                let successor_position = self.registry.get(successor).stack_position();
                match successor_position {
                    Some(position) if !self.registry.get(node_id).fully_expanded() => {
                        self.stack[top].observe_successor_position(position);
                    }
                    _ => self.registry.get_mut(node_id).expand = false,
                }

                if self.admits(successor) {
                    self.push_node(successor);
                    return true;
                }

                if self.policy.report_cycle_as_violation && successor_position.is_some() {
                    self.cycle_found = true;
                    self.pause = Some(Pause::Cycle);
                    debug!(
                        searcher = self.label(),
                        from = %node_id,
                        to = %successor,
                        "transition closes a cycle on the stack"
                    );
                    return false;
                }
                trace!(searcher = self.label(), node = %successor, "state seen before");
                self.num_states_matched += 1;
                self.stack[top].advance();
            }

            if self.may_fully_expand(top) {
                let complement = {
                    let state = self.registry.get(node_id).state();
                    ample_complement(self.enabler.full_set(state), self.stack[top].transitions())
                };
                debug!(
                    searcher = self.label(),
                    node = %node_id,
                    extra = complement.len(),
                    "re-expanding to full transition set"
                );
                self.stack[top].replace_with_complement(complement);
                self.registry.get_mut(node_id).fully_expanded = true;
                continue;
            }

            self.stack.pop();
            self.registry.get_mut(node_id).stack_position = None;
            if let Some(parent) = self.stack.last_mut() {
                parent.advance();
            }
            debug!(
                searcher = self.label(),
                node = %node_id,
                depth = self.stack.len(),
                "popped stack"
            );
        }
        false
    }

    /// Execute the top frame's current transition and resolve the successor.
    fn execute_current_transition(&mut self, top: usize) -> Option<NodeId> {
        let entry = &self.stack[top];
        let transition = entry.peek()?;
        let source = self.registry.get(entry.node()).state();
        let step = self.manager.next_state(source, transition);
        self.manager.on_trace_step(source, transition, &step);
        trace!(
            searcher = self.label(),
            source = %self.manager.state_short(source),
            transition = %self.manager.transition_short(transition),
            atomic_steps = step.atomic_steps,
            "executed transition"
        );
        Some(self.registry.node_for(step.final_state))
    }

    /// Whether `successor` is pushed as a new state.
    ///
    /// Unseen states always are. With minimization on, a seen state is also
    /// re-admitted when the current path reaches it at a smaller depth.
    fn admits(&self, successor: NodeId) -> bool {
        let node = self.registry.get(successor);
        if !node.seen() {
            return true;
        }
        let depth = self.stack.len();
        self.policy.minimize && node.depth().is_some_and(|recorded| depth < recorded)
    }

    /// Push a frame for `id` over its ample set.
    fn push_node(&mut self, id: NodeId) {
        let depth = self.stack.len();
        let ample = self.enabler.ample_set(self.registry.get(id).state());
        let minimize = self.policy.minimize;

        let node = self.registry.get_mut(id);
        debug_assert!(
            node.stack_position.is_none(),
            "admitted state {id} is already on the stack"
        );
        if node.seen {
            node.reset_expansion();
        }
        if minimize {
            node.depth = Some(depth);
        }
        node.expand = !ample.is_empty();
        node.seen = true;
        node.stack_position = Some(depth);

        self.stack.push(StackEntry::new(id, ample, 0));
        self.num_states_seen += 1;
        debug!(searcher = self.label(), node = %id, depth = depth + 1, "pushed new state");
    }

    /// The cycle proviso for the frame at `top` (see the module docs).
    fn may_fully_expand(&self, top: usize) -> bool {
        if self.stack_out_of_bound() {
            return false;
        }
        let node = self.registry.get(self.stack[top].node());
        if node.fully_expanded() || !node.expand() {
            return false;
        }
        let lowest = self.stack[top].min_successor_stack_index();
        debug_assert!(
            lowest.is_some(),
            "expand flag set but no on-stack successor recorded for {}",
            node.id()
        );
        let lowest = lowest.unwrap_or(top).min(top);
        self.stack[lowest..top]
            .iter()
            .all(|entry| !self.registry.get(entry.node()).fully_expanded())
    }

    fn stack_out_of_bound(&self) -> bool {
        self.policy
            .depth_bound
            .is_some_and(|bound| self.stack.len() >= bound)
    }

    fn clear_stack(&mut self) {
        for entry in self.stack.drain(..) {
            self.registry.get_mut(entry.node()).stack_position = None;
        }
        self.cycle_found = false;
        self.pause = None;
    }

    fn finish(&self) -> bool {
        if self.cycle_found {
            debug!(searcher = self.label(), "cycle found in state space");
            return true;
        }
        debug!(
            searcher = self.label(),
            predicate = %self.predicate.describe(),
            states = self.registry.len(),
            "search complete: predicate holds at no reachable state"
        );
        false
    }

    /// Write `LENGTH = <size>` and the run-length encoded choices of the
    /// current stack, bottom to top.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Io`] if writing fails.
    pub fn write_stack<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), SearchError> {
        self.guide().write_body(out)?;
        Ok(())
    }

    /// The current stack as a [`Guide`].
    #[must_use]
    pub fn guide(&self) -> Guide {
        Guide::from_choice_indices(self.stack.iter().map(StackEntry::tid))
    }

    /// The state on top of the stack, if any.
    #[must_use]
    pub fn current_state(&self) -> Option<&S> {
        self.stack
            .last()
            .map(|entry| self.registry.get(entry.node()).state())
    }

    /// The node on top of the stack, if any.
    #[must_use]
    pub fn current_node(&self) -> Option<&SearchNode<S>> {
        self.stack.last().map(|entry| self.registry.get(entry.node()))
    }

    /// The states along the current stack, bottom to top.
    #[must_use]
    pub fn path(&self) -> Vec<&S> {
        self.stack
            .iter()
            .map(|entry| self.registry.get(entry.node()).state())
            .collect()
    }
}

impl<S, T> DfsSearcher<'_, S, T> {
    #[must_use]
    pub fn stack(&self) -> &[StackEntry<T>] {
        &self.stack
    }

    #[must_use]
    pub fn registry(&self) -> &NodeRegistry<S> {
        &self.registry
    }

    /// The node behind `id`, or `None` if `id` came from another searcher's
    /// registry.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SearchNode<S>> {
        self.registry.try_get(id)
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.policy.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.policy.name = Some(name.into());
    }

    pub(crate) fn label(&self) -> &str {
        self.name().unwrap_or("dfs")
    }

    #[must_use]
    pub fn is_depth_bounded(&self) -> bool {
        self.policy.depth_bound.is_some()
    }

    #[must_use]
    pub fn depth_bound(&self) -> Option<usize> {
        self.policy.depth_bound
    }

    /// Cap the stack at `bound` frames.
    pub fn bound_depth(&mut self, bound: usize) {
        self.policy.depth_bound = Some(bound);
    }

    pub fn unbound_depth(&mut self) {
        self.policy.depth_bound = None;
    }

    /// Bound the depth to one less than the current stack size, forcing the
    /// search to backtrack past the top frame.
    pub fn restrict_depth(&mut self) {
        self.policy.depth_bound = Some(self.stack.len().saturating_sub(1));
    }

    #[must_use]
    pub fn minimize(&self) -> bool {
        self.policy.minimize
    }

    pub fn set_minimize(&mut self, value: bool) {
        self.policy.minimize = value;
    }

    #[must_use]
    pub fn report_cycle_as_violation(&self) -> bool {
        self.policy.report_cycle_as_violation
    }

    pub fn set_report_cycle_as_violation(&mut self, value: bool) {
        self.policy.report_cycle_as_violation = value;
    }

    /// Whether the last search stopped on a cycle rather than the predicate.
    #[must_use]
    pub fn cycle_found(&self) -> bool {
        self.cycle_found
    }

    /// Number of states pushed as new (re-admissions included).
    #[must_use]
    pub fn num_states_seen(&self) -> usize {
        self.num_states_seen
    }

    /// Number of transitions executed.
    #[must_use]
    pub fn num_transitions(&self) -> usize {
        self.num_transitions
    }

    /// Number of successors recognized as already seen.
    #[must_use]
    pub fn num_states_matched(&self) -> usize {
        self.num_states_matched
    }

    /// Number of distinct states registered.
    #[must_use]
    pub fn num_search_nodes_saved(&self) -> usize {
        self.registry.len()
    }
}
