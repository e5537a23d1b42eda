//! Transition applier contract and diagnostic hooks.

use std::fmt::Debug;

/// The result of executing one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep<S> {
    /// The state reached after the transition.
    pub final_state: S,
    /// Number of atomic sub-steps the transition executed (1 for a plain step).
    pub atomic_steps: u32,
}

impl<S> TraceStep<S> {
    /// A single atomic step ending in `final_state`.
    #[must_use]
    pub fn new(final_state: S) -> Self {
        Self {
            final_state,
            atomic_steps: 1,
        }
    }
}

/// Computes successor states and renders states and transitions.
///
/// The rendering hooks exist for diagnostics and trace output only. The
/// engine never branches on their results.
pub trait StateManager<S, T> {
    /// Apply `transition` to `state`.
    fn next_state(&self, state: &S, transition: &T) -> TraceStep<S>;

    /// One-line rendering used in stack summaries.
    fn state_short(&self, state: &S) -> String
    where
        S: Debug,
    {
        format!("{state:?}")
    }

    /// Multi-line rendering used in detailed traces.
    fn state_long(&self, state: &S) -> String
    where
        S: Debug,
    {
        format!("{state:#?}")
    }

    /// One-line rendering of a transition.
    fn transition_short(&self, transition: &T) -> String
    where
        T: Debug,
    {
        format!("{transition:?}")
    }

    /// Observe an executed step. Called once per transition the engine runs.
    fn on_trace_step(&self, _source: &S, _transition: &T, _step: &TraceStep<S>) {}
}
