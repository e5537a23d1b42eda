//! State predicate contract.

/// A property checked at every state the search reaches.
///
/// Usually describes something bad (a deadlock, an assertion failure): the
/// search stops as soon as it reaches a state where the predicate holds.
pub trait StatePredicate<S> {
    /// Whether the property holds at `state`.
    fn holds_at(&self, state: &S) -> bool;

    /// Human-readable name used in log output.
    fn describe(&self) -> String {
        "state predicate".to_string()
    }
}

impl<S, F> StatePredicate<S> for F
where
    F: Fn(&S) -> bool,
{
    fn holds_at(&self, state: &S) -> bool {
        self(state)
    }
}

/// A predicate that never holds. Searching with it explores the whole
/// reachable state space (or reports cycles, when enabled).
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl<S> StatePredicate<S> for Never {
    fn holds_at(&self, _state: &S) -> bool {
        false
    }

    fn describe(&self) -> String {
        "never".to_string()
    }
}
