//! Candidate-set supplier contract.

/// Supplies the transitions to explore from a state.
///
/// # Ordering contract
///
/// The engine records choices as positions within these vectors, and guided
/// replay resolves those positions against a fresh call. Both methods must
/// therefore be deterministic: equal states yield equal vectors in the same
/// order. `ample_set(s)` must be an ordered sub-sequence of `full_set(s)`.
pub trait Enabler<S, T> {
    /// The reduced set of transitions to explore first. May be empty.
    fn ample_set(&self, state: &S) -> Vec<T>;

    /// Every transition enabled at `state`. Superset of [`Enabler::ample_set`].
    fn full_set(&self, state: &S) -> Vec<T>;
}

/// The transitions of `full` that are not in `ample`, in `full` order.
///
/// This is the candidate collection a frame switches to when its node is
/// re-expanded. Positions within it are offset by `ample.len()` when recorded.
#[must_use]
pub fn ample_complement<T: PartialEq>(full: Vec<T>, ample: &[T]) -> Vec<T> {
    full.into_iter().filter(|t| !ample.contains(t)).collect()
}
