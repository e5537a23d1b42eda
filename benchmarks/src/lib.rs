//! Shared worlds for porsearch benchmark suites.

use porsearch_harness::contract::ModelWorld;
use porsearch_harness::error::HarnessError;
use porsearch_harness::worlds::matrix_graph::MatrixGraph;
use porsearch_kernel::model::enabler::Enabler;
use porsearch_kernel::model::manager::{StateManager, TraceStep};

/// `processes` independent counters, each stepping from 0 to `limit`.
///
/// Every interleaving reaches the same final state, so picking the lowest
/// movable process as the ample set is a sound reduction: the reduced search
/// visits one path instead of the whole lattice.
#[derive(Debug, Clone, Copy)]
pub struct IndependentCounters {
    pub processes: usize,
    pub limit: u8,
    /// Whether ample sets are reduced to one process.
    pub reduced: bool,
}

impl Enabler<Vec<u8>, usize> for IndependentCounters {
    fn ample_set(&self, state: &Vec<u8>) -> Vec<usize> {
        if !self.reduced {
            return self.full_set(state);
        }
        self.full_set(state).into_iter().take(1).collect()
    }

    fn full_set(&self, state: &Vec<u8>) -> Vec<usize> {
        state
            .iter()
            .enumerate()
            .filter(|(_, count)| **count < self.limit)
            .map(|(process, _)| process)
            .collect()
    }
}

impl StateManager<Vec<u8>, usize> for IndependentCounters {
    fn next_state(&self, state: &Vec<u8>, transition: &usize) -> TraceStep<Vec<u8>> {
        let mut next = state.clone();
        next[*transition] += 1;
        TraceStep::new(next)
    }
}

impl ModelWorld<Vec<u8>, usize> for IndependentCounters {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "independent_counters"
    }

    fn initial_state(&self) -> Vec<u8> {
        vec![0; self.processes]
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "limit": self.limit,
            "processes": self.processes,
            "reduced": self.reduced,
        })
    }
}

/// A ring `0 → 1 → … → n-1 → 0` whose ring steps are ample, plus a chord
/// from every state to its successor's successor.
///
/// # Errors
///
/// Returns [`HarnessError::InvalidWorld`] if `n` is zero.
pub fn chorded_ring(n: usize) -> Result<MatrixGraph, HarnessError> {
    if n == 0 {
        return Err(HarnessError::InvalidWorld {
            detail: "a ring needs at least one state".into(),
        });
    }
    let labels: Vec<(String, usize, usize)> = (0..n)
        .flat_map(|s| {
            [
                (format!("@step{s}"), s, (s + 1) % n),
                (format!("skip{s}"), s, (s + 2) % n),
            ]
        })
        .collect();
    MatrixGraph::from_edges(n, labels.iter().map(|(l, s, t)| (l.as_str(), *s, *t)))
}
