//! `MatrixGraph`: an explicit directed graph given as an adjacency matrix of
//! transition labels.
//!
//! States are indices `0..n`. `labels[s][t]` names the transition from `s` to
//! `t`, if any. A label written with a leading `@` puts the transition in the
//! ample set of its source:
//!
//! ```text
//!        0     1     2
//!   0    .   "@t0"   .
//!   1    .     .   "t1"
//!   2    .     .     .
//! ```
//!
//! The full set of `s` lists its transitions by target index. The ample set
//! is the `@` transitions of `s`, or the full set when `s` has none.

use std::collections::BTreeSet;
use std::fmt;

use porsearch_kernel::model::enabler::Enabler;
use porsearch_kernel::model::manager::{StateManager, TraceStep};
use porsearch_kernel::model::predicate::StatePredicate;
use serde::{Deserialize, Serialize};

use crate::contract::ModelWorld;
use crate::error::HarnessError;

/// Label prefix marking an ample transition.
pub const AMPLE_MARKER: char = '@';

/// One edge of a [`MatrixGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Label without the ample marker.
    pub label: String,
    pub source: usize,
    pub target: usize,
    pub ample: bool,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}->{})", self.label, self.source, self.target)
    }
}

/// Directed graph world over `usize` states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixGraph {
    #[serde(default)]
    initial: usize,
    labels: Vec<Vec<Option<String>>>,
}

impl MatrixGraph {
    /// A graph of `num_states` states and no transitions, starting at 0.
    #[must_use]
    pub fn new(num_states: usize) -> Self {
        Self {
            initial: 0,
            labels: vec![vec![None; num_states]; num_states],
        }
    }

    /// Build a graph from `(label, source, target)` edges.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidWorld`] if an edge names a state
    /// outside `0..num_states`.
    pub fn from_edges<'e>(
        num_states: usize,
        edges: impl IntoIterator<Item = (&'e str, usize, usize)>,
    ) -> Result<Self, HarnessError> {
        let mut graph = Self::new(num_states);
        for (label, source, target) in edges {
            graph.add_transition(label, source, target)?;
        }
        Ok(graph)
    }

    /// Add (or relabel) the transition from `source` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidWorld`] if either state is out of range
    /// or the label is empty.
    pub fn add_transition(
        &mut self,
        label: &str,
        source: usize,
        target: usize,
    ) -> Result<(), HarnessError> {
        let n = self.num_states();
        if source >= n || target >= n {
            return Err(HarnessError::InvalidWorld {
                detail: format!("edge {source}->{target} outside a graph of {n} states"),
            });
        }
        if label.trim_start_matches(AMPLE_MARKER).is_empty() {
            return Err(HarnessError::InvalidWorld {
                detail: format!("edge {source}->{target} has an empty label"),
            });
        }
        self.labels[source][target] = Some(label.to_string());
        Ok(())
    }

    /// Start runs from `state` instead of 0.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidWorld`] if `state` is out of range.
    pub fn set_initial(&mut self, state: usize) -> Result<(), HarnessError> {
        if state >= self.num_states() {
            return Err(HarnessError::InvalidWorld {
                detail: format!(
                    "initial state {state} outside a graph of {} states",
                    self.num_states()
                ),
            });
        }
        self.initial = state;
        Ok(())
    }

    #[must_use]
    pub fn num_states(&self) -> usize {
        self.labels.len()
    }

    /// Every transition out of `state`, ordered by target.
    #[must_use]
    pub fn existing_transitions(&self, state: usize) -> Vec<Transition> {
        let Some(row) = self.labels.get(state) else {
            return Vec::new();
        };
        row.iter()
            .enumerate()
            .filter_map(|(target, label)| {
                let label = label.as_deref()?;
                let name = label.strip_prefix(AMPLE_MARKER);
                Some(Transition {
                    label: name.unwrap_or(label).to_string(),
                    source: state,
                    target,
                    ample: name.is_some(),
                })
            })
            .collect()
    }

    /// The same graph with every ample marker removed, so that no state is
    /// reduced.
    #[must_use]
    pub fn unreduced(&self) -> Self {
        let labels = self
            .labels
            .iter()
            .map(|row| {
                row.iter()
                    .map(|label| {
                        label
                            .as_deref()
                            .map(|l| l.trim_start_matches(AMPLE_MARKER).to_string())
                    })
                    .collect()
            })
            .collect();
        Self {
            initial: self.initial,
            labels,
        }
    }

    /// Decode a graph from JSON and check that it is square.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Json`] on malformed JSON and
    /// [`HarnessError::InvalidWorld`] if the matrix is not square or the
    /// initial state is out of range.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, HarnessError> {
        let graph: Self = serde_json::from_slice(bytes)?;
        let n = graph.num_states();
        if let Some((row, _)) = graph
            .labels
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n)
        {
            return Err(HarnessError::InvalidWorld {
                detail: format!("row {row} does not have {n} columns"),
            });
        }
        if n > 0 && graph.initial >= n {
            return Err(HarnessError::InvalidWorld {
                detail: format!(
                    "initial state {} outside a graph of {n} states",
                    graph.initial
                ),
            });
        }
        Ok(graph)
    }

    /// Encode the graph as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Json`] if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, HarnessError> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Enabler<usize, Transition> for MatrixGraph {
    fn ample_set(&self, state: &usize) -> Vec<Transition> {
        let full = self.existing_transitions(*state);
        if full.iter().any(|t| t.ample) {
            full.into_iter().filter(|t| t.ample).collect()
        } else {
            full
        }
    }

    fn full_set(&self, state: &usize) -> Vec<Transition> {
        self.existing_transitions(*state)
    }
}

impl StateManager<usize, Transition> for MatrixGraph {
    fn next_state(&self, _state: &usize, transition: &Transition) -> TraceStep<usize> {
        TraceStep::new(transition.target)
    }

    fn transition_short(&self, transition: &Transition) -> String {
        transition.label.clone()
    }

    fn state_long(&self, state: &usize) -> String {
        let out: Vec<String> = self
            .existing_transitions(*state)
            .iter()
            .map(ToString::to_string)
            .collect();
        format!("state {state}, enabled: [{}]", out.join(", "))
    }
}

impl ModelWorld<usize, Transition> for MatrixGraph {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "matrix_graph"
    }

    fn initial_state(&self) -> usize {
        self.initial
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "initial": self.initial,
            "num_states": self.num_states(),
        })
    }
}

/// Holds at a fixed set of states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSetPredicate {
    states: BTreeSet<usize>,
}

impl StateSetPredicate {
    #[must_use]
    pub fn new(states: impl IntoIterator<Item = usize>) -> Self {
        Self {
            states: states.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn states(&self) -> &BTreeSet<usize> {
        &self.states
    }
}

impl StatePredicate<usize> for StateSetPredicate {
    fn holds_at(&self, state: &usize) -> bool {
        self.states.contains(state)
    }

    fn describe(&self) -> String {
        format!("state in {:?}", self.states)
    }
}
