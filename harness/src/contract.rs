//! World contract: the minimal trait a model must implement to be run by the
//! harness.
//!
//! A world supplies the transition structure through the kernel contracts
//! ([`Enabler`] and [`StateManager`]) plus an identity and an initial state.
//! Worlds may NOT drive the search, write traces, or choose transitions;
//! those are runner concerns.

use porsearch_kernel::model::enabler::Enabler;
use porsearch_kernel::model::manager::StateManager;

/// A model the harness runner can check, replay and simulate.
pub trait ModelWorld<S, T>: Enabler<S, T> + StateManager<S, T> {
    /// Unique world identifier (e.g., `"matrix_graph"`).
    fn world_id(&self) -> &str;

    /// The state every run starts from.
    fn initial_state(&self) -> S;

    /// World parameters recorded in trace file preambles.
    ///
    /// Replaying a trace against a world with different parameters is not
    /// expected to succeed.
    fn parameters(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}
