//! Check configuration: which world to load, what to look for, and how to
//! search.
//!
//! ```json
//! {
//!   "world": "graphs/loop.json",
//!   "violation_states": [4],
//!   "policy": { "report_cycle_as_violation": true },
//!   "seed": 7
//! }
//! ```
//!
//! A relative `world` path is resolved against the directory holding the
//! configuration file.

use std::path::{Path, PathBuf};

use porsearch_search::policy::SearchPolicy;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::worlds::matrix_graph::{MatrixGraph, StateSetPredicate};

/// Default cap on the length of a random simulation.
pub const DEFAULT_MAX_SIMULATION_STEPS: usize = 10_000;

fn default_max_simulation_steps() -> usize {
    DEFAULT_MAX_SIMULATION_STEPS
}

/// A complete check run description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Path to a [`MatrixGraph`] JSON file.
    pub world: PathBuf,
    /// States at which the checked predicate holds.
    #[serde(default)]
    pub violation_states: StateSetPredicate,
    #[serde(default)]
    pub policy: SearchPolicy,
    /// Seed for the random simulator.
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_max_simulation_steps")]
    pub max_simulation_steps: usize,
}

impl CheckConfig {
    /// Decode and validate a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Json`] on malformed JSON and
    /// [`HarnessError::Search`] if the policy fails validation.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, HarnessError> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.policy.validate()?;
        Ok(config)
    }

    /// Read a configuration file, resolving `world` against its directory.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if the file cannot be read, or any error
    /// of [`CheckConfig::from_json_bytes`].
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let bytes = std::fs::read(path)?;
        let mut config = Self::from_json_bytes(&bytes)?;
        if config.world.is_relative() {
            if let Some(dir) = path.parent() {
                config.world = dir.join(&config.world);
            }
        }
        Ok(config)
    }

    /// Load the configured world.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if the world file cannot be read, or any
    /// error of [`MatrixGraph::from_json_bytes`].
    pub fn load_world(&self) -> Result<MatrixGraph, HarnessError> {
        let bytes = std::fs::read(&self.world)?;
        MatrixGraph::from_json_bytes(&bytes)
    }
}
