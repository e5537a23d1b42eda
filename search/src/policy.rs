//! Search policy types.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default number of top stack entries shown by summarized stack printing.
pub const DEFAULT_SUMMARY_CUTOFF: usize = 5;

/// Configuration of a [`crate::search::DfsSearcher`].
///
/// Every field can also be changed on a live searcher; the policy is the
/// starting point and the serializable record of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchPolicy {
    /// Upper bound on stack size. `None` leaves the search unbounded.
    pub depth_bound: Option<usize>,
    /// Re-admit seen states reached along strictly shorter paths.
    pub minimize: bool,
    /// Treat reaching an ancestor on the stack as a finding.
    pub report_cycle_as_violation: bool,
    /// Number of top stack entries shown by summarized stack printing.
    pub summary_cutoff: usize,
    /// Label attached to log events and printed traces.
    pub name: Option<String>,
}

impl SearchPolicy {
    /// Check that the policy can be honored.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicy`] if `summary_cutoff < 2`
    /// (a summary always keeps the root and the top of the stack).
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.summary_cutoff < 2 {
            return Err(SearchError::UnsupportedPolicy {
                detail: format!(
                    "summary_cutoff must be at least 2, got {}",
                    self.summary_cutoff
                ),
            });
        }
        Ok(())
    }

    /// Decode and validate a policy from JSON. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::PolicyJson`] on malformed JSON or unknown
    /// fields, and [`SearchError::UnsupportedPolicy`] if validation fails.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, SearchError> {
        let policy: Self = serde_json::from_slice(bytes)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Encode the policy as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::PolicyJson`] if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, SearchError> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            depth_bound: None,
            minimize: false,
            report_cycle_as_violation: false,
            summary_cutoff: DEFAULT_SUMMARY_CUTOFF,
            name: None,
        }
    }
}
