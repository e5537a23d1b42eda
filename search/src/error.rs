//! Typed search errors.
//!
//! Search outcomes (violation found, cycle found, exhausted) are not errors;
//! they are reported through [`crate::search::DfsSearcher::search`] and
//! [`crate::search::DfsSearcher::cycle_found`]. The types here cover
//! configuration, trace parsing, and replay divergence.

use thiserror::Error;

/// Failure to configure a searcher or to write its stack.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The policy carries a value the searcher cannot honor.
    #[error("unsupported search policy: {detail}")]
    UnsupportedPolicy { detail: String },

    /// The policy could not be decoded from or encoded to JSON.
    #[error("invalid policy JSON: {0}")]
    PolicyJson(#[from] serde_json::Error),

    /// Writing the stack or a trace file failed.
    #[error("failed to write trace: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to parse a serialized guide. No partial guide is ever returned.
#[derive(Debug, Error)]
pub enum TraceParseError {
    #[error("trace begin line not found")]
    BeginMarkerMissing,

    #[error("trace LENGTH line not found")]
    LengthLineMissing,

    #[error("line {line_number}: expected \"LENGTH = length\", saw {line:?}")]
    MalformedLength { line_number: usize, line: String },

    #[error("line {line_number}: transition choice must have the form count:index, saw {line:?}")]
    MalformedChoice { line_number: usize, line: String },

    #[error("line {line_number}: expected integer, saw {token:?}")]
    InvalidInteger { line_number: usize, token: String },

    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}

/// Guided replay diverged from the run that produced the guide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The recorded choice points past the transitions enabled at `state`.
    #[error(
        "guidance mismatch at step {step}: choice {index} requested but state has only {available} candidate transitions: {state}"
    )]
    GuidanceMismatch {
        step: usize,
        index: usize,
        available: usize,
        state: String,
    },
}
