//! Harness error type.

use porsearch_search::error::{ReplayError, SearchError, TraceParseError};

/// Error during a harness run.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The world description is inconsistent.
    #[error("invalid world: {detail}")]
    InvalidWorld { detail: String },

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error(transparent)]
    TraceParse(#[from] TraceParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
