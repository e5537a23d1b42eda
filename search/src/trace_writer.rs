//! Trace files: a JSON preamble line followed by a delimited guide.
//!
//! ```text
//! {"application":...,"cycle_found":false,"policy":{...},...}
//! == Begin Trace ==
//! LENGTH = 4
//! 3:0
//! 1:-1
//! == End Trace ==
//! ```
//!
//! Guide parsing ignores everything before the begin marker, so the preamble
//! is free-form application data. This module writes it as one line of JSON
//! so that it can be read back.

use std::fmt::Debug;
use std::hash::Hash;
use std::io::Write;

use porsearch_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_TRACE_FILE};
use serde::{Deserialize, Serialize};

use crate::error::{SearchError, TraceParseError};
use crate::guide::{Guide, BEGIN_TRACE, END_TRACE};
use crate::policy::SearchPolicy;
use crate::search::DfsSearcher;

/// Run metadata written ahead of the guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracePreamble {
    pub policy: SearchPolicy,
    pub states_seen: usize,
    pub transitions: usize,
    pub states_matched: usize,
    pub cycle_found: bool,
    /// Caller-supplied data (model parameters, world identity).
    pub application: serde_json::Value,
}

/// A parsed trace file.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFile {
    /// `None` when the first line is not a preamble written by this module.
    pub preamble: Option<TracePreamble>,
    pub guide: Guide,
}

impl TraceFile {
    /// Parse a trace file's text.
    ///
    /// # Errors
    ///
    /// Returns any [`TraceParseError`] from parsing the guide section.
    pub fn parse(text: &str) -> Result<Self, TraceParseError> {
        let preamble = text
            .lines()
            .next()
            .and_then(|line| serde_json::from_str(line).ok());
        let guide = text.parse()?;
        Ok(Self { preamble, guide })
    }

    /// Read and parse a trace file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`TraceParseError::Io`] if the file cannot be read.
    pub fn read(path: &std::path::Path) -> Result<Self, TraceParseError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

/// Write a complete trace file.
///
/// # Errors
///
/// Returns [`SearchError::PolicyJson`] if the preamble cannot be encoded and
/// [`SearchError::Io`] if writing fails.
pub fn write_trace<W: Write + ?Sized>(
    out: &mut W,
    preamble: &TracePreamble,
    guide: &Guide,
) -> Result<(), SearchError> {
    let line = serde_json::to_string(preamble)?;
    writeln!(out, "{line}")?;
    writeln!(out, "{BEGIN_TRACE}")?;
    guide.write_body(out)?;
    writeln!(out, "{END_TRACE}")?;
    out.flush()?;
    Ok(())
}

/// Digest of a complete trace file's bytes.
#[must_use]
pub fn trace_file_hash(bytes: &[u8]) -> ContentHash {
    canonical_hash(DOMAIN_TRACE_FILE, bytes)
}

impl<S, T> DfsSearcher<'_, S, T>
where
    S: Clone + Eq + Hash + Debug,
    T: Clone + PartialEq + Debug,
{
    /// The preamble describing this searcher's current run.
    #[must_use]
    pub fn trace_preamble(&self, application: serde_json::Value) -> TracePreamble {
        TracePreamble {
            policy: self.policy().clone(),
            states_seen: self.num_states_seen(),
            transitions: self.num_transitions(),
            states_matched: self.num_states_matched(),
            cycle_found: self.cycle_found(),
            application,
        }
    }

    /// Write the current stack as a complete trace file.
    ///
    /// # Errors
    ///
    /// See [`write_trace`].
    pub fn write_trace_file<W: Write + ?Sized>(
        &self,
        out: &mut W,
        application: serde_json::Value,
    ) -> Result<(), SearchError> {
        write_trace(out, &self.trace_preamble(application), &self.guide())
    }
}
