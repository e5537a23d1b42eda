//! Porsearch Search: resumable depth-first state-space search with ample-set
//! partial-order reduction and guided replay.
//!
//! This crate depends only on `porsearch_kernel`. It does NOT depend on
//! `porsearch_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! porsearch_kernel  ←  porsearch_search  ←  porsearch_harness
//! (contracts, hash)    (dfs, guide, replay)  (worlds, runners)
//! ```
//!
//! # Key types
//!
//! - [`DfsSearcher`]: explicit-stack search engine with the cycle proviso
//! - [`NodeRegistry`]: one [`SearchNode`] per distinct state
//! - [`StackEntry`]: a stack frame over an ample set or its complement
//! - [`Guide`]: run-length encoded path, parsed from and written to traces
//! - [`GuidedTransitionChooser`]: replays a [`Guide`] against a model
//! - [`SearchPolicy`]: depth bound, minimization and cycle reporting

#![forbid(unsafe_code)]

pub mod chooser;
pub mod error;
pub mod guide;
pub mod node;
pub mod policy;
pub mod registry;
pub mod render;
pub mod search;
pub mod stack_entry;
pub mod trace_writer;

pub use chooser::{GuidedTransitionChooser, RandomTransitionChooser, TransitionChooser};
pub use error::{ReplayError, SearchError, TraceParseError};
pub use guide::{Guide, GuideChoice};
pub use node::{NodeId, SearchNode};
pub use policy::SearchPolicy;
pub use registry::NodeRegistry;
pub use search::DfsSearcher;
pub use stack_entry::StackEntry;
pub use trace_writer::{TraceFile, TracePreamble};
