//! Porsearch Harness: concrete worlds and the runners that drive the search
//! engine over them.
//!
//! The harness does NOT implement search or replay logic. It wires a world
//! into `porsearch_search` and packages the results:
//!
//! - [`runner::run_check`]: exhaustive reduced search, with a trace file
//! - [`runner::replay`]: reproduce a recorded path from a guide
//! - [`runner::simulate`]: seeded random walk
//! - [`runner::run_config`]: load a [`config::CheckConfig`], then check and simulate its world
//!
//! Worlds provide transitions and states only; the runners own orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod contract;
pub mod error;
pub mod runner;
pub mod worlds;
