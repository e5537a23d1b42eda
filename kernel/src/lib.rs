//! Porsearch Kernel: the collaborator contracts consumed by the search engine.
//!
//! # API Surface
//!
//! - [`model::enabler::Enabler`] -- supplies ample and full transition sets for a state
//! - [`model::manager::StateManager`] -- computes the next state and renders diagnostics
//! - [`model::predicate::StatePredicate`] -- flags a "bad" state
//! - [`proof::hash::canonical_hash`] -- domain-separated content hashing
//!
//! # Module Dependency Direction
//!
//! `model` and `proof` are independent leaves. The kernel holds no search
//! logic; `porsearch_search` depends on it, never the other way round.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod model;
pub mod proof;
