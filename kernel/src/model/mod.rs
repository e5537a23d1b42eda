//! Model module: the contracts a transition system implements to be searched.
//!
//! A model supplies three collaborators. None of them owns search state.
//!
//! # State contract
//!
//! States are used as hash keys for deduplication. Two states that denote the
//! same configuration of the modeled system MUST compare equal and hash
//! identically. Violating this does not crash the search: it silently breaks
//! cycle detection and termination, or hides violations.

pub mod enabler;
pub mod manager;
pub mod predicate;
