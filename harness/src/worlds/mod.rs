//! World implementations for the harness runner.

pub mod matrix_graph;
