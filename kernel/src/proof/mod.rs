//! Proof module: canonical content hashing for serialized search artifacts.

pub mod hash;
