//! Shared fixtures for the lock tests.
