//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests that drive a mounted view against the in-memory grid
//! and inspect both sides.
