//! Grafar — functional graph database.
//!
//! Dual-graph provenance: a structural management graph of declared functions
//! and variables, and an append-only operation graph of versioned variable
//! instances produced by executed assignments.

pub mod cli;
pub mod core;
