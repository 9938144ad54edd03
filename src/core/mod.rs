//! Core engine logic — types, parsing, classification, graph store,
//! registration, execution, plan compilation, snapshot persistence.

pub mod classifier;
pub mod clock;
pub mod compiler;
pub mod db;
pub mod executor;
pub mod parser;
pub mod registrar;
pub mod state;
pub mod store;
pub mod types;
