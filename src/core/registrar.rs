//! FG-006: Registration engine — idempotent structural registration.
//!
//! Registers functions into the management graph, pure-independent variables
//! into both graphs (MG node + OG seed), and intermediate placeholders into
//! the operation graph. All operations are no-ops when the entity already
//! exists, so repeated configuration passes are safe.

use super::classifier;
use super::db::GraphDatabase;
use super::types::{DataType, MgNode, OgNode, OpTriple};

/// Counts from one configuration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureReport {
    pub functions_added: u32,
    pub variables_added: u32,
    pub placeholders_added: u32,
    pub mg_edges_added: u32,
}

/// Idempotently register a function in the management graph.
/// Returns true when newly added.
pub fn register_function(db: &mut GraphDatabase, name: &str, now_iso: &str) -> bool {
    db.management.insert_node(
        name,
        MgNode::Function {
            registered_at: now_iso.to_string(),
        },
    )
}

/// Idempotently register a pure-independent variable: a management-graph node
/// plus an operation-graph seed instance (null version, null created_at)
/// available before any execution.
pub fn register_independent_variable(db: &mut GraphDatabase, name: &str) -> bool {
    let added_mg = db.management.insert_node(
        name,
        MgNode::Variable {
            data_type: DataType::PureIndependent,
        },
    );
    let added_og = db.operation.insert_node(
        name,
        OgNode::Seed {
            base: name.to_string(),
            data_type: DataType::PureIndependent,
            created_at: None,
        },
    );
    added_mg || added_og
}

/// Idempotently register an operation-graph placeholder for an intermediate
/// variable that no execution has produced yet.
pub fn register_intermediate_placeholder(db: &mut GraphDatabase, name: &str) -> bool {
    if db.has_instance_of(name) {
        return false;
    }
    db.operation.insert_node(
        name,
        OgNode::Seed {
            base: name.to_string(),
            data_type: DataType::Intermediate,
            created_at: None,
        },
    )
}

/// Run a full configuration pass: classify the triples and register every
/// function, pure-independent variable, and intermediate placeholder, in
/// lexicographic order. Also records the declared structural dependencies as
/// management-graph edges (input variable → consuming function), idempotently.
pub fn configure(db: &mut GraphDatabase, triples: &[OpTriple], now_iso: &str) -> ConfigureReport {
    let cls = classifier::classify(triples);
    let mut report = ConfigureReport::default();

    for name in &cls.functions {
        if register_function(db, name, now_iso) {
            report.functions_added += 1;
        }
    }
    for name in &cls.pure_independent {
        if register_independent_variable(db, name) {
            report.variables_added += 1;
        }
    }
    for name in &cls.intermediate {
        if register_intermediate_placeholder(db, name) {
            report.placeholders_added += 1;
        }
    }

    for triple in triples {
        for input in &triple.inputs {
            // Only pure-independent inputs have MG nodes to hang edges on
            if !db.management.contains(input) {
                continue;
            }
            if db.management.add_edge_unique(input, &triple.function) {
                report.mg_edges_added += 1;
            }
        }
    }

    report
}
