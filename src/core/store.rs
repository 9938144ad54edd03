//! FG-004: Graph store — ordered node/edge containers and mutation primitives.
//!
//! Both graphs are append-only: nodes and edges are never removed. Nodes live
//! in an `IndexMap` so insertion order survives serialization; the execution
//! engine relies on that order for last-wins tie-breaking.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// Append-only directed graph keyed by node id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph<N> {
    nodes: IndexMap<String, N>,
    edges: Vec<Edge>,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }
}

impl<N> Graph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node if absent. Returns true when newly added; an existing
    /// node is left untouched (no attribute overwrite). This is the
    /// management-graph discipline.
    pub fn insert_node(&mut self, id: &str, node: N) -> bool {
        if self.nodes.contains_key(id) {
            return false;
        }
        self.nodes.insert(id.to_string(), node);
        true
    }

    /// Insert a node whose id must be fresh. The operation graph uses this
    /// for versioned instances; a collision means a version-token invariant
    /// was violated.
    pub fn insert_fresh_node(&mut self, id: &str, node: N) -> Result<(), String> {
        if self.nodes.contains_key(id) {
            return Err(format!("duplicate version: node '{}' already exists", id));
        }
        self.nodes.insert(id.to_string(), node);
        Ok(())
    }

    /// Append an edge. Duplicates are allowed — one provenance edge per
    /// input occurrence, even repeated inputs.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    /// Append an edge only if not already present. Returns true when added.
    pub fn add_edge_unique(&mut self, from: &str, to: &str) -> bool {
        if self.has_edge(from, to) {
            return false;
        }
        self.add_edge(from, to);
        true
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&String, &N)> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
