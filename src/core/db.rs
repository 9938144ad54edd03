//! FG-005: The GraphDatabase aggregate — owns the management and operation
//! graphs, version minting, and instance resolution.
//!
//! Passed by mutable reference through load → mutate → save; never shared,
//! never global. A database holding exactly the two root bookkeeping nodes is
//! the empty state, not an error.

use super::store::Graph;
use super::types::{
    instance_id, GraphSummary, MgNode, NodeLine, OgNode, VersionToken,
};
use serde::{Deserialize, Serialize};

/// Id of the bookkeeping root node present in each graph from bootstrap.
pub const ROOT_ID: &str = "root";

/// Snapshot schema version.
pub const SCHEMA: &str = "1.0";

/// The dual-graph database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDatabase {
    /// Snapshot schema version
    pub schema: String,

    /// When the database was bootstrapped
    pub created_at: String,

    /// Management graph — structural registry, unversioned
    pub management: Graph<MgNode>,

    /// Operation graph — append-only provenance log, versioned
    pub operation: Graph<OgNode>,
}

impl GraphDatabase {
    /// Bootstrap a fresh database with one root node per graph.
    pub fn new(now_iso: &str) -> Self {
        let mut management = Graph::new();
        management.insert_node(ROOT_ID, MgNode::Root);
        let mut operation = Graph::new();
        operation.insert_node(ROOT_ID, OgNode::Root);
        Self {
            schema: SCHEMA.to_string(),
            created_at: now_iso.to_string(),
            management,
            operation,
        }
    }

    /// True when nothing beyond the root bookkeeping nodes exists.
    pub fn is_empty(&self) -> bool {
        self.management.node_count() <= 1 && self.operation.node_count() <= 1
    }

    /// Whether any operation-graph data block (seed or instance) exists for
    /// a base variable name.
    pub fn has_instance_of(&self, base: &str) -> bool {
        self.operation.nodes().any(|(_, n)| n.base() == Some(base))
    }

    /// Resolve the most recent instance of a base name: the versioned node
    /// with the greatest token, falling back to the seed. Insertion order
    /// breaks ties — the node added last wins.
    pub fn latest_instance(&self, base: &str) -> Option<String> {
        let mut best: Option<(Option<VersionToken>, &str)> = None;
        for (id, node) in self.operation.nodes() {
            if node.base() != Some(base) {
                continue;
            }
            let rank = node.version();
            match best {
                // `>=` so a later insertion replaces an equal rank
                Some((best_rank, _)) if rank < best_rank => {}
                _ => best = Some((rank, id)),
            }
        }
        best.map(|(_, id)| id.to_string())
    }

    /// Mint a version token for `base`, strictly greater than every token
    /// already issued for it. Same-tick (or clock-regression) collisions get
    /// a sequence bump instead of a duplicate.
    pub fn mint_version(&self, base: &str, now_millis: u64) -> VersionToken {
        let newest = self
            .operation
            .nodes()
            .filter(|(_, n)| n.base() == Some(base))
            .filter_map(|(_, n)| n.version())
            .max();

        match newest {
            Some(prev) if now_millis <= prev.millis => prev.bump(),
            _ => VersionToken {
                millis: now_millis,
                seq: 0,
            },
        }
    }

    /// Render the printable id a freshly minted instance will carry.
    pub fn instance_id_for(&self, base: &str, version: VersionToken) -> String {
        instance_id(base, version)
    }

    /// Read-only summary of the management graph.
    pub fn mg_summary(&self) -> GraphSummary {
        let nodes = self
            .management
            .nodes()
            .map(|(id, node)| NodeLine {
                id: id.clone(),
                detail: match node {
                    MgNode::Root => "root".to_string(),
                    MgNode::Function { registered_at } => {
                        format!("function, registered {}", registered_at)
                    }
                    MgNode::Variable { data_type } => format!("variable [{}]", data_type),
                },
            })
            .collect();
        GraphSummary {
            node_count: self.management.node_count(),
            edge_count: self.management.edge_count(),
            nodes,
        }
    }

    /// Read-only summary of the operation graph.
    pub fn og_summary(&self) -> GraphSummary {
        let nodes = self
            .operation
            .nodes()
            .map(|(id, node)| NodeLine {
                id: id.clone(),
                detail: match node {
                    OgNode::Root => "root".to_string(),
                    OgNode::Seed {
                        data_type,
                        created_at,
                        ..
                    } => match created_at {
                        Some(ts) => format!("data_block [{}] seeded {}", data_type, ts),
                        None => format!("data_block [{}] seed", data_type),
                    },
                    OgNode::Instance { created_at, .. } => {
                        format!("data_block [intermediate] created {}", created_at)
                    }
                },
            })
            .collect();
        GraphSummary {
            node_count: self.operation.node_count(),
            edge_count: self.operation.edge_count(),
            nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DataType;

    fn seed(base: &str) -> OgNode {
        OgNode::Seed {
            base: base.to_string(),
            data_type: DataType::PureIndependent,
            created_at: None,
        }
    }

    fn inst(base: &str, millis: u64, seq: u32) -> (String, OgNode) {
        let v = VersionToken { millis, seq };
        (
            instance_id(base, v),
            OgNode::Instance {
                base: base.to_string(),
                version: v,
                created_at: "2026-01-01T00:00:00Z".to_string(),
            },
        )
    }

    #[test]
    fn test_fg005_new_has_only_roots() {
        let db = GraphDatabase::new("2026-01-01T00:00:00Z");
        assert!(db.is_empty());
        assert_eq!(db.management.node_count(), 1);
        assert_eq!(db.operation.node_count(), 1);
        assert!(db.management.contains(ROOT_ID));
        assert!(db.operation.contains(ROOT_ID));
        assert_eq!(db.management.edge_count(), 0);
    }

    #[test]
    fn test_fg005_latest_instance_prefers_versioned() {
        let mut db = GraphDatabase::new("t");
        db.operation.insert_node("x", seed("x"));
        let (id, node) = inst("x", 100, 0);
        db.operation.insert_node(&id, node);
        assert_eq!(db.latest_instance("x"), Some("x@100.000".to_string()));
    }

    #[test]
    fn test_fg005_latest_instance_falls_back_to_seed() {
        let mut db = GraphDatabase::new("t");
        db.operation.insert_node("x", seed("x"));
        assert_eq!(db.latest_instance("x"), Some("x".to_string()));
        assert_eq!(db.latest_instance("ghost"), None);
    }

    #[test]
    fn test_fg005_latest_instance_greatest_token() {
        let mut db = GraphDatabase::new("t");
        for (millis, seq) in [(100, 0), (100, 1), (200, 0)] {
            let (id, node) = inst("z", millis, seq);
            db.operation.insert_node(&id, node);
        }
        assert_eq!(db.latest_instance("z"), Some("z@200.000".to_string()));
    }

    #[test]
    fn test_fg005_mint_version_fresh_base() {
        let db = GraphDatabase::new("t");
        let v = db.mint_version("z", 500);
        assert_eq!(v, VersionToken { millis: 500, seq: 0 });
    }

    #[test]
    fn test_fg005_mint_version_same_tick_bumps_seq() {
        let mut db = GraphDatabase::new("t");
        let (id, node) = inst("z", 500, 0);
        db.operation.insert_node(&id, node);
        let v = db.mint_version("z", 500);
        assert_eq!(v, VersionToken { millis: 500, seq: 1 });
    }

    #[test]
    fn test_fg005_mint_version_clock_regression_still_grows() {
        let mut db = GraphDatabase::new("t");
        let (id, node) = inst("z", 500, 3);
        db.operation.insert_node(&id, node);
        // Clock went backwards — token must still exceed the newest
        let v = db.mint_version("z", 400);
        assert_eq!(v, VersionToken { millis: 500, seq: 4 });
    }

    #[test]
    fn test_fg005_mint_version_per_base_isolation() {
        let mut db = GraphDatabase::new("t");
        let (id, node) = inst("z", 500, 0);
        db.operation.insert_node(&id, node);
        let v = db.mint_version("w", 500);
        assert_eq!(v, VersionToken { millis: 500, seq: 0 });
    }

    #[test]
    fn test_fg005_summaries() {
        let mut db = GraphDatabase::new("t");
        db.management.insert_node(
            "add",
            MgNode::Function {
                registered_at: "2026-01-01T00:00:00Z".to_string(),
            },
        );
        db.operation.insert_node("x", seed("x"));
        let mg = db.mg_summary();
        assert_eq!(mg.node_count, 2);
        assert!(mg.nodes.iter().any(|n| n.id == "add" && n.detail.contains("function")));
        let og = db.og_summary();
        assert_eq!(og.node_count, 2);
        assert!(og.nodes.iter().any(|n| n.detail.contains("pure_independent")));
    }

    #[test]
    fn test_fg005_serde_roundtrip() {
        let mut db = GraphDatabase::new("2026-01-01T00:00:00Z");
        db.operation.insert_node("x", seed("x"));
        let (id, node) = inst("z", 100, 2);
        db.operation.insert_node(&id, node);
        db.operation.add_edge("x", &id);

        let json = serde_json::to_string(&db).unwrap();
        let back: GraphDatabase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, db);
        assert_eq!(back.latest_instance("z"), Some("z@100.002".to_string()));
    }
}
