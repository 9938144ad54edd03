//! FG-001: All types from the grafar data model.
//!
//! Defines the parsed assignment triple, the derived variable classification,
//! version tokens, and the closed node variants for both graphs. Node
//! attributes are tagged enum variants rather than open attribute bags, so
//! illegal combinations (a seed with a version, a function with a data type)
//! are unrepresentable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Parsed assignments
// ============================================================================

/// One parsed assignment: `output = function(inputs...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpTriple {
    /// Output (dependent) variable name
    pub output: String,

    /// Function name
    pub function: String,

    /// Input variable names, in source order; duplicates preserved
    pub inputs: Vec<String>,
}

impl fmt::Display for OpTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}({})", self.output, self.function, self.inputs.join(", "))
    }
}

// ============================================================================
// Variable classification
// ============================================================================

/// Derived variable sets for a full assignment sequence.
///
/// `BTreeSet` keeps iteration lexicographic, which is the order the
/// registration pass uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// All function names
    pub functions: BTreeSet<String>,

    /// All output names
    pub dependent: BTreeSet<String>,

    /// Union of all input names (multiplicities dropped)
    pub independent_all: BTreeSet<String>,

    /// Inputs that are never outputs
    pub pure_independent: BTreeSet<String>,

    /// Names that appear as both input and output
    pub intermediate: BTreeSet<String>,
}

// ============================================================================
// Version tokens
// ============================================================================

/// Version token for an operation-graph instance node.
///
/// Ordered by (millis, seq). The sequence component disambiguates executions
/// that land on the same clock tick; `GraphDatabase::mint_version` guarantees
/// strict growth per base name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VersionToken {
    /// Milliseconds since the Unix epoch
    pub millis: u64,

    /// Same-tick tie-break counter
    pub seq: u32,
}

impl VersionToken {
    /// The next token on the same tick.
    pub fn bump(self) -> Self {
        Self {
            millis: self.millis,
            seq: self.seq + 1,
        }
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.millis, self.seq)
    }
}

/// Render the full printable identity of a versioned instance.
pub fn instance_id(base: &str, version: VersionToken) -> String {
    format!("{}@{}", base, version)
}

// ============================================================================
// Node variants
// ============================================================================

/// Kind of data a variable node carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    PureIndependent,
    Intermediate,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PureIndependent => write!(f, "pure_independent"),
            Self::Intermediate => write!(f, "intermediate"),
        }
    }
}

/// Management-graph node: structural, unversioned, at most one per name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MgNode {
    /// Bookkeeping root created at bootstrap
    Root,

    /// A declared function
    Function {
        /// ISO 8601 registration timestamp
        registered_at: String,
    },

    /// A declared variable
    Variable { data_type: DataType },
}

/// Operation-graph node: a data block in the provenance log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OgNode {
    /// Bookkeeping root created at bootstrap
    Root,

    /// Unversioned seed or placeholder instance, available before any
    /// execution produced the variable. `created_at` is None when seeded
    /// structurally by configuration, Some when auto-healed at execution time.
    Seed {
        base: String,
        data_type: DataType,
        created_at: Option<String>,
    },

    /// Versioned instance produced by exactly one execution.
    Instance {
        base: String,
        version: VersionToken,
        created_at: String,
    },
}

impl OgNode {
    /// Base variable name, if this is a data block.
    pub fn base(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Seed { base, .. } | Self::Instance { base, .. } => Some(base),
        }
    }

    /// Version token, if versioned.
    pub fn version(&self) -> Option<VersionToken> {
        match self {
            Self::Instance { version, .. } => Some(*version),
            _ => None,
        }
    }

    /// Data type of the block. Instances are always intermediate: an output
    /// is by definition produced by some function.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Root => None,
            Self::Seed { data_type, .. } => Some(*data_type),
            Self::Instance { .. } => Some(DataType::Intermediate),
        }
    }
}

// ============================================================================
// Read-only summaries
// ============================================================================

/// One rendered node line for the summary surface.
#[derive(Debug, Clone)]
pub struct NodeLine {
    pub id: String,
    pub detail: String,
}

/// Read-only graph summary consumed by the `show` command (and any external
/// renderer). The core never renders beyond this.
#[derive(Debug, Clone)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<NodeLine>,
}
