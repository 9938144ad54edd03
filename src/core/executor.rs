//! FG-007: Execution engine — replays assignments as versioned provenance.
//!
//! Each executed assignment mints exactly one new instance node for its
//! output and one provenance edge per input occurrence. Missing inputs and
//! unregistered functions are auto-healed with a warning; a failing step is
//! logged and skipped, never aborting the batch.

use super::db::GraphDatabase;
use super::registrar;
use super::types::{DataType, OgNode, OpTriple};

/// Result of one execute batch.
#[derive(Debug, Clone, Default)]
pub struct ExecuteReport {
    /// Printable ids of the instances minted, in execution order
    pub executed: Vec<String>,

    /// Steps skipped after an execution failure
    pub skipped: u32,

    /// Warnings emitted along the way (auto-heals, auto-registrations)
    pub warnings: Vec<String>,
}

/// Execute a single assignment at the given time, returning the printable id
/// of the new output instance.
pub fn execute_one(
    db: &mut GraphDatabase,
    triple: &OpTriple,
    now_millis: u64,
    now_iso: &str,
    warnings: &mut Vec<String>,
) -> Result<String, String> {
    // 1. Auto-heal inputs with no data block at all
    for input in &triple.inputs {
        if db.has_instance_of(input) {
            continue;
        }
        db.operation.insert_node(
            input,
            OgNode::Seed {
                base: input.clone(),
                data_type: DataType::Intermediate,
                created_at: Some(now_iso.to_string()),
            },
        );
        warnings.push(format!(
            "input '{}' was never registered — added intermediate placeholder",
            input
        ));
    }

    // 2. Auto-register the function
    if !db.management.contains(&triple.function) {
        registrar::register_function(db, &triple.function, now_iso);
        warnings.push(format!(
            "function '{}' was never registered — registered automatically",
            triple.function
        ));
    }

    // 3. Resolve latest instances before minting the output, so a variable
    //    feeding its own producer resolves to its previous version
    let mut resolved = Vec::with_capacity(triple.inputs.len());
    for input in &triple.inputs {
        let id = db
            .latest_instance(input)
            .ok_or_else(|| format!("no instance resolvable for input '{}'", input))?;
        resolved.push(id);
    }

    // 4–5. Mint a fresh token and create the output instance
    let version = db.mint_version(&triple.output, now_millis);
    let output_id = db.instance_id_for(&triple.output, version);
    db.operation.insert_fresh_node(
        &output_id,
        OgNode::Instance {
            base: triple.output.clone(),
            version,
            created_at: now_iso.to_string(),
        },
    )?;

    // 6. One provenance edge per input occurrence, duplicates included
    for input_id in &resolved {
        db.operation.add_edge(input_id, &output_id);
    }

    Ok(output_id)
}

/// Execute a batch of assignments. Every step is attempted; failures are
/// recorded and skipped. Already-applied mutations are never rolled back —
/// each completed step is independently valid.
pub fn execute_batch<F>(
    db: &mut GraphDatabase,
    triples: &[OpTriple],
    mut now: F,
) -> ExecuteReport
where
    F: FnMut() -> (u64, String),
{
    let mut report = ExecuteReport::default();

    for (i, triple) in triples.iter().enumerate() {
        let (now_millis, now_iso) = now();
        match execute_one(db, triple, now_millis, &now_iso, &mut report.warnings) {
            Ok(id) => {
                println!("  [{}] {} -> {}", i + 1, triple, id);
                report.executed.push(id);
            }
            Err(e) => {
                eprintln!("  [{}] {} FAILED: {}", i + 1, triple, e);
                report.skipped += 1;
            }
        }
    }

    report
}
