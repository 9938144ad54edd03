//! FG-010: CLI subcommands — init, analyze, configure, execute, show.

use crate::core::db::GraphDatabase;
use crate::core::types::{GraphSummary, OpTriple};
use crate::core::{classifier, clock, compiler, executor, parser, registrar, state};
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bootstrap an empty graph database snapshot
    Init {
        /// Snapshot file path
        #[arg(long, default_value = state::DEFAULT_SNAPSHOT)]
        db: PathBuf,
    },

    /// Parse an operation file and show the derived variable classification
    Analyze {
        /// Input operation file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Register functions and variables from an operation file
    Configure {
        /// Input operation file
        #[arg(short, long)]
        input: PathBuf,

        /// Snapshot file path
        #[arg(long, default_value = state::DEFAULT_SNAPSHOT)]
        db: PathBuf,
    },

    /// Execute operations, recording versioned provenance
    Execute {
        /// Input operation file
        #[arg(short, long)]
        input: PathBuf,

        /// Snapshot file path
        #[arg(long, default_value = state::DEFAULT_SNAPSHOT)]
        db: PathBuf,

        /// Directory for the compiled plan script
        #[arg(long, default_value = ".")]
        plan_dir: PathBuf,
    },

    /// Show graph summaries from the snapshot
    Show {
        /// Snapshot file path
        #[arg(long, default_value = state::DEFAULT_SNAPSHOT)]
        db: PathBuf,

        /// Show only the management graph
        #[arg(long, conflicts_with = "og_only")]
        mg_only: bool,

        /// Show only the operation graph
        #[arg(long)]
        og_only: bool,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Init { db } => cmd_init(&db),
        Commands::Analyze { input } => cmd_analyze(&input),
        Commands::Configure { input, db } => cmd_configure(&input, &db),
        Commands::Execute {
            input,
            db,
            plan_dir,
        } => cmd_execute(&input, &db, &plan_dir),
        Commands::Show {
            db,
            mg_only,
            og_only,
        } => cmd_show(&db, mg_only, og_only),
    }
}

fn cmd_init(db_path: &Path) -> Result<(), String> {
    if db_path.exists() {
        return Err(format!("{} already exists", db_path.display()));
    }
    let db = GraphDatabase::new(&clock::now_iso8601());
    state::save_snapshot(db_path, &db)?;
    println!("Initialized graph database at {}", db_path.display());
    println!("  Management graph: 1 node (root)");
    println!("  Operation graph:  1 node (root)");
    Ok(())
}

/// Parse an operation file, surfacing per-line diagnostics on stderr.
/// Zero valid triples is fatal for the run.
fn parse_operations(input: &Path) -> Result<Vec<OpTriple>, String> {
    let outcome = parser::parse_operation_file(input)?;
    for d in &outcome.diagnostics {
        eprintln!("  warning: {}", d);
    }
    if outcome.triples.is_empty() {
        return Err(format!(
            "no valid operations found in {}",
            input.display()
        ));
    }
    Ok(outcome.triples)
}

fn cmd_analyze(input: &Path) -> Result<(), String> {
    let triples = parse_operations(input)?;

    println!("Operations ({}):", triples.len());
    for (i, t) in triples.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, t);
    }

    let cls = classifier::classify(&triples);
    let join = |s: &std::collections::BTreeSet<String>| {
        s.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    println!();
    println!("Functions:              {} — {}", cls.functions.len(), join(&cls.functions));
    println!("Dependent variables:    {} — {}", cls.dependent.len(), join(&cls.dependent));
    println!("All independent vars:   {} — {}", cls.independent_all.len(), join(&cls.independent_all));
    println!("Pure independent vars:  {} — {}", cls.pure_independent.len(), join(&cls.pure_independent));
    println!("Intermediate variables: {} — {}", cls.intermediate.len(), join(&cls.intermediate));
    Ok(())
}

fn cmd_configure(input: &Path, db_path: &Path) -> Result<(), String> {
    let mut db = state::load_snapshot(db_path)?;
    let triples = parse_operations(input)?;
    println!("Parsed {} operation(s) from {}", triples.len(), input.display());

    let report = registrar::configure(&mut db, &triples, &clock::now_iso8601());
    state::save_snapshot(db_path, &db)?;

    println!(
        "Registered: {} function(s), {} variable(s), {} placeholder(s), {} edge(s)",
        report.functions_added,
        report.variables_added,
        report.placeholders_added,
        report.mg_edges_added
    );
    print_graph_counts(&db);
    Ok(())
}

fn cmd_execute(input: &Path, db_path: &Path, plan_dir: &Path) -> Result<(), String> {
    let mut db = state::load_snapshot(db_path)?;
    let triples = parse_operations(input)?;
    println!("Parsed {} operation(s) from {}", triples.len(), input.display());

    // The plan script is always generated, independent of the graphs
    let plan = compiler::compile(&triples, &compiler::plan_name_from_source(input));
    let script_path = compiler::write_plan_script(plan_dir, &plan)?;
    println!("Plan script written to {}", script_path.display());

    println!("Executing:");
    let report = executor::execute_batch(&mut db, &triples, || {
        (clock::now_millis(), clock::now_iso8601())
    });
    for w in &report.warnings {
        eprintln!("  warning: {}", w);
    }

    // Completed steps are kept even when later ones were skipped
    state::save_snapshot(db_path, &db)?;

    println!();
    if !report.executed.is_empty() {
        let shown: Vec<_> = report.executed.iter().take(5).cloned().collect();
        let ellipsis = if report.executed.len() > 5 { ", ..." } else { "" };
        println!("Generated instances: {}{}", shown.join(", "), ellipsis);
    }
    print_graph_counts(&db);

    if report.skipped > 0 {
        println!(
            "Execution completed with skips: {} executed, {} skipped",
            report.executed.len(),
            report.skipped
        );
        return Err(format!("{} operation(s) skipped", report.skipped));
    }
    println!("Execution complete: {} operation(s) recorded", report.executed.len());
    Ok(())
}

fn cmd_show(db_path: &Path, mg_only: bool, og_only: bool) -> Result<(), String> {
    let db = state::load_snapshot(db_path)?;

    if db.is_empty() {
        println!("Graph database is empty (root nodes only).");
        println!("Run `grafar configure` and `grafar execute` first.");
    }

    if !og_only {
        print_summary("Management Graph (MG)", &db.mg_summary());
    }
    if !mg_only {
        print_summary("Operation Graph (OG)", &db.og_summary());
    }
    Ok(())
}

fn print_summary(title: &str, summary: &GraphSummary) {
    println!("{}: {} node(s), {} edge(s)", title, summary.node_count, summary.edge_count);
    for line in &summary.nodes {
        println!("  {} — {}", line.id, line.detail);
    }
    println!();
}

fn print_graph_counts(db: &GraphDatabase) {
    println!(
        "Management graph: {} node(s), {} edge(s)",
        db.management.node_count(),
        db.management.edge_count()
    );
    println!(
        "Operation graph:  {} node(s), {} edge(s)",
        db.operation.node_count(),
        db.operation.edge_count()
    );
}
