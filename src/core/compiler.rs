//! FG-008: Plan compilation — the external-execution script artifact.
//!
//! Compiles the parsed assignment list into an ordered invocation plan and
//! renders it as a shell script, one step per line. Steps keep the exact
//! source order; the source file's order is taken as a valid dependency
//! order, a precondition the caller must satisfy. The compiler never touches
//! the graph database.

use super::types::OpTriple;
use std::path::{Path, PathBuf};

/// One external invocation: a function applied to its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub function: String,
    pub args: Vec<String>,
}

/// Ordered external-execution plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub name: String,
    pub steps: Vec<PlanStep>,
}

/// Compile triples into a plan, one step per triple in parse order.
pub fn compile(triples: &[OpTriple], plan_name: &str) -> Plan {
    let steps = triples
        .iter()
        .map(|t| PlanStep {
            function: t.function.clone(),
            args: t.inputs.clone(),
        })
        .collect();
    Plan {
        name: plan_name.to_string(),
        steps,
    }
}

/// Derive a plan name from the source operation file (its base name).
pub fn plan_name_from_source(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "plan".to_string())
}

/// Render the plan as an executable script, one invocation per line.
pub fn render_script(plan: &Plan) -> String {
    let mut script = String::new();
    script.push_str("#!/bin/sh\n");
    script.push_str(&format!(
        "# plan '{}' — {} step(s), source order\n",
        plan.name,
        plan.steps.len()
    ));
    for step in &plan.steps {
        script.push_str(&step.function);
        for arg in &step.args {
            script.push(' ');
            script.push_str(arg);
        }
        script.push('\n');
    }
    script
}

/// Path of the script artifact for a plan within a directory.
pub fn plan_script_path(dir: &Path, plan_name: &str) -> PathBuf {
    dir.join(format!("{}.sh", plan_name))
}

/// Write the plan script to disk, returning the written path.
pub fn write_plan_script(dir: &Path, plan: &Plan) -> Result<PathBuf, String> {
    let path = plan_script_path(dir, &plan.name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create dir {}: {}", parent.display(), e))?;
    }
    std::fs::write(&path, render_script(plan))
        .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser;

    fn example_triples() -> Vec<OpTriple> {
        parser::parse_lines("z = add(x, y)\nw = mul(z, x)\n").triples
    }

    #[test]
    fn test_fg008_compile_preserves_order() {
        let plan = compile(&example_triples(), "operation");
        assert_eq!(plan.name, "operation");
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].function, "add");
        assert_eq!(plan.steps[0].args, vec!["x", "y"]);
        assert_eq!(plan.steps[1].function, "mul");
        assert_eq!(plan.steps[1].args, vec!["z", "x"]);
    }

    #[test]
    fn test_fg008_compile_no_reordering() {
        // Reverse-dependency order stays as written — file order is authoritative
        let triples = parser::parse_lines("w = mul(z, x)\nz = add(x, y)\n").triples;
        let plan = compile(&triples, "p");
        assert_eq!(plan.steps[0].function, "mul");
        assert_eq!(plan.steps[1].function, "add");
    }

    #[test]
    fn test_fg008_compile_empty() {
        let plan = compile(&[], "empty");
        assert!(plan.steps.is_empty());
    }

    #[test]
    fn test_fg008_compile_duplicate_triples_kept() {
        let triples = parser::parse_lines("z = add(x, y)\nz = add(x, y)\n").triples;
        let plan = compile(&triples, "p");
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0], plan.steps[1]);
    }

    #[test]
    fn test_fg008_plan_name_from_source() {
        assert_eq!(plan_name_from_source(Path::new("ops/operation.txt")), "operation");
        assert_eq!(plan_name_from_source(Path::new("daily_run.txt")), "daily_run");
    }

    #[test]
    fn test_fg008_render_script() {
        let plan = compile(&example_triples(), "operation");
        let script = render_script(&plan);
        let lines: Vec<_> = script.lines().collect();
        assert_eq!(lines[0], "#!/bin/sh");
        assert!(lines[1].contains("operation"));
        assert!(lines[1].contains("2 step(s)"));
        assert_eq!(lines[2], "add x y");
        assert_eq!(lines[3], "mul z x");
    }

    #[test]
    fn test_fg008_write_plan_script() {
        let dir = tempfile::tempdir().unwrap();
        let plan = compile(&example_triples(), "operation");
        let path = write_plan_script(dir.path(), &plan).unwrap();
        assert_eq!(path, dir.path().join("operation.sh"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("add x y"));
    }
}
