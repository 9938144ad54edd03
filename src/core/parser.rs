//! FG-002: Assignment parsing.
//!
//! Turns operation-file text into `(output, function, inputs)` triples,
//! preserving file order. Malformed lines are dropped with a diagnostic;
//! parsing never fails as a whole. The caller decides whether an empty
//! result is fatal.

use super::types::OpTriple;
use regex::Regex;
use std::path::Path;

/// Result of parsing a full operation file.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Valid triples in source order
    pub triples: Vec<OpTriple>,

    /// One message per dropped line
    pub diagnostics: Vec<String>,
}

/// Parse newline-delimited assignment text.
///
/// Recognized lines match `ident = ident(ident, ident, ...)` where
/// identifiers are alphanumeric/underscore. Blank lines and `#` comments are
/// skipped silently. Duplicate inputs within one assignment are preserved.
pub fn parse_lines(text: &str) -> ParseOutcome {
    // Anchored both ends so trailing garbage invalidates the line.
    let pattern = Regex::new(
        r"^([A-Za-z0-9_]+)\s*=\s*([A-Za-z0-9_]+)\s*\(\s*([A-Za-z0-9_,\s]+?)\s*\)$",
    )
    .expect("assignment pattern is valid");

    let mut outcome = ParseOutcome::default();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(caps) = pattern.captures(line) else {
            outcome.diagnostics.push(format!(
                "line {}: cannot parse '{}' — expected output = function(inputs)",
                lineno + 1,
                line
            ));
            continue;
        };

        let inputs: Vec<String> = caps[3]
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();
        // The charclass admits spaces, so `add(x y)` reaches here; names must
        // still be single identifiers
        if inputs.iter().any(|i| !is_identifier(i)) {
            outcome.diagnostics.push(format!(
                "line {}: invalid input list in '{}'",
                lineno + 1,
                line
            ));
            continue;
        }

        outcome.triples.push(OpTriple {
            output: caps[1].to_string(),
            function: caps[2].to_string(),
            inputs,
        });
    }

    outcome
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse an operation file from disk.
pub fn parse_operation_file(path: &Path) -> Result<ParseOutcome, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(parse_lines(&content))
}
