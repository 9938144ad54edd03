//! FG-009: Snapshot persistence — load, save (atomic), path defaults.
//!
//! The database snapshot is a single JSON file round-tripping both graphs,
//! every node attribute, and every version token exactly. A missing snapshot
//! and a corrupt one are distinct fatal conditions.

use super::db::GraphDatabase;
use std::path::Path;

/// Default snapshot file name.
pub const DEFAULT_SNAPSHOT: &str = "fgdb.json";

/// Load a snapshot. Missing file and unparsable file both fail, with
/// messages telling the caller which happened.
pub fn load_snapshot(path: &Path) -> Result<GraphDatabase, String> {
    if !path.exists() {
        return Err(format!(
            "snapshot {} not found — run `grafar init` first",
            path.display()
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("corrupt snapshot {}: {}", path.display(), e))
}

/// Save a snapshot atomically (write to temp, then rename).
pub fn save_snapshot(path: &Path, db: &GraphDatabase) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create dir {}: {}", parent.display(), e))?;
        }
    }

    let json = serde_json::to_string_pretty(db).map_err(|e| format!("serialize error: {}", e))?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json)
        .map_err(|e| format!("cannot write {}: {}", tmp_path.display(), e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        format!(
            "cannot rename {} → {}: {}",
            tmp_path.display(),
            path.display(),
            e
        )
    })?;

    Ok(())
}
