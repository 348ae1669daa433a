//! Active schema lookup in `default.custom.yaml`.

use std::fs;
use std::path::Path;

use crate::error::{IngestError, Result};

const SCHEMA_MARKER: &str = "- schema:";

/// Schema names declared in `content`, in file order.
///
/// Blank lines and `#` comment lines are ignored; for every other line
/// containing `- schema:` the first token after the marker is a candidate.
pub fn schema_candidates(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let idx = line.find(SCHEMA_MARKER)?;
            line[idx + SCHEMA_MARKER.len()..].split_whitespace().next()
        })
        .collect()
}

/// The shortest declared schema name (first one on ties).
///
/// Variants are usually spelled `<base>_<variant>`, so the shortest name is
/// the base method.
pub fn select_schema_name(content: &str) -> Option<String> {
    schema_candidates(content)
        .into_iter()
        .min_by_key(|name| name.chars().count())
        .map(str::to_string)
}

/// Reads the config at `path` and returns the base schema name.
pub fn read_schema_name(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| IngestError::read(path, e))?;
    select_schema_name(&content).ok_or_else(|| IngestError::SchemaNotFound {
        path: path.to_path_buf(),
    })
}
