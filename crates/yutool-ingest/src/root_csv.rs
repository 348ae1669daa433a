//! External root mapping in CSV form (`font,code,pinyin`).

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use yutool_model::CodeEntry;

use crate::error::{IngestError, Result};

/// Reads root entries from a CSV with a header row.
///
/// Column 0 is the root, column 1 its code (lower-cased). Other columns are
/// ignored, as are rows missing either value.
pub fn read_root_csv(path: &Path) -> Result<Vec<CodeEntry>> {
    let file = File::open(path).map_err(|e| IngestError::read(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let (Some(text), Some(code)) = (record.get(0), record.get(1)) else {
            continue;
        };
        let text = text.trim_matches('\u{feff}');
        if text.is_empty() || code.is_empty() {
            continue;
        }
        entries.push(CodeEntry::new(code.to_lowercase(), text));
    }
    tracing::debug!(path = %path.display(), entries = entries.len(), "root csv read");
    Ok(entries)
}
