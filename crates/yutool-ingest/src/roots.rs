//! Root dictionary parsing.
//!
//! Root lines look like `+ <code> <x> <chars> ... <key>` where the last
//! field carries the key that prefixes `code`. Every character in `<chars>`
//! becomes its own entry.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use yutool_model::CodeEntry;

use crate::error::{IngestError, Result};

/// Prefix carried by the key field in root dictionaries.
pub const LM_PREFIX: &str = "/lm";

/// How the key is cut out of the last field of a root line.
///
/// Releases disagree here: older ones strip a literal `/lm`, newer ones drop
/// the first three characters whatever they are. The two only differ when
/// the field does not start with `/lm`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootKeyStrategy {
    /// Strip a leading `/lm` when present, keep the field otherwise.
    #[default]
    StripLmPrefix,
    /// Drop this many leading characters unconditionally.
    DropLeadingChars(usize),
}

impl RootKeyStrategy {
    pub const FIXED_THREE: Self = Self::DropLeadingChars(3);

    pub fn extract<'a>(&self, field: &'a str) -> &'a str {
        match *self {
            Self::StripLmPrefix => field.strip_prefix(LM_PREFIX).unwrap_or(field),
            Self::DropLeadingChars(count) => field
                .char_indices()
                .nth(count)
                .map_or("", |(idx, _)| &field[idx..]),
        }
    }

    /// Whether the two known rules produce different keys for `field`.
    pub fn rules_diverge(field: &str) -> bool {
        Self::StripLmPrefix.extract(field) != Self::FIXED_THREE.extract(field)
    }
}

/// Result of parsing a root dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootParse {
    /// `(key + code, single character)` entries in file order.
    pub entries: Vec<CodeEntry>,
    /// Root lines accepted.
    pub lines: usize,
    /// Accepted lines whose key depends on the chosen strategy.
    pub divergent_keys: usize,
}

/// Parses one root line, appending its entries to `out`.
///
/// Returns `None` for lines that are not root lines. Otherwise returns the
/// raw key field.
pub fn parse_root_line<'a>(
    line: &'a str,
    strategy: RootKeyStrategy,
    out: &mut Vec<CodeEntry>,
) -> Option<&'a str> {
    if !line.starts_with('+') {
        return None;
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return None;
    }
    let code = fields[1];
    let chars = fields[3];
    let key_field = fields[fields.len() - 1];
    let composite = format!("{}{code}", strategy.extract(key_field));
    out.extend(
        chars
            .chars()
            .map(|ch| CodeEntry::new(composite.clone(), ch.to_string())),
    );
    Some(key_field)
}

pub fn parse_roots<R: BufRead>(reader: R, strategy: RootKeyStrategy) -> io::Result<RootParse> {
    let mut parsed = RootParse::default();
    for line in reader.lines() {
        let line = line?;
        if let Some(key_field) = parse_root_line(&line, strategy, &mut parsed.entries) {
            parsed.lines += 1;
            if RootKeyStrategy::rules_diverge(key_field) {
                parsed.divergent_keys += 1;
            }
        }
    }
    Ok(parsed)
}

/// Reads and parses the root dictionary at `path`.
pub fn read_roots(path: &Path, strategy: RootKeyStrategy) -> Result<RootParse> {
    let file = File::open(path).map_err(|e| IngestError::read(path, e))?;
    let parsed =
        parse_roots(BufReader::new(file), strategy).map_err(|e| IngestError::read(path, e))?;
    if parsed.divergent_keys > 0 {
        tracing::warn!(
            path = %path.display(),
            divergent_keys = parsed.divergent_keys,
            ?strategy,
            "root key fields without '/lm' prefix; key rules disagree on these lines"
        );
    }
    Ok(parsed)
}
