//! Variant-aware file resolution.
//!
//! Every input a release provides comes as `<base>.<suffix>` with optional
//! specializations `<base>_<variant>.<suffix>`. A specialization wins when
//! it exists; otherwise the base file is used.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Dictionary files shipped in a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DictKind {
    Roots,
    Quick,
    Pop,
}

impl DictKind {
    pub const ALL: [DictKind; 3] = [DictKind::Roots, DictKind::Quick, DictKind::Pop];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Roots => "roots",
            Self::Quick => "quick",
            Self::Pop => "pop",
        }
    }

    /// `<kind>.dict.yaml`
    pub fn file_suffix(self) -> String {
        format!("{}.dict.yaml", self.as_str())
    }

    /// Pop dictionaries are not shipped with every method.
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::Pop)
    }
}

impl fmt::Display for DictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file picked by [`resolve_variant_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    /// The variant whose specialization was found; `None` for the base file.
    pub variant: Option<String>,
}

impl ResolvedFile {
    /// True when a variant was requested but the base file had to be used.
    pub fn is_fallback(&self, requested: Option<&str>) -> bool {
        requested.is_some() && self.variant.is_none()
    }
}

/// File names to try, most specific first.
pub fn variant_file_candidates(base: &str, variant: Option<&str>, suffix: &str) -> Vec<String> {
    let mut names = Vec::with_capacity(2);
    if let Some(variant) = variant.filter(|v| !v.is_empty()) {
        names.push(format!("{base}_{variant}.{suffix}"));
    }
    names.push(format!("{base}.{suffix}"));
    names
}

/// Finds `<base>_<variant>.<suffix>`, falling back to `<base>.<suffix>`.
///
/// Specificity takes precedence over directory order: a variant file in any
/// of `dirs` beats a base file in an earlier one.
pub fn resolve_variant_file(
    dirs: &[PathBuf],
    base: &str,
    variant: Option<&str>,
    suffix: &str,
) -> Option<ResolvedFile> {
    let variant = variant.filter(|v| !v.is_empty());
    for (position, name) in variant_file_candidates(base, variant, suffix)
        .into_iter()
        .enumerate()
    {
        let is_variant = variant.is_some() && position == 0;
        for dir in dirs {
            let path = dir.join(&name);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "resolved file");
                return Some(ResolvedFile {
                    path,
                    variant: if is_variant {
                        variant.map(str::to_string)
                    } else {
                        None
                    },
                });
            }
        }
    }
    None
}

/// Resolves a dictionary file in `dict_dir`, failing when neither candidate exists.
pub fn resolve_dictionary(
    dict_dir: &Path,
    base: &str,
    variant: Option<&str>,
    kind: DictKind,
) -> Result<ResolvedFile> {
    let suffix = kind.file_suffix();
    resolve_variant_file(&[dict_dir.to_path_buf()], base, variant, &suffix).ok_or_else(|| {
        let tried = variant_file_candidates(base, variant, &suffix)
            .iter()
            .map(|name| dict_dir.join(name).display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        IngestError::DictionaryNotFound {
            kind,
            method: base.to_string(),
            tried,
        }
    })
}

/// Lists the variants `v` for which `<base>_<v>.<suffix>` exists in `dir`.
pub fn discover_variants(dir: &Path, base: &str, suffix: &str) -> Result<BTreeSet<String>> {
    let mut variants = BTreeSet::new();
    let entries = fs::read_dir(dir).map_err(|e| IngestError::read(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::read(dir, e))?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(variant) = variant_of(name, base, suffix) {
            variants.insert(variant.to_string());
        }
    }
    Ok(variants)
}

fn variant_of<'a>(file_name: &'a str, base: &str, suffix: &str) -> Option<&'a str> {
    let rest = file_name.strip_prefix(base)?.strip_prefix('_')?;
    let variant = rest.strip_suffix(suffix)?.strip_suffix('.')?;
    (!variant.is_empty()).then_some(variant)
}
