//! Method identity: which dictionaries to open and how outputs are named.

use std::fmt;
use std::path::Path;

/// The input method a run exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodIdentity {
    /// Schema name without variant, selects `<base>.*.dict.yaml`.
    pub base_name: String,
    /// Variant suffix, selects `<base>_<variant>.*.dict.yaml` when present.
    pub variant: Option<String>,
    /// Release version taken from the archive name or the command line.
    pub release_version: Option<String>,
}

impl MethodIdentity {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            variant: None,
            release_version: None,
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: Option<String>) -> Self {
        self.variant = variant.filter(|value| !value.is_empty());
        self
    }

    #[must_use]
    pub fn with_release_version(mut self, version: Option<String>) -> Self {
        self.release_version = version.filter(|value| !value.is_empty());
        self
    }

    /// Same method and release, different variant.
    #[must_use]
    pub fn for_variant(&self, variant: Option<&str>) -> Self {
        self.clone().with_variant(variant.map(str::to_string))
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// `<base>[_<variant>]`
    pub fn qualified_name(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{}_{variant}", self.base_name),
            None => self.base_name.clone(),
        }
    }

    /// `<base>[_<variant>][_<version>].json5`
    pub fn document_file_name(&self) -> String {
        match &self.release_version {
            Some(version) => format!("{}_{version}.json5", self.qualified_name()),
            None => format!("{}.json5", self.qualified_name()),
        }
    }
}

impl fmt::Display for MethodIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())?;
        if let Some(version) = &self.release_version {
            write!(f, " ({version})")?;
        }
        Ok(())
    }
}

/// Identity parts encoded in a release archive's file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveName {
    pub variant: Option<String>,
    pub release_version: Option<String>,
}

/// Parses `<base>_<version>.zip` or `<base>_<variant>_<version>.zip`.
///
/// When the stem does not start with `<base>_`, everything before the first
/// underscore is treated as the method name.
pub fn parse_archive_name(path: &Path, base_name: &str) -> ArchiveName {
    let Some(stem) = path.file_name().and_then(|name| name.to_str()) else {
        return ArchiveName::default();
    };
    let stem = strip_zip_extension(stem);

    let prefix = format!("{base_name}_");
    let rest = match stem.strip_prefix(&prefix) {
        Some(rest) => rest,
        None => match stem.split_once('_') {
            Some((_, rest)) => rest,
            None => return ArchiveName::default(),
        },
    };
    if rest.is_empty() {
        return ArchiveName::default();
    }

    match rest.rsplit_once('_') {
        Some((variant, version)) if !variant.is_empty() && !version.is_empty() => ArchiveName {
            variant: Some(variant.to_string()),
            release_version: Some(version.to_string()),
        },
        _ => ArchiveName {
            variant: None,
            release_version: Some(rest.to_string()),
        },
    }
}

fn strip_zip_extension(name: &str) -> &str {
    let len = name.len();
    if len >= 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".zip") {
        &name[..len - 4]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_file_name_includes_optional_parts() {
        let base = MethodIdentity::new("yustar");
        assert_eq!(base.document_file_name(), "yustar.json5");

        let versioned = base.clone().with_release_version(Some("v3.10.0".into()));
        assert_eq!(versioned.document_file_name(), "yustar_v3.10.0.json5");

        let variant = versioned.for_variant(Some("tw"));
        assert_eq!(variant.document_file_name(), "yustar_tw_v3.10.0.json5");
        assert_eq!(variant.qualified_name(), "yustar_tw");
    }

    #[test]
    fn empty_overrides_are_ignored() {
        let identity = MethodIdentity::new("yuhao")
            .with_variant(Some(String::new()))
            .with_release_version(Some(String::new()));
        assert_eq!(identity.variant, None);
        assert_eq!(identity.release_version, None);
    }

    #[test]
    fn archive_name_with_version() {
        let parsed = parse_archive_name(Path::new("/tmp/yustar_v3.10.0.zip"), "yustar");
        assert_eq!(parsed.variant, None);
        assert_eq!(parsed.release_version.as_deref(), Some("v3.10.0"));
    }

    #[test]
    fn archive_name_with_variant_and_version() {
        let parsed = parse_archive_name(Path::new("yustar_tw_v3.10.0.ZIP"), "yustar");
        assert_eq!(parsed.variant.as_deref(), Some("tw"));
        assert_eq!(parsed.release_version.as_deref(), Some("v3.10.0"));
    }

    #[test]
    fn archive_name_with_other_prefix() {
        let parsed = parse_archive_name(Path::new("release_2026.zip"), "yustar");
        assert_eq!(parsed.release_version.as_deref(), Some("2026"));

        let bare = parse_archive_name(Path::new("yustar.zip"), "yustar");
        assert_eq!(bare, ArchiveName::default());
    }
}
