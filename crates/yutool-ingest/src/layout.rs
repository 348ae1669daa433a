//! Locating the schema and dictionary directories of a release.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::archive::{extract_archive, is_zip_path, scratch_dir};
use crate::error::{IngestError, Result};

/// Directory holding the schema config inside a release.
pub const SCHEMA_DIR: &str = "schema";
/// Dictionary directory below the schema directory.
pub const DICTIONARY_DIR: &str = "yuhao";
/// Config file declaring the active schemas.
pub const CUSTOM_CONFIG_FILE: &str = "default.custom.yaml";

/// Paths inside an unpacked release.
#[derive(Debug, Clone)]
pub struct ReleaseLayout {
    pub root: PathBuf,
    pub schema_dir: PathBuf,
    pub dictionary_dir: PathBuf,
}

impl ReleaseLayout {
    /// Accepts either the release root (containing `schema/`) or the schema
    /// directory itself.
    pub fn locate(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(IngestError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }
        let nested = root.join(SCHEMA_DIR);
        let schema_dir = if nested.is_dir() {
            nested
        } else {
            root.to_path_buf()
        };
        let dictionary_dir = schema_dir.join(DICTIONARY_DIR);
        if !dictionary_dir.is_dir() {
            return Err(IngestError::DictionaryDirNotFound {
                path: dictionary_dir,
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
            schema_dir,
            dictionary_dir,
        })
    }

    pub fn custom_config(&self) -> PathBuf {
        self.schema_dir.join(CUSTOM_CONFIG_FILE)
    }
}

/// A release ready to be read.
///
/// Archives are unpacked into a scratch directory that lives exactly as long
/// as this value.
#[derive(Debug)]
pub struct OpenedRelease {
    pub layout: ReleaseLayout,
    /// The archive the release came from, if any.
    pub archive: Option<PathBuf>,
    pub files_extracted: usize,
    _scratch: Option<TempDir>,
}

impl OpenedRelease {
    pub fn is_archive(&self) -> bool {
        self.archive.is_some()
    }
}

/// Opens a release from a `.zip` archive or an already unpacked directory.
pub fn open_release(source: &Path) -> Result<OpenedRelease> {
    if !source.exists() {
        return Err(IngestError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    if source.is_dir() {
        return Ok(OpenedRelease {
            layout: ReleaseLayout::locate(source)?,
            archive: None,
            files_extracted: 0,
            _scratch: None,
        });
    }

    if !is_zip_path(source) {
        return Err(IngestError::UnsupportedSource {
            path: source.to_path_buf(),
        });
    }

    let scratch = scratch_dir()?;
    let files_extracted = extract_archive(source, scratch.path())?;
    let layout = ReleaseLayout::locate(scratch.path())?;
    Ok(OpenedRelease {
        layout,
        archive: Some(source.to_path_buf()),
        files_extracted,
        _scratch: Some(scratch),
    })
}
