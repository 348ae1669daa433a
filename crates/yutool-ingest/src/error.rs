//! Error types for release ingestion.

use std::path::PathBuf;
use thiserror::Error;

use crate::resolve::DictKind;

/// Errors that can occur while unpacking a release or reading its dictionaries.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Source Errors ===
    /// Source path does not exist.
    #[error("source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Source is neither a directory nor a `.zip` file.
    #[error("source must be a zip archive or a directory, got: {path}")]
    UnsupportedSource { path: PathBuf },

    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// The release has no dictionary directory.
    #[error("dictionary directory not found: {path}")]
    DictionaryDirNotFound { path: PathBuf },

    /// None of the candidate dictionary files exist.
    #[error("{kind} dictionary for '{method}' not found (tried {tried})")]
    DictionaryNotFound {
        kind: DictKind,
        method: String,
        tried: String,
    },

    /// The custom config declares no schema.
    #[error("no schema declaration found in {path}")]
    SchemaNotFound { path: PathBuf },

    // === Archive Errors ===
    /// An archive entry would be written outside the extraction root.
    #[error("illegal archive entry '{entry}': resolves outside {root}")]
    PathTraversal { entry: String, root: PathBuf },

    /// The archive could not be opened or an entry could not be read.
    #[error("failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The scratch directory could not be created.
    #[error("failed to create scratch directory: {source}")]
    ScratchDir {
        #[source]
        source: std::io::Error,
    },

    // === File Errors ===
    /// Failed to read a file or directory.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write a file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to decode a CSV record.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl IngestError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Whether the error means an input simply is not there.
    ///
    /// Used to downgrade a missing optional dictionary to a warning.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::SourceNotFound { .. }
            | Self::DirectoryNotFound { .. }
            | Self::DictionaryDirNotFound { .. }
            | Self::DictionaryNotFound { .. }
            | Self::SchemaNotFound { .. } => true,
            Self::FileRead { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
