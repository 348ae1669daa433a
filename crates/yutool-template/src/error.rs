//! Error types for template rendering.

use std::path::PathBuf;
use thiserror::Error;

use yutool_ingest::IngestError;

#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template exists on the search path.
    #[error("template for '{method}' not found (searched {searched})")]
    NotFound { method: String, searched: String },

    /// Failed to read a template or an export it refers to.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template is not valid JSON5 or does not match the expected shape.
    #[error("failed to parse template {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },

    /// The rendered document could not be serialized.
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the rendered document or the patched template.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
