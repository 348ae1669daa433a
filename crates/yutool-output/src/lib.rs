//! Deterministic text exports.

pub mod error;
pub mod writer;

pub use error::{OutputError, Result};
pub use writer::{
    ExportedFile, WriteOptions, dedupe_by_code, ensure_dir, prepare_entries, sort_entries,
    write_category, write_entries, write_entries_to,
};
