//! Release ingestion: unpacking, schema lookup and dictionary parsing.

pub mod archive;
pub mod error;
pub mod layout;
pub mod resolve;
pub mod root_csv;
pub mod roots;
pub mod schema;
pub mod shortcuts;

pub use archive::{extract_archive, is_zip_path, resolve_entry_path, scratch_dir};
pub use error::{IngestError, Result};
pub use layout::{
    CUSTOM_CONFIG_FILE, DICTIONARY_DIR, OpenedRelease, ReleaseLayout, SCHEMA_DIR, open_release,
};
pub use resolve::{
    DictKind, ResolvedFile, discover_variants, resolve_dictionary, resolve_variant_file,
    variant_file_candidates,
};
pub use root_csv::read_root_csv;
pub use roots::{RootKeyStrategy, RootParse, parse_roots, read_roots};
pub use schema::{read_schema_name, schema_candidates, select_schema_name};
pub use shortcuts::{ShortcutClass, ShortcutSplit, classify_line, parse_shortcuts, read_shortcuts};
