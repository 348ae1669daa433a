pub mod entry;
pub mod identity;
pub mod version;

pub use entry::{Category, CodeEntry, TextLayout, category_file_name};
pub use identity::{ArchiveName, MethodIdentity, parse_archive_name};
pub use version::{ConfigVersion, date_stamp};
