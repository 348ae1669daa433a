//! Zip extraction into a scratch directory.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;
use zip::ZipArchive;

use crate::error::{IngestError, Result};

/// Whether `path` names a zip archive (by extension).
pub fn is_zip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Creates the scratch directory a release is unpacked into.
///
/// The directory and everything in it is removed when the returned value is
/// dropped.
pub fn scratch_dir() -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix("yutool_")
        .tempdir()
        .map_err(|source| IngestError::ScratchDir { source })
}

/// Maps an archive entry name onto a path strictly inside `root`.
///
/// Absolute names and names whose `..` components climb out of `root` are
/// rejected, as is a name that resolves to `root` itself.
pub fn resolve_entry_path(root: &Path, entry_name: &str) -> Result<PathBuf> {
    let traversal = || IngestError::PathTraversal {
        entry: entry_name.to_string(),
        root: root.to_path_buf(),
    };

    let mut relative = PathBuf::new();
    let mut depth = 0usize;
    for component in Path::new(entry_name).components() {
        match component {
            Component::Normal(part) => {
                relative.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(traversal());
                }
                relative.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return Err(traversal()),
        }
    }
    if depth == 0 {
        return Err(traversal());
    }
    Ok(root.join(relative))
}

/// Extracts every entry of `archive_path` below `dest`.
///
/// All entry names are checked before anything is written, so an archive
/// with a single escaping entry leaves `dest` untouched. Returns the number
/// of files written.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize> {
    let archive_error = |source| IngestError::Archive {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(|e| IngestError::read(archive_path, e))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(archive_error)?;

    for name in archive.file_names() {
        resolve_entry_path(dest, name)?;
    }

    let mut files_written = 0usize;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(archive_error)?;
        let output_path = resolve_entry_path(dest, entry.name())?;

        if entry.is_dir() {
            fs::create_dir_all(&output_path).map_err(|e| IngestError::write(&output_path, e))?;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| IngestError::write(parent, e))?;
        }
        let mut output =
            File::create(&output_path).map_err(|e| IngestError::write(&output_path, e))?;
        io::copy(&mut entry, &mut output).map_err(|e| IngestError::write(&output_path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&output_path, fs::Permissions::from_mode(mode & 0o7777))
                    .map_err(|e| IngestError::write(&output_path, e))?;
            }
        }

        files_written += 1;
    }

    tracing::debug!(
        archive = %archive_path.display(),
        dest = %dest.display(),
        files_written,
        "archive extracted"
    );
    Ok(files_written)
}
