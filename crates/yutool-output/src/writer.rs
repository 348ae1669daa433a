//! Sorted, optionally deduplicated, tab-separated exports.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use yutool_model::{Category, CodeEntry, TextLayout};

use crate::error::{OutputError, Result};

/// How a list of entries is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub layout: TextLayout,
    /// Keep only the first entry per code (after sorting).
    pub dedupe: bool,
}

impl WriteOptions {
    pub fn for_category(category: Category) -> Self {
        Self {
            layout: category.layout(),
            dedupe: category.deduplicates(),
        }
    }
}

/// Sorts by code length, then code. Entries with equal codes keep their order.
pub fn sort_entries(entries: &mut [CodeEntry]) {
    entries.sort_by(|a, b| {
        a.code_len()
            .cmp(&b.code_len())
            .then_with(|| a.code.cmp(&b.code))
    });
}

/// Drops every entry whose code was already seen.
pub fn dedupe_by_code(entries: Vec<CodeEntry>) -> Vec<CodeEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.code.clone()))
        .collect()
}

/// Sorts (and dedupes) `entries` as they would be written.
pub fn prepare_entries(mut entries: Vec<CodeEntry>, options: WriteOptions) -> Vec<CodeEntry> {
    sort_entries(&mut entries);
    if options.dedupe {
        dedupe_by_code(entries)
    } else {
        entries
    }
}

/// Writes `entries` to `out`, one newline-terminated line each. Returns the
/// number of lines written.
pub fn write_entries_to<W: Write>(
    out: &mut W,
    entries: Vec<CodeEntry>,
    options: WriteOptions,
) -> std::io::Result<usize> {
    let prepared = prepare_entries(entries, options);
    for entry in &prepared {
        writeln!(out, "{}", options.layout.format(entry))?;
    }
    Ok(prepared.len())
}

/// Creates or truncates `path` and writes `entries` into it.
pub fn write_entries(path: &Path, entries: Vec<CodeEntry>, options: WriteOptions) -> Result<usize> {
    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_error)?;
    let mut out = BufWriter::new(file);
    let lines = write_entries_to(&mut out, entries, options).map_err(write_error)?;
    out.flush().map_err(write_error)?;
    Ok(lines)
}

/// Creates `dir` (and parents) when missing.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// A written text export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub category: Category,
    pub variant: Option<String>,
    pub path: PathBuf,
    pub lines: usize,
}

/// Writes one category export (`<stem>[_<variant>].txt`) into `dir`.
pub fn write_category(
    dir: &Path,
    category: Category,
    variant: Option<&str>,
    entries: Vec<CodeEntry>,
) -> Result<ExportedFile> {
    let path = dir.join(category.file_name(variant));
    let lines = write_entries(&path, entries, WriteOptions::for_category(category))?;
    tracing::debug!(
        category = %category,
        path = %path.display(),
        lines,
        "export written"
    );
    Ok(ExportedFile {
        category,
        variant: variant.map(str::to_string),
        path,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<CodeEntry> {
        pairs
            .iter()
            .map(|(code, text)| CodeEntry::new(*code, *text))
            .collect()
    }

    fn render(input: Vec<CodeEntry>, options: WriteOptions) -> String {
        let mut out = Vec::new();
        write_entries_to(&mut out, input, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_sort_by_length_then_code() {
        let mut list = entries(&[("abc", "1"), ("b", "2"), ("ab", "3"), ("a", "4"), ("aa", "5")]);
        sort_entries(&mut list);
        let codes: Vec<&str> = list.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["a", "b", "aa", "ab", "abc"]);
    }

    #[test]
    fn test_equal_codes_keep_insertion_order() {
        let out = render(
            entries(&[("xy", "second-code"), ("ab", "first"), ("ab", "then")]),
            WriteOptions::default(),
        );
        assert_eq!(out, "ab\tfirst\nab\tthen\nxy\tsecond-code\n");
    }

    #[test]
    fn test_dedupe_keeps_first_per_code() {
        let out = render(
            entries(&[("ab", "x"), ("ab", "y"), ("cd", "z")]),
            WriteOptions {
                dedupe: true,
                ..WriteOptions::default()
            },
        );
        assert_eq!(out, "ab\tx\ncd\tz\n");
    }

    #[test]
    fn test_roots_are_reversed_and_not_deduped() {
        let out = render(
            entries(&[("Gga", "土"), ("Gga", "士"), ("Ha", "口")]),
            WriteOptions::for_category(Category::Roots),
        );
        assert_eq!(out, "口\tHa\n土\tGga\n士\tGga\n");
    }

    #[test]
    fn test_write_category_names_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let exported = write_category(
            dir.path(),
            Category::QuickWords,
            Some("tw"),
            entries(&[("ni", "你好"), ("ni", "你们")]),
        )
        .unwrap();
        assert_eq!(exported.path, dir.path().join("quick_words_tw.txt"));
        assert_eq!(exported.lines, 1);
        assert_eq!(fs::read_to_string(&exported.path).unwrap(), "ni\t你好\n");
    }

    #[test]
    fn test_empty_export_creates_empty_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pop_chars.txt");
        let lines = write_entries(&path, Vec::new(), WriteOptions::default()).unwrap();
        assert_eq!(lines, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
