use std::path::PathBuf;

use yutool_ingest::{DictKind, ResolvedFile};
use yutool_model::MethodIdentity;
use yutool_output::ExportedFile;

/// Outcome of one `export` run.
#[derive(Debug)]
pub struct ExportResult {
    pub identity: MethodIdentity,
    pub target_dir: PathBuf,
    pub exports: Vec<VariantExport>,
    pub documents: Vec<DocumentSummary>,
    /// Non-fatal conditions, printed after the summary.
    pub warnings: Vec<String>,
}

impl ExportResult {
    pub fn total_lines(&self) -> usize {
        self.exports
            .iter()
            .flat_map(|export| &export.files)
            .map(|file| file.lines)
            .sum()
    }
}

/// Text exports written for one variant (or the base method).
#[derive(Debug)]
pub struct VariantExport {
    pub variant: Option<String>,
    pub files: Vec<ExportedFile>,
}

#[derive(Debug)]
pub struct DocumentSummary {
    pub variant: Option<String>,
    pub template: PathBuf,
    pub output: PathBuf,
    pub config_version: String,
    pub items: usize,
    pub template_updated: bool,
}

/// What `inspect` found in a release.
#[derive(Debug)]
pub struct InspectReport {
    pub identity: MethodIdentity,
    pub files_extracted: usize,
    pub variants: Vec<String>,
    pub dictionaries: Vec<DictionaryStatus>,
}

#[derive(Debug)]
pub struct DictionaryStatus {
    pub kind: DictKind,
    pub variant: Option<String>,
    pub resolved: Option<ResolvedFile>,
}
