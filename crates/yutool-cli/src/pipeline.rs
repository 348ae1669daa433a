//! Export pipeline: release → text exports → rendered documents.
//!
//! Stages run strictly in order. Every text export for every variant is
//! flushed before the first template is rendered, since rendering reads the
//! exports back from the target directory.

use std::collections::{BTreeSet, HashSet};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::{debug, info, info_span, warn};

use yutool_ingest::{
    DictKind, OpenedRelease, RootKeyStrategy, discover_variants, open_release, read_root_csv,
    read_roots, read_schema_name, read_shortcuts, resolve_dictionary,
};
use yutool_model::{Category, CodeEntry, MethodIdentity, parse_archive_name};
use yutool_output::{ExportedFile, ensure_dir, write_category};
use yutool_template::{
    RenderOptions, TemplateError, discover_template_variants, locate_template, render_template,
    update_template_file,
};

use crate::types::{
    DictionaryStatus, DocumentSummary, ExportResult, InspectReport, VariantExport,
};

/// Environment variable listing template directories (platform path list).
pub const TEMPLATE_DIR_ENV_VAR: &str = "YUTOOL_TEMPLATE_DIR";

/// Default output directory of `export`.
pub const DEFAULT_TARGET_DIR: &str = "export";

/// Everything one export run needs.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Release archive (`.zip`) or unpacked release directory.
    pub source: PathBuf,
    pub target_dir: PathBuf,
    /// Two-column CSV replacing the YAML root dictionary.
    pub root_csv: Option<PathBuf>,
    /// Write the bumped `config_version` back into each template used.
    pub update_template: bool,
    pub method: Option<String>,
    pub variant: Option<String>,
    pub release_version: Option<String>,
    /// Template search path, first directory first.
    pub template_dirs: Vec<PathBuf>,
    pub skip_template: bool,
    pub root_key: RootKeyStrategy,
    /// Date the config version bump is computed against.
    pub today: NaiveDate,
}

impl ExportOptions {
    pub fn new(
        source: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
        today: NaiveDate,
    ) -> Self {
        Self {
            source: source.into(),
            target_dir: target_dir.into(),
            root_csv: None,
            update_template: false,
            method: None,
            variant: None,
            release_version: None,
            template_dirs: Vec::new(),
            skip_template: false,
            root_key: RootKeyStrategy::default(),
            today,
        }
    }
}

/// Template search path.
///
/// Resolution order:
/// 1. directories given explicitly
/// 2. `YUTOOL_TEMPLATE_DIR`
/// 3. the executable's directory, then the current directory
pub fn template_search_dirs(explicit: &[PathBuf]) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }
    if let Some(value) = env::var_os(TEMPLATE_DIR_ENV_VAR).filter(|v| !v.is_empty()) {
        return env::split_paths(&value).collect();
    }
    let mut dirs = Vec::new();
    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    if let Ok(cwd) = env::current_dir()
        && !dirs.contains(&cwd)
    {
        dirs.push(cwd);
    }
    dirs
}

/// Method identity: command line first, then the archive name, then the
/// schema declared by the release.
pub fn resolve_identity(
    release: &OpenedRelease,
    method: Option<&str>,
    variant: Option<&str>,
    release_version: Option<&str>,
) -> Result<MethodIdentity> {
    let base_name = match method {
        Some(name) if name.trim().is_empty() => bail!("method name cannot be empty"),
        Some(name) => name.trim().to_string(),
        None => {
            let config = release.layout.custom_config();
            read_schema_name(&config)
                .with_context(|| format!("read schema name from {}", config.display()))?
        }
    };
    let from_archive = release
        .archive
        .as_deref()
        .map(|archive| parse_archive_name(archive, &base_name))
        .unwrap_or_default();
    Ok(MethodIdentity::new(base_name)
        .with_variant(variant.map(str::to_string).or(from_archive.variant))
        .with_release_version(
            release_version
                .map(str::to_string)
                .or(from_archive.release_version),
        ))
}

/// Variants exported by one run: the requested one, or the base method plus
/// every variant found among the dictionaries and templates.
fn run_variants(
    release: &OpenedRelease,
    identity: &MethodIdentity,
    template_dirs: &[PathBuf],
    skip_template: bool,
) -> Result<Vec<Option<String>>> {
    if let Some(variant) = identity.variant() {
        return Ok(vec![Some(variant.to_string())]);
    }
    let dict_dir = &release.layout.dictionary_dir;
    let mut found = BTreeSet::new();
    for kind in [DictKind::Quick, DictKind::Pop] {
        found.extend(
            discover_variants(dict_dir, &identity.base_name, &kind.file_suffix())
                .with_context(|| format!("scan {}", dict_dir.display()))?,
        );
    }
    if !skip_template {
        found.extend(
            discover_template_variants(template_dirs, &identity.base_name)
                .context("scan template directories")?,
        );
    }
    debug!(variants = ?found, "variants discovered");
    let mut variants = vec![None];
    variants.extend(found.into_iter().map(Some));
    Ok(variants)
}

fn root_entries(
    release: &OpenedRelease,
    identity: &MethodIdentity,
    options: &ExportOptions,
    csv_roots: Option<&Vec<CodeEntry>>,
) -> Result<Vec<CodeEntry>> {
    if let Some(entries) = csv_roots {
        return Ok(entries.clone());
    }
    let dict_dir = &release.layout.dictionary_dir;
    let file = resolve_dictionary(
        dict_dir,
        &identity.base_name,
        identity.variant(),
        DictKind::Roots,
    )?;
    let parsed = read_roots(&file.path, options.root_key)
        .with_context(|| format!("read roots from {}", file.path.display()))?;
    debug!(
        path = %file.path.display(),
        lines = parsed.lines,
        entries = parsed.entries.len(),
        "roots parsed"
    );
    Ok(parsed.entries)
}

/// Writes the text exports of one variant into the target directory.
fn export_texts(
    release: &OpenedRelease,
    identity: &MethodIdentity,
    options: &ExportOptions,
    csv_roots: Option<&Vec<CodeEntry>>,
    warnings: &mut Vec<String>,
) -> Result<VariantExport> {
    let target = &options.target_dir;
    let variant = identity.variant();
    let dict_dir = &release.layout.dictionary_dir;
    let mut files: Vec<ExportedFile> = Vec::new();

    let roots = root_entries(release, identity, options, csv_roots)?;
    files.push(write_category(target, Category::Roots, variant, roots).context("write roots")?);

    let quick = resolve_dictionary(dict_dir, &identity.base_name, variant, DictKind::Quick)?;
    let split = read_shortcuts(&quick.path)
        .with_context(|| format!("read quick words from {}", quick.path.display()))?;
    files.push(
        write_category(target, Category::QuickWords, variant, split.words)
            .context("write quick words")?,
    );
    files.push(
        write_category(target, Category::QuickChars, variant, split.chars)
            .context("write quick chars")?,
    );

    match resolve_dictionary(dict_dir, &identity.base_name, variant, DictKind::Pop) {
        Ok(pop) => {
            let split = read_shortcuts(&pop.path)
                .with_context(|| format!("read pop words from {}", pop.path.display()))?;
            files.push(
                write_category(target, Category::PopWords, variant, split.words)
                    .context("write pop words")?,
            );
            files.push(
                write_category(target, Category::PopChars, variant, split.chars)
                    .context("write pop chars")?,
            );
        }
        Err(error) if error.is_not_found() => {
            warn!(method = %identity.qualified_name(), "pop dictionary not found; skipped");
            warnings.push(format!(
                "pop words skipped for {}: {error}",
                identity.qualified_name()
            ));
        }
        Err(error) => return Err(error).context("resolve pop dictionary"),
    }

    Ok(VariantExport {
        variant: variant.map(str::to_string),
        files,
    })
}

/// Runs the whole export. The scratch directory of an archive source is
/// removed when this returns, on success and on error alike.
pub fn run_export(options: &ExportOptions) -> Result<ExportResult> {
    let release = open_release(&options.source)
        .with_context(|| format!("open release {}", options.source.display()))?;
    let identity = resolve_identity(
        &release,
        options.method.as_deref(),
        options.variant.as_deref(),
        options.release_version.as_deref(),
    )?;
    let export_span = info_span!("export", method = %identity);
    let _export_guard = export_span.enter();
    info!(
        source = %options.source.display(),
        files_extracted = release.files_extracted,
        "release opened"
    );

    ensure_dir(&options.target_dir).context("prepare target directory")?;
    let template_dirs = template_search_dirs(&options.template_dirs);
    let variants = run_variants(&release, &identity, &template_dirs, options.skip_template)?;

    let csv_roots = options
        .root_csv
        .as_deref()
        .map(|path| {
            read_root_csv(path).with_context(|| format!("read root csv {}", path.display()))
        })
        .transpose()?;

    let mut warnings = Vec::new();
    let export_start = Instant::now();
    let mut exports = Vec::with_capacity(variants.len());
    for variant in &variants {
        let variant_identity = identity.for_variant(variant.as_deref());
        exports.push(export_texts(
            &release,
            &variant_identity,
            options,
            csv_roots.as_ref(),
            &mut warnings,
        )?);
    }
    let lines: usize = exports
        .iter()
        .flat_map(|e| &e.files)
        .map(|f| f.lines)
        .sum();
    info!(
        variants = exports.len(),
        lines,
        duration_ms = export_start.elapsed().as_millis(),
        "text exports complete"
    );

    let documents = if options.skip_template {
        Vec::new()
    } else {
        render_documents(options, &identity, &variants, &template_dirs, &mut warnings)?
    };

    Ok(ExportResult {
        identity,
        target_dir: options.target_dir.clone(),
        exports,
        documents,
        warnings,
    })
}

fn render_documents(
    options: &ExportOptions,
    identity: &MethodIdentity,
    variants: &[Option<String>],
    template_dirs: &[PathBuf],
    warnings: &mut Vec<String>,
) -> Result<Vec<DocumentSummary>> {
    let render_start = Instant::now();
    let mut outcomes = Vec::with_capacity(variants.len());
    for variant in variants {
        let variant_identity = identity.for_variant(variant.as_deref());
        let template = match locate_template(template_dirs, &variant_identity) {
            Ok(template) => template,
            Err(error @ TemplateError::NotFound { .. }) => {
                warn!(
                    method = %variant_identity.qualified_name(),
                    "template not found; render skipped"
                );
                warnings.push(format!("render skipped: {error}"));
                continue;
            }
            Err(error) => return Err(error.into()),
        };
        let render_options = RenderOptions {
            export_dir: &options.target_dir,
            identity: &variant_identity,
            today: options.today,
        };
        let outcome = render_template(&template.path, &render_options)
            .with_context(|| format!("render {}", template.path.display()))?;
        for category in &outcome.missing_categories {
            warnings.push(format!(
                "{}: no '{category}' export found; items left empty",
                variant_identity.qualified_name()
            ));
        }
        outcomes.push((variant.clone(), outcome));
    }

    // Renders above all read unpatched tokens; each template is patched once.
    let mut patched: HashSet<PathBuf> = HashSet::new();
    let mut documents = Vec::with_capacity(outcomes.len());
    for (variant, outcome) in outcomes {
        let template_updated = if options.update_template
            && patched.insert(outcome.template.clone())
        {
            let updated = update_template_file(
                &outcome.template,
                &outcome.template_source,
                &outcome.config_version.to_string(),
            )?;
            if !updated {
                warnings.push(format!(
                    "{}: no quoted config_version to update",
                    outcome.template.display()
                ));
            }
            updated
        } else {
            false
        };
        documents.push(DocumentSummary {
            variant,
            template: outcome.template,
            output: outcome.output,
            config_version: outcome.config_version.to_string(),
            items: outcome.item_counts.iter().sum(),
            template_updated,
        });
    }
    info!(
        documents = documents.len(),
        duration_ms = render_start.elapsed().as_millis(),
        "render complete"
    );
    Ok(documents)
}

/// Resolves identity and dictionary files without writing anything.
pub fn inspect_release(
    source: &Path,
    method: Option<&str>,
    variant: Option<&str>,
) -> Result<InspectReport> {
    let release =
        open_release(source).with_context(|| format!("open release {}", source.display()))?;
    let identity = resolve_identity(&release, method, variant, None)?;
    let variants = run_variants(&release, &identity, &[], true)?;

    let dict_dir = release.layout.dictionary_dir.clone();
    let mut dictionaries = Vec::new();
    for variant in &variants {
        for kind in DictKind::ALL {
            let resolved =
                match resolve_dictionary(&dict_dir, &identity.base_name, variant.as_deref(), kind) {
                    Ok(file) => Some(file),
                    Err(error) if error.is_not_found() => None,
                    Err(error) => return Err(error.into()),
                };
            dictionaries.push(DictionaryStatus {
                kind,
                variant: variant.clone(),
                resolved,
            });
        }
    }
    Ok(InspectReport {
        identity,
        files_extracted: release.files_extracted,
        variants: variants.into_iter().flatten().collect(),
        dictionaries,
    })
}
