//! Template lookup and rendering of the final JSON5 document.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use yutool_ingest::{ResolvedFile, discover_variants, resolve_variant_file, variant_file_candidates};
use yutool_model::{ConfigVersion, MethodIdentity};

use crate::document::{Items, RenderedDocument, TemplateDocument, load_template};
use crate::error::{Result, TemplateError};
use crate::items::generate_items;

/// Suffix of template files: `<method>[_<variant>].template.json5`.
pub const TEMPLATE_SUFFIX: &str = "template.json5";

/// Finds the template for `identity` on `search_dirs`.
pub fn locate_template(search_dirs: &[PathBuf], identity: &MethodIdentity) -> Result<ResolvedFile> {
    resolve_variant_file(
        search_dirs,
        &identity.base_name,
        identity.variant(),
        TEMPLATE_SUFFIX,
    )
    .ok_or_else(|| {
        let names =
            variant_file_candidates(&identity.base_name, identity.variant(), TEMPLATE_SUFFIX);
        let dirs = search_dirs
            .iter()
            .map(|dir| dir.display().to_string())
            .collect::<Vec<_>>();
        TemplateError::NotFound {
            method: identity.qualified_name(),
            searched: format!("{} in [{}]", names.join(" or "), dirs.join(", ")),
        }
    })
}

/// Variants with their own template in any of `search_dirs`.
pub fn discover_template_variants(search_dirs: &[PathBuf], base: &str) -> Result<BTreeSet<String>> {
    let mut variants = BTreeSet::new();
    for dir in search_dirs.iter().filter(|dir| dir.is_dir()) {
        variants.extend(discover_variants(dir, base, TEMPLATE_SUFFIX)?);
    }
    Ok(variants)
}

/// Inputs of one render.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    /// Directory holding the text exports; the document is written here too.
    pub export_dir: &'a Path,
    pub identity: &'a MethodIdentity,
    /// Date the version bump is computed against.
    pub today: NaiveDate,
}

/// Result of [`render_template`].
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub template: PathBuf,
    /// Template source as read, for an in-place version update.
    pub template_source: String,
    pub output: PathBuf,
    pub config_version: ConfigVersion,
    /// Entry count of each items mapping.
    pub item_counts: Vec<usize>,
    pub missing_categories: Vec<String>,
}

/// Builds the rendered document from a parsed template.
pub fn render_document(
    template: TemplateDocument,
    options: &RenderOptions<'_>,
) -> Result<(RenderedDocument, ConfigVersion, Vec<String>)> {
    let config_version = ConfigVersion::parse(&template.config_version).next(options.today);
    let generated = generate_items(
        &template.items_meta,
        options.export_dir,
        options.identity.variant(),
    )?;
    let document = RenderedDocument::assemble(
        template,
        config_version.to_string(),
        options.identity.release_version.as_deref(),
        generated.items,
    );
    Ok((document, config_version, generated.missing_categories))
}

/// Renders the template at `template_path` into
/// `<export_dir>/<method>[_<variant>][_<version>].json5`.
///
/// The template file itself is not modified; see
/// [`update_template_file`](crate::update_template_file).
pub fn render_template(template_path: &Path, options: &RenderOptions<'_>) -> Result<RenderOutcome> {
    let (template_source, template) = load_template(template_path)?;
    let (document, config_version, missing_categories) = render_document(template, options)?;

    let output = options
        .export_dir
        .join(options.identity.document_file_name());
    let json = document.to_json(&output)?;
    fs::write(&output, json).map_err(|source| TemplateError::Write {
        path: output.clone(),
        source,
    })?;

    let item_counts = document.items.iter().map(Items::len).collect();
    tracing::info!(
        template = %template_path.display(),
        output = %output.display(),
        config_version = %config_version,
        "document rendered"
    );
    Ok(RenderOutcome {
        template: template_path.to_path_buf(),
        template_source,
        output,
        config_version,
        item_counts,
        missing_categories,
    })
}
