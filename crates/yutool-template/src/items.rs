//! Rebuilds `items` from the text exports named by each rule.

use std::fs;
use std::path::{Path, PathBuf};

use yutool_ingest::resolve_variant_file;
use yutool_model::TextLayout;

use crate::document::{GenerationRule, Items};
use crate::error::{Result, TemplateError};
use crate::filter::RulePipeline;

/// Extension of the writer's text exports.
pub const EXPORT_EXTENSION: &str = "txt";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedItems {
    /// One mapping per rule, in rule order.
    pub items: Vec<Items>,
    /// Category names with no export under either file name.
    pub missing_categories: Vec<String>,
}

/// Adds the entries of one export file to `items`.
fn collect_category(
    path: &Path,
    category: &str,
    pipeline: &RulePipeline,
    items: &mut Items,
) -> Result<usize> {
    let content = fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = TextLayout::for_category(category);
    let mut added = 0;
    for entry in content.lines().filter_map(|line| layout.parse(line)) {
        if let Some(key) = pipeline.apply(&entry.code) {
            items.entry(key).or_default().push(entry.text);
            added += 1;
        }
    }
    Ok(added)
}

/// Evaluates `rules` against the exports in `export_dir` for `variant`.
pub fn generate_items(
    rules: &[GenerationRule],
    export_dir: &Path,
    variant: Option<&str>,
) -> Result<GeneratedItems> {
    let dirs: [PathBuf; 1] = [export_dir.to_path_buf()];
    let mut generated = GeneratedItems::default();
    for rule in rules {
        let pipeline = RulePipeline::from_rule(rule);
        let mut items = Items::new();
        for category in &rule.category {
            let Some(file) = resolve_variant_file(&dirs, category, variant, EXPORT_EXTENSION)
            else {
                tracing::warn!(
                    category = %category,
                    dir = %export_dir.display(),
                    "no export for category; skipped"
                );
                if !generated.missing_categories.contains(category) {
                    generated.missing_categories.push(category.clone());
                }
                continue;
            };
            let added = collect_category(&file.path, category, &pipeline, &mut items)?;
            tracing::debug!(
                category = %category,
                path = %file.path.display(),
                added,
                "category read"
            );
        }
        generated.items.push(items);
    }
    Ok(generated)
}
