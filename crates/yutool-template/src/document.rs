//! Template and rendered document shapes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TemplateError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub name: String,
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub base64: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBinding {
    pub key: String,
    pub command: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tab {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub beg: i64,
    pub end: i64,
}

/// One `items_meta` entry: which exports feed an items mapping and how
/// their codes are filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRule {
    /// Export names (`roots`, `quick_words`, ...) read in order.
    pub category: Vec<String>,
    /// Codes must start with one of these (when non-empty).
    pub prefix: Vec<String>,
    /// Codes must end with one of these (when non-empty).
    pub suffix: Vec<String>,
    /// Minimum code length in characters; 0 or less for none.
    pub min_length: i64,
    /// Maximum code length in characters; 0 or less for none.
    pub max_length: i64,
    /// Appended to every accepted code.
    pub append_suffix: Option<String>,
}

impl GenerationRule {
    pub fn append(&self) -> Option<&str> {
        self.append_suffix.as_deref().filter(|s| !s.is_empty())
    }
}

/// A template as read from `<method>[_<variant>].template.json5`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateDocument {
    pub name: String,
    pub version: String,
    pub config_version: String,
    pub fonts: Vec<Font>,
    pub key_bindings: Vec<KeyBinding>,
    pub items_meta: Vec<GenerationRule>,
    pub tabs: Vec<Tab>,
    pub help: String,
}

impl TemplateDocument {
    pub fn parse(source: &str, path: &Path) -> Result<Self> {
        json5::from_str(source).map_err(|source| TemplateError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reads a template, returning its raw source alongside the parsed document.
pub fn load_template(path: &Path) -> Result<(String, TemplateDocument)> {
    let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = TemplateDocument::parse(&source, path)?;
    Ok((source, document))
}

/// Items mapping: code → texts in read order.
pub type Items = BTreeMap<String, Vec<String>>;

/// The document written for the practice application. Field order is the
/// serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub name: String,
    pub version: String,
    pub config_version: String,
    pub fonts: Vec<Font>,
    pub key_bindings: Vec<KeyBinding>,
    pub items: Vec<Items>,
    pub tabs: Vec<Tab>,
    pub help: String,
}

impl RenderedDocument {
    /// Replaces the template's rules with resolved items.
    ///
    /// `release_version` takes precedence over the template's own version.
    pub fn assemble(
        template: TemplateDocument,
        config_version: String,
        release_version: Option<&str>,
        items: Vec<Items>,
    ) -> Self {
        let version = release_version
            .filter(|v| !v.is_empty())
            .map_or(template.version, str::to_string);
        Self {
            name: template.name,
            version,
            config_version,
            fonts: template.fonts,
            key_bindings: template.key_bindings,
            items,
            tabs: template.tabs,
            help: template.help,
        }
    }

    /// Indented JSON with a trailing newline.
    pub fn to_json(&self, path: &Path) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).map_err(|source| {
            TemplateError::Serialize {
                path: path.to_path_buf(),
                source,
            }
        })?;
        json.push('\n');
        Ok(json)
    }
}
