//! In-place rewrite of the `config_version` token inside a template source.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TemplateError};

/// `config_version: "<value>"` as a whole key, optionally quoted, with the
/// value in a matching pair of either quote style.
static CONFIG_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(?:^|[^\w$])(["']?config_version["']?\s*:\s*)("[^"\n]*"|'[^'\n]*')"#)
        .expect("Invalid config_version regex")
});

/// Whether byte offset `pos` of `source` lies inside a comment or a string
/// literal. Quotes are tracked so `"http://"` does not open a comment.
fn inside_comment_or_string(source: &str, pos: usize) -> bool {
    let mut chars = source[..pos].chars().peekable();
    let mut quote: Option<char> = None;
    let mut line_comment = false;
    let mut block_comment = false;
    while let Some(c) = chars.next() {
        if line_comment {
            line_comment = c != '\n';
        } else if block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                block_comment = false;
            }
        } else if let Some(q) = quote {
            if c == '\\' {
                chars.next();
            } else if c == q || c == '\n' {
                quote = None;
            }
        } else {
            match c {
                '"' | '\'' => quote = Some(c),
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    line_comment = true;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    block_comment = true;
                }
                _ => {}
            }
        }
    }
    line_comment || block_comment || quote.is_some()
}

/// Replaces every quoted `config_version` value in `source` outside comments
/// and strings.
///
/// Returns `None` when the source has no such field. Everything outside the
/// quoted values, comments and formatting included, is left as is.
pub fn patch_config_version(source: &str, version: &str) -> Option<String> {
    let mut patched = String::with_capacity(source.len() + version.len());
    let mut last = 0;
    let mut replaced = 0;
    for caps in CONFIG_VERSION_REGEX.captures_iter(source) {
        let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if inside_comment_or_string(source, key.start()) {
            continue;
        }
        let quote = &value.as_str()[..1];
        patched.push_str(&source[last..value.start()]);
        patched.push_str(quote);
        patched.push_str(version);
        patched.push_str(quote);
        last = value.end();
        replaced += 1;
    }
    if replaced == 0 {
        return None;
    }
    patched.push_str(&source[last..]);
    Some(patched)
}

/// Patches the template file at `path` on disk. Returns whether it was written.
pub fn update_template_file(path: &Path, source: &str, version: &str) -> Result<bool> {
    let Some(patched) = patch_config_version(source, version) else {
        tracing::warn!(
            path = %path.display(),
            "template has no quoted config_version; not updated"
        );
        return Ok(false);
    };
    fs::write(path, patched).map_err(|source| TemplateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), version, "template config_version updated");
    Ok(true)
}
