//! Code/text associations shared by the parsers, the writer and the renderer.

use std::fmt;

/// One code→text association.
///
/// For root entries `code` holds the composite key (key prefix followed by
/// the root code) and `text` a single character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeEntry {
    pub code: String,
    pub text: String,
}

impl CodeEntry {
    pub fn new(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
        }
    }

    /// Length of the code in characters.
    pub fn code_len(&self) -> usize {
        self.code.chars().count()
    }
}

impl fmt::Display for CodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.code, self.text)
    }
}

/// Column order of an exported text file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextLayout {
    /// `<code>\t<text>`
    #[default]
    CodeFirst,
    /// `<text>\t<code>`, used by the roots export.
    TextFirst,
}

impl TextLayout {
    /// Layout used by the text export named `category`.
    pub fn for_category(category: &str) -> Self {
        if category == Category::Roots.stem() {
            Self::TextFirst
        } else {
            Self::CodeFirst
        }
    }

    /// Renders one line (without the trailing newline).
    pub fn format(self, entry: &CodeEntry) -> String {
        match self {
            Self::CodeFirst => format!("{}\t{}", entry.code, entry.text),
            Self::TextFirst => format!("{}\t{}", entry.text, entry.code),
        }
    }

    /// Splits a line back into an entry. Lines that do not have exactly two
    /// whitespace-separated fields are rejected.
    pub fn parse(self, line: &str) -> Option<CodeEntry> {
        let mut fields = line.split_whitespace();
        let first = fields.next()?;
        let second = fields.next()?;
        if fields.next().is_some() {
            return None;
        }
        Some(match self {
            Self::CodeFirst => CodeEntry::new(first, second),
            Self::TextFirst => CodeEntry::new(second, first),
        })
    }
}

/// Text exports written by the pipeline and read back by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Roots,
    QuickWords,
    QuickChars,
    PopWords,
    PopChars,
}

impl Category {
    /// File stem of the export, also the name templates refer to.
    pub const fn stem(self) -> &'static str {
        match self {
            Self::Roots => "roots",
            Self::QuickWords => "quick_words",
            Self::QuickChars => "quick_chars",
            Self::PopWords => "pop_words",
            Self::PopChars => "pop_chars",
        }
    }

    pub fn layout(self) -> TextLayout {
        TextLayout::for_category(self.stem())
    }

    /// Roots keep every mapping; shortcut exports keep the first text per code.
    pub const fn deduplicates(self) -> bool {
        !matches!(self, Self::Roots)
    }

    pub fn file_name(self, variant: Option<&str>) -> String {
        category_file_name(self.stem(), variant)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// `<stem>[_<variant>].txt`
pub fn category_file_name(stem: &str, variant: Option<&str>) -> String {
    match variant {
        Some(variant) => format!("{stem}_{variant}.txt"),
        None => format!("{stem}.txt"),
    }
}
