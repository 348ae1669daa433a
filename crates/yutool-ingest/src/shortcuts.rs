//! Quick and pop dictionary parsing.
//!
//! Both files list `<text> <code>` pairs. Only pairs with an all-letter code
//! and at least one non-ASCII character in the text are kept; they are split
//! into multi-character words and single characters.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use yutool_model::CodeEntry;

use crate::error::{IngestError, Result};

/// Which export a kept pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutClass {
    Word,
    Char,
}

/// Pairs of one quick or pop dictionary, split by class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutSplit {
    pub words: Vec<CodeEntry>,
    pub chars: Vec<CodeEntry>,
}

/// Classifies one dictionary line, `None` when the line is skipped.
pub fn classify_line(line: &str) -> Option<(ShortcutClass, CodeEntry)> {
    let mut fields = line.split_whitespace();
    let text = fields.next()?;
    let code = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    if !is_letter_code(code) || text.is_ascii() {
        return None;
    }
    let class = if text.chars().count() > 1 {
        ShortcutClass::Word
    } else {
        ShortcutClass::Char
    };
    Some((class, CodeEntry::new(code, text)))
}

fn is_letter_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn parse_shortcuts<R: BufRead>(reader: R) -> io::Result<ShortcutSplit> {
    let mut split = ShortcutSplit::default();
    for line in reader.lines() {
        let line = line?;
        match classify_line(&line) {
            Some((ShortcutClass::Word, entry)) => split.words.push(entry),
            Some((ShortcutClass::Char, entry)) => split.chars.push(entry),
            None => {}
        }
    }
    Ok(split)
}

/// Reads and parses the quick or pop dictionary at `path`.
pub fn read_shortcuts(path: &Path) -> Result<ShortcutSplit> {
    let file = File::open(path).map_err(|e| IngestError::read(path, e))?;
    parse_shortcuts(BufReader::new(file)).map_err(|e| IngestError::read(path, e))
}
