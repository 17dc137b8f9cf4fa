//! Env document: ordered lines with key-level editing

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::format;
use crate::line::{Entry, Line, validate_key};
use crate::parser;

/// Result of [`Document::set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The key existed and its first occurrence was replaced in place
    Updated,
    /// The key was appended as a new line
    Inserted,
}

/// In-memory representation of a whole env file.
///
/// When a key appears more than once, the first occurrence is the one read
/// and edited; later duplicates are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    trailing_newline: bool,
    bom: bool,
    modified: bool,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse env text. Never fails: malformed lines are kept as passthrough.
    pub fn parse(source: &str) -> Self {
        let (source, bom) = format::strip_bom(source);
        let (body, trailing_newline) = match source.strip_suffix(format::LINE_ENDING) {
            Some(body) => (body, true),
            None => (source, false),
        };

        let lines = if body.is_empty() && !trailing_newline {
            Vec::new()
        } else {
            body.split(format::LINE_ENDING).map(parser::parse_line).collect()
        };

        Self {
            lines,
            trailing_newline,
            bom,
            modified: false,
        }
    }

    /// Decode and parse raw file bytes.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the bytes are not valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let source = std::str::from_utf8(bytes)
            .map_err(|e| Error::parse(e.valid_up_to(), "content is not valid UTF-8"))?;
        Ok(Self::parse(source))
    }

    /// Render back to text. Untouched lines are emitted exactly as parsed.
    pub fn render(&self) -> String {
        format::render_lines(&self.lines, self.bom, self.trailing_newline)
    }

    /// All lines in order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether any edit was applied since parsing.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Every entry line in order, duplicates included.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.lines.iter().filter_map(Line::as_entry)
    }

    /// `(key, value)` pairs in document order, first occurrence per key.
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            lines: self.lines.iter(),
            seen: HashSet::new(),
        }
    }

    /// First entry for `key`.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries().find(|e| e.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key` to `value`.
    ///
    /// An existing key keeps its position and `export` prefix. `comment`
    /// replaces the inline comment when given (an empty string clears it);
    /// `None` leaves the existing comment alone.
    pub fn set(&mut self, key: &str, value: &str, comment: Option<&str>) -> Result<SetOutcome> {
        validate_key(key)?;
        let comment = comment.map(|c| c.replace(['\r', '\n'], " ").trim().to_string());
        self.modified = true;

        let existing = self.lines.iter_mut().find(|l| l.key() == Some(key));
        if let Some(Line::Entry { entry, raw }) = existing {
            entry.value = value.to_string();
            if let Some(comment) = comment {
                entry.comment = (!comment.is_empty()).then_some(comment);
            }
            *raw = None;
            return Ok(SetOutcome::Updated);
        }

        let mut entry = Entry::new(key, value);
        entry.comment = comment.filter(|c| !c.is_empty());
        self.push(Line::entry(entry));
        Ok(SetOutcome::Inserted)
    }

    /// Remove every entry line for `key`, returning how many were removed.
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| l.key() != Some(key));
        let removed = before - self.lines.len();
        if removed > 0 {
            self.modified = true;
        }
        removed
    }

    /// Append a comment line.
    pub fn add_comment(&mut self, text: &str) {
        self.modified = true;
        self.push(Line::comment(text));
    }

    /// Append a blank line.
    pub fn add_blank(&mut self) {
        self.modified = true;
        self.push(Line::blank());
    }

    fn push(&mut self, line: Line) {
        if self.lines.is_empty() {
            self.trailing_newline = true;
        }
        self.lines.push(line);
    }
}

impl std::str::FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::parse(s))
    }
}

/// Iterator over `(key, value)` pairs, see [`Document::keys`].
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    lines: std::slice::Iter<'a, Line>,
    seen: HashSet<&'a str>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if let Some(entry) = line.as_entry()
                && self.seen.insert(entry.key.as_str())
            {
                return Some((entry.key.as_str(), entry.value.as_str()));
            }
        }
        None
    }
}
