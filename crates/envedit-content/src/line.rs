//! Line and entry types

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::format;

/// Pattern every entry key must match
pub static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Check whether `key` is a valid entry key.
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// Reject keys that do not match [`KEY_PATTERN`].
pub fn validate_key(key: &str) -> Result<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(Error::InvalidKey {
            key: key.to_string(),
        })
    }
}

/// A parsed `KEY=value` pair.
///
/// `value` is always the unquoted, unescaped string. Typed interpretation is
/// left to [`crate::TypedValue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
    /// Inline comment text without the leading `#`
    pub comment: Option<String>,
    /// Whether the line was written as `export KEY=value`
    #[serde(default)]
    pub export: bool,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: None,
            export: false,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Render this entry as a single line, quoting the value if needed.
    pub fn render(&self) -> String {
        format::render_entry(self)
    }
}

/// One line of an env file.
///
/// Every variant remembers the text it was parsed from. An `Entry` whose
/// `raw` is `None` was created or changed in memory and is rendered from its
/// fields instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Empty or whitespace-only line
    Blank { raw: String },
    /// Line whose first non-blank character is `#`
    Comment { raw: String },
    /// Key/value line
    Entry { entry: Entry, raw: Option<String> },
    /// Line that is neither of the above, kept verbatim
    Passthrough { raw: String },
}

impl Line {
    pub fn blank() -> Self {
        Self::Blank { raw: String::new() }
    }

    /// A comment line; `# ` is prepended unless `text` already starts with `#`.
    pub fn comment(text: &str) -> Self {
        let text = text.replace(['\r', '\n'], " ");
        let raw = if text.trim_start().starts_with('#') {
            text
        } else if text.is_empty() {
            "#".to_string()
        } else {
            format!("# {text}")
        };
        Self::Comment { raw }
    }

    pub fn entry(entry: Entry) -> Self {
        Self::Entry { entry, raw: None }
    }

    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            Self::Entry { entry, .. } => Some(entry),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.as_entry().map(|e| e.key.as_str())
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, Self::Entry { .. })
    }

    /// Whether this line still carries its source text unchanged.
    pub fn is_verbatim(&self) -> bool {
        !matches!(self, Self::Entry { raw: None, .. })
    }

    /// Text to emit for this line, without a line terminator.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Blank { raw } | Self::Comment { raw } | Self::Passthrough { raw } => {
                Cow::Borrowed(raw)
            }
            Self::Entry { raw: Some(raw), .. } => Cow::Borrowed(raw),
            Self::Entry { entry, raw: None } => Cow::Owned(entry.render()),
        }
    }
}
