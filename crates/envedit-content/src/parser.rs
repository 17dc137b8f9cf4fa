//! Line classification and value parsing
//!
//! Parsing never fails on structure: anything that is not a comment, blank
//! line or well-formed entry becomes [`Line::Passthrough`].

use crate::line::{Entry, Line, is_valid_key};

const EXPORT_KEYWORD: &str = "export";

/// Classify a single line. `raw` must not contain `\n`.
pub fn parse_line(raw: &str) -> Line {
    // CRLF files keep the `\r` in `raw`; it is not part of the content
    let content = raw.strip_suffix('\r').unwrap_or(raw);
    let trimmed = content.trim_start();

    if trimmed.is_empty() {
        return Line::Blank {
            raw: raw.to_string(),
        };
    }
    if trimmed.starts_with('#') {
        return Line::Comment {
            raw: raw.to_string(),
        };
    }

    match parse_entry(content) {
        Some(entry) => Line::Entry {
            entry,
            raw: Some(raw.to_string()),
        },
        None => Line::Passthrough {
            raw: raw.to_string(),
        },
    }
}

/// Parse `[export ]KEY=value[ # comment]`.
fn parse_entry(content: &str) -> Option<Entry> {
    let (left, right) = content.split_once('=')?;
    let left = left.trim();

    let (key, export) = match left.strip_prefix(EXPORT_KEYWORD) {
        Some(rest) if rest.starts_with(char::is_whitespace) => (rest.trim_start(), true),
        _ => (left, false),
    };
    if !is_valid_key(key) {
        return None;
    }

    let (value, comment) = parse_value(right);
    Some(Entry {
        key: key.to_string(),
        value,
        comment,
        export,
    })
}

/// Split the text after `=` into the unquoted value and an inline comment.
pub fn parse_value(text: &str) -> (String, Option<String>) {
    let text = text.trim_start();

    let quoted = match text.chars().next() {
        Some('"') => parse_double_quoted(&text[1..]),
        Some('\'') => text[1..]
            .find('\'')
            .map(|end| (text[1..1 + end].to_string(), &text[2 + end..])),
        _ => None,
    };

    if let Some((value, rest)) = quoted {
        let rest = rest.trim_start();
        if rest.is_empty() {
            return (value, None);
        }
        if let Some(comment) = rest.strip_prefix('#') {
            return (value, normalize_comment(comment));
        }
        // Text after the closing quote: read the whole thing literally
    }

    parse_unquoted(text)
}

/// Scan a double-quoted body up to the closing quote, resolving escapes.
///
/// Returns `None` for an unterminated string.
fn parse_double_quoted(body: &str) -> Option<(String, &str)> {
    let mut value = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Some((value, &body[idx + 1..])),
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, 't')) => value.push('\t'),
                Some((_, '"')) => value.push('"'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                }
                None => value.push('\\'),
            },
            _ => value.push(ch),
        }
    }

    None
}

/// An unquoted value runs up to a `#` that starts the text or follows
/// whitespace.
fn parse_unquoted(text: &str) -> (String, Option<String>) {
    let mut prev_is_space = true;
    for (idx, ch) in text.char_indices() {
        if ch == '#' && prev_is_space {
            let value = text[..idx].trim_end().to_string();
            return (value, normalize_comment(&text[idx + 1..]));
        }
        prev_is_space = ch.is_whitespace();
    }
    (text.trim_end().to_string(), None)
}

fn normalize_comment(comment: &str) -> Option<String> {
    let comment = comment.trim();
    if comment.is_empty() {
        None
    } else {
        Some(comment.to_string())
    }
}
