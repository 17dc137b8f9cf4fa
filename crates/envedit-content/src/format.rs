//! Rendering entries and documents back to text

use std::borrow::Cow;

use crate::line::{Entry, Line};

/// Line terminator used when joining lines
pub const LINE_ENDING: char = '\n';

const BOM: char = '\u{feff}';

/// Whether `value` has to be wrapped in double quotes to survive a re-parse.
pub fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '#' | '=' | '"' | '\''))
}

/// Wrap `value` in double quotes, escaping `\`, `"` and line breaks.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// Value as it should appear after `=`.
pub fn render_value(value: &str) -> Cow<'_, str> {
    if needs_quoting(value) {
        Cow::Owned(quote(value))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render `[export ]KEY=value[ # comment]`.
pub fn render_entry(entry: &Entry) -> String {
    let mut line = String::new();
    if entry.export {
        line.push_str("export ");
    }
    line.push_str(&entry.key);
    line.push('=');
    line.push_str(&render_value(&entry.value));
    if let Some(comment) = entry.comment.as_deref().filter(|c| !c.is_empty()) {
        line.push_str(" # ");
        line.push_str(comment);
    }
    line
}

/// Join rendered lines, restoring the byte-order mark and final newline.
///
/// A document without lines renders as nothing but its byte-order mark.
pub fn render_lines(lines: &[Line], bom: bool, trailing_newline: bool) -> String {
    let mut out = String::new();
    if bom {
        out.push(BOM);
    }
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push(LINE_ENDING);
        }
        out.push_str(&line.render());
    }
    if trailing_newline && !lines.is_empty() {
        out.push(LINE_ENDING);
    }
    out
}

/// Strip a leading byte-order mark, reporting whether one was present.
pub(crate) fn strip_bom(source: &str) -> (&str, bool) {
    match source.strip_prefix(BOM) {
        Some(rest) => (rest, true),
        None => (source, false),
    }
}
