//! Opt-in typed interpretation of raw values
//!
//! Values are stored as strings. Consumers that want `true`/`false`/`null`
//! as native values ask for a [`TypedValue`] at read time.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Null,
    Bool(bool),
    String(String),
}

impl TypedValue {
    /// Cast a raw value. Only the lowercase and uppercase spellings of
    /// `true`, `false` and `null` are recognised.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "null" | "NULL" => Self::Null,
            "true" | "TRUE" => Self::Bool(true),
            "false" | "FALSE" => Self::Bool(false),
            other => Self::String(other.to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TypedValue {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}
