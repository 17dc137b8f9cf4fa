//! Structure-preserving `.env` parsing and formatting
//!
//! A [`Document`] keeps every line of the source, including comments, blank
//! lines and malformed content, so that formatting an unmodified document
//! reproduces the input byte for byte.

pub mod document;
pub mod error;
pub mod format;
pub mod line;
pub mod parser;
pub mod typed;

pub use document::{Document, Keys, SetOutcome};
pub use error::{Error, Result};
pub use line::{Entry, Line, is_valid_key};
pub use typed::TypedValue;
