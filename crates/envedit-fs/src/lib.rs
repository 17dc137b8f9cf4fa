//! Filesystem helpers for envedit
//!
//! Provides normalized paths, whole-file I/O and format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
