//! Env file editing with timestamped backups
//!
//! [`Editor`] owns one loaded env [`Document`](envedit_content::Document),
//! exposes key-level edits, and snapshots the saved file into a backup
//! directory managed by [`BackupStore`].
//!
//! # Example
//!
//! ```no_run
//! use envedit_core::{Editor, EditorConfig};
//!
//! let config = EditorConfig::new(".env", "storage/backups");
//! let mut editor = Editor::open(config)?;
//! editor.backup()?;
//! editor.set_key("APP_DEBUG", "false", None)?;
//! editor.save()?;
//! # Ok::<(), envedit_core::Error>(())
//! ```

pub mod backup;
pub mod config;
pub mod editor;
pub mod error;

pub use backup::{BackupInfo, BackupStore, DeleteReport};
pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{Error, Result};

pub use envedit_content::{Document, Entry, SetOutcome, TypedValue};
